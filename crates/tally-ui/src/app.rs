use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};
use tally_runtime::orchestrator::TallyUpdate;
use tokio::sync::mpsc;

use crate::tally_view::{render_tally_view, render_waiting, TallyViewData};
use crate::themes::Theme;

/// Terminal application driving the live tally screen.
///
/// Owns the terminal lifecycle (raw mode, alternate screen) and redraws
/// whenever a new [`TallyUpdate`] arrives or an input event fires.
pub struct App {
    theme: Theme,
    feed: String,
    should_quit: bool,
    last_update: Option<TallyUpdate>,
}

impl App {
    /// Create a new app with the named theme and a feed label for the header.
    pub fn new(theme_name: &str, feed: String) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            feed,
            should_quit: false,
            last_update: None,
        }
    }

    /// Run the TUI event loop until the user quits or the update channel
    /// closes with no pending updates.
    pub async fn run(mut self, mut rx: mpsc::Receiver<TallyUpdate>) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal, &mut rx).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        rx: &mut mpsc::Receiver<TallyUpdate>,
    ) -> io::Result<()> {
        loop {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            // Drain all pending updates so the frame reflects the latest one.
            loop {
                match rx.try_recv() {
                    Ok(update) => self.apply_update(update),
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => {
                        self.should_quit = true;
                        break;
                    }
                }
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    /// Store the newest update for the next frame.
    pub fn apply_update(&mut self, update: TallyUpdate) {
        self.last_update = Some(update);
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        match &self.last_update {
            Some(update) => {
                let data = self.to_view_data(update);
                render_tally_view(frame, area, &data, &self.theme);
            }
            None => render_waiting(frame, area, &self.feed, &self.theme),
        }
    }

    fn to_view_data(&self, update: &TallyUpdate) -> TallyViewData {
        TallyViewData {
            counts: update.counts,
            allocation: update.allocation,
            total: update.total,
            feed: self.feed.clone(),
            connected: update.connected,
            updates_seen: update.updates_seen,
            last_update: update.received_at.format("%H:%M:%S").to_string(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tally_core::allocator::PercentageAllocator;
    use tally_core::models::VoteCounts;

    fn sample_update(aws: u64, azure: u64, gc: u64) -> TallyUpdate {
        let counts = VoteCounts::new(aws, azure, gc);
        TallyUpdate {
            allocation: PercentageAllocator::allocate(&counts),
            total: counts.total(),
            counts,
            connected: true,
            updates_seen: 1,
            received_at: Utc::now(),
        }
    }

    #[test]
    fn test_new_app_has_no_update() {
        let app = App::new("dark", "127.0.0.1:4000".to_string());
        assert!(app.last_update.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_apply_update_stores_latest() {
        let mut app = App::new("dark", "127.0.0.1:4000".to_string());
        app.apply_update(sample_update(10, 20, 30));
        app.apply_update(sample_update(11, 20, 30));
        let latest = app.last_update.as_ref().unwrap();
        assert_eq!(latest.counts.aws, 11);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new("dark", "x".to_string());
        app.handle_key(KeyCode::Char('x'), KeyModifiers::NONE);
        assert!(!app.should_quit);
        app.handle_key(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(app.should_quit);

        let mut app = App::new("dark", "x".to_string());
        app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_to_view_data_formats_timestamp() {
        let app = App::new("dark", "127.0.0.1:4000".to_string());
        let update = sample_update(60, 30, 10);
        let data = app.to_view_data(&update);
        assert_eq!(data.total, 100);
        assert_eq!(data.feed, "127.0.0.1:4000");
        // HH:MM:SS
        assert_eq!(data.last_update.len(), 8);
        assert_eq!(data.last_update.as_bytes()[2], b':');
    }
}

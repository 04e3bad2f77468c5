use crate::components::header::Header;
use crate::components::percentage_bar::CategoryBar;
use crate::themes::Theme;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tally_core::formatting::format_count;
use tally_core::models::{Category, PercentageAllocation, VoteCounts};

/// Everything the tally screen needs to paint one frame.
#[derive(Debug, Clone)]
pub struct TallyViewData {
    /// Raw vote counts for each category.
    pub counts: VoteCounts,
    /// Integer percentage allocation summing to 100 (or 0 when empty).
    pub allocation: PercentageAllocation,
    /// Total vote count across all categories.
    pub total: u64,
    /// Feed address or replay file shown in the header.
    pub feed: String,
    /// Whether the feed handshake has been seen.
    pub connected: bool,
    /// Number of score updates received so far.
    pub updates_seen: u64,
    /// Wall-clock time of the last update, already formatted.
    pub last_update: String,
}

/// Build the full set of lines for the tally screen.
pub fn build_tally_lines<'a>(data: &'a TallyViewData, theme: &'a Theme) -> Vec<Line<'a>> {
    let mut lines = Header::new(&data.feed, data.connected, theme).to_lines();

    // One bar per category, in fixed display order.
    for category in Category::ALL {
        let bar = CategoryBar::new(
            category,
            data.allocation.get(category),
            data.counts.get(category),
            theme,
        );
        lines.push(bar.to_line());
    }

    lines.push(Line::from(""));

    // Total votes.
    lines.push(Line::from(vec![
        Span::styled("Total votes: ", theme.label),
        Span::styled(format_count(data.total), theme.bold),
    ]));

    // Current leader, if any category holds a non-zero share.
    match data.allocation.leader() {
        Some(leader) => lines.push(Line::from(vec![
            Span::styled("Leading: ", theme.label),
            Span::styled(leader.label(), theme.category_style(leader)),
        ])),
        None => lines.push(Line::from(Span::styled("No votes yet", theme.dim))),
    }

    // Update counters.
    lines.push(Line::from(vec![
        Span::styled("Updates: ", theme.label),
        Span::styled(data.updates_seen.to_string(), theme.value),
        Span::styled("  Last: ", theme.label),
        Span::styled(data.last_update.as_str(), theme.value),
    ]));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Press q to quit", theme.dim)));

    lines
}

/// Render the tally screen into the given frame area.
pub fn render_tally_view(frame: &mut Frame, area: Rect, data: &TallyViewData, theme: &Theme) {
    let lines = build_tally_lines(data, theme);
    frame.render_widget(Paragraph::new(lines), area);
}

/// Render the placeholder shown before the first update arrives.
pub fn render_waiting(frame: &mut Frame, area: Rect, feed: &str, theme: &Theme) {
    let mut lines = Header::new(feed, false, theme).to_lines();
    lines.push(Line::from(Span::styled(
        "Waiting for the first tally update...",
        theme.warning,
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Press q to quit", theme.dim)));
    frame.render_widget(Paragraph::new(lines), area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

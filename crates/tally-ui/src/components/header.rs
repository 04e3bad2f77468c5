use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative sparkle string placed either side of the application title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Tally dashboard header rendering four lines:
///
/// 1. Application title with sparkle decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Feed address and status in `[ addr | status ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Feed address string (e.g. "127.0.0.1:4000" or a replay file name).
    pub feed: &'a str,
    /// Whether the feed handshake has been seen.
    pub connected: bool,
    /// Theme providing colour styles for each part of the header.
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    /// Construct a new header.
    pub fn new(feed: &'a str, connected: bool, theme: &'a Theme) -> Self {
        Self {
            feed,
            connected,
            theme,
        }
    }

    /// Render the header as a `Vec<Line>` containing exactly four lines.
    ///
    /// The returned lines are:
    ///
    /// 1. `"✦ ✧ ✦ ✧ CLOUD WARS LIVE TALLY ✦ ✧ ✦ ✧"`
    /// 2. `"============================================================"` (60 `=` chars)
    /// 3. `"[ 127.0.0.1:4000 | live ]"`
    /// 4. `""`
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);
        let status = if self.connected { "live" } else { "waiting" };

        vec![
            // Title line.
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(" CLOUD WARS LIVE TALLY ", self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            // Separator line.
            Line::from(Span::styled(separator, self.theme.separator)),
            // Feed / status info line.
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.feed, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(status, self.theme.status_style(self.connected)),
                Span::styled(" ]", self.theme.label),
            ]),
            // Empty line.
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

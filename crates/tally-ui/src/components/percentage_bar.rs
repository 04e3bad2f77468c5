use crate::themes::Theme;
use ratatui::text::{Line, Span};

use tally_core::formatting::{format_count, format_percent};
use tally_core::models::Category;

/// Width in columns of the category name column preceding each bar.
const NAME_COLUMN_WIDTH: usize = 14;

/// Configuration controlling visual appearance of a percentage bar.
pub struct BarConfig {
    /// Total width in terminal columns of the bar portion (excluding labels).
    pub width: u16,
    /// Character used to fill the allocated portion of the bar.
    pub filled_char: char,
    /// Character used to fill the empty portion of the bar.
    pub empty_char: char,
    /// Whether to append the percentage figure after the bar.
    pub show_percentage: bool,
    /// Whether to append the raw vote count after the bar.
    pub show_votes: bool,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            width: 50,
            filled_char: '\u{2588}', // █  FULL BLOCK
            empty_char: '\u{2591}',  // ░  LIGHT SHADE
            show_percentage: true,
            show_votes: true,
        }
    }
}

// ── CategoryBar ───────────────────────────────────────────────────────────────

/// Horizontal bar showing one provider's allocated share of the tally.
///
/// Renders the category name, a coloured fill + empty portion proportional
/// to the percentage, and a label with the percentage and the raw vote
/// count formatted with thousands separators.
pub struct CategoryBar<'a> {
    /// Which provider this bar belongs to.
    pub category: Category,
    /// Allocated percentage in [0, 100].
    pub percentage: u8,
    /// Raw vote count behind the percentage.
    pub votes: u64,
    /// Theme from which colour styles are taken.
    pub theme: &'a Theme,
    /// Visual configuration.
    pub config: BarConfig,
}

impl<'a> CategoryBar<'a> {
    /// Construct a new bar with the default configuration.
    pub fn new(category: Category, percentage: u8, votes: u64, theme: &'a Theme) -> Self {
        Self {
            category,
            percentage,
            votes,
            theme,
            config: BarConfig::default(),
        }
    }

    /// Render the bar as a [`Line`] suitable for embedding in any ratatui
    /// widget that accepts `Line` values.
    pub fn to_line(&self) -> Line<'a> {
        // Round the fill so a floored 1% share still paints one cell; the
        // allocator already guarantees it never reads as 0%.
        let width = self.config.width as usize;
        let filled = ((self.percentage as f64 / 100.0) * width as f64).round() as usize;
        let filled = filled.min(width);
        let empty = width - filled;

        let name = format!("{:<width$}", self.category.label(), width = NAME_COLUMN_WIDTH);
        let filled_str = self.config.filled_char.to_string().repeat(filled);
        let empty_str = self.config.empty_char.to_string().repeat(empty);

        let mut spans = vec![
            Span::styled(name, self.theme.label),
            Span::styled(filled_str, self.theme.category_style(self.category)),
            Span::styled(empty_str, self.theme.bar_empty),
        ];

        if self.config.show_percentage {
            spans.push(Span::styled(
                format!(" {}", format_percent(self.percentage)),
                self.theme.category_style(self.category),
            ));
        }
        if self.config.show_votes {
            spans.push(Span::styled(
                format!("  {} votes", format_count(self.votes)),
                self.theme.bar_label,
            ));
        }

        Line::from(spans)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::Theme;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_bar_half_fill() {
        let theme = Theme::dark();
        let bar = CategoryBar::new(Category::Azure, 50, 1_234, &theme);
        let line = bar.to_line();

        // Name column, filled, empty, percentage, votes.
        assert_eq!(line.spans.len(), 5);

        // 50% of 50 columns = 25 chars of '█'.
        let filled_span = &line.spans[1];
        assert_eq!(filled_span.content.chars().count(), 25);
        assert!(filled_span.content.chars().all(|c| c == '█'));

        // Empty portion: 50 − 25 = 25 chars of '░'.
        let empty_span = &line.spans[2];
        assert_eq!(empty_span.content.chars().count(), 25);
        assert!(empty_span.content.chars().all(|c| c == '░'));

        let text = line_text(&line);
        assert!(text.contains("Azure"), "text: {text}");
        assert!(text.contains("50%"), "text: {text}");
        assert!(text.contains("1,234 votes"), "text: {text}");
    }

    #[test]
    fn test_bar_zero_percentage_is_all_empty() {
        let theme = Theme::dark();
        let bar = CategoryBar::new(Category::Gc, 0, 0, &theme);
        let line = bar.to_line();

        assert_eq!(line.spans[1].content.chars().count(), 0);
        assert_eq!(line.spans[2].content.chars().count(), 50);
        assert!(line_text(&line).contains("0 votes"));
    }

    #[test]
    fn test_bar_full_percentage_fills_width() {
        let theme = Theme::dark();
        let bar = CategoryBar::new(Category::Aws, 100, 9, &theme);
        let line = bar.to_line();

        assert_eq!(line.spans[1].content.chars().count(), 50);
        assert_eq!(line.spans[2].content.chars().count(), 0);
        assert!(line_text(&line).contains("100%"));
    }

    #[test]
    fn test_bar_floored_share_paints_one_cell() {
        // A 1% share (the allocator's visibility floor) must not render as
        // an empty bar.
        let theme = Theme::dark();
        let bar = CategoryBar::new(Category::Aws, 1, 1, &theme);
        let line = bar.to_line();
        assert_eq!(line.spans[1].content.chars().count(), 1);
    }

    #[test]
    fn test_bar_without_labels() {
        let theme = Theme::dark();
        let mut bar = CategoryBar::new(Category::Aws, 40, 4, &theme);
        bar.config.show_percentage = false;
        bar.config.show_votes = false;
        let line = bar.to_line();

        assert_eq!(line.spans.len(), 3);
        let text = line_text(&line);
        assert!(!text.contains('%'), "text: {text}");
        assert!(!text.contains("votes"), "text: {text}");
    }

    #[test]
    fn test_bar_uses_category_fill_style() {
        let theme = Theme::dark();
        let line = CategoryBar::new(Category::Gc, 60, 6, &theme).to_line();
        assert_eq!(line.spans[1].style, theme.bar_gc);
    }
}

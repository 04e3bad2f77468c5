/// Format a count with thousands separators (e.g. 1234567 → "1,234,567").
///
/// # Examples
///
/// ```
/// use tally_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(1_000), "1,000");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped.chars().rev().collect()
}

/// Format an integer percentage for display, right-aligned to three columns
/// (e.g. 7 → `"  7%"`, 100 → `"100%"`).
///
/// # Examples
///
/// ```
/// use tally_core::formatting::format_percent;
///
/// assert_eq!(format_percent(0), "  0%");
/// assert_eq!(format_percent(42), " 42%");
/// assert_eq!(format_percent(100), "100%");
/// ```
pub fn format_percent(pct: u8) -> String {
    format!("{pct:>3}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count_small_values() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(7), "7");
        assert_eq!(format_count(100), "100");
    }

    #[test]
    fn test_format_count_grouping() {
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(10_001), "10,001");
        assert_eq!(format_count(987_654_321), "987,654,321");
    }

    #[test]
    fn test_format_count_u64_max() {
        assert_eq!(format_count(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_format_percent_alignment() {
        assert_eq!(format_percent(1), "  1%");
        assert_eq!(format_percent(99), " 99%");
        assert_eq!(format_percent(100), "100%");
    }
}

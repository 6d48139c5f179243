use chrono::NaiveDate;

/// Rounds a percentage to the nearest integer score, clamped to `[0, 100]`
///
/// NaN maps to 0.
pub fn round_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Combines `(score, weight)` pairs into a normalized weighted score
pub fn weighted_score(factors: &[(u8, u32)]) -> u8 {
    let total_weight: u32 = factors.iter().map(|(_, weight)| weight).sum();
    if total_weight == 0 {
        return 0;
    }
    let total: u32 = factors
        .iter()
        .map(|(score, weight)| u32::from(*score) * weight)
        .sum();
    round_score(f64::from(total) / f64::from(total_weight))
}

/// Ratio of two counts: 1 when both are zero, 0 when only one is, else min/max
pub fn count_ratio(a: usize, b: usize) -> f64 {
    match (a, b) {
        (0, 0) => 1.0,
        (0, _) | (_, 0) => 0.0,
        _ => a.min(b) as f64 / a.max(b) as f64,
    }
}

/// Default export file name for a report produced on `date`
pub fn report_file_name(date: NaiveDate) -> String {
    format!("page-compare-report-{}.json", date.format("%Y-%m-%d"))
}

/// Truncates a string to at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_score_clamps_and_rounds() {
        assert_eq!(round_score(57.14), 57);
        assert_eq!(round_score(99.5), 100);
        assert_eq!(round_score(-3.0), 0);
        assert_eq!(round_score(140.0), 100);
        assert_eq!(round_score(f64::NAN), 0);
    }

    #[test]
    fn test_weighted_score() {
        assert_eq!(weighted_score(&[(100, 10), (0, 10)]), 50);
        assert_eq!(weighted_score(&[(100, 40), (50, 60)]), 70);
        assert_eq!(weighted_score(&[]), 0);
    }

    #[test]
    fn test_count_ratio() {
        assert_eq!(count_ratio(0, 0), 1.0);
        assert_eq!(count_ratio(0, 4), 0.0);
        assert_eq!(count_ratio(3, 0), 0.0);
        assert_eq!(count_ratio(2, 4), 0.5);
    }

    #[test]
    fn test_report_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(report_file_name(date), "page-compare-report-2024-03-09.json");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("héllo", 2), "hé");
    }
}

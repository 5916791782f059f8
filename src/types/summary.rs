//! Aggregated views over usage records

use serde::{Deserialize, Serialize};

/// Suggestion/acceptance totals for one language across all dates, editors and models
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LanguageAcceptance {
    pub acceptances: u64,
    pub suggestions: u64,
    pub lines_accepted: u64,
    pub lines_suggested: u64,
    /// `acceptances / suggestions`, `None` when nothing was suggested
    pub acceptance_rate: Option<f64>,
    /// `lines_accepted / lines_suggested`, `None` when no lines were suggested
    pub lines_acceptance_rate: Option<f64>,
}

impl LanguageAcceptance {
    pub fn add(
        &mut self,
        acceptances: u64,
        suggestions: u64,
        lines_accepted: u64,
        lines_suggested: u64,
    ) {
        self.acceptances = self.acceptances.saturating_add(acceptances);
        self.suggestions = self.suggestions.saturating_add(suggestions);
        self.lines_accepted = self.lines_accepted.saturating_add(lines_accepted);
        self.lines_suggested = self.lines_suggested.saturating_add(lines_suggested);
    }

    /// Compute both rates from the accumulated totals
    pub fn finalize(&mut self) {
        self.acceptance_rate = ratio(self.acceptances, self.suggestions);
        self.lines_acceptance_rate = ratio(self.lines_accepted, self.lines_suggested);
    }
}

fn ratio(numerator: u64, denominator: u64) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

/// Format an optional rate as a percentage with one decimal (e.g. "30.0%"), "-" when undefined
pub fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{:.1}%", r * 100.0),
        None => "-".to_string(),
    }
}

/// Format a number with thousand separators (e.g., 1234567 -> "1,234,567")
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let len = s.len();
    let mut result = String::with_capacity(len + len / 3);

    // Digits are ASCII, so byte indexing is safe
    for (i, ch) in s.bytes().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch as char);
    }

    result
}

/// Share of `total` as a percentage, 0 when total is 0
pub fn share_percent(value: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (value as f64 / total as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_computes_rates() {
        let mut stats = LanguageAcceptance::default();
        stats.add(3, 10, 30, 50);
        stats.finalize();

        assert_eq!(stats.acceptance_rate, Some(0.3));
        assert_eq!(stats.lines_acceptance_rate, Some(0.6));
    }

    #[test]
    fn test_finalize_zero_suggestions_is_none() {
        let mut stats = LanguageAcceptance::default();
        stats.add(0, 0, 0, 0);
        stats.finalize();

        assert_eq!(stats.acceptance_rate, None);
        assert_eq!(stats.lines_acceptance_rate, None);
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(Some(0.3)), "30.0%");
        assert_eq!(format_rate(Some(0.1234)), "12.3%");
        assert_eq!(format_rate(None), "-");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_share_percent() {
        assert_eq!(share_percent(1, 4), 25.0);
        assert_eq!(share_percent(0, 0), 0.0);
    }

    #[test]
    fn test_serialize_none_rate_as_null() {
        let stats = LanguageAcceptance::default();
        let json = serde_json::to_value(&stats).unwrap();
        assert!(json["acceptance_rate"].is_null());
    }
}

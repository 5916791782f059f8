//! Aggregator service for computing Copilot usage summaries

use crate::types::{LanguageAcceptance, MetricsByDate};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Aggregator for computing usage summaries from `MetricsByDate`
pub struct Aggregator;

impl Aggregator {
    /// Active users per date, in key order
    pub fn daily_active_users(metrics: &MetricsByDate) -> Vec<(NaiveDate, u64)> {
        metrics
            .iter()
            .map(|(date, record)| (date, record.total_active_users))
            .collect()
    }

    /// Engaged users per date, in key order
    pub fn daily_engaged_users(metrics: &MetricsByDate) -> Vec<(NaiveDate, u64)> {
        metrics
            .iter()
            .map(|(date, record)| (date, record.total_engaged_users))
            .collect()
    }

    /// Engaged users of IDE code completions, summed per editor across all dates.
    /// Editors whose sum is 0 are left out.
    pub fn completions_by_editor(metrics: &MetricsByDate) -> HashMap<String, u64> {
        let mut totals: HashMap<String, u64> = HashMap::new();

        for record in metrics.records() {
            for editor in record.completion_editors() {
                let total = totals.entry(editor.name.clone()).or_default();
                *total = total.saturating_add(editor.total_engaged_users);
            }
        }

        totals.retain(|_, total| *total > 0);
        totals
    }

    /// Engaged users of IDE code completions, summed per language across all dates.
    /// Languages whose sum is 0 are left out.
    pub fn completions_by_language(metrics: &MetricsByDate) -> HashMap<String, u64> {
        let mut totals: HashMap<String, u64> = HashMap::new();

        for record in metrics.records() {
            for language in record.completion_languages() {
                let total = totals.entry(language.name.clone()).or_default();
                *total = total.saturating_add(language.total_engaged_users);
            }
        }

        totals.retain(|_, total| *total > 0);
        totals
    }

    /// Suggestion/acceptance totals per language over every
    /// date × editor × model × language, with rates computed on the final sums
    pub fn acceptance_by_language(metrics: &MetricsByDate) -> HashMap<String, LanguageAcceptance> {
        let mut stats: HashMap<String, LanguageAcceptance> = HashMap::new();

        for record in metrics.records() {
            for editor in record.completion_editors() {
                for model in &editor.models {
                    for language in &model.languages {
                        stats.entry(language.name.clone()).or_default().add(
                            language.total_code_acceptances,
                            language.total_code_suggestions,
                            language.total_code_lines_accepted,
                            language.total_code_lines_suggested,
                        );
                    }
                }
            }
        }

        for language in stats.values_mut() {
            language.finalize();
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        EditorCompletions, IdeCodeCompletions, LanguageCompletions, LanguageEngagement,
        ModelCompletions, UsageRecord,
    };

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn lang(name: &str, acc: u64, sugg: u64, lines_acc: u64, lines_sugg: u64) -> LanguageCompletions {
        LanguageCompletions {
            name: name.to_string(),
            total_engaged_users: 1,
            total_code_suggestions: sugg,
            total_code_acceptances: acc,
            total_code_lines_suggested: lines_sugg,
            total_code_lines_accepted: lines_acc,
        }
    }

    fn editor(name: &str, engaged: u64, models: Vec<ModelCompletions>) -> EditorCompletions {
        EditorCompletions {
            name: name.to_string(),
            total_engaged_users: engaged,
            models,
        }
    }

    fn model(name: &str, languages: Vec<LanguageCompletions>) -> ModelCompletions {
        ModelCompletions {
            name: name.to_string(),
            is_custom_model: false,
            total_engaged_users: 1,
            languages,
        }
    }

    fn engagement(name: &str, engaged: u64) -> LanguageEngagement {
        LanguageEngagement {
            name: name.to_string(),
            total_engaged_users: engaged,
        }
    }

    fn make_record(
        active: u64,
        engaged: u64,
        languages: Vec<LanguageEngagement>,
        editors: Vec<EditorCompletions>,
    ) -> UsageRecord {
        UsageRecord {
            total_active_users: active,
            total_engaged_users: engaged,
            copilot_ide_code_completions: Some(IdeCodeCompletions {
                total_engaged_users: engaged,
                languages,
                editors,
            }),
        }
    }

    /// Two dates, two editors, two languages
    fn make_metrics() -> MetricsByDate {
        let mut metrics = MetricsByDate::new();
        metrics.insert(
            date(1),
            make_record(
                10,
                7,
                vec![engagement("rust", 4), engagement("python", 3)],
                vec![
                    editor("vscode", 5, vec![model("default", vec![lang("rust", 3, 10, 30, 50)])]),
                    editor("jetbrains", 2, vec![model("default", vec![lang("python", 1, 4, 2, 8)])]),
                ],
            ),
        );
        metrics.insert(
            date(2),
            make_record(
                12,
                9,
                vec![engagement("rust", 6), engagement("python", 2)],
                vec![
                    editor("vscode", 6, vec![model("default", vec![lang("rust", 2, 10, 20, 50)])]),
                    editor("jetbrains", 3, vec![model("default", vec![lang("python", 2, 6, 4, 12)])]),
                ],
            ),
        );
        metrics
    }

    // ========== daily users tests ==========

    #[test]
    fn test_daily_active_users_one_per_date() {
        let metrics = make_metrics();

        let result = Aggregator::daily_active_users(&metrics);

        assert_eq!(result, vec![(date(1), 10), (date(2), 12)]);
    }

    #[test]
    fn test_daily_engaged_users_one_per_date() {
        let metrics = make_metrics();

        let result = Aggregator::daily_engaged_users(&metrics);

        assert_eq!(result, vec![(date(1), 7), (date(2), 9)]);
    }

    #[test]
    fn test_daily_users_follow_key_order() {
        let mut metrics = MetricsByDate::new();
        metrics.insert(date(5), make_record(1, 1, vec![], vec![]));
        metrics.insert(date(3), make_record(2, 2, vec![], vec![]));

        let dates: Vec<_> = Aggregator::daily_active_users(&metrics)
            .into_iter()
            .map(|(d, _)| d)
            .collect();

        assert_eq!(dates, vec![date(5), date(3)]);
    }

    #[test]
    fn test_daily_users_empty() {
        let metrics = MetricsByDate::new();
        assert!(Aggregator::daily_active_users(&metrics).is_empty());
        assert!(Aggregator::daily_engaged_users(&metrics).is_empty());
    }

    // ========== completions_by_editor / language tests ==========

    #[test]
    fn test_completions_by_editor_sums_across_dates() {
        let metrics = make_metrics();

        let result = Aggregator::completions_by_editor(&metrics);

        assert_eq!(result.len(), 2);
        assert_eq!(result["vscode"], 11); // 5 + 6
        assert_eq!(result["jetbrains"], 5); // 2 + 3
    }

    #[test]
    fn test_completions_by_language_sums_across_dates() {
        let metrics = make_metrics();

        let result = Aggregator::completions_by_language(&metrics);

        assert_eq!(result.len(), 2);
        assert_eq!(result["rust"], 10); // 4 + 6
        assert_eq!(result["python"], 5); // 3 + 2
    }

    #[test]
    fn test_completions_editor_seen_on_one_date_only() {
        let mut metrics = make_metrics();
        metrics.insert(
            date(3),
            make_record(1, 1, vec![], vec![editor("neovim", 1, vec![])]),
        );

        let result = Aggregator::completions_by_editor(&metrics);

        assert_eq!(result["neovim"], 1);
        assert_eq!(result["vscode"], 11);
    }

    #[test]
    fn test_completions_missing_section_contributes_nothing() {
        let mut metrics = make_metrics();
        metrics.insert(
            date(3),
            UsageRecord {
                total_active_users: 3,
                total_engaged_users: 0,
                copilot_ide_code_completions: None,
            },
        );

        assert_eq!(Aggregator::completions_by_editor(&metrics)["vscode"], 11);
        assert_eq!(Aggregator::completions_by_language(&metrics)["rust"], 10);
    }

    #[test]
    fn test_completions_zero_totals_dropped() {
        let mut metrics = make_metrics();
        metrics.insert(
            date(3),
            make_record(
                1,
                0,
                vec![engagement("cobol", 0)],
                vec![editor("xcode", 0, vec![])],
            ),
        );

        let editors = Aggregator::completions_by_editor(&metrics);
        let languages = Aggregator::completions_by_language(&metrics);

        assert!(!editors.contains_key("xcode"));
        assert_eq!(editors.len(), 2);
        assert!(!languages.contains_key("cobol"));
        assert_eq!(languages.len(), 2);
    }

    // ========== acceptance_by_language tests ==========

    #[test]
    fn test_acceptance_single_language() {
        let mut metrics = MetricsByDate::new();
        metrics.insert(
            date(1),
            make_record(
                1,
                1,
                vec![],
                vec![editor("vscode", 1, vec![model("default", vec![lang("rust", 3, 10, 30, 50)])])],
            ),
        );

        let result = Aggregator::acceptance_by_language(&metrics);

        assert_eq!(
            result["rust"],
            LanguageAcceptance {
                acceptances: 3,
                suggestions: 10,
                lines_accepted: 30,
                lines_suggested: 50,
                acceptance_rate: Some(0.3),
                lines_acceptance_rate: Some(0.6),
            }
        );
    }

    #[test]
    fn test_acceptance_accumulates_before_rate() {
        let metrics = make_metrics();

        let result = Aggregator::acceptance_by_language(&metrics);

        // rust: (3 + 2) / (10 + 10), lines (30 + 20) / (50 + 50)
        let rust = &result["rust"];
        assert_eq!(rust.acceptances, 5);
        assert_eq!(rust.suggestions, 20);
        assert_eq!(rust.acceptance_rate, Some(0.25));
        assert_eq!(rust.lines_acceptance_rate, Some(0.5));

        // python: 3 / 10 overall, not the mean of 0.25 and 0.333
        let python = &result["python"];
        assert_eq!(python.acceptances, 3);
        assert_eq!(python.suggestions, 10);
        assert_eq!(python.acceptance_rate, Some(0.3));
        assert_eq!(python.lines_acceptance_rate, Some(0.3));
    }

    #[test]
    fn test_acceptance_walks_every_model() {
        let mut metrics = MetricsByDate::new();
        metrics.insert(
            date(1),
            make_record(
                1,
                1,
                vec![],
                vec![
                    editor(
                        "vscode",
                        1,
                        vec![
                            model("default", vec![lang("go", 1, 2, 1, 2)]),
                            model("custom", vec![lang("go", 1, 2, 1, 2)]),
                        ],
                    ),
                    editor("vim", 1, vec![model("default", vec![lang("go", 2, 4, 2, 4)])]),
                ],
            ),
        );

        let result = Aggregator::acceptance_by_language(&metrics);

        assert_eq!(result["go"].acceptances, 4);
        assert_eq!(result["go"].suggestions, 8);
        assert_eq!(result["go"].acceptance_rate, Some(0.5));
    }

    #[test]
    fn test_acceptance_zero_suggestions_rate_is_none() {
        let mut metrics = MetricsByDate::new();
        metrics.insert(
            date(1),
            make_record(
                1,
                1,
                vec![],
                vec![editor("vscode", 1, vec![model("default", vec![lang("cobol", 0, 0, 0, 0)])])],
            ),
        );

        let result = Aggregator::acceptance_by_language(&metrics);

        assert_eq!(result["cobol"].acceptance_rate, None);
        assert_eq!(result["cobol"].lines_acceptance_rate, None);
    }

    #[test]
    fn test_acceptance_empty() {
        assert!(Aggregator::acceptance_by_language(&MetricsByDate::new()).is_empty());
    }

    #[test]
    fn test_aggregators_are_idempotent() {
        let metrics = make_metrics();
        let snapshot = metrics.clone();

        assert_eq!(
            Aggregator::daily_active_users(&metrics),
            Aggregator::daily_active_users(&metrics)
        );
        assert_eq!(
            Aggregator::completions_by_editor(&metrics),
            Aggregator::completions_by_editor(&metrics)
        );
        assert_eq!(
            Aggregator::completions_by_language(&metrics),
            Aggregator::completions_by_language(&metrics)
        );
        assert_eq!(
            Aggregator::acceptance_by_language(&metrics),
            Aggregator::acceptance_by_language(&metrics)
        );
        assert_eq!(metrics, snapshot);
    }
}

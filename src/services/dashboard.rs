//! Fetch → index → aggregate pipeline shared by the TUI and report commands

use super::aggregator::Aggregator;
use super::client::{MetricsRequest, MetricsSource};
use super::indexer::index_by_date;
use crate::types::{LanguageAcceptance, MetricsByDate, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// Total for a named editor or language
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NamedTotal {
    pub name: String,
    pub total: u64,
}

/// Acceptance stats row for one language
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LanguageRow {
    pub language: String,
    #[serde(flatten)]
    pub stats: LanguageAcceptance,
}

/// Daily user counts for one date
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct DailyUsers {
    pub date: NaiveDate,
    pub active: u64,
    pub engaged: u64,
}

/// Every view the front ends render, sorted for display
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct Dashboard {
    pub users: Vec<DailyUsers>,
    /// Editors by engaged users, descending
    pub editors: Vec<NamedTotal>,
    /// Languages by engaged users, descending
    pub languages: Vec<NamedTotal>,
    /// Languages by suggestions, descending
    pub acceptance: Vec<LanguageRow>,
}

impl Dashboard {
    /// Run every aggregator over `metrics`
    pub fn from_metrics(metrics: &MetricsByDate) -> Self {
        let active = Aggregator::daily_active_users(metrics);
        let engaged = Aggregator::daily_engaged_users(metrics);
        let users = active
            .into_iter()
            .zip(engaged)
            .map(|((date, active), (_, engaged))| DailyUsers {
                date,
                active,
                engaged,
            })
            .collect();

        let mut acceptance: Vec<LanguageRow> = Aggregator::acceptance_by_language(metrics)
            .into_iter()
            .map(|(language, stats)| LanguageRow { language, stats })
            .collect();
        acceptance.sort_by(|a, b| {
            b.stats
                .suggestions
                .cmp(&a.stats.suggestions)
                .then_with(|| a.language.cmp(&b.language))
        });

        Self {
            users,
            editors: sorted_totals(Aggregator::completions_by_editor(metrics)),
            languages: sorted_totals(Aggregator::completions_by_language(metrics)),
            acceptance,
        }
    }

    /// Sum of all editor totals (for share percentages)
    pub fn editor_total(&self) -> u64 {
        self.editors.iter().map(|e| e.total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Sort descending by total, then by name for a stable order
fn sorted_totals(totals: HashMap<String, u64>) -> Vec<NamedTotal> {
    let mut rows: Vec<NamedTotal> = totals
        .into_iter()
        .map(|(name, total)| NamedTotal { name, total })
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    rows
}

/// Fetch metrics for `request` and build the dashboard
pub fn load_dashboard(source: &dyn MetricsSource, request: &MetricsRequest) -> Result<Dashboard> {
    let body = source.fetch(request)?;
    let metrics = index_by_date(&body)?;
    let dashboard = Dashboard::from_metrics(&metrics);
    tracing::info!(
        account = %request.account,
        days = dashboard.users.len(),
        editors = dashboard.editors.len(),
        languages = dashboard.languages.len(),
        "dashboard ready"
    );
    Ok(dashboard)
}

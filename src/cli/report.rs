//! Non-interactive report subcommands (plain tables or JSON on stdout)

use std::fmt::Write as _;

use serde_json::{json, Value};

use crate::config::Config;
use crate::services::{load_dashboard, Dashboard, GitHubClient};
use crate::types::{format_number, format_rate, share_percent};

/// Which section(s) a report prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportView {
    Users,
    Editors,
    Languages,
    Acceptance,
    All,
}

/// Fetch, aggregate and print one report
pub fn run(view: ReportView, json: bool, config: &Config) -> anyhow::Result<()> {
    let request = config.request()?;
    let client = GitHubClient::new()?;
    let dashboard = load_dashboard(&client, &request)?;

    let output = if json {
        serde_json::to_string_pretty(&to_json(view, &dashboard))?
    } else {
        to_text(view, &dashboard)
    };
    println!("{}", output);
    Ok(())
}

fn to_json(view: ReportView, dashboard: &Dashboard) -> Value {
    match view {
        ReportView::Users => json!(dashboard.users),
        ReportView::Editors => json!(dashboard.editors),
        ReportView::Languages => json!(dashboard.languages),
        ReportView::Acceptance => json!(dashboard.acceptance),
        ReportView::All => json!(dashboard),
    }
}

fn to_text(view: ReportView, dashboard: &Dashboard) -> String {
    let mut out = String::new();
    match view {
        ReportView::Users => write_users(&mut out, dashboard),
        ReportView::Editors => write_editors(&mut out, dashboard),
        ReportView::Languages => write_languages(&mut out, dashboard),
        ReportView::Acceptance => write_acceptance(&mut out, dashboard),
        ReportView::All => {
            write_users(&mut out, dashboard);
            out.push('\n');
            write_editors(&mut out, dashboard);
            out.push('\n');
            write_languages(&mut out, dashboard);
            out.push('\n');
            write_acceptance(&mut out, dashboard);
        }
    }
    out.trim_end().to_string()
}

// Writing into a String cannot fail, so the fmt results are ignored below.

fn write_users(out: &mut String, dashboard: &Dashboard) {
    let _ = writeln!(out, "Total Users");
    if dashboard.users.is_empty() {
        let _ = writeln!(out, "  No usage data for this period");
        return;
    }
    let _ = writeln!(out, "{:<12}{:>12}{:>12}", "Date", "Active", "Engaged");
    for day in &dashboard.users {
        let _ = writeln!(
            out,
            "{:<12}{:>12}{:>12}",
            day.date.to_string(),
            format_number(day.active),
            format_number(day.engaged)
        );
    }
}

fn write_editors(out: &mut String, dashboard: &Dashboard) {
    let _ = writeln!(out, "Code Completions by Editor");
    if dashboard.editors.is_empty() {
        let _ = writeln!(out, "  No editor activity recorded");
        return;
    }
    let total = dashboard.editor_total();
    let _ = writeln!(out, "{:<24}{:>12}{:>10}", "Editor", "Engaged", "Share");
    for editor in &dashboard.editors {
        let _ = writeln!(
            out,
            "{:<24}{:>12}{:>9.1}%",
            editor.name,
            format_number(editor.total),
            share_percent(editor.total, total)
        );
    }
}

fn write_languages(out: &mut String, dashboard: &Dashboard) {
    let _ = writeln!(out, "Code Completions by Language");
    if dashboard.languages.is_empty() {
        let _ = writeln!(out, "  No language activity recorded");
        return;
    }
    let _ = writeln!(out, "{:<24}{:>12}", "Language", "Engaged");
    for language in &dashboard.languages {
        let _ = writeln!(
            out,
            "{:<24}{:>12}",
            language.name,
            format_number(language.total)
        );
    }
}

fn write_acceptance(out: &mut String, dashboard: &Dashboard) {
    let _ = writeln!(out, "Acceptance Rates by Language");
    if dashboard.acceptance.is_empty() {
        let _ = writeln!(out, "  No completions recorded");
        return;
    }
    let _ = writeln!(
        out,
        "{:<24}{:>12}{:>12}{:>9}{:>14}{:>13}{:>12}",
        "Language", "Suggested", "Accepted", "Rate", "Lines Sugg.", "Lines Acc.", "Lines Rate"
    );
    for row in &dashboard.acceptance {
        let stats = &row.stats;
        let _ = writeln!(
            out,
            "{:<24}{:>12}{:>12}{:>9}{:>14}{:>13}{:>12}",
            row.language,
            format_number(stats.suggestions),
            format_number(stats.acceptances),
            format_rate(stats.acceptance_rate),
            format_number(stats.lines_suggested),
            format_number(stats.lines_accepted),
            format_rate(stats.lines_acceptance_rate)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::dashboard::{DailyUsers, LanguageRow, NamedTotal};
    use crate::types::LanguageAcceptance;
    use chrono::NaiveDate;

    fn make_dashboard() -> Dashboard {
        let mut rust = LanguageAcceptance::default();
        rust.add(3, 10, 30, 50);
        rust.finalize();
        let cobol = LanguageAcceptance::default();

        Dashboard {
            users: vec![DailyUsers {
                date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                active: 1200,
                engaged: 800,
            }],
            editors: vec![
                NamedTotal {
                    name: "vscode".into(),
                    total: 3,
                },
                NamedTotal {
                    name: "neovim".into(),
                    total: 1,
                },
            ],
            languages: vec![NamedTotal {
                name: "rust".into(),
                total: 4,
            }],
            acceptance: vec![
                LanguageRow {
                    language: "rust".into(),
                    stats: rust,
                },
                LanguageRow {
                    language: "cobol".into(),
                    stats: cobol,
                },
            ],
        }
    }

    #[test]
    fn test_users_text() {
        let text = to_text(ReportView::Users, &make_dashboard());
        assert!(text.starts_with("Total Users"));
        assert!(text.contains("2024-06-01"));
        assert!(text.contains("1,200"));
    }

    #[test]
    fn test_editors_text_shares() {
        let text = to_text(ReportView::Editors, &make_dashboard());
        assert!(text.contains("75.0%"));
        assert!(text.contains("25.0%"));
    }

    #[test]
    fn test_acceptance_text_rates() {
        let text = to_text(ReportView::Acceptance, &make_dashboard());
        let rust = text.lines().find(|l| l.starts_with("rust")).unwrap();
        assert!(rust.contains("30.0%"));
        assert!(rust.contains("60.0%"));
        let cobol = text.lines().find(|l| l.starts_with("cobol")).unwrap();
        assert!(cobol.trim_end().ends_with('-'));
    }

    #[test]
    fn test_report_text_has_every_section() {
        let text = to_text(ReportView::All, &make_dashboard());
        assert!(text.contains("Total Users"));
        assert!(text.contains("Code Completions by Editor"));
        assert!(text.contains("Code Completions by Language"));
        assert!(text.contains("Acceptance Rates by Language"));
    }

    #[test]
    fn test_empty_sections() {
        let text = to_text(ReportView::All, &Dashboard::default());
        assert!(text.contains("No usage data for this period"));
        assert!(text.contains("No completions recorded"));
    }

    #[test]
    fn test_acceptance_json_null_rate() {
        let value = to_json(ReportView::Acceptance, &make_dashboard());
        assert_eq!(value[0]["language"], "rust");
        assert_eq!(value[0]["suggestions"], 10);
        assert_eq!(value[0]["acceptance_rate"], 0.3);
        assert!(value[1]["acceptance_rate"].is_null());
    }

    #[test]
    fn test_report_json_shape() {
        let value = to_json(ReportView::All, &make_dashboard());
        assert_eq!(value["users"][0]["date"], "2024-06-01");
        assert_eq!(value["users"][0]["active"], 1200);
        assert_eq!(value["editors"][0]["name"], "vscode");
        assert_eq!(value["languages"][0]["total"], 4);
    }
}

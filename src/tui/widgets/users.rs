//! Users view - line chart of daily active and engaged users

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget},
};

use super::common::{
    centered_content, render_keybindings, render_notice, render_separator,
};
use super::tabs::{Tab, TabBar};
use crate::services::dashboard::DailyUsers;
use crate::tui::theme::Theme;
use crate::types::format_number;

/// Upper y-axis bound: max value plus 10% headroom (rounded up), at least 2
pub fn axis_max(max: u64) -> f64 {
    let max = max.max(1);
    (max + max.div_ceil(10)) as f64
}

/// Users view widget
pub struct UsersView<'a> {
    users: &'a [DailyUsers],
    theme: Theme,
}

impl<'a> UsersView<'a> {
    pub fn new(users: &'a [DailyUsers], theme: Theme) -> Self {
        Self { users, theme }
    }
}

impl Widget for UsersView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let centered_area = centered_content(area);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Top padding
            Constraint::Length(1), // Tabs
            Constraint::Length(1), // Separator
            Constraint::Length(1), // Title + latest values
            Constraint::Min(5),    // Chart
            Constraint::Length(1), // Separator
            Constraint::Length(1), // Keybindings
        ])
        .split(centered_area);

        TabBar::new(Tab::Users, self.theme).render(chunks[1], buf);
        render_separator(chunks[2], buf, self.theme);
        self.render_title(chunks[3], buf);

        if self.users.is_empty() {
            render_notice(chunks[4], buf, "No usage data for this period", self.theme);
        } else {
            self.render_chart(chunks[4], buf);
        }

        render_separator(chunks[5], buf, self.theme);
        render_keybindings(chunks[6], buf, self.theme, &[]);
    }
}

impl UsersView<'_> {
    fn render_title(&self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(
            "Total Users",
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        )];

        if let Some(latest) = self.users.last() {
            spans.push(Span::styled(
                format!("  {}  ", latest.date),
                Style::default().fg(self.theme.date()),
            ));
            spans.push(Span::styled(
                format!("active {}", format_number(latest.active)),
                Style::default().fg(self.theme.active()),
            ));
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("engaged {}", format_number(latest.engaged)),
                Style::default().fg(self.theme.engaged()),
            ));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }

    fn render_chart(&self, area: Rect, buf: &mut Buffer) {
        let active: Vec<(f64, f64)> = self
            .users
            .iter()
            .enumerate()
            .map(|(i, u)| (i as f64, u.active as f64))
            .collect();
        let engaged: Vec<(f64, f64)> = self
            .users
            .iter()
            .enumerate()
            .map(|(i, u)| (i as f64, u.engaged as f64))
            .collect();

        let max = self
            .users
            .iter()
            .map(|u| u.active.max(u.engaged))
            .max()
            .unwrap_or(0);
        let y_max = axis_max(max);
        let x_max = (self.users.len().saturating_sub(1)).max(1) as f64;

        let datasets = vec![
            Dataset::default()
                .name("active")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.theme.active()))
                .data(&active),
            Dataset::default()
                .name("engaged")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.theme.engaged()))
                .data(&engaged),
        ];

        let axis_style = Style::default().fg(self.theme.muted());
        let chart = Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .style(axis_style)
                    .bounds([0.0, x_max])
                    .labels(self.date_labels()),
            )
            .y_axis(
                Axis::default()
                    .style(axis_style)
                    .bounds([0.0, y_max])
                    .labels(vec![
                        "0".to_string(),
                        format_number((y_max / 2.0).round() as u64),
                        format_number(y_max as u64),
                    ]),
            );

        chart.render(area, buf);
    }

    /// First, middle and last date as x-axis labels
    fn date_labels(&self) -> Vec<String> {
        let n = self.users.len();
        let mut picks = vec![0, n / 2, n.saturating_sub(1)];
        picks.dedup();
        picks
            .into_iter()
            .filter_map(|i| self.users.get(i))
            .map(|u| u.date.format("%m-%d").to_string())
            .collect()
    }
}

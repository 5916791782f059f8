//! Languages view - horizontal bar chart of code-completion engaged users per language

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Paragraph, Widget},
};

use super::common::{
    centered_content, render_keybindings, render_notice, render_separator,
    truncate_name,
};
use super::tabs::{Tab, TabBar};
use crate::services::dashboard::NamedTotal;
use crate::tui::theme::Theme;
use crate::types::format_number;

/// Longest language label before truncation
const LABEL_WIDTH: usize = 16;

/// Languages view widget
pub struct LanguagesView<'a> {
    languages: &'a [NamedTotal],
    theme: Theme,
}

impl<'a> LanguagesView<'a> {
    pub fn new(languages: &'a [NamedTotal], theme: Theme) -> Self {
        Self { languages, theme }
    }

    /// Languages that fit in `rows` lines (input is already sorted descending)
    pub fn visible(&self, rows: u16) -> &'a [NamedTotal] {
        let n = self.languages.len().min(rows as usize);
        &self.languages[..n]
    }
}

impl Widget for LanguagesView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let centered_area = centered_content(area);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Top padding
            Constraint::Length(1), // Tabs
            Constraint::Length(1), // Separator
            Constraint::Length(1), // Title
            Constraint::Min(1),    // Bars
            Constraint::Length(1), // Separator
            Constraint::Length(1), // Keybindings
        ])
        .split(centered_area);

        TabBar::new(Tab::Languages, self.theme).render(chunks[1], buf);
        render_separator(chunks[2], buf, self.theme);
        self.render_title(chunks[3], buf, chunks[4].height);

        if self.languages.is_empty() {
            render_notice(chunks[4], buf, "No language activity recorded", self.theme);
        } else {
            self.render_bars(chunks[4], buf);
        }

        render_separator(chunks[5], buf, self.theme);
        render_keybindings(chunks[6], buf, self.theme, &[]);
    }
}

impl LanguagesView<'_> {
    fn render_title(&self, area: Rect, buf: &mut Buffer, bar_rows: u16) {
        let mut spans = vec![Span::styled(
            "Code Completions by Language",
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        )];
        let hidden = self.languages.len() - self.visible(bar_rows).len();
        if hidden > 0 {
            spans.push(Span::styled(
                format!("  (+{} more)", hidden),
                Style::default().fg(self.theme.muted()),
            ));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }

    fn render_bars(&self, area: Rect, buf: &mut Buffer) {
        let bars: Vec<Bar> = self
            .visible(area.height)
            .iter()
            .map(|lang| {
                Bar::default()
                    .value(lang.total)
                    .label(Line::from(truncate_name(&lang.name, LABEL_WIDTH)))
                    .text_value(format_number(lang.total))
                    .style(Style::default().fg(self.theme.bar()))
                    .value_style(Style::default().fg(self.theme.text()))
            })
            .collect();

        BarChart::default()
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .label_style(Style::default().fg(self.theme.accent()))
            .data(BarGroup::default().bars(&bars))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::common::buffer_text;

    fn make_languages(n: u64) -> Vec<NamedTotal> {
        (0..n)
            .map(|i| NamedTotal {
                name: format!("lang{}", i),
                total: 100 - i,
            })
            .collect()
    }

    #[test]
    fn test_visible_limits_rows() {
        let languages = make_languages(10);
        let view = LanguagesView::new(&languages, Theme::Dark);

        assert_eq!(view.visible(4).len(), 4);
        assert_eq!(view.visible(4)[0].name, "lang0");
        assert_eq!(view.visible(50).len(), 10);
    }

    #[test]
    fn test_render_largest_first() {
        let languages = make_languages(3);
        let area = Rect::new(0, 0, 80, 12);
        let mut buf = Buffer::empty(area);

        LanguagesView::new(&languages, Theme::Dark).render(area, &mut buf);

        let text = buffer_text(&buf);
        let first = text.find("lang0").unwrap();
        let last = text.find("lang2").unwrap();
        assert!(first < last);
    }

    #[test]
    fn test_render_counts_hidden_languages() {
        let languages = make_languages(30);
        let area = Rect::new(0, 0, 80, 12);
        let mut buf = Buffer::empty(area);

        LanguagesView::new(&languages, Theme::Dark).render(area, &mut buf);

        // 12 rows - 6 fixed lines = 6 bars
        assert!(buffer_text(&buf).contains("(+24 more)"));
    }

    #[test]
    fn test_render_empty_notice() {
        let area = Rect::new(0, 0, 80, 12);
        let mut buf = Buffer::empty(area);

        LanguagesView::new(&[], Theme::Dark).render(area, &mut buf);

        assert!(buffer_text(&buf).contains("No language activity recorded"));
    }
}

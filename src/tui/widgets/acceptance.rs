//! Acceptance view - per-language suggestion and acceptance table

use std::rc::Rc;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::common::{
    centered_content, render_keybindings, render_notice, render_separator,
    truncate_name,
};
use super::tabs::{Tab, TabBar};
use crate::services::dashboard::LanguageRow;
use crate::tui::theme::{rate_level, Theme};
use crate::types::{format_number, format_rate};

/// Visible rows in the acceptance table
pub const VISIBLE_ROWS: usize = 15;

/// Column headers and widths: Language is left-aligned, the rest right-aligned
const COLUMNS: [(&str, usize); 7] = [
    ("Language", 18),
    ("Suggested", 12),
    ("Accepted", 11),
    ("Rate", 9),
    ("Lines Sugg.", 14),
    ("Lines Acc.", 13),
    ("Lines Rate", 12),
];

/// Total table width (sum of COLUMNS widths)
const TABLE_WIDTH: u16 = 89;

/// Acceptance view widget
pub struct AcceptanceView<'a> {
    rows: &'a [LanguageRow],
    scroll_offset: usize,
    theme: Theme,
}

impl<'a> AcceptanceView<'a> {
    pub fn new(rows: &'a [LanguageRow], scroll_offset: usize, theme: Theme) -> Self {
        Self {
            rows,
            scroll_offset,
            theme,
        }
    }

    /// Maximum scroll offset for `count` rows with `visible` of them on screen
    pub fn max_scroll_offset(count: usize, visible: usize) -> usize {
        count.saturating_sub(visible.max(1))
    }

    /// Table rows that fit when `count` rows are rendered into `area`
    pub fn table_rows(area: Rect, count: usize) -> usize {
        let chunks = Self::layout(area, count);
        (chunks[5].height as usize).min(VISIBLE_ROWS)
    }

    fn layout(area: Rect, count: usize) -> Rc<[Rect]> {
        let visible_rows = count.clamp(1, VISIBLE_ROWS) as u16;
        Layout::vertical([
            Constraint::Length(1),            // Top padding
            Constraint::Length(1),            // Tabs
            Constraint::Length(1),            // Separator
            Constraint::Length(1),            // Title
            Constraint::Length(1),            // Header
            Constraint::Length(visible_rows), // Rows
            Constraint::Length(1),            // Separator
            Constraint::Length(1),            // Keybindings
            Constraint::Min(0),               // Remaining space
        ])
        .split(centered_content(area))
    }

    /// First row to draw, clamped so the last page stays full
    fn first_row(&self, visible: usize) -> usize {
        self.scroll_offset
            .min(Self::max_scroll_offset(self.rows.len(), visible))
    }
}

impl Widget for AcceptanceView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Self::layout(area, self.rows.len());
        let visible = (chunks[5].height as usize).min(VISIBLE_ROWS);

        TabBar::new(Tab::Acceptance, self.theme).render(chunks[1], buf);
        render_separator(chunks[2], buf, self.theme);
        self.render_title(chunks[3], buf, visible);

        if self.rows.is_empty() {
            render_notice(chunks[5], buf, "No completions recorded", self.theme);
        } else {
            self.render_header(chunks[4], buf);
            self.render_rows(chunks[5], buf, visible);
        }

        render_separator(chunks[6], buf, self.theme);
        render_keybindings(chunks[7], buf, self.theme, &[("↑↓", "Scroll")]);
    }
}

impl AcceptanceView<'_> {
    fn table_rect(area: Rect, y: u16) -> Rect {
        let offset = area.width.saturating_sub(TABLE_WIDTH) / 2;
        Rect {
            x: area.x + offset,
            y,
            width: TABLE_WIDTH.min(area.width),
            height: 1,
        }
    }

    fn render_title(&self, area: Rect, buf: &mut Buffer, visible: usize) {
        let mut spans = vec![Span::styled(
            "Acceptance Rates by Language",
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        )];
        if visible > 0 && self.rows.len() > visible {
            let first = self.first_row(visible) + 1;
            let last = (first - 1 + visible).min(self.rows.len());
            spans.push(Span::styled(
                format!("  {}-{} of {}", first, last, self.rows.len()),
                Style::default().fg(self.theme.muted()),
            ));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.theme.text())
            .add_modifier(Modifier::BOLD);
        let spans: Vec<Span> = COLUMNS
            .iter()
            .enumerate()
            .map(|(i, (label, width))| {
                let text = if i == 0 {
                    format!("{:<w$}", label, w = width)
                } else {
                    format!("{:>w$}", label, w = width)
                };
                Span::styled(text, style)
            })
            .collect();

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Left)
            .render(Self::table_rect(area, area.y), buf);
    }

    fn render_rows(&self, area: Rect, buf: &mut Buffer, visible: usize) {
        let rows = self.rows.iter().skip(self.first_row(visible)).take(visible);

        for (i, row) in rows.enumerate() {
            let stats = &row.stats;
            let width = |col: usize| COLUMNS[col].1;
            let text = Style::default().fg(self.theme.text());

            let line = Line::from(vec![
                Span::styled(
                    format!("{:<w$}", truncate_name(&row.language, width(0) - 2), w = width(0)),
                    Style::default().fg(self.theme.accent()),
                ),
                Span::styled(format!("{:>w$}", format_number(stats.suggestions), w = width(1)), text),
                Span::styled(format!("{:>w$}", format_number(stats.acceptances), w = width(2)), text),
                Span::styled(
                    format!("{:>w$}", format_rate(stats.acceptance_rate), w = width(3)),
                    Style::default().fg(self.theme.rate_color(rate_level(stats.acceptance_rate))),
                ),
                Span::styled(
                    format!("{:>w$}", format_number(stats.lines_suggested), w = width(4)),
                    text,
                ),
                Span::styled(
                    format!("{:>w$}", format_number(stats.lines_accepted), w = width(5)),
                    text,
                ),
                Span::styled(
                    format!("{:>w$}", format_rate(stats.lines_acceptance_rate), w = width(6)),
                    Style::default()
                        .fg(self.theme.rate_color(rate_level(stats.lines_acceptance_rate))),
                ),
            ]);

            Paragraph::new(line)
                .alignment(Alignment::Left)
                .render(Self::table_rect(area, area.y + i as u16), buf);
        }
    }
}

//! Editors view - share of code-completion engaged users per IDE

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
use crate::services::dashboard::NamedTotal;
use crate::tui::theme::Theme;
use crate::types::{format_number, share_percent};

/// Format a percentage bar with filled/empty blocks
/// Example: 50.0% with width 10 → "█████░░░░░"
pub fn format_percentage_bar(percent: f64, width: usize) -> String {
    let filled = (((percent / 100.0) * width as f64).round() as usize).min(width);
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Table width: Editor(26) + Engaged(14) + Share(10) + Bar(24) = 74
const TABLE_WIDTH: u16 = 74;
const BAR_WIDTH: usize = 22;

/// Editors view widget
pub struct EditorsView<'a> {
    editors: &'a [NamedTotal],
    total: u64,
    theme: Theme,
}

impl<'a> EditorsView<'a> {
    pub fn new(editors: &'a [NamedTotal], theme: Theme) -> Self {
        Self {
            editors,
            total: editors.iter().map(|e| e.total).sum(),
            theme,
        }
    }
}

impl Widget for EditorsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let centered_area = centered_content(area);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Top padding
            Constraint::Length(1), // Tabs
            Constraint::Length(1), // Separator
            Constraint::Length(1), // Title
            Constraint::Length(1), // Header
            Constraint::Min(1),    // Editor rows
            Constraint::Length(1), // Separator
            Constraint::Length(1), // Keybindings
        ])
        .split(centered_area);

        TabBar::new(Tab::Editors, self.theme).render(chunks[1], buf);
        render_separator(chunks[2], buf, self.theme);

        Paragraph::new(Line::from(Span::styled(
            "Code Completions by Editor",
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        )))
        .render(chunks[3], buf);

        if self.editors.is_empty() {
            render_notice(chunks[5], buf, "No editor activity recorded", self.theme);
        } else {
            self.render_header(chunks[4], buf);
            self.render_rows(chunks[5], buf);
        }

        render_separator(chunks[6], buf, self.theme);
        render_keybindings(chunks[7], buf, self.theme, &[]);
    }
}

impl EditorsView<'_> {
    fn table_rect(area: Rect, y: u16) -> Rect {
        let offset = area.width.saturating_sub(TABLE_WIDTH) / 2;
        Rect {
            x: area.x + offset,
            y,
            width: TABLE_WIDTH.min(area.width),
            height: 1,
        }
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.theme.text())
            .add_modifier(Modifier::BOLD);
        let header = Line::from(vec![
            Span::styled(format!("{:<26}", "Editor"), style),
            Span::styled(format!("{:>14}", "Engaged"), style),
            Span::styled(format!("{:>10}", "Share"), style),
        ]);

        Paragraph::new(header)
            .alignment(Alignment::Left)
            .render(Self::table_rect(area, area.y), buf);
    }

    fn render_rows(&self, area: Rect, buf: &mut Buffer) {
        for (i, editor) in self.editors.iter().take(area.height as usize).enumerate() {
            let percent = share_percent(editor.total, self.total);

            let row = Line::from(vec![
                Span::styled(
                    format!("{:<26}", truncate_name(&editor.name, 24)),
                    Style::default().fg(self.theme.accent()),
                ),
                Span::styled(
                    format!("{:>14}", format_number(editor.total)),
                    Style::default().fg(self.theme.text()),
                ),
                Span::styled(
                    format!("{:>9.1}%", percent),
                    Style::default().fg(self.theme.date()),
                ),
                Span::raw("  "),
                Span::styled(
                    format_percentage_bar(percent, BAR_WIDTH),
                    Style::default().fg(self.theme.bar()),
                ),
            ]);

            Paragraph::new(row)
                .alignment(Alignment::Left)
                .render(Self::table_rect(area, area.y + i as u16), buf);
        }
    }
}

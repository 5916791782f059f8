//! Landing view - shown when no account or token is configured

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::common::centered_content;
use super::spinner::{APP_NAME, TAGLINE};
use crate::tui::theme::Theme;

/// Usage lines: (flag or variable, description)
const SETUP: &[(&str, &str)] = &[
    ("--account <NAME>", "Enterprise slug or organization login (or GITHUB_ACCOUNT)"),
    ("--account-type <TYPE>", "enterprise (default) or organization"),
    ("--token <TOKEN>", "Personal access token (or GITHUB_TOKEN)"),
];

/// Token permissions required by the metrics endpoint
const PERMISSIONS: &str =
    "Token needs manage_billing:copilot, read:org or read:enterprise scope";

/// Landing view widget
pub struct LandingView {
    theme: Theme,
}

impl LandingView {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let muted = Style::default().fg(self.theme.muted());
        let mut lines = vec![
            Line::from(Span::styled(
                APP_NAME,
                Style::default()
                    .fg(self.theme.text())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(TAGLINE, muted)),
            Line::default(),
            Line::from(Span::styled(
                "Daily users, editor and language activity, and suggestion acceptance rates.",
                Style::default().fg(self.theme.text()),
            )),
            Line::default(),
        ];

        for (flag, desc) in SETUP {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<24}", flag), Style::default().fg(self.theme.accent())),
                Span::styled(*desc, Style::default().fg(self.theme.text())),
            ]));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            PERMISSIONS,
            Style::default().fg(self.theme.warn()),
        )));
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("q", Style::default().fg(self.theme.accent())),
            Span::styled(": Quit", muted),
        ]));
        lines
    }
}

impl Widget for LandingView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = centered_content(area);
        let lines = self.lines();
        let height = (lines.len() as u16).min(area.height);
        let y = area.y + area.height.saturating_sub(height) / 2;

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .render(
                Rect {
                    x: area.x,
                    y,
                    width: area.width,
                    height: area.height - (y - area.y),
                },
                buf,
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::common::buffer_text;

    #[test]
    fn test_landing_explains_setup() {
        let area = Rect::new(0, 0, 120, 24);
        let mut buf = Buffer::empty(area);

        LandingView::new(Theme::Dark).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains(APP_NAME));
        assert!(text.contains("--account"));
        assert!(text.contains("--account-type"));
        assert!(text.contains("GITHUB_TOKEN"));
        assert!(text.contains("manage_billing:copilot"));
    }
}

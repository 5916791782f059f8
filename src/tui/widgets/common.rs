//! Layout helpers shared by the dashboard views

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::tui::theme::Theme;

/// Maximum content width for every view (keeps layout clean on wide terminals)
pub const MAX_CONTENT_WIDTH: u16 = 140;

/// Truncate a name to `max` characters (UTF-8 safe), marking the cut with "…"
pub fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() > max {
        format!("{}…", name.chars().take(max.saturating_sub(1)).collect::<String>())
    } else {
        name.to_string()
    }
}

/// Clamp `area` to the maximum content width and center it horizontally
pub fn centered_content(area: Rect) -> Rect {
    let content_width = area.width.min(MAX_CONTENT_WIDTH);
    let x_offset = (area.width.saturating_sub(content_width)) / 2;
    Rect {
        x: area.x + x_offset,
        y: area.y,
        width: content_width,
        height: area.height,
    }
}

pub fn render_separator(area: Rect, buf: &mut Buffer, theme: Theme) {
    let line = "─".repeat(area.width as usize);
    buf.set_string(area.x, area.y, &line, Style::default().fg(theme.muted()));
}

/// Render the key hint footer; `extra` adds view-specific bindings before the common ones
pub fn render_keybindings(area: Rect, buf: &mut Buffer, theme: Theme, extra: &[(&str, &str)]) {
    let mut spans = Vec::new();
    let common = [("q", "Quit"), ("Tab", "Switch view"), ("r", "Refetch"), ("?", "Help")];

    for (i, (key, desc)) in extra.iter().chain(common.iter()).enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(theme.accent())));
        spans.push(Span::styled(
            format!(": {}", desc),
            Style::default().fg(theme.muted()),
        ));
    }

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .render(area, buf);
}

/// Render a single centered, muted message (empty states)
pub fn render_notice(area: Rect, buf: &mut Buffer, text: &str, theme: Theme) {
    if area.height == 0 {
        return;
    }
    let y = area.y + area.height / 2;
    let x = area.x + (area.width.saturating_sub(text.chars().count() as u16)) / 2;
    buf.set_string(x, y, text, Style::default().fg(theme.muted()));
}

/// Flatten a rendered buffer into text, one line per row
#[cfg(test)]
pub fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            text.push_str(buf[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("rust", 10), "rust");
        assert_eq!(truncate_name("visualstudiocode", 8), "visuals…");
        assert_eq!(truncate_name("日本語のテキスト", 4), "日本語…");
    }

    #[test]
    fn test_centered_content_narrow() {
        let area = Rect::new(0, 0, 80, 20);
        assert_eq!(centered_content(area), area);
    }

    #[test]
    fn test_centered_content_wide() {
        let area = Rect::new(0, 0, 200, 20);
        let centered = centered_content(area);
        assert_eq!(centered.width, MAX_CONTENT_WIDTH);
        assert_eq!(centered.x, 30);
    }
}

//! Terminal theme detection and color definitions

use ratatui::style::Color;

/// Acceptance-rate band for table coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLevel {
    Unknown,
    Low,
    Normal,
    High,
}

/// Band an acceptance rate: below 20% is low, 35% and above is high.
pub fn rate_level(rate: Option<f64>) -> RateLevel {
    match rate {
        None => RateLevel::Unknown,
        Some(r) if r >= 0.35 => RateLevel::High,
        Some(r) if r < 0.20 => RateLevel::Low,
        Some(_) => RateLevel::Normal,
    }
}

/// Terminal color scheme (dark or light background)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Auto-detect terminal theme from background luminance.
    /// Must be called **before** entering raw mode (ratatui::init).
    /// Falls back to Dark if detection fails.
    pub fn detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Self::Light,
            _ => Self::Dark,
        }
    }

    /// Primary text color (headers, body text)
    pub fn text(self) -> Color {
        match self {
            Self::Dark => Color::White,
            Self::Light => Color::Black,
        }
    }

    /// Active/accent color (selected tabs, keybinding keys, interactive elements)
    pub fn accent(self) -> Color {
        match self {
            Self::Dark => Color::Cyan,
            Self::Light => Color::Indexed(25), // dark blue (ANSI 256)
        }
    }

    /// Secondary/muted text (separators, inactive tabs, hints)
    pub fn muted(self) -> Color {
        match self {
            Self::Dark => Color::DarkGray,
            Self::Light => Color::Gray,
        }
    }

    /// Date text color
    pub fn date(self) -> Color {
        match self {
            Self::Dark => Color::Yellow,
            Self::Light => Color::Indexed(130), // dark orange/yellow (ANSI 256)
        }
    }

    /// Active-users series
    pub fn active(self) -> Color {
        match self {
            Self::Dark => Color::Red,
            Self::Light => Color::Indexed(160), // strong red (ANSI 256)
        }
    }

    /// Engaged-users series
    pub fn engaged(self) -> Color {
        match self {
            Self::Dark => Color::Blue,
            Self::Light => Color::Indexed(25), // dark blue (ANSI 256)
        }
    }

    /// Bar/positive indicator color
    pub fn bar(self) -> Color {
        match self {
            Self::Dark => Color::Green,
            Self::Light => Color::Indexed(22), // dark green (ANSI 256)
        }
    }

    /// Error/negative indicator color
    pub fn error(self) -> Color {
        match self {
            Self::Dark => Color::Red,
            Self::Light => Color::Indexed(124), // dark red (ANSI 256)
        }
    }

    /// Low acceptance warning color
    pub fn warn(self) -> Color {
        match self {
            Self::Dark => Color::Indexed(208), // orange (ANSI 256)
            Self::Light => Color::Indexed(166), // dark orange (ANSI 256)
        }
    }

    /// Acceptance-rate color for a band
    pub fn rate_color(self, level: RateLevel) -> Color {
        match level {
            RateLevel::Unknown => self.muted(),
            RateLevel::Low => self.warn(),
            RateLevel::Normal => self.text(),
            RateLevel::High => self.bar(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_colors() {
        let t = Theme::Dark;
        assert_eq!(t.text(), Color::White);
        assert_eq!(t.accent(), Color::Cyan);
        assert_eq!(t.muted(), Color::DarkGray);
        assert_eq!(t.date(), Color::Yellow);
        assert_eq!(t.active(), Color::Red);
        assert_eq!(t.engaged(), Color::Blue);
        assert_eq!(t.bar(), Color::Green);
        assert_eq!(t.error(), Color::Red);
        assert_eq!(t.warn(), Color::Indexed(208));
    }

    #[test]
    fn test_light_theme_colors() {
        let t = Theme::Light;
        assert_eq!(t.text(), Color::Black);
        assert_eq!(t.accent(), Color::Indexed(25));
        assert_eq!(t.muted(), Color::Gray);
        assert_eq!(t.date(), Color::Indexed(130));
        assert_eq!(t.active(), Color::Indexed(160));
        assert_eq!(t.engaged(), Color::Indexed(25));
        assert_eq!(t.bar(), Color::Indexed(22));
        assert_eq!(t.error(), Color::Indexed(124));
        assert_eq!(t.warn(), Color::Indexed(166));
    }

    #[test]
    fn test_default_is_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
    }

    // ========== Rate level tests ==========

    #[test]
    fn test_rate_level_bands() {
        assert_eq!(rate_level(None), RateLevel::Unknown);
        assert_eq!(rate_level(Some(0.0)), RateLevel::Low);
        assert_eq!(rate_level(Some(0.199)), RateLevel::Low);
        assert_eq!(rate_level(Some(0.2)), RateLevel::Normal);
        assert_eq!(rate_level(Some(0.349)), RateLevel::Normal);
        assert_eq!(rate_level(Some(0.35)), RateLevel::High);
        assert_eq!(rate_level(Some(1.0)), RateLevel::High);
    }

    #[test]
    fn test_rate_color() {
        let t = Theme::Dark;
        assert_eq!(t.rate_color(RateLevel::Unknown), t.muted());
        assert_eq!(t.rate_color(RateLevel::Low), t.warn());
        assert_eq!(t.rate_color(RateLevel::Normal), t.text());
        assert_eq!(t.rate_color(RateLevel::High), t.bar());
    }
}

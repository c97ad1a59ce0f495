// Theme system for the TUI
//
// A small set of built-in color themes, cycled at runtime with 't'.

use ratatui::style::Color;

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
    Nord,
}

impl ThemeKind {
    pub fn all() -> &'static [ThemeKind] {
        &[ThemeKind::Dark, ThemeKind::Light, ThemeKind::Nord]
    }

    /// Next theme in the cycle
    pub fn next(self) -> Self {
        let themes = Self::all();
        let current = themes.iter().position(|&t| t == self).unwrap_or(0);
        themes[(current + 1) % themes.len()]
    }

    /// Parse a configured theme name; unknown names fall back to Dark.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => ThemeKind::Light,
            "nord" => ThemeKind::Nord,
            _ => ThemeKind::Dark,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
            ThemeKind::Nord => "Nord",
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
            ThemeKind::Nord => Theme::nord(),
        }
    }
}

/// Complete theme definition for the colors these views use
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,
    pub title: Color,
    pub status_bar: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub muted: Color,
    pub accent: Color,
    /// Checked calendar cells and success counts
    pub marked: Color,
    pub error: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(18, 18, 24),
            foreground: Color::Rgb(220, 220, 220),
            border: Color::Rgb(70, 70, 90),
            border_focused: Color::Rgb(130, 170, 255),
            title: Color::Rgb(130, 170, 255),
            status_bar: Color::Rgb(150, 150, 160),
            selected_bg: Color::Rgb(50, 60, 90),
            selected_fg: Color::White,
            muted: Color::Rgb(120, 120, 130),
            accent: Color::Rgb(255, 200, 100),
            marked: Color::Rgb(120, 220, 140),
            error: Color::Rgb(240, 110, 110),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(250, 250, 248),
            foreground: Color::Rgb(40, 40, 40),
            border: Color::Rgb(180, 180, 180),
            border_focused: Color::Rgb(40, 90, 200),
            title: Color::Rgb(40, 90, 200),
            status_bar: Color::Rgb(100, 100, 100),
            selected_bg: Color::Rgb(210, 225, 255),
            selected_fg: Color::Black,
            muted: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(180, 120, 0),
            marked: Color::Rgb(30, 140, 60),
            error: Color::Rgb(190, 40, 40),
        }
    }

    pub fn nord() -> Self {
        Self {
            background: Color::Rgb(46, 52, 64),
            foreground: Color::Rgb(216, 222, 233),
            border: Color::Rgb(76, 86, 106),
            border_focused: Color::Rgb(136, 192, 208),
            title: Color::Rgb(136, 192, 208),
            status_bar: Color::Rgb(144, 153, 170),
            selected_bg: Color::Rgb(67, 76, 94),
            selected_fg: Color::Rgb(236, 239, 244),
            muted: Color::Rgb(110, 120, 140),
            accent: Color::Rgb(235, 203, 139),
            marked: Color::Rgb(163, 190, 140),
            error: Color::Rgb(191, 97, 106),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_visits_every_theme_and_wraps() {
        let mut kind = ThemeKind::Dark;
        let mut seen = Vec::new();
        for _ in 0..ThemeKind::all().len() {
            seen.push(kind);
            kind = kind.next();
        }
        assert_eq!(kind, ThemeKind::Dark);
        assert_eq!(seen.len(), ThemeKind::all().len());
    }

    #[test]
    fn parse_is_case_insensitive_with_dark_fallback() {
        assert_eq!(ThemeKind::parse("nord"), ThemeKind::Nord);
        assert_eq!(ThemeKind::parse("LIGHT"), ThemeKind::Light);
        assert_eq!(ThemeKind::parse("solarized"), ThemeKind::Dark);
    }
}

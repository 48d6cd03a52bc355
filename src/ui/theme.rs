use ratatui::style::Color;

use crate::prefs::Theme;

/// Resolved color palette for the active theme.
///
/// Every render derives its palette from the preference store's current
/// theme, so a persisted or toggled theme restyles the very next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub primary: Color,
    pub accent: Color,
    pub border: Color,
    pub disabled: Color,
    pub error: Color,
    pub success: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                background: Color::White,
                text: Color::Black,
                muted: Color::DarkGray,
                primary: Color::Blue,
                accent: Color::Magenta,
                border: Color::Gray,
                disabled: Color::Gray,
                error: Color::Red,
                success: Color::Green,
            },
            Theme::Dark => Palette {
                background: Color::Black,
                text: Color::White,
                muted: Color::Gray,
                primary: Color::Cyan,
                accent: Color::LightMagenta,
                border: Color::DarkGray,
                disabled: Color::DarkGray,
                error: Color::LightRed,
                success: Color::LightGreen,
            },
        }
    }
}

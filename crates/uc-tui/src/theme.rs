//! Terminal color theme.
//!
//! Adaptive palettes for dark and light terminal backgrounds.
//! Auto-detects via the COLORFGBG env var, with a manual override from
//! the --light flag.

use ratatui::style::Color;

/// Color theme for the terminal UI. Widgets take their colors from here
/// instead of hardcoding `Color::` values.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Primary foreground text.
    pub text: Color,
    /// Secondary/hint text (footers, key help).
    pub text_dim: Color,
    /// Default border color.
    pub border: Color,
    /// Border of the active/accented pane.
    pub border_accent: Color,
    /// Positive numbers (gold, healing).
    pub good: Color,
    /// Negative numbers (damage, low HP).
    pub bad: Color,

    // First-person view faces
    pub view_floor: Color,
    pub view_ceiling: Color,
    pub view_wall: Color,
    pub view_front: Color,

    /// Player marker on the minimap.
    pub map_player: Color,
}

impl Theme {
    /// Dark terminal background theme (default).
    pub fn dark() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::DarkGray,
            border: Color::White,
            border_accent: Color::Cyan,
            good: Color::Green,
            bad: Color::Red,
            view_floor: Color::DarkGray,
            view_ceiling: Color::DarkGray,
            view_wall: Color::Gray,
            view_front: Color::White,
            map_player: Color::White,
        }
    }

    /// Light terminal background theme.
    pub fn light() -> Self {
        Self {
            text: Color::Black,
            text_dim: Color::DarkGray,
            border: Color::DarkGray,
            border_accent: Color::Blue,
            good: Color::Green,
            bad: Color::Red,
            view_floor: Color::Gray,
            view_ceiling: Color::Gray,
            view_wall: Color::DarkGray,
            view_front: Color::Black,
            map_player: Color::Black,
        }
    }

    /// Pick a theme: explicit flag wins, otherwise COLORFGBG is
    /// consulted (a light background reports a high background index).
    pub fn detect(force_light: bool) -> Self {
        if force_light || env_reports_light_background() {
            Self::light()
        } else {
            Self::dark()
        }
    }
}

fn env_reports_light_background() -> bool {
    let Ok(val) = std::env::var("COLORFGBG") else {
        return false;
    };
    // Format is "fg;bg"; backgrounds 7 and 15 are the light ones.
    val.rsplit(';')
        .next()
        .and_then(|bg| bg.parse::<u8>().ok())
        .is_some_and(|bg| bg == 7 || bg == 15)
}

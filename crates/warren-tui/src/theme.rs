//! Terminal color theme system
//!
//! Provides adaptive palettes for dark and light terminal backgrounds.
//! Auto-detects via COLORFGBG env var, or manual override with --light
//! or WARREN_LIGHT_BG=1.

use ratatui::style::Color;

use warren_core::effects::Color as GameColor;

/// Color theme for the terminal UI.
/// UI code should use theme colors instead of hardcoded Color:: values;
/// colors coming from the simulation go through [`Theme::game_rgb`].
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    // General UI text
    /// Primary foreground text
    pub text: Color,
    /// Secondary/hint text (footers, instructions)
    pub text_dim: Color,
    /// Muted text (empty states, placeholder)
    pub text_muted: Color,

    // Borders
    /// Default border color
    pub border: Color,
    /// Action border (menus)
    pub border_action: Color,
    /// Danger border (death screen)
    pub border_danger: Color,

    // Interactive elements
    /// Selected/cursor item foreground
    pub cursor_fg: Color,
    /// Selected/cursor item background
    pub cursor_bg: Color,

    // Semantic colors
    /// Section headers, accent text
    pub accent: Color,
    /// Positive (healing, gold)
    pub good: Color,
    /// Negative (death, danger)
    pub bad: Color,

    // Map
    pub map_floor: Color,
    pub map_player: Color,
    pub map_shop: Color,
    pub map_fireball: Color,

    // Creature health ramp
    pub hp_high: Color,
    pub hp_mid: Color,
    pub hp_low: Color,
}

impl Theme {
    /// Dark terminal background theme (default)
    pub fn dark() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::DarkGray,
            text_muted: Color::Gray,
            border: Color::White,
            border_action: Color::Yellow,
            border_danger: Color::Red,
            cursor_fg: Color::Yellow,
            cursor_bg: Color::DarkGray,
            accent: Color::Cyan,
            good: Color::Green,
            bad: Color::Red,
            map_floor: Color::DarkGray,
            map_player: Color::White,
            map_shop: Color::Yellow,
            map_fireball: Color::LightRed,
            hp_high: Color::Green,
            hp_mid: Color::Yellow,
            hp_low: Color::Red,
        }
    }

    /// Light terminal background theme
    pub fn light() -> Self {
        Self {
            text: Color::Black,
            text_dim: Color::DarkGray,
            text_muted: Color::DarkGray,
            border: Color::DarkGray,
            border_action: Color::Yellow,
            border_danger: Color::Red,
            cursor_fg: Color::Yellow,
            cursor_bg: Color::DarkGray,
            accent: Color::Blue,
            good: Color::Green,
            bad: Color::Red,
            map_floor: Color::Gray,
            map_player: Color::Black,
            map_shop: Color::Yellow,
            map_fireball: Color::Red,
            hp_high: Color::Green,
            hp_mid: Color::Yellow,
            hp_low: Color::Red,
        }
    }

    /// Auto-detect terminal background and return the matching theme.
    /// Checks COLORFGBG and the WARREN_LIGHT_BG override.
    pub fn detect() -> Self {
        if Self::is_light_background() {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Map a simulation color to a terminal color. Near-white text is
    /// darkened on light backgrounds and near-black text lifted on dark
    /// ones so log lines and floaters stay readable.
    pub fn game_rgb(&self, color: GameColor) -> Color {
        let GameColor(r, g, b) = color;
        let is_light = self.text == Color::Black;
        if is_light && r > 200 && g > 200 && b > 200 {
            return Color::Black;
        }
        if !is_light && r < 64 && g < 64 && b < 64 {
            return Color::DarkGray;
        }
        Color::Rgb(r, g, b)
    }

    fn is_light_background() -> bool {
        // Explicit override via environment variable
        if let Ok(val) = std::env::var("WARREN_LIGHT_BG") {
            return val == "1" || val.eq_ignore_ascii_case("true");
        }

        // COLORFGBG is set by many terminals (xterm, rxvt, iTerm2, etc.)
        // Format: "fg;bg" where values are color indices (0-15)
        // Light backgrounds typically have bg index >= 7 (excluding 8 which is bright black)
        if let Ok(colorfgbg) = std::env::var("COLORFGBG")
            && let Some(bg_str) = colorfgbg.rsplit(';').next()
            && let Ok(bg_idx) = bg_str.parse::<u8>()
        {
            return matches!(bg_idx, 7 | 9..=15);
        }

        false
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_text_is_white() {
        let theme = Theme::dark();
        assert_eq!(theme.text, Color::White);
        assert_eq!(theme.map_player, Color::White);
    }

    #[test]
    fn test_light_theme_text_is_black() {
        let theme = Theme::light();
        assert_eq!(theme.text, Color::Black);
        assert_eq!(theme.map_player, Color::Black);
    }

    #[test]
    fn test_game_rgb_passes_saturated_colors_through() {
        let theme = Theme::dark();
        assert_eq!(theme.game_rgb(GameColor(255, 50, 50)), Color::Rgb(255, 50, 50));
        let theme = Theme::light();
        assert_eq!(theme.game_rgb(GameColor(255, 50, 50)), Color::Rgb(255, 50, 50));
    }

    #[test]
    fn test_game_rgb_darkens_white_on_light_bg() {
        let theme = Theme::light();
        assert_eq!(theme.game_rgb(GameColor(255, 255, 255)), Color::Black);
    }

    #[test]
    fn test_game_rgb_lifts_near_black_on_dark_bg() {
        let theme = Theme::dark();
        assert_eq!(theme.game_rgb(GameColor(20, 20, 20)), Color::DarkGray);
    }
}

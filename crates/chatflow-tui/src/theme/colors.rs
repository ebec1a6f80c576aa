//! Catppuccin color palettes for the TUI.

use chatflow_engine::ThemeChoice;
use ratatui::style::Color;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,

    // Foregrounds
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,
    pub secondary: Color,

    // Semantic
    pub online: Color,
    pub badge: Color,
    pub alert: Color,

    // Message bubbles
    pub bubble_local: Color,
    pub bubble_remote: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Palette for a configured theme.
    pub fn from_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Mocha => Self::mocha(),
            ThemeChoice::Latte => Self::latte(),
            ThemeChoice::HighContrast => Self::high_contrast(),
        }
    }

    /// Catppuccin Mocha theme (default dark theme).
    pub fn mocha() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),    // #1e1e2e
            surface: Color::Rgb(49, 50, 68), // #313244
            overlay: Color::Rgb(69, 71, 90), // #45475a

            text: Color::Rgb(205, 214, 244),    // #cdd6f4
            subtext: Color::Rgb(166, 173, 200), // #a6adc8
            muted: Color::Rgb(108, 112, 134),   // #6c7086

            primary: Color::Rgb(137, 180, 250),   // #89b4fa (blue)
            secondary: Color::Rgb(148, 226, 213), // #94e2d5 (teal)

            online: Color::Rgb(166, 227, 161), // #a6e3a1 (green)
            badge: Color::Rgb(180, 190, 254),  // #b4befe (lavender)
            alert: Color::Rgb(243, 139, 168),  // #f38ba8 (red)

            bubble_local: Color::Rgb(137, 180, 250),
            bubble_remote: Color::Rgb(205, 214, 244),

            border: Color::Rgb(69, 71, 90),            // #45475a
            border_focused: Color::Rgb(137, 180, 250), // #89b4fa
        }
    }

    /// Catppuccin Latte theme (light theme).
    pub fn latte() -> Self {
        Self {
            base: Color::Rgb(239, 241, 245),    // #eff1f5
            surface: Color::Rgb(230, 233, 239), // #e6e9ef
            overlay: Color::Rgb(220, 224, 232), // #dce0e8

            text: Color::Rgb(76, 79, 105),    // #4c4f69
            subtext: Color::Rgb(92, 95, 119), // #5c5f77
            muted: Color::Rgb(140, 143, 161), // #8c8fa1

            primary: Color::Rgb(30, 102, 245),   // #1e66f5 (blue)
            secondary: Color::Rgb(23, 146, 153), // #179299 (teal)

            online: Color::Rgb(64, 160, 43),  // #40a02b (green)
            badge: Color::Rgb(114, 135, 253), // #7287fd (lavender)
            alert: Color::Rgb(210, 15, 57),   // #d20f39 (red)

            bubble_local: Color::Rgb(30, 102, 245),
            bubble_remote: Color::Rgb(76, 79, 105),

            border: Color::Rgb(188, 192, 204),        // #bcc0cc
            border_focused: Color::Rgb(30, 102, 245), // #1e66f5
        }
    }

    /// High contrast theme for accessibility.
    pub fn high_contrast() -> Self {
        Self {
            base: Color::Black,
            surface: Color::Rgb(20, 20, 20),
            overlay: Color::Rgb(40, 40, 40),

            text: Color::White,
            subtext: Color::Rgb(200, 200, 200),
            muted: Color::Rgb(150, 150, 150),

            primary: Color::Cyan,
            secondary: Color::Magenta,

            online: Color::Green,
            badge: Color::Yellow,
            alert: Color::Red,

            bubble_local: Color::Cyan,
            bubble_remote: Color::White,

            border: Color::White,
            border_focused: Color::Cyan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_mocha() {
        assert!(matches!(Theme::default().base, Color::Rgb(30, 30, 46)));
    }

    #[test]
    fn test_from_choice() {
        assert!(matches!(
            Theme::from_choice(ThemeChoice::Latte).base,
            Color::Rgb(239, 241, 245)
        ));
        assert!(matches!(
            Theme::from_choice(ThemeChoice::HighContrast).base,
            Color::Black
        ));
    }
}

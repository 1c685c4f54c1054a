//! Session styling
//!
//! A [`Theme`] is built once when a session starts and handed to every
//! renderer; nothing here is global.

use ratatui::style::{Color, Modifier, Style};

/// Styles used across all screens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub title: Style,
    pub selected: Style,
    pub subtle: Style,
    pub footer: Style,
    pub search: Style,
    pub preset_badge: Style,
    pub user_badge: Style,
    pub suggested: Style,
    pub error: Style,
    pub warning: Style,
    pub success: Style,
    pub border: Style,
}

impl Theme {
    /// Colored theme for capable terminals
    pub fn colored() -> Self {
        Self {
            title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            subtle: Style::default().fg(Color::DarkGray),
            footer: Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            search: Style::default().fg(Color::White),
            preset_badge: Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            user_badge: Style::default().fg(Color::Blue),
            suggested: Style::default().fg(Color::Green),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            warning: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            success: Style::default().fg(Color::Green),
            border: Style::default().fg(Color::DarkGray),
        }
    }

    /// Terminal default colors, emphasis through modifiers only
    pub fn plain() -> Self {
        let none = Style::default();
        Self {
            title: none.add_modifier(Modifier::BOLD),
            selected: none.add_modifier(Modifier::BOLD),
            subtle: none,
            footer: none.add_modifier(Modifier::ITALIC),
            search: none,
            preset_badge: none.add_modifier(Modifier::BOLD),
            user_badge: none,
            suggested: none,
            error: none.add_modifier(Modifier::BOLD),
            warning: none.add_modifier(Modifier::BOLD),
            success: none,
            border: none,
        }
    }

    /// Plain when `NO_COLOR` is set to anything non-empty, colored otherwise
    pub fn from_env() -> Self {
        match std::env::var_os("NO_COLOR") {
            Some(v) if !v.is_empty() => Self::plain(),
            _ => Self::colored(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::colored()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_plain_has_no_colors() {
        let theme = Theme::plain();
        assert_eq!(theme.error.fg, None);
        assert!(theme.error.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    #[serial]
    fn test_from_env_honors_no_color() {
        // SAFETY: serialized with the other env-touching tests
        unsafe { std::env::set_var("NO_COLOR", "1") };
        assert_eq!(Theme::from_env(), Theme::plain());
        unsafe { std::env::remove_var("NO_COLOR") };
        assert_eq!(Theme::from_env(), Theme::colored());
    }
}

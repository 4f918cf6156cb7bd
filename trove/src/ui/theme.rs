//! Color theme and styling for the treasure-hunt TUI.

use ratatui::style::{Color, Modifier, Style};

use crate::app::LogKind;

/// Game UI color theme.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct GameTheme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Log colors
    pub story_text: Color,
    pub system_text: Color,
    pub error_text: Color,

    // Map colors
    pub path_color: Color,
    pub hunter_color: Color,
    pub landmark_color: Color,

    // Input
    pub input_text: Color,
}

impl Default for GameTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            story_text: Color::White,
            system_text: Color::DarkGray,
            error_text: Color::Red,

            path_color: Color::Yellow,
            hunter_color: Color::LightCyan,
            landmark_color: Color::Green,

            input_text: Color::Cyan,
        }
    }
}

impl GameTheme {
    /// Style for a log entry of the given kind.
    pub fn log_style(&self, kind: LogKind) -> Style {
        match kind {
            LogKind::Story => Style::default().fg(self.story_text),
            LogKind::System => Style::default()
                .fg(self.system_text)
                .add_modifier(Modifier::DIM),
            LogKind::Error => Style::default()
                .fg(self.error_text)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Border style for a panel.
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    /// Style for the name input text.
    pub fn input_style(&self) -> Style {
        Style::default().fg(self.input_text)
    }

    /// Style for landmark labels on the map.
    pub fn landmark_style(&self) -> Style {
        Style::default()
            .fg(self.landmark_color)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the hunter marker on the map.
    pub fn hunter_style(&self) -> Style {
        Style::default()
            .fg(self.hunter_color)
            .add_modifier(Modifier::BOLD)
    }
}

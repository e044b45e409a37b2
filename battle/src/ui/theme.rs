//! Color theme and styling for the battle TUI

use ratatui::style::{Color, Modifier, Style};

/// Battle UI color theme
#[derive(Debug, Clone)]
pub struct GameTheme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Pool colors
    pub hp_healthy: Color,
    pub hp_wounded: Color,
    pub hp_critical: Color,
    pub mp: Color,
    pub dead: Color,

    // Log colors
    pub hero_text: Color,
    pub monster_text: Color,
    pub error_text: Color,
    pub system_text: Color,

    // Turn colors
    pub hero_turn: Color,
    pub monster_turn: Color,
}

impl Default for GameTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            hp_healthy: Color::Green,
            hp_wounded: Color::Yellow,
            hp_critical: Color::Red,
            mp: Color::Blue,
            dead: Color::DarkGray,

            hero_text: Color::Cyan,
            monster_text: Color::LightRed,
            error_text: Color::Red,
            system_text: Color::DarkGray,

            hero_turn: Color::LightGreen,
            monster_turn: Color::LightRed,
        }
    }
}

impl GameTheme {
    /// Get style for hero actions in the log
    pub fn hero_style(&self) -> Style {
        Style::default().fg(self.hero_text)
    }

    /// Get style for monster actions in the log
    pub fn monster_style(&self) -> Style {
        Style::default().fg(self.monster_text)
    }

    pub fn error_style(&self) -> Style {
        Style::default()
            .fg(self.error_text)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for system messages
    pub fn system_style(&self) -> Style {
        Style::default()
            .fg(self.system_text)
            .add_modifier(Modifier::DIM)
    }

    /// Get HP bar color based on ratio
    pub fn hp_color(&self, ratio: f32) -> Color {
        if ratio > 0.5 {
            self.hp_healthy
        } else if ratio > 0.25 {
            self.hp_wounded
        } else {
            self.hp_critical
        }
    }

    pub fn dead_style(&self) -> Style {
        Style::default()
            .fg(self.dead)
            .add_modifier(Modifier::CROSSED_OUT)
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    /// Get title style
    pub fn title_style(&self, focused: bool) -> Style {
        let style = Style::default().fg(if focused {
            self.border_focused
        } else {
            self.foreground
        });

        if focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// Get initiative entry style
    pub fn initiative_style(&self, is_current: bool, is_hero: bool) -> Style {
        let color = if is_hero {
            self.hero_turn
        } else {
            self.monster_turn
        };

        let style = Style::default().fg(color);
        if is_current {
            style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            style
        }
    }
}

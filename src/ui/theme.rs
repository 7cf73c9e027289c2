use ratatui::style::{Color, Modifier, Style};

use crate::loaders::ConfiguredState;
use crate::vim::VimMode;

/// Colors for the host page and the wizard overlay
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub foreground: Color,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
    pub border: Color,
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Magenta,
            secondary: Color::Cyan,
            background: Color::Reset,
            foreground: Color::White,
            error: Color::Red,
            success: Color::Green,
            warning: Color::Yellow,
            border: Color::DarkGray,
            muted: Color::DarkGray,
        }
    }
}

impl Theme {
    pub fn style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn primary_style(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn heading_style(&self) -> Style {
        self.primary_style().add_modifier(Modifier::BOLD)
    }

    pub fn secondary_style(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Highlight for the row under the cursor
    pub fn cursor_style(&self) -> Style {
        self.primary_style().add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    /// Plugin row colored by its configuration state
    pub fn plugin_style(&self, state: ConfiguredState) -> Style {
        match state {
            ConfiguredState::Configured => self.success_style(),
            ConfiguredState::Unconfigured => Style::default().fg(self.warning),
            ConfiguredState::InvalidConfig => self.error_style(),
        }
    }

    pub fn mode_style(&self, mode: VimMode) -> Style {
        let color = match mode {
            VimMode::Normal => self.secondary,
            VimMode::Insert => self.success,
            VimMode::Command => self.primary,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

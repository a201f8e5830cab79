//! Light/dark palette shared by the menu and every game screen
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub dark: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self { dark: true }
    }
}

impl Theme {
    pub fn new(dark: bool) -> Self {
        Self { dark }
    }

    pub fn toggled(self) -> Self {
        Self { dark: !self.dark }
    }

    pub fn label(&self) -> &'static str {
        if self.dark { "Dark" } else { "Light" }
    }

    /// Background and default foreground for a whole screen.
    pub fn base(&self) -> Style {
        if self.dark {
            Style::default().bg(Color::Black).fg(Color::White)
        } else {
            Style::default().bg(Color::White).fg(Color::Black)
        }
    }

    pub fn accent(&self) -> Color {
        if self.dark { Color::Cyan } else { Color::Blue }
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(if self.dark { Color::Gray } else { Color::DarkGray })
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.accent()).add_modifier(Modifier::BOLD)
    }

    /// Cursor or current-word highlight.
    pub fn highlight(&self) -> Style {
        Style::default().bg(Color::Yellow).fg(Color::Black)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn success(&self) -> Style {
        Style::default()
            .fg(if self.dark { Color::LightGreen } else { Color::Green })
            .add_modifier(Modifier::BOLD)
    }

    pub fn block<'a>(&self, title: &'a str) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.accent()))
            .title(title)
            .style(self.base())
    }
}

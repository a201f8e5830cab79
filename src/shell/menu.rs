use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::Modifier,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::games::GameInfo;
use crate::shell::theme::Theme;

pub enum MenuResult {
    Play(&'static str), // Game ID
    ToggleTheme,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuScreen {
    Home,
    About,
}

pub struct MenuManager {
    pub selected_game_index: usize,
    pub screen: MenuScreen,
}

impl Default for MenuManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuManager {
    pub fn new() -> Self {
        Self {
            selected_game_index: 0,
            screen: MenuScreen::Home,
        }
    }

    pub fn run(
        &mut self,
        terminal: &mut ratatui::DefaultTerminal,
        games: &[GameInfo],
        theme: &Theme,
    ) -> Result<MenuResult> {
        loop {
            terminal.draw(|f| self.render(f, games, theme))?;

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if let Some(result) = self.handle_key(key, games) {
                        return Ok(result);
                    }
                }
            }
        }
    }

    /// Applies one key press; returns `Some` when control leaves the menu.
    pub fn handle_key(&mut self, key: KeyEvent, games: &[GameInfo]) -> Option<MenuResult> {
        match self.screen {
            MenuScreen::About => match key.code {
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('a') => {
                    self.screen = MenuScreen::Home;
                    None
                }
                KeyCode::Char('q') => Some(MenuResult::Quit),
                _ => None,
            },
            MenuScreen::Home => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => games
                    .get(self.selected_game_index)
                    .map(|g| MenuResult::Play(g.id)),
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    let index = c.to_digit(10).unwrap_or(0) as usize;
                    games
                        .get(index.wrapping_sub(1))
                        .map(|g| MenuResult::Play(g.id))
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.selected_game_index = self.selected_game_index.saturating_sub(1);
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.selected_game_index =
                        (self.selected_game_index + 1).min(games.len().saturating_sub(1));
                    None
                }
                KeyCode::Char('t') => Some(MenuResult::ToggleTheme),
                KeyCode::Char('a') => {
                    self.screen = MenuScreen::About;
                    None
                }
                KeyCode::Char('q') | KeyCode::Esc => Some(MenuResult::Quit),
                _ => None,
            },
        }
    }

    fn render(&self, f: &mut Frame, games: &[GameInfo], theme: &Theme) {
        f.render_widget(ratatui::widgets::Block::default().style(theme.base()), f.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        let header = vec![
            Line::from(Span::styled("GAME HUB", theme.title())),
            Line::from(Span::styled(
                "\"Where Fun Meets Focus!\"",
                theme.muted().add_modifier(Modifier::ITALIC),
            )),
        ];
        f.render_widget(
            Paragraph::new(header)
                .block(theme.block(""))
                .alignment(Alignment::Center),
            chunks[0],
        );

        match self.screen {
            MenuScreen::About => {
                let text = vec![
                    Line::from("A small collection of casual games for the terminal."),
                    Line::from(""),
                    Line::from(" » Tic Tac Toe: two players share the keyboard, X moves first."),
                    Line::from(" » Typing Master: type the sentence before the clock runs out."),
                    Line::from(" » Card Clash: flip cards two at a time and find all eight pairs."),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Press Esc on any game to come back here.",
                        theme.muted(),
                    )),
                ];
                f.render_widget(
                    Paragraph::new(text)
                        .block(theme.block(" ABOUT "))
                        .wrap(Wrap { trim: false }),
                    chunks[1],
                );
                f.render_widget(
                    Paragraph::new("[Esc] Back  [Q] Quit")
                        .style(theme.base())
                        .alignment(Alignment::Center),
                    chunks[2],
                );
            }
            MenuScreen::Home => {
                let items: Vec<ListItem> = games
                    .iter()
                    .enumerate()
                    .map(|(i, g)| {
                        let style = if i == self.selected_game_index {
                            theme.title()
                        } else {
                            theme.base()
                        };
                        ListItem::new(format!(" {}. {} : {}", i + 1, g.name, g.description))
                            .style(style)
                    })
                    .collect();

                f.render_widget(
                    List::new(items).block(theme.block(" AVAILABLE GAMES ")),
                    chunks[1],
                );

                f.render_widget(
                    Paragraph::new(format!(
                        "[↑/↓] Navigate  [Enter] Play  [T] Theme: {}  [A] About  [Q] Quit",
                        theme.label()
                    ))
                    .style(theme.base())
                    .alignment(Alignment::Center),
                    chunks[2],
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn games() -> Vec<GameInfo> {
        crate::games::get_all_games()
            .into_iter()
            .map(|g| g.info)
            .collect()
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn enter_plays_selected_game() {
        let games = games();
        let mut menu = MenuManager::new();
        menu.handle_key(press(KeyCode::Down), &games);

        match menu.handle_key(press(KeyCode::Enter), &games) {
            Some(MenuResult::Play(id)) => assert_eq!(id, games[1].id),
            _ => panic!("expected to launch the second game"),
        }
    }

    #[test]
    fn selection_stays_within_game_list() {
        let games = games();
        let mut menu = MenuManager::new();
        menu.handle_key(press(KeyCode::Up), &games);
        assert_eq!(menu.selected_game_index, 0);

        for _ in 0..10 {
            menu.handle_key(press(KeyCode::Down), &games);
        }
        assert_eq!(menu.selected_game_index, games.len() - 1);
    }

    #[test]
    fn digit_shortcut_launches_game() {
        let games = games();
        let mut menu = MenuManager::new();
        assert!(matches!(
            menu.handle_key(press(KeyCode::Char('3')), &games),
            Some(MenuResult::Play(id)) if id == games[2].id
        ));
        assert!(menu.handle_key(press(KeyCode::Char('0')), &games).is_none());
        assert!(menu.handle_key(press(KeyCode::Char('9')), &games).is_none());
    }

    #[test]
    fn about_screen_round_trip() {
        let games = games();
        let mut menu = MenuManager::new();
        assert!(menu.handle_key(press(KeyCode::Char('a')), &games).is_none());
        assert_eq!(menu.screen, MenuScreen::About);

        // Enter does nothing on the about screen
        assert!(menu.handle_key(press(KeyCode::Enter), &games).is_none());

        menu.handle_key(press(KeyCode::Esc), &games);
        assert_eq!(menu.screen, MenuScreen::Home);
    }

    #[test]
    fn theme_and_quit_keys() {
        let games = games();
        let mut menu = MenuManager::new();
        assert!(matches!(
            menu.handle_key(press(KeyCode::Char('t')), &games),
            Some(MenuResult::ToggleTheme)
        ));
        assert!(matches!(
            menu.handle_key(press(KeyCode::Char('q')), &games),
            Some(MenuResult::Quit)
        ));
    }
}

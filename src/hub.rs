//! Top-level loop: menu, launch a game, back to the menu.

use anyhow::{anyhow, Result};
use ratatui::DefaultTerminal;
use tracing::{info, instrument, warn};

use crate::config::{Preferences, Settings};
use crate::games::{get_all_games, get_game, GameInfo};
use crate::shell::menu::{MenuManager, MenuResult};
use crate::shell::theme::Theme;

pub struct Hub {
    settings: Settings,
    theme: Theme,
    menu: MenuManager,
}

impl Hub {
    pub fn new(settings: Settings, theme: Theme) -> Self {
        Self {
            settings,
            theme,
            menu: MenuManager::new(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flips dark mode and remembers the choice. A failed write is logged,
    /// the new theme still applies for this run.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        let prefs = Preferences {
            dark: self.theme.dark,
        };
        if let Err(err) = prefs.save(&self.settings.state_file) {
            warn!(error = %err, "could not persist theme");
        }
        self.theme
    }

    /// Shows the menu until the player quits.
    #[instrument(skip_all)]
    pub async fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let games: Vec<GameInfo> = get_all_games().into_iter().map(|g| g.info).collect();
        info!(games = games.len(), "hub started");

        loop {
            match self.menu.run(terminal, &games, &self.theme)? {
                MenuResult::Play(id) => self.play(terminal, id).await?,
                MenuResult::ToggleTheme => {
                    let theme = self.toggle_theme();
                    info!(theme = theme.label(), "theme toggled");
                }
                MenuResult::Quit => break,
            }
        }

        info!("hub closed");
        Ok(())
    }

    /// Runs one game until the player leaves it.
    #[instrument(skip(self, terminal))]
    pub async fn play(&mut self, terminal: &mut DefaultTerminal, id: &str) -> Result<()> {
        let registry = get_game(id).ok_or_else(|| anyhow!("Game '{}' not found in registry!", id))?;
        info!(name = registry.info.name, "launching game");

        let options = self.settings.engine_options(self.theme);
        (registry.launcher)(terminal, options).await
    }
}

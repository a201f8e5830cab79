pub mod macros;
pub mod memory;
pub mod tictactoe;
pub mod typing;

use std::future::Future;
use std::pin::Pin;

use anyhow::Result;
use ratatui::DefaultTerminal;

use crate::register_games;
use crate::shell::engine::EngineOptions;

/// Metadata about a game
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Runs a game on the given terminal until the player leaves it.
pub type GameLauncher =
    for<'a> fn(&'a mut DefaultTerminal, EngineOptions) -> Pin<Box<dyn Future<Output = Result<()>> + 'a>>;

/// Registry entry containing metadata and launcher
#[derive(Clone)]
pub struct GameRegistry {
    pub info: GameInfo,
    pub launcher: GameLauncher,
}

// Register all games here - a new game only needs a new entry
register_games! {
    tictactoe => {
        screen: TicTacToeScreen,
        id: "tictactoe",
        name: "Tic Tac Toe",
        description: "Classic noughts and crosses for two players on one keyboard"
    },
    typing => {
        screen: TypingScreen,
        id: "typing",
        name: "Typing Master",
        description: "Type the sentence before the countdown runs out"
    },
    memory => {
        screen: MemoryScreen,
        id: "memory",
        name: "Card Clash",
        description: "Flip cards two at a time and find all eight pairs"
    },
}

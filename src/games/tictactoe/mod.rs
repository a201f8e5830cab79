/// Two-player tic-tac-toe with an elapsed-time clock.
pub mod game;
pub mod screen;

pub use game::{evaluate, Board, Cell, GameResult, InvalidMove, Phase, Player, TicTacToe};
pub use screen::TicTacToeScreen;

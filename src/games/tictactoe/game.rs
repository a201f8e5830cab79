//! Tic-tac-toe rules: board, turn order and win/tie detection.

use std::fmt;

use derive_more::{Display, Error};
use tracing::{debug, info, instrument};

pub const BOARD_CELLS: usize = 9;

/// The 8 winning triples, checked in this order: rows top to bottom,
/// columns left to right, then the two diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Marked(Player),
}

impl Cell {
    pub fn mark(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Marked(player) => Some(player),
        }
    }
}

/// 3x3 board in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from marks; handy for describing positions in tests.
    pub fn from_marks(marks: [Option<Player>; BOARD_CELLS]) -> Self {
        let mut board = Self::new();
        for (cell, mark) in board.cells.iter_mut().zip(marks) {
            *cell = mark.map_or(Cell::Empty, Cell::Marked);
        }
        board
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.cells
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| *cell != Cell::Empty)
    }

    fn with_mark(mut self, index: usize, player: Player) -> Self {
        self.cells[index] = Cell::Marked(player);
        self
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in cells {
                match cell.mark() {
                    Some(player) => write!(f, "{player}")?,
                    None => write!(f, "_")?,
                }
            }
        }
        Ok(())
    }
}

/// Verdict on a board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    Win(Player),
    Tie,
}

impl GameResult {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameResult::InProgress)
    }
}

/// Checks the winning triples in [`LINES`] order and reports the first one
/// whose three cells carry the same mark.
#[instrument(level = "trace")]
pub fn evaluate(board: &Board) -> GameResult {
    for [a, b, c] in LINES {
        if let Cell::Marked(player) = board.cells[a] {
            if board.cells[b] == board.cells[a] && board.cells[c] == board.cells[a] {
                return GameResult::Win(player);
            }
        }
    }

    if board.is_full() {
        GameResult::Tie
    } else {
        GameResult::InProgress
    }
}

/// Lifecycle of a single match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InProgress,
    Won(Player),
    Tie,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Won(_) | Phase::Tie)
    }
}

impl From<GameResult> for Phase {
    fn from(result: GameResult) -> Self {
        match result {
            GameResult::InProgress => Phase::InProgress,
            GameResult::Win(player) => Phase::Won(player),
            GameResult::Tie => Phase::Tie,
        }
    }
}

/// Why a move was turned down. The game state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum InvalidMove {
    #[display("the game has not started")]
    NotStarted,
    #[display("the game is already over")]
    GameOver,
    #[display("it is {expected}'s turn, not {attempted}'s")]
    WrongTurn { expected: Player, attempted: Player },
    #[display("cell {index} is already taken")]
    Occupied { index: usize },
    #[display("cell {index} is off the board")]
    OutOfBounds { index: usize },
}

/// One tic-tac-toe match. Every transition returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicTacToe {
    board: Board,
    turn: Player,
    phase: Phase,
    /// Seconds spent in progress.
    elapsed: u32,
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToe {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Player::X,
            phase: Phase::NotStarted,
            elapsed: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Opens a fresh match for play. Has no effect once started.
    pub fn start(&self) -> Self {
        if self.phase != Phase::NotStarted {
            return *self;
        }
        info!("tic-tac-toe started");
        Self {
            phase: Phase::InProgress,
            elapsed: 0,
            ..*self
        }
    }

    #[instrument(skip(self), fields(phase = ?self.phase, turn = %self.turn))]
    pub fn apply_move(&self, index: usize, player: Player) -> Result<Self, InvalidMove> {
        match self.phase {
            Phase::NotStarted => return Err(InvalidMove::NotStarted),
            Phase::Won(_) | Phase::Tie => return Err(InvalidMove::GameOver),
            Phase::InProgress => {}
        }
        if player != self.turn {
            return Err(InvalidMove::WrongTurn {
                expected: self.turn,
                attempted: player,
            });
        }
        match self.board.get(index) {
            None => return Err(InvalidMove::OutOfBounds { index }),
            Some(Cell::Marked(_)) => return Err(InvalidMove::Occupied { index }),
            Some(Cell::Empty) => {}
        }

        let board = self.board.with_mark(index, player);
        let phase = Phase::from(evaluate(&board));
        debug!(index, ?phase, "move accepted");
        if phase.is_terminal() {
            info!(?phase, elapsed = self.elapsed, "tic-tac-toe finished");
        }

        Ok(Self {
            board,
            turn: player.opponent(),
            phase,
            elapsed: self.elapsed,
        })
    }

    /// One second of play time. The clock only runs while in progress.
    pub fn tick(&self) -> Self {
        if self.phase != Phase::InProgress {
            return *self;
        }
        Self {
            elapsed: self.elapsed + 1,
            ..*self
        }
    }

    pub fn reset(&self) -> Self {
        debug!("tic-tac-toe reset");
        Self::new()
    }
}

/// Formats whole seconds as `MM:SS`.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Option<Player> = Some(Player::X);
    const O: Option<Player> = Some(Player::O);
    const E: Option<Player> = None;

    #[test]
    fn empty_board_is_in_progress() {
        assert_eq!(evaluate(&Board::new()), GameResult::InProgress);
    }

    #[test]
    fn every_line_is_detected() {
        for line in LINES {
            let mut marks = [None; BOARD_CELLS];
            for index in line {
                marks[index] = O;
            }
            assert_eq!(
                evaluate(&Board::from_marks(marks)),
                GameResult::Win(Player::O),
                "line {line:?}"
            );
        }
    }

    #[test]
    fn mixed_line_is_not_a_win() {
        let board = Board::from_marks([X, X, O, E, E, E, E, E, E]);
        assert_eq!(evaluate(&board), GameResult::InProgress);
    }

    #[test]
    fn first_line_in_order_wins() {
        // Row 0 (X) is checked before column 0 would matter.
        let board = Board::from_marks([X, X, X, X, O, O, X, O, O]);
        assert_eq!(evaluate(&board), GameResult::Win(Player::X));
    }

    #[test]
    fn full_board_without_line_is_tie() {
        let board = Board::from_marks([X, O, X, X, O, O, O, X, X]);
        assert_eq!(evaluate(&board), GameResult::Tie);
    }

    #[test]
    fn win_on_last_cell_beats_tie() {
        let board = Board::from_marks([X, O, X, O, X, O, O, X, X]);
        assert_eq!(evaluate(&board), GameResult::Win(Player::X));
    }

    #[test]
    fn moves_rejected_before_start() {
        let game = TicTacToe::new();
        assert_eq!(game.apply_move(0, Player::X), Err(InvalidMove::NotStarted));
    }

    #[test]
    fn occupied_cell_rejected() {
        let game = TicTacToe::new().start().apply_move(4, Player::X).unwrap();
        assert_eq!(
            game.apply_move(4, Player::O),
            Err(InvalidMove::Occupied { index: 4 })
        );
    }

    #[test]
    fn wrong_turn_rejected() {
        let game = TicTacToe::new().start();
        assert_eq!(
            game.apply_move(0, Player::O),
            Err(InvalidMove::WrongTurn {
                expected: Player::X,
                attempted: Player::O
            })
        );
    }

    #[test]
    fn out_of_bounds_rejected() {
        let game = TicTacToe::new().start();
        assert_eq!(
            game.apply_move(9, Player::X),
            Err(InvalidMove::OutOfBounds { index: 9 })
        );
    }

    #[test]
    fn start_is_idempotent() {
        let game = TicTacToe::new().start().apply_move(0, Player::X).unwrap();
        assert_eq!(game.start(), game);
    }

    #[test]
    fn clock_runs_only_in_progress() {
        let game = TicTacToe::new();
        assert_eq!(game.tick().elapsed(), 0);

        let game = game.start().tick().tick();
        assert_eq!(game.elapsed(), 2);
        assert_eq!(format_clock(game.elapsed()), "00:02");

        let finished = [0, 3, 1, 4, 2]
            .iter()
            .zip([Player::X, Player::O].iter().cycle())
            .fold(game, |g, (&i, &p)| g.apply_move(i, p).unwrap());
        assert_eq!(finished.phase(), Phase::Won(Player::X));
        assert_eq!(finished.tick().elapsed(), 2);
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(75), "01:15");
        assert_eq!(format_clock(600), "10:00");
    }

    #[test]
    fn board_display() {
        let board = Board::from_marks([X, X, X, O, O, E, E, E, E]);
        assert_eq!(board.to_string(), "XXX\nOO_\n___");
    }
}

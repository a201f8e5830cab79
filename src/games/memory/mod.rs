/// Memory card matching on a 4x4 grid.
pub mod game;
pub mod screen;

pub use game::{Card, Deck, Face, FlipOutcome, FlipSelection, InvalidSelection, InvalidSymbols};
pub use screen::MemoryScreen;

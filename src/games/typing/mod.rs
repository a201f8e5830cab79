/// Timed typing test: one sentence, a countdown, speed and accuracy.
pub mod game;
pub mod screen;

pub use game::{score, EmptySentencePool, InvalidInput, Score, Session, SessionState};
pub use screen::TypingScreen;

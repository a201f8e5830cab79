pub mod cli;
pub mod config;
pub mod hub;

pub mod shell {
    pub mod engine;
    pub mod game;
    pub mod menu;
    pub mod scheduler;
    pub mod theme;
}

pub mod games;

// Re-export for convenience
pub use crate::shell::game::{Context, Game};

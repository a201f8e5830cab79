use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    widgets::{Block, Paragraph},
    Frame,
};
use tracing::debug;

use super::game::{Card, Deck, FlipOutcome};
use crate::shell::game::{Context, Game};
use crate::shell::theme::Theme;

/// How long a mismatched pair stays visible.
pub const REVEAL_DELAY: Duration = Duration::from_secs(1);

const COLUMNS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealTimer {
    Conceal,
}

pub struct MemoryScreen {
    deck: Deck,
    cursor: usize,
    rng: StdRng,
}

impl Default for MemoryScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryScreen {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn with_rng(mut rng: StdRng) -> Self {
        let deck = Deck::with_default_symbols(&mut rng);
        Self {
            deck,
            cursor: 0,
            rng,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    fn flip(&mut self, id: usize, ctx: &mut Context<RevealTimer>) {
        match self.deck.flip(id) {
            Ok((next, outcome)) => {
                self.deck = next;
                if let FlipOutcome::Mismatched { .. } = outcome {
                    ctx.after(REVEAL_DELAY, RevealTimer::Conceal);
                }
            }
            Err(err) => debug!(%err, id, "flip rejected"),
        }
    }

    fn reset(&mut self, ctx: &mut Context<RevealTimer>) {
        self.deck = self.deck.reset(&mut self.rng);
        self.cursor = 0;
        ctx.restart();
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let rows = (self.deck.cards().len() / COLUMNS) as isize;
        let row = (self.cursor / COLUMNS) as isize;
        let col = (self.cursor % COLUMNS) as isize;
        let row = (row + d_row).clamp(0, rows - 1);
        let col = (col + d_col).clamp(0, COLUMNS as isize - 1);
        self.cursor = row as usize * COLUMNS + col as usize;
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, card: &Card, theme: &Theme) {
        let label = match card.visible_symbol() {
            Some(symbol) => symbol.to_string(),
            None => "❓".to_string(),
        };
        let style = if card.id() == self.cursor {
            theme.highlight()
        } else if card.is_matched() {
            theme.success()
        } else {
            theme.base()
        };
        frame.render_widget(
            Paragraph::new(label)
                .style(style)
                .alignment(Alignment::Center)
                .block(theme.block("")),
            area,
        );
    }
}

impl Game for MemoryScreen {
    type Timer = RevealTimer;

    fn handle_input(&mut self, key: KeyEvent, ctx: &mut Context<Self::Timer>) {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.flip(self.cursor, ctx),
            KeyCode::Char('r') => self.reset(ctx),
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            _ => {}
        }
    }

    fn on_timer(&mut self, timer: Self::Timer, _ctx: &mut Context<Self::Timer>) {
        match timer {
            RevealTimer::Conceal => self.deck = self.deck.conceal(),
        }
    }

    fn render(&self, frame: &mut Frame, theme: &Theme) {
        frame.render_widget(Block::default().style(theme.base()), frame.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),  // Header
                Constraint::Length(2),  // Moves
                Constraint::Length(12), // Grid
                Constraint::Length(2),  // Win banner
                Constraint::Min(0),
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(
            Paragraph::new("🧠 CARD CLASH")
                .style(theme.title())
                .alignment(Alignment::Center)
                .block(theme.block("")),
            chunks[0],
        );

        frame.render_widget(
            Paragraph::new(format!("Moves: {}", self.deck.moves())).alignment(Alignment::Center),
            chunks[1],
        );

        let grid = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(8 * COLUMNS as u16),
                Constraint::Fill(1),
            ])
            .split(chunks[2])[1];
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3); 4])
            .split(grid);
        for (row, row_area) in rows.iter().enumerate() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(8); COLUMNS])
                .split(*row_area);
            for (col, cell_area) in cols.iter().enumerate() {
                if let Some(card) = self.deck.cards().get(row * COLUMNS + col) {
                    self.render_card(frame, *cell_area, card, theme);
                }
            }
        }

        if self.deck.is_won() {
            frame.render_widget(
                Paragraph::new("🎉 You Won!")
                    .style(theme.success().add_modifier(Modifier::BOLD))
                    .alignment(Alignment::Center),
                chunks[3],
            );
        }

        frame.render_widget(
            Paragraph::new("[Arrows] Move  [Enter] Flip  [R] Restart  [Esc] Menu")
                .style(theme.muted())
                .alignment(Alignment::Center),
            chunks[5],
        );
    }
}

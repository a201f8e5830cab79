use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use tracing::{debug, info, instrument};

use crate::shell::game::{Context, Game};
use crate::shell::scheduler::{Fired, Scheduler};
use crate::shell::theme::Theme;

/// Per-launch options handed to the engine by the hub.
#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
    pub theme: Theme,
    /// Upper bound on how long the loop waits before redrawing.
    pub frame_interval: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            frame_interval: Duration::from_millis(16),
        }
    }
}

pub struct Engine<G: Game> {
    game: G,
    options: EngineOptions,
}

impl<G: Game> Engine<G> {
    pub fn new(game: G, options: EngineOptions) -> Self {
        Self { game, options }
    }

    /// Runs the game until the player presses Esc. Every timer still pending
    /// when the screen is left is cancelled.
    #[instrument(skip_all, fields(game = std::any::type_name::<G>()))]
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let (scheduler, mut fired_rx) = Scheduler::<G::Timer>::new();
        let mut ctx = Context::new(scheduler);
        self.game.on_enter(&mut ctx);
        info!("game screen entered");

        loop {
            terminal.draw(|f| self.game.render(f, &self.options.theme))?;

            // INPUT (Non-blocking)
            if event::poll(Duration::from_millis(0))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if key.code == KeyCode::Esc {
                            break;
                        }
                        self.game.handle_input(key, &mut ctx);
                        continue;
                    }
                }
            }

            tokio::select! {
                Some(fired) = fired_rx.recv() => {
                    deliver(&mut self.game, &mut ctx, fired);
                }

                _ = tokio::time::sleep(self.options.frame_interval) => {}
            }
        }

        ctx.shutdown();
        info!("game screen left");
        Ok(())
    }
}

/// Hands a timer to the game unless a restart has superseded it.
/// Returns whether it was delivered.
pub(crate) fn deliver<G: Game>(
    game: &mut G,
    ctx: &mut Context<G::Timer>,
    fired: Fired<G::Timer>,
) -> bool {
    if ctx.is_current(&fired) {
        game.on_timer(fired.timer, ctx);
        true
    } else {
        debug!(generation = %fired.generation, "dropping stale timer");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::screen::{ClockTimer, TicTacToeScreen};
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn press(screen: &mut TicTacToeScreen, code: KeyCode, ctx: &mut Context<ClockTimer>) {
        screen.handle_input(KeyEvent::new(code, KeyModifiers::NONE), ctx);
    }

    #[tokio::test(start_paused = true)]
    async fn queued_tick_from_before_reset_is_dropped() {
        let (scheduler, mut rx) = Scheduler::new();
        let mut ctx = Context::new(scheduler);
        let mut screen = TicTacToeScreen::new();

        press(&mut screen, KeyCode::Enter, &mut ctx);
        // Let one clock tick land in the channel without consuming it.
        tokio::time::sleep(Duration::from_millis(1500)).await;

        press(&mut screen, KeyCode::Char('r'), &mut ctx);
        press(&mut screen, KeyCode::Enter, &mut ctx);

        let queued = rx.try_recv().unwrap();
        assert!(!ctx.is_current(&queued));
        assert!(!deliver(&mut screen, &mut ctx, queued));
        assert_eq!(screen.game().elapsed(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn current_tick_reaches_the_game() {
        let (scheduler, mut rx) = Scheduler::new();
        let mut ctx = Context::new(scheduler);
        let mut screen = TicTacToeScreen::new();

        press(&mut screen, KeyCode::Enter, &mut ctx);
        let fired = rx.recv().await.unwrap();
        assert!(deliver(&mut screen, &mut ctx, fired));
        assert_eq!(screen.game().elapsed(), 1);
    }
}

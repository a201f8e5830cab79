use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use tracing::debug;

use super::game::{format_clock, Cell, Phase, TicTacToe};
use crate::shell::game::{Context, Game};
use crate::shell::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTimer {
    Second,
}

/// Two players sharing one keyboard.
pub struct TicTacToeScreen {
    game: TicTacToe,
    cursor: usize,
    last_rejection: Option<String>,
}

impl Default for TicTacToeScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToeScreen {
    pub fn new() -> Self {
        Self {
            game: TicTacToe::new(),
            cursor: 4,
            last_rejection: None,
        }
    }

    pub fn game(&self) -> &TicTacToe {
        &self.game
    }

    fn play(&mut self, index: usize, ctx: &mut Context<ClockTimer>) {
        match self.game.apply_move(index, self.game.turn()) {
            Ok(next) => {
                self.game = next;
                self.last_rejection = None;
                if self.game.phase().is_terminal() {
                    ctx.restart();
                }
            }
            Err(err) => {
                debug!(%err, index, "move rejected");
                self.last_rejection = Some(err.to_string());
            }
        }
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let row = (self.cursor / 3) as isize;
        let col = (self.cursor % 3) as isize;
        let row = (row + d_row).clamp(0, 2);
        let col = (col + d_col).clamp(0, 2);
        self.cursor = (row * 3 + col) as usize;
    }

    fn status_line(&self, theme: &Theme) -> Line<'static> {
        match self.game.phase() {
            Phase::NotStarted => Line::styled("Press Enter to start", theme.muted()),
            Phase::InProgress => Line::from(format!("Turn: {}", self.game.turn())),
            Phase::Won(player) => Line::styled(format!("{player} wins! 🎉"), theme.success()),
            Phase::Tie => Line::styled("It's a Tie! 🤝", theme.success()),
        }
    }

    fn render_board(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3); 3])
            .split(area);

        for (row, row_area) in rows.iter().enumerate() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(7); 3])
                .split(*row_area);

            for (col, cell_area) in cols.iter().enumerate() {
                let index = row * 3 + col;
                let label = match self.game.board().cells()[index] {
                    Cell::Marked(player) => player.to_string(),
                    Cell::Empty => (index + 1).to_string(),
                };
                let mut style = match self.game.board().cells()[index] {
                    Cell::Marked(_) => theme.base().add_modifier(Modifier::BOLD),
                    Cell::Empty => theme.muted(),
                };
                if index == self.cursor && self.game.phase() == Phase::InProgress {
                    style = theme.highlight();
                }
                frame.render_widget(
                    Paragraph::new(label)
                        .style(style)
                        .alignment(Alignment::Center)
                        .block(theme.block("")),
                    *cell_area,
                );
            }
        }
    }
}

impl Game for TicTacToeScreen {
    type Timer = ClockTimer;

    fn handle_input(&mut self, key: KeyEvent, ctx: &mut Context<Self::Timer>) {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.game.phase() == Phase::NotStarted {
                    self.game = self.game.start();
                    ctx.restart();
                    ctx.every(Duration::from_secs(1), ClockTimer::Second);
                } else {
                    self.play(self.cursor, ctx);
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.cursor = index;
                self.play(index, ctx);
            }
            KeyCode::Char('r') => {
                self.game = self.game.reset();
                self.last_rejection = None;
                ctx.restart();
            }
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            _ => {}
        }
    }

    fn on_timer(&mut self, timer: Self::Timer, _ctx: &mut Context<Self::Timer>) {
        match timer {
            ClockTimer::Second => self.game = self.game.tick(),
        }
    }

    fn render(&self, frame: &mut Frame, theme: &Theme) {
        frame.render_widget(Block::default().style(theme.base()), frame.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(4), // Status
                Constraint::Length(9), // Board
                Constraint::Min(0),
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(
            Paragraph::new("TIC TAC TOE")
                .style(theme.title())
                .alignment(Alignment::Center)
                .block(theme.block("")),
            chunks[0],
        );

        let mut status = vec![
            self.status_line(theme),
            Line::from(vec![
                Span::styled("Timer: ⏱ ", theme.muted()),
                Span::raw(format_clock(self.game.elapsed())),
            ]),
        ];
        if let Some(reason) = &self.last_rejection {
            status.push(Line::styled(reason.clone(), theme.error()));
        }
        frame.render_widget(
            Paragraph::new(status).alignment(Alignment::Center),
            chunks[1],
        );

        let board_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(21),
                Constraint::Fill(1),
            ])
            .split(chunks[2])[1];
        self.render_board(frame, board_area, theme);

        frame.render_widget(
            Paragraph::new("[Enter] Start/Place  [1-9] Place  [Arrows] Move  [R] Reset  [Esc] Menu")
                .style(theme.muted())
                .alignment(Alignment::Center),
            chunks[4],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::game::Player;
    use crate::shell::scheduler::Scheduler;
    use crossterm::event::KeyModifiers;

    fn press(screen: &mut TicTacToeScreen, code: KeyCode, ctx: &mut Context<ClockTimer>) {
        screen.handle_input(KeyEvent::new(code, KeyModifiers::NONE), ctx);
    }

    #[tokio::test(start_paused = true)]
    async fn start_arms_the_clock() {
        let (scheduler, mut rx) = Scheduler::new();
        let mut ctx = Context::new(scheduler);
        let mut screen = TicTacToeScreen::new();

        press(&mut screen, KeyCode::Enter, &mut ctx);
        assert_eq!(screen.game().phase(), Phase::InProgress);
        assert_eq!(ctx.pending_timers(), 1);

        for _ in 0..3 {
            let fired = rx.recv().await.unwrap();
            assert!(ctx.is_current(&fired));
            screen.on_timer(fired.timer, &mut ctx);
        }
        assert_eq!(screen.game().elapsed(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn digits_place_marks_for_alternating_players() {
        let (scheduler, _rx) = Scheduler::new();
        let mut ctx = Context::new(scheduler);
        let mut screen = TicTacToeScreen::new();

        press(&mut screen, KeyCode::Enter, &mut ctx);
        press(&mut screen, KeyCode::Char('1'), &mut ctx);
        press(&mut screen, KeyCode::Char('5'), &mut ctx);

        let cells = screen.game().board().cells();
        assert_eq!(cells[0], Cell::Marked(Player::X));
        assert_eq!(cells[4], Cell::Marked(Player::O));
        assert_eq!(screen.game().turn(), Player::X);
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_move_is_reported_and_ignored() {
        let (scheduler, _rx) = Scheduler::new();
        let mut ctx = Context::new(scheduler);
        let mut screen = TicTacToeScreen::new();

        press(&mut screen, KeyCode::Char('1'), &mut ctx);
        assert_eq!(screen.game(), &TicTacToe::new());
        assert!(screen.last_rejection.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn win_stops_the_clock() {
        let (scheduler, _rx) = Scheduler::new();
        let mut ctx = Context::new(scheduler);
        let mut screen = TicTacToeScreen::new();

        press(&mut screen, KeyCode::Enter, &mut ctx);
        for key in ['1', '4', '2', '5', '3'] {
            press(&mut screen, KeyCode::Char(key), &mut ctx);
        }
        assert_eq!(screen.game().phase(), Phase::Won(Player::X));
        assert_eq!(ctx.pending_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_cancels_clock_and_clears_board() {
        let (scheduler, _rx) = Scheduler::new();
        let mut ctx = Context::new(scheduler);
        let mut screen = TicTacToeScreen::new();

        press(&mut screen, KeyCode::Enter, &mut ctx);
        press(&mut screen, KeyCode::Char('9'), &mut ctx);
        let before = ctx.generation();

        press(&mut screen, KeyCode::Char('r'), &mut ctx);
        assert_eq!(screen.game(), &TicTacToe::new());
        assert_eq!(ctx.pending_timers(), 0);
        assert!(ctx.generation() > before);
    }

    #[test]
    fn cursor_stays_on_board() {
        let mut screen = TicTacToeScreen::new();
        screen.move_cursor(-5, -5);
        assert_eq!(screen.cursor, 0);
        screen.move_cursor(1, 2);
        assert_eq!(screen.cursor, 5);
        screen.move_cursor(9, 9);
        assert_eq!(screen.cursor, 8);
    }
}

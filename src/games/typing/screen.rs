use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};
use tracing::{debug, warn};

use super::game::{Score, Session, SessionState, SENTENCES};
use crate::shell::game::{Context, Game};
use crate::shell::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTimer {
    Second,
}

pub struct TypingScreen {
    session: Session,
    pool: Vec<&'static str>,
    rng: StdRng,
}

impl Default for TypingScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl TypingScreen {
    pub fn new() -> Self {
        Self::with_rng(SENTENCES.to_vec(), StdRng::from_os_rng())
    }

    pub fn with_rng(pool: Vec<&'static str>, mut rng: StdRng) -> Self {
        let session = Session::preview(&pool, &mut rng).unwrap_or_else(|err| {
            warn!(%err, "nothing to preview");
            Session::idle()
        });
        Self { session, pool, rng }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn start(&mut self, ctx: &mut Context<CountdownTimer>) {
        match Session::start(&self.pool, &mut self.rng) {
            Ok(session) => {
                self.session = session;
                ctx.restart();
                if self.session.is_active() {
                    ctx.every(Duration::from_secs(1), CountdownTimer::Second);
                }
            }
            Err(err) => warn!(%err, "cannot start typing test"),
        }
    }

    fn edit(&mut self, text: &str) {
        match self.session.update_input(text) {
            Ok(next) => self.session = next,
            Err(err) => debug!(%err, "input rejected"),
        }
    }

    fn target_line(&self, theme: &Theme) -> Line<'static> {
        let active = self.session.is_active();
        let mut spans = Vec::new();
        for (i, word) in self.session.words().iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            if active && i == self.session.current_word() {
                spans.push(Span::styled(word.clone(), theme.highlight()));
            } else {
                spans.push(Span::styled(word.clone(), theme.base()));
            }
        }
        Line::from(spans)
    }

    /// Typed text with mismatches flagged. Newlines start a new line.
    fn typed_lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let mut spans = Vec::new();
        for (c, ok) in self.session.char_feedback() {
            if c == '\n' {
                lines.push(Line::from(std::mem::take(&mut spans)));
                continue;
            }
            let style = if ok { theme.base() } else { theme.error() };
            spans.push(Span::styled(c.to_string(), style));
        }
        lines.push(Line::from(spans));
        lines
    }

    fn result_lines(score: &Score, theme: &Theme) -> Vec<Line<'static>> {
        if score.is_empty() {
            return vec![Line::styled(
                "⚠️ You have not typed anything!",
                theme.error().add_modifier(Modifier::BOLD),
            )];
        }
        let mut lines = vec![
            Line::styled(format!("🧠 Your Speed: {} WPM", score.wpm), theme.success()),
            Line::from(format!("🎯 Accuracy: {}%", score.accuracy)),
            Line::from(""),
            Line::styled("📝 Quick Tips to Improve:", theme.title()),
        ];
        lines.extend(score.tips().into_iter().map(|tip| Line::from(format!(" • {tip}"))));
        lines
    }
}

impl Game for TypingScreen {
    type Timer = CountdownTimer;

    fn handle_input(&mut self, key: KeyEvent, ctx: &mut Context<Self::Timer>) {
        if !self.session.is_active() {
            if key.code == KeyCode::Enter {
                self.start(ctx);
            }
            return;
        }

        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut text = self.session.typed().to_owned();
                text.push(c);
                self.edit(&text);
            }
            KeyCode::Enter => {
                let mut text = self.session.typed().to_owned();
                text.push('\n');
                self.edit(&text);
            }
            KeyCode::Backspace => {
                let mut text = self.session.typed().to_owned();
                text.pop();
                self.edit(&text);
            }
            _ => {}
        }
    }

    fn on_timer(&mut self, timer: Self::Timer, ctx: &mut Context<Self::Timer>) {
        match timer {
            CountdownTimer::Second => match self.session.tick() {
                Ok(next) => {
                    self.session = next;
                    if !self.session.is_active() {
                        ctx.restart();
                    }
                }
                Err(err) => debug!(%err, "countdown tick ignored"),
            },
        }
    }

    fn render(&self, frame: &mut Frame, theme: &Theme) {
        frame.render_widget(Block::default().style(theme.base()), frame.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(1), // Timer
                Constraint::Length(4), // Sentence
                Constraint::Length(5), // Typed text
                Constraint::Min(0),    // Results
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(
            Paragraph::new("TYPING MASTER")
                .style(theme.title())
                .alignment(Alignment::Center)
                .block(theme.block("")),
            chunks[0],
        );

        let timer = match self.session.state() {
            SessionState::Active => format!("Time Left: ⏱ {}s", self.session.remaining()),
            SessionState::Idle => "Press Enter to start the test".to_string(),
            SessionState::Ended(_) => "Time's up!".to_string(),
        };
        frame.render_widget(
            Paragraph::new(timer).alignment(Alignment::Center),
            chunks[1],
        );

        frame.render_widget(
            Paragraph::new(self.target_line(theme))
                .block(theme.block(" SENTENCE "))
                .wrap(Wrap { trim: false }),
            chunks[2],
        );

        let typed = if self.session.typed().is_empty() && self.session.is_active() {
            Paragraph::new(Line::styled("Start typing here...", theme.muted()))
        } else {
            Paragraph::new(self.typed_lines(theme))
        };
        frame.render_widget(
            typed.block(theme.block(" YOUR INPUT ")).wrap(Wrap { trim: false }),
            chunks[3],
        );

        if let Some(score) = self.session.result() {
            frame.render_widget(
                Paragraph::new(Self::result_lines(&score, theme))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                chunks[4],
            );
        }

        let footer = if self.session.is_active() {
            "[Type] Input  [Backspace] Erase  [Esc] Menu"
        } else if self.session.result().is_some() {
            "[Enter] Retake Test  [Esc] Menu"
        } else {
            "[Enter] Start  [Esc] Menu"
        };
        frame.render_widget(
            Paragraph::new(footer)
                .style(theme.muted())
                .alignment(Alignment::Center),
            chunks[5],
        );
    }
}

//! Core game interface for the hub
use std::fmt::Debug;
use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::shell::scheduler::{Fired, Generation, Scheduler};
use crate::shell::theme::Theme;

/// Main game trait that all hub games implement.
///
/// A game screen owns the current state value of its engine and swaps in the
/// new value returned by each transition. Deferred work goes through the
/// [`Context`] so the engine loop can deliver it back in order.
pub trait Game: Send + 'static {
    /// Timer events this game schedules for itself.
    type Timer: Clone + Debug + Send + 'static;

    /// Called once when the screen is entered.
    fn on_enter(&mut self, _ctx: &mut Context<Self::Timer>) {}

    fn handle_input(&mut self, key: KeyEvent, ctx: &mut Context<Self::Timer>);

    /// Called for every timer of the current generation.
    fn on_timer(&mut self, timer: Self::Timer, ctx: &mut Context<Self::Timer>);

    fn render(&self, frame: &mut Frame, theme: &Theme);
}

/// Handle through which a game schedules and cancels its timers.
pub struct Context<T> {
    scheduler: Scheduler<T>,
}

impl<T> Context<T>
where
    T: Clone + Debug + Send + 'static,
{
    pub fn new(scheduler: Scheduler<T>) -> Self {
        Self { scheduler }
    }

    pub fn generation(&self) -> Generation {
        self.scheduler.generation()
    }

    pub fn after(&mut self, delay: Duration, timer: T) {
        self.scheduler.after(delay, timer);
    }

    pub fn every(&mut self, period: Duration, timer: T) {
        self.scheduler.every(period, timer);
    }

    /// Invalidates every timer scheduled so far. Call when a new session,
    /// board or deck replaces the old one.
    pub fn restart(&mut self) -> Generation {
        self.scheduler.restart()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn is_current(&self, fired: &Fired<T>) -> bool {
        self.scheduler.is_current(fired)
    }

    pub(crate) fn shutdown(&mut self) {
        self.scheduler.cancel_all();
    }
}

//! Deferred timer callbacks keyed by a generation identifier.
//!
//! Every scheduled task belongs to the generation that was current when it
//! was scheduled. [`Scheduler::restart`] aborts every outstanding task and
//! moves to a fresh generation, so a countdown tick or card reveal from a
//! previous session can never reach the state that replaced it.

use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, trace};

/// Monotonically increasing tag distinguishing successive resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen-{}", self.0)
    }
}

/// A timer event delivered back to the engine loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    pub generation: Generation,
    pub timer: T,
}

pub struct Scheduler<T> {
    tx: mpsc::UnboundedSender<Fired<T>>,
    generation: Generation,
    tasks: Vec<JoinHandle<()>>,
}

impl<T> Scheduler<T>
where
    T: Send + fmt::Debug + 'static,
{
    /// Creates a scheduler and the receiving end its tasks deliver into.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Fired<T>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tx,
            generation: Generation::default(),
            tasks: Vec::new(),
        };
        (scheduler, rx)
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Number of tasks that have not finished or been aborted yet.
    pub fn pending(&self) -> usize {
        self.tasks.iter().filter(|task| !task.is_finished()).count()
    }

    pub fn is_current(&self, fired: &Fired<T>) -> bool {
        fired.generation == self.generation
    }

    /// Delivers `timer` once after `delay`.
    pub fn after(&mut self, delay: Duration, timer: T) {
        let tx = self.tx.clone();
        let generation = self.generation;
        trace!(%generation, ?delay, ?timer, "scheduling one-shot timer");

        self.track(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Fired { generation, timer });
        }));
    }

    /// Delivers a clone of `timer` once per `period`, first after one full
    /// period. Late ticks are delivered in a burst rather than merged, so the
    /// receiver sees exactly one event per elapsed period.
    pub fn every(&mut self, period: Duration, timer: T)
    where
        T: Clone,
    {
        let tx = self.tx.clone();
        let generation = self.generation;
        trace!(%generation, ?period, ?timer, "scheduling repeating timer");

        self.track(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                interval.tick().await;
                if tx
                    .send(Fired {
                        generation,
                        timer: timer.clone(),
                    })
                    .is_err()
                {
                    break;
                }
            }
        }));
    }

    /// Aborts every outstanding task and advances to a new generation.
    pub fn restart(&mut self) -> Generation {
        self.cancel_all();
        self.generation = self.generation.next();
        debug!(generation = %self.generation, "scheduler restarted");
        self.generation
    }

    pub fn cancel_all(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }

    fn track(&mut self, task: JoinHandle<()>) {
        self.tasks.retain(|task| !task.is_finished());
        self.tasks.push(task);
    }
}

impl<T> Drop for Scheduler<T> {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

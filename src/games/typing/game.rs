//! Timed transcription test: sentence choice, countdown and scoring.
//!
//! The reported "words per minute" is the number of whitespace-separated
//! words typed when time ran out. It is not divided by the elapsed time.

use derive_more::{Display, Error};
use rand::Rng;
use tracing::{debug, info, instrument};

pub const SENTENCES: [&str; 5] = [
    "The quick brown fox jumps over the lazy dog.",
    "Typing is a skill that improves with practice.",
    "Code like there's no tomorrow.",
    "React makes UI development fun and simple.",
    "Practice makes perfect in coding.",
];

/// Seconds granted per word is 1.5; budgets are rounded up.
pub fn time_budget(word_count: usize) -> u32 {
    (word_count * 3).div_ceil(2) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub wpm: usize,
    /// Percentage of matching characters, 0..=100.
    pub accuracy: u32,
}

impl Score {
    /// Nothing but whitespace was submitted.
    pub fn is_empty(&self) -> bool {
        self.wpm == 0
    }

    pub fn tips(&self) -> Vec<&'static str> {
        let mut tips = Vec::new();
        if self.accuracy < 90 {
            tips.push("Focus on typing slowly to reduce mistakes.");
        }
        if self.wpm < 30 {
            tips.push("Try typing regularly to build muscle memory.");
        }
        tips.push("Maintain proper hand posture and use all fingers.");
        tips
    }
}

/// Scores `typed` against `target`.
///
/// Accuracy compares characters at identical positions over the shorter of
/// the two texts (the typed text is not trimmed for this), rounded to the
/// nearest whole percent.
#[instrument(level = "debug", ret)]
pub fn score(target: &str, typed: &str) -> Score {
    let trimmed = typed.trim();
    if trimmed.is_empty() {
        return Score::default();
    }

    let wpm = trimmed.split_whitespace().count();

    let overlap = typed.chars().count().min(target.chars().count());
    let matches = typed
        .chars()
        .zip(target.chars())
        .filter(|(a, b)| a == b)
        .count();
    let accuracy = if overlap == 0 {
        0
    } else {
        ((matches * 200 + overlap) / (overlap * 2)) as u32
    };

    Score { wpm, accuracy }
}

/// Index of the word being typed, for highlighting only.
pub fn current_word_index(typed: &str) -> usize {
    typed.split_whitespace().count().saturating_sub(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active,
    Ended(Score),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum InvalidInput {
    #[display("the typing test is not running")]
    NotActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("no sentences to choose from")]
pub struct EmptySentencePool;

/// One attempt at the typing test. Every transition returns a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    sentence: String,
    words: Vec<String>,
    budget: u32,
    remaining: u32,
    typed: String,
    current_word: usize,
    state: SessionState,
}

impl Default for Session {
    fn default() -> Self {
        Self::idle()
    }
}

impl Session {
    /// No test has been started yet.
    pub fn idle() -> Self {
        Self {
            sentence: String::new(),
            words: Vec::new(),
            budget: 0,
            remaining: 0,
            typed: String::new(),
            current_word: 0,
            state: SessionState::Idle,
        }
    }

    /// Starts a test on a sentence drawn uniformly from `pool`.
    #[instrument(skip_all, fields(pool = pool.len()))]
    pub fn start<R: Rng>(pool: &[&str], rng: &mut R) -> Result<Self, EmptySentencePool> {
        Ok(Self::with_sentence(Self::draw(pool, rng)?))
    }

    /// An idle session showing a sentence from `pool` before the test begins.
    pub fn preview<R: Rng>(pool: &[&str], rng: &mut R) -> Result<Self, EmptySentencePool> {
        Ok(Self::prepared(Self::draw(pool, rng)?))
    }

    /// Starts a test on a fixed sentence.
    pub fn with_sentence(sentence: &str) -> Self {
        let session = Self {
            state: SessionState::Active,
            ..Self::prepared(sentence)
        };
        info!(%sentence, budget = session.budget, "typing test started");
        if session.budget == 0 {
            session.finish()
        } else {
            session
        }
    }

    fn draw<'p, R: Rng>(pool: &[&'p str], rng: &mut R) -> Result<&'p str, EmptySentencePool> {
        if pool.is_empty() {
            return Err(EmptySentencePool);
        }
        Ok(pool[rng.random_range(0..pool.len())])
    }

    fn prepared(sentence: &str) -> Self {
        let words: Vec<String> = sentence.split_whitespace().map(str::to_owned).collect();
        let budget = time_budget(words.len());
        Self {
            sentence: sentence.to_owned(),
            words,
            budget,
            remaining: budget,
            typed: String::new(),
            current_word: 0,
            state: SessionState::Idle,
        }
    }

    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn current_word(&self) -> usize {
        self.current_word
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Final score once the session has ended.
    pub fn result(&self) -> Option<Score> {
        match self.state {
            SessionState::Ended(score) => Some(score),
            _ => None,
        }
    }

    /// Replaces the typed text.
    pub fn update_input(&self, text: &str) -> Result<Self, InvalidInput> {
        if !self.is_active() {
            return Err(InvalidInput::NotActive);
        }
        Ok(Self {
            typed: text.to_owned(),
            current_word: current_word_index(text),
            ..self.clone()
        })
    }

    /// One second of the countdown. Reaching zero ends and scores the test.
    pub fn tick(&self) -> Result<Self, InvalidInput> {
        if !self.is_active() {
            return Err(InvalidInput::NotActive);
        }
        let next = Self {
            remaining: self.remaining.saturating_sub(1),
            ..self.clone()
        };
        debug!(remaining = next.remaining, "countdown tick");
        if next.remaining == 0 {
            Ok(next.finish())
        } else {
            Ok(next)
        }
    }

    /// Per-character comparison of the typed text against the sentence.
    pub fn char_feedback(&self) -> Vec<(char, bool)> {
        let mut target = self.sentence.chars();
        self.typed
            .chars()
            .map(|typed| (typed, target.next() == Some(typed)))
            .collect()
    }

    fn finish(self) -> Self {
        let result = score(&self.sentence, &self.typed);
        info!(wpm = result.wpm, accuracy = result.accuracy, "typing test ended");
        Self {
            state: SessionState::Ended(result),
            ..self
        }
    }
}

//! Pair-matching rules: shuffled deck, two-card selection, move counting.

use std::collections::HashSet;

use derive_more::{Display, Error};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, instrument};

pub const PAIR_COUNT: usize = 8;
pub const DECK_SIZE: usize = PAIR_COUNT * 2;

pub const DEFAULT_SYMBOLS: [char; PAIR_COUNT] = ['🐶', '🐱', '🦊', '🐸', '🐵', '🐰', '🐯', '🐼'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    FaceDown,
    FaceUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    id: usize,
    symbol: char,
    face: Face,
    matched: bool,
}

impl Card {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    /// The symbol, only while the card is face up.
    pub fn visible_symbol(&self) -> Option<char> {
        (self.face == Face::FaceUp).then_some(self.symbol)
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }
}

/// Face-up cards waiting to be compared. Never holds more than two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlipSelection {
    #[default]
    Empty,
    One(usize),
    Two(usize, usize),
}

impl FlipSelection {
    pub fn len(&self) -> usize {
        match self {
            FlipSelection::Empty => 0,
            FlipSelection::One(_) => 1,
            FlipSelection::Two(_, _) => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == FlipSelection::Empty
    }

    pub fn contains(&self, id: usize) -> bool {
        match *self {
            FlipSelection::Empty => false,
            FlipSelection::One(a) => a == id,
            FlipSelection::Two(a, b) => a == id || b == id,
        }
    }
}

/// What a successful flip led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// First card of a pair turned over.
    Selected,
    Matched(char),
    /// Both cards stay face up until [`Deck::conceal`] is called.
    Mismatched { first: usize, second: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum InvalidSelection {
    #[display("two cards are already face up")]
    SelectionFull,
    #[display("card {id} is already selected")]
    AlreadySelected { id: usize },
    #[display("card {id} is already matched")]
    AlreadyMatched { id: usize },
    #[display("there is no card {id}")]
    UnknownCard { id: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum InvalidSymbols {
    #[display("expected {expected} symbols, got {found}")]
    WrongCount { expected: usize, found: usize },
    #[display("symbol {symbol} appears more than once")]
    Duplicate { symbol: char },
}

/// A game of memory. Every transition returns a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    symbols: Vec<char>,
    cards: Vec<Card>,
    selection: FlipSelection,
    matched: Vec<char>,
    moves: u32,
}

impl Deck {
    /// Deals a shuffled deck holding each of the 8 distinct symbols twice.
    #[instrument(skip(rng))]
    pub fn new<R: Rng>(symbols: &[char], rng: &mut R) -> Result<Self, InvalidSymbols> {
        if symbols.len() != PAIR_COUNT {
            return Err(InvalidSymbols::WrongCount {
                expected: PAIR_COUNT,
                found: symbols.len(),
            });
        }
        let mut seen = HashSet::new();
        if let Some(&symbol) = symbols.iter().find(|s| !seen.insert(**s)) {
            return Err(InvalidSymbols::Duplicate { symbol });
        }

        Ok(Self::deal(symbols.to_vec(), rng))
    }

    /// Deals the animal deck.
    pub fn with_default_symbols<R: Rng>(rng: &mut R) -> Self {
        Self::deal(DEFAULT_SYMBOLS.to_vec(), rng)
    }

    fn deal<R: Rng>(symbols: Vec<char>, rng: &mut R) -> Self {
        let mut faces: Vec<char> = symbols.iter().chain(symbols.iter()).copied().collect();
        faces.shuffle(rng);

        let cards = faces
            .into_iter()
            .enumerate()
            .map(|(id, symbol)| Card {
                id,
                symbol,
                face: Face::FaceDown,
                matched: false,
            })
            .collect();
        info!("memory deck dealt");

        Self {
            symbols,
            cards,
            selection: FlipSelection::Empty,
            matched: Vec::new(),
            moves: 0,
        }
    }

    /// A fresh shuffle of the same symbols.
    pub fn reset<R: Rng>(&self, rng: &mut R) -> Self {
        Self::deal(self.symbols.clone(), rng)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn selection(&self) -> FlipSelection {
        self.selection
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Symbols of the pairs found so far, in the order they were found.
    pub fn matched(&self) -> &[char] {
        &self.matched
    }

    pub fn is_won(&self) -> bool {
        self.matched.len() == PAIR_COUNT
    }

    /// True while a mismatched pair is waiting to be turned back over.
    pub fn is_revealing(&self) -> bool {
        matches!(self.selection, FlipSelection::Two(_, _))
    }

    #[instrument(skip(self), fields(selection = ?self.selection, moves = self.moves))]
    pub fn flip(&self, id: usize) -> Result<(Self, FlipOutcome), InvalidSelection> {
        let card = self
            .cards
            .get(id)
            .ok_or(InvalidSelection::UnknownCard { id })?;
        if self.selection.len() == 2 {
            return Err(InvalidSelection::SelectionFull);
        }
        if self.selection.contains(id) {
            return Err(InvalidSelection::AlreadySelected { id });
        }
        if card.matched || self.matched.contains(&card.symbol) {
            return Err(InvalidSelection::AlreadyMatched { id });
        }

        let mut next = self.clone();
        next.cards[id].face = Face::FaceUp;

        match self.selection {
            FlipSelection::Empty => {
                next.selection = FlipSelection::One(id);
                Ok((next, FlipOutcome::Selected))
            }
            FlipSelection::One(first) => {
                next.moves += 1;
                if next.cards[first].symbol == next.cards[id].symbol {
                    let symbol = next.cards[id].symbol;
                    next.cards[first].matched = true;
                    next.cards[id].matched = true;
                    next.matched.push(symbol);
                    next.selection = FlipSelection::Empty;
                    debug!(%symbol, "pair matched");
                    if next.is_won() {
                        info!(moves = next.moves, "memory game won");
                    }
                    Ok((next, FlipOutcome::Matched(symbol)))
                } else {
                    next.selection = FlipSelection::Two(first, id);
                    debug!(first, second = id, "pair mismatched");
                    Ok((next, FlipOutcome::Mismatched { first, second: id }))
                }
            }
            FlipSelection::Two(_, _) => Err(InvalidSelection::SelectionFull),
        }
    }

    /// Turns a mismatched pair back face down and clears the selection.
    /// Without a pending mismatch the deck is returned unchanged.
    pub fn conceal(&self) -> Self {
        let FlipSelection::Two(first, second) = self.selection else {
            return self.clone();
        };
        let mut next = self.clone();
        next.cards[first].face = Face::FaceDown;
        next.cards[second].face = Face::FaceDown;
        next.selection = FlipSelection::Empty;
        next
    }
}

//! Eco memory - flip cards two at a time to find the six matching pairs
//!
//! Each second flip is one move. A match is a success (one pair of
//! progress); a mismatch is a failure that breaks the streak but can be
//! retried. Mismatched cards stay face up until [`EcoMemory::settle`] or the
//! next flip. The reward shrinks with the number of moves.

use arrayvec::ArrayVec;

use crate::catalog::{MemoryCard, MEMORY_CARDS};
use crate::rng::SimpleRng;
use crate::scoring::RewardRule;
use crate::session::{Session, SharedNotifier};
use crate::types::{GameKind, OutcomeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckCard {
    pub card: &'static MemoryCard,
    pub solved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipResult {
    /// The flip was not allowed (inactive, out of range, already up or solved).
    Ignored,
    /// First card of a move is now face up.
    Revealed,
    Matched(OutcomeResult),
    Mismatched(OutcomeResult),
}

#[derive(Debug, Clone)]
pub struct EcoMemory {
    session: Session,
    deck: Vec<DeckCard>,
    flipped: ArrayVec<usize, 2>,
    moves: u32,
    rng: SimpleRng,
}

impl EcoMemory {
    pub fn new(seed: u32) -> Self {
        let mut session = Session::new(GameKind::EcoMemory);
        session.set_reward_rule(RewardRule::MovePenalty);
        Self {
            session,
            deck: Vec::with_capacity(MEMORY_CARDS.len() * 2),
            flipped: ArrayVec::new(),
            moves: 0,
            rng: SimpleRng::new(seed),
        }
    }

    pub fn set_notifier(&mut self, notifier: SharedNotifier) {
        self.session.set_notifier(notifier);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn deck(&self) -> &[DeckCard] {
        &self.deck
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Indices of the cards currently face up and unsolved.
    pub fn flipped(&self) -> &[usize] {
        &self.flipped
    }

    pub fn is_face_up(&self, index: usize) -> bool {
        self.deck.get(index).is_some_and(|c| c.solved) || self.flipped.contains(&index)
    }

    /// Whether a mismatched pair is waiting to be hidden.
    pub fn needs_settle(&self) -> bool {
        self.flipped.is_full()
    }

    /// Deal a freshly shuffled deck and start the round.
    pub fn start(&mut self) {
        self.session.start();
        self.deck.clear();
        for card in MEMORY_CARDS.iter().chain(MEMORY_CARDS.iter()) {
            self.deck.push(DeckCard {
                card,
                solved: false,
            });
        }
        self.rng.shuffle(&mut self.deck);
        self.flipped.clear();
        self.moves = 0;
    }

    pub fn flip(&mut self, index: usize) -> FlipResult {
        if !self.session.is_active() || index >= self.deck.len() {
            return FlipResult::Ignored;
        }
        if self.flipped.is_full() {
            self.settle();
        }
        if self.is_face_up(index) {
            return FlipResult::Ignored;
        }

        self.flipped.push(index);
        if !self.flipped.is_full() {
            return FlipResult::Revealed;
        }

        self.moves += 1;
        let (first, second) = (self.flipped[0], self.flipped[1]);
        let matched = self.deck[first].card.pair_id == self.deck[second].card.pair_id;

        if matched {
            self.deck[first].solved = true;
            self.deck[second].solved = true;
            self.flipped.clear();
        }

        match self.session.record_outcome(matched) {
            Some(outcome) if matched => FlipResult::Matched(outcome),
            Some(outcome) => FlipResult::Mismatched(outcome),
            None => FlipResult::Ignored,
        }
    }

    /// Hide a mismatched pair. Returns `true` if cards were hidden.
    pub fn settle(&mut self) -> bool {
        if self.flipped.is_empty() {
            return false;
        }
        self.flipped.clear();
        true
    }

    pub fn abandon(&mut self) {
        self.session.abandon();
        self.deck.clear();
        self.flipped.clear();
        self.moves = 0;
    }
}

//! Game state as seen by one peer.
//!
//! ## TurnState
//!
//! The replicated turn bookkeeping: whose turn it is, how many sevens are
//! waiting to be resolved, and the color wished by the last jack.
//!
//! ## GameState
//!
//! Everything one peer holds: its seat, the table, the turn state and both
//! hands. Both hands are dealt after the handshake from the same
//! synchronized draw pile, so each peer knows the other's hand exactly. The primitive mutators here
//! perform no legality checks; `rules::transition` composes them.
//!
//! ## SharedSnapshot
//!
//! The part of the state that must be identical on both peers. Its bincode
//! encoding is the desync fingerprint.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use super::config::GameConfig;
use super::error::TableError;
use super::rng::GameRng;
use super::seat::{Seat, SeatMap};
use crate::cards::{Card, Color, DECK_SIZE};
use crate::table::Table;

/// A hand of cards in the order they were received.
pub type Hand = SmallVec<[Card; 8]>;

/// Replicated turn bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Seat allowed to act.
    pub current_turn: Seat,

    /// Unresolved sevens in the current chain.
    pub pending_chain: u32,

    /// Color wished by the most recent jack, cleared by the next non-jack.
    pub wished_color: Option<Color>,
}

impl Default for TurnState {
    fn default() -> Self {
        Self {
            current_turn: Seat::FIRST,
            pending_chain: 0,
            wished_color: None,
        }
    }
}

impl TurnState {
    /// Pass the turn to the other seat.
    pub fn flip(&mut self) {
        self.current_turn = self.current_turn.other();
    }
}

/// Violation of the 52-card conservation invariant.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConservationError {
    #[error("{0} appears more than once")]
    Duplicate(Card),

    #[error("expected {DECK_SIZE} cards across piles and hands, found {0}")]
    Count(usize),
}

/// Full state held by one peer.
#[derive(Clone, Debug)]
pub struct GameState {
    seat: Seat,
    config: GameConfig,

    /// Draw and discard piles.
    pub table: Table,

    /// Replicated turn bookkeeping.
    pub turn: TurnState,

    hands: SeatMap<Hand>,
}

impl GameState {
    /// Create the state for `seat`.
    ///
    /// Seat 0 shuffles and flips the first discard. Seat 1 starts with an
    /// empty table and waits for the handshake. Nobody holds cards until
    /// [`GameState::deal_hands`] runs.
    pub fn new(seat: Seat, config: GameConfig) -> Result<Self, TableError> {
        let mut state = Self {
            seat,
            table: Table::default().with_recycle(config.recycle),
            turn: TurnState::default(),
            hands: SeatMap::default(),
            config,
        };

        if seat == Seat::FIRST {
            let mut rng = GameRng::from_seed_option(state.config.seed);
            state.table = Table::shuffled(&mut rng, state.config.recycle);
            state.table.flip_first_discard()?;
            state.table.reseed_recycle();
        }

        Ok(state)
    }

    /// Build a state directly from its parts.
    ///
    /// Meant for tests and replays; no dealing happens.
    #[must_use]
    pub fn from_parts(seat: Seat, config: GameConfig, table: Table, turn: TurnState, hands: SeatMap<Hand>) -> Self {
        let table = table.with_recycle(config.recycle);
        Self {
            seat,
            config,
            table,
            turn,
            hands,
        }
    }

    /// This peer's seat.
    #[must_use]
    pub fn seat(&self) -> Seat {
        self.seat
    }

    /// Rules in effect.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// A seat's hand, in the order the cards were received.
    #[must_use]
    pub fn hand(&self, seat: Seat) -> &[Card] {
        &self.hands[seat]
    }

    /// Whether `seat` may act now.
    #[must_use]
    pub fn is_turn_of(&self, seat: Seat) -> bool {
        self.turn.current_turn == seat
    }

    // === Handshake ===

    /// Install the table received from the dealing seat.
    pub fn synchronize_table(&mut self, draw_pile: Vec<Card>, first_discard: Card) {
        self.table.replace_draw_pile(draw_pile);
        self.table.replace_first_discard(first_discard);
        self.table.reseed_recycle();
    }

    /// Deal `hand_size` cards to each seat from the top of the draw pile,
    /// seat 0 first.
    pub fn deal_hands(&mut self) -> Result<(), TableError> {
        for seat in Seat::all() {
            for _ in 0..self.config.hand_size {
                let card = self.table.draw()?;
                self.hands[seat].push(card);
            }
        }
        Ok(())
    }

    // === Primitive mutators ===

    /// Draw one card for `seat`.
    pub fn draw_into_hand(&mut self, seat: Seat) -> Result<Card, TableError> {
        let card = self.table.draw()?;
        self.hands[seat].push(card);
        Ok(card)
    }

    /// Remove the first card in `seat`'s hand matching color and rank.
    ///
    /// Returns false if no such card is held.
    pub fn take_from_hand(&mut self, seat: Seat, card: Card) -> bool {
        let hand = &mut self.hands[seat];
        match hand.iter().position(|&held| held == card) {
            Some(pos) => {
                hand.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Put a card on the discard pile.
    pub fn append_discard(&mut self, card: Card) {
        self.table.play(card);
    }

    /// Set or clear the wished color.
    pub fn set_wished_color(&mut self, wish: Option<Color>) {
        self.turn.wished_color = wish;
    }

    /// Add a seven to the chain.
    pub fn increment_chain(&mut self) {
        self.turn.pending_chain += 1;
    }

    /// Clear the chain.
    pub fn reset_chain(&mut self) {
        self.turn.pending_chain = 0;
    }

    /// Pass the turn.
    pub fn flip_turn(&mut self) {
        self.turn.flip();
    }

    // === Invariants ===

    /// Check that piles and hands together hold the 52-card universe once.
    pub fn check_conservation(&self) -> Result<(), ConservationError> {
        let mut seen = FxHashSet::default();
        let all = self
            .table
            .draw_pile()
            .iter()
            .chain(self.table.discard_pile())
            .chain(self.hands[Seat::FIRST].iter())
            .chain(self.hands[Seat::SECOND].iter());

        for &card in all {
            if !seen.insert(card) {
                return Err(ConservationError::Duplicate(card));
            }
        }

        if seen.len() == DECK_SIZE {
            Ok(())
        } else {
            Err(ConservationError::Count(seen.len()))
        }
    }

    /// Capture the replicated part of the state.
    #[must_use]
    pub fn snapshot(&self) -> SharedSnapshot {
        SharedSnapshot {
            draw_pile: self.table.draw_pile().to_vec(),
            discard_pile: self.table.discard_pile().to_vec(),
            turn: self.turn,
            hands: SeatMap::new(|seat| self.hands[seat].to_vec()),
        }
    }
}

/// State that both peers must agree on, seat-independent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedSnapshot {
    pub draw_pile: Vec<Card>,
    pub discard_pile: Vec<Card>,
    pub turn: TurnState,
    pub hands: SeatMap<Vec<Card>>,
}

impl SharedSnapshot {
    /// Compact binary encoding. Two peers in sync produce identical bytes.
    #[must_use]
    pub fn fingerprint(&self) -> Vec<u8> {
        // Encoding plain data into a Vec cannot fail.
        bincode::serialize(self).unwrap_or_default()
    }
}

//! Moves and their outcomes.
//!
//! A `Move` is everything the peer needs to replay a turn: the wire carries
//! exactly these two shapes. Penalty draws are not separate moves; both
//! peers derive them from the turn state when a chain resolves.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, Color};

/// A single turn action by one seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Put a card on the discard pile. `wish` only matters for jacks.
    Play { card: Card, wish: Option<Color> },
    /// Take the top card of the draw pile.
    Draw,
}

impl Move {
    /// Play a card without a wish.
    #[must_use]
    pub const fn play(card: Card) -> Self {
        Move::Play { card, wish: None }
    }

    /// Play a card with a wish (jacks).
    #[must_use]
    pub const fn play_wishing(card: Card, wish: Color) -> Self {
        Move::Play {
            card,
            wish: Some(wish),
        }
    }
}

/// What applying a move did beyond the move itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Cards that went into the actor's hand: the drawn card for a draw,
    /// penalty cards when a play resolved a seven chain.
    pub drawn: SmallVec<[Card; 4]>,

    /// The actor's hand is empty after the move.
    pub won: bool,

    /// The actor moves again (an eight was played).
    pub extra_turn: bool,
}

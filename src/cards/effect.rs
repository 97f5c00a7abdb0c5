//! Rank effects.
//!
//! Every rank maps to exactly one effect. The set is closed: the transition
//! function matches on it exhaustively, so a new effect cannot be added
//! without every apply path handling it.

use serde::{Deserialize, Serialize};

use super::card::Rank;

/// What playing a card of a given rank does to the turn state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankEffect {
    /// Seven: extends the penalty chain by one.
    ExtendChain,
    /// Eight: the acting seat moves again.
    ExtraTurn,
    /// Jack: sets the wished color.
    Wish,
    /// Any other rank: resolves a pending chain against the acting seat.
    ResolveChain,
}

impl RankEffect {
    /// Effect for a rank.
    #[must_use]
    pub const fn of(rank: Rank) -> Self {
        match rank {
            Rank::Seven => RankEffect::ExtendChain,
            Rank::Eight => RankEffect::ExtraTurn,
            Rank::Jack => RankEffect::Wish,
            _ => RankEffect::ResolveChain,
        }
    }
}

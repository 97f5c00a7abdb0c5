//! Card catalog.
//!
//! - `Card`: immutable color × rank value shared by every other component
//! - `Color`, `Rank`: the four colors and thirteen ranks of a 52-card deck
//! - `RankEffect`: the closed set of effects a played rank has on the turn

pub mod card;
pub mod effect;

pub use card::{full_deck, Card, Color, ParseCardError, Rank, DECK_SIZE};
pub use effect::RankEffect;

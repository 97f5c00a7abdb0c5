//! The table: draw pile and discard pile.
//!
//! The `Table` owns both piles and implements the refill rule: when the draw
//! pile runs out, every discard except the top card becomes the new draw
//! pile. It performs no legality checks; see `rules` for those.

pub mod piles;

pub use piles::Table;

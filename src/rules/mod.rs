//! Game rules.
//!
//! - `verifier`: pure play-legality check
//! - `transition`: the single move transition function shared by the local
//!   request path and the replication path

pub mod verifier;
pub mod transition;

pub use verifier::{can_play, has_fitting_card};
pub use transition::{apply_move, can_still_play, validate_move};

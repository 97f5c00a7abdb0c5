//! The move transition function.
//!
//! `apply_move` is the only place a move changes state. The local request
//! path calls `validate_move` first and then `apply_move`; the replication
//! path calls `apply_move` alone, trusting the peer. Both peers therefore run
//! the same code for every move and cannot drift apart.

use tracing::{debug, warn};

use super::verifier::{can_play, has_fitting_card};
use crate::cards::RankEffect;
use crate::core::action::{Move, MoveOutcome};
use crate::core::error::{GameError, TableError};
use crate::core::seat::Seat;
use crate::core::state::GameState;

/// Check a local move without changing anything.
///
/// Draws are only checked for turn ownership here; an exhausted deck is
/// detected when the draw is applied. A table without a discard pile has
/// not been dealt yet.
pub fn validate_move(state: &GameState, actor: Seat, mv: &Move) -> Result<(), GameError> {
    if !state.is_turn_of(actor) {
        return Err(GameError::NotMyTurn);
    }
    let top = state.table.top_card().map_err(|_| GameError::NotInGame)?;

    match *mv {
        Move::Draw => Ok(()),
        Move::Play { card, wish } => {
            if !state.hand(actor).contains(&card) {
                return Err(GameError::CardNotHeld);
            }

            if !can_play(card, top, state.turn.wished_color) {
                return Err(GameError::IllegalPlay);
            }

            if card.is_jack() && wish.is_none() {
                return Err(GameError::WishRequired);
            }

            Ok(())
        }
    }
}

/// Apply a move for `actor`. No legality checks.
///
/// A draw that finds no card fails with `TableError::EmptyDeck` and leaves
/// the state untouched. Plays never fail: a penalty that outlasts the deck
/// is cut short.
pub fn apply_move(state: &mut GameState, actor: Seat, mv: &Move) -> Result<MoveOutcome, TableError> {
    let mut outcome = MoveOutcome::default();

    match *mv {
        Move::Draw => {
            let card = state.draw_into_hand(actor)?;
            outcome.drawn.push(card);
            state.flip_turn();
            debug!(seat = %actor, %card, "applied draw");
        }
        Move::Play { card, wish } => {
            if !state.take_from_hand(actor, card) {
                warn!(seat = %actor, %card, "played card was not in the tracked hand");
            }
            state.append_discard(card);

            match RankEffect::of(card.rank) {
                RankEffect::ExtendChain => {
                    state.increment_chain();
                    state.set_wished_color(None);
                }
                RankEffect::ExtraTurn => {
                    state.flip_turn();
                    state.set_wished_color(None);
                    outcome.extra_turn = true;
                }
                RankEffect::Wish => {
                    state.set_wished_color(wish);
                }
                RankEffect::ResolveChain => {
                    state.set_wished_color(None);
                    resolve_chain(state, actor, &mut outcome);
                }
            }

            state.flip_turn();
            outcome.won = state.hand(actor).is_empty();

            debug!(
                seat = %actor,
                %card,
                wish = ?state.turn.wished_color,
                pending_chain = state.turn.pending_chain,
                penalty = outcome.drawn.len(),
                next = %state.turn.current_turn,
                "applied play"
            );
        }
    }

    Ok(outcome)
}

/// Whether `seat` could still play something after failing to draw.
#[must_use]
pub fn can_still_play(state: &GameState, seat: Seat) -> bool {
    state
        .table
        .top_card()
        .map(|top| has_fitting_card(state.hand(seat), top))
        .unwrap_or(false)
}

// The seat that breaks the chain absorbs it. The printed Mau-Mau rules have
// the opponent draw instead.
// TODO: switch to opponent-draws once both peers can negotiate the rule.
fn resolve_chain(state: &mut GameState, actor: Seat, outcome: &mut MoveOutcome) {
    let pending = state.turn.pending_chain as usize;
    if pending == 0 {
        return;
    }

    let owed = pending * state.config().chain_penalty;
    for _ in 0..owed {
        match state.draw_into_hand(actor) {
            Ok(card) => outcome.drawn.push(card),
            Err(TableError::EmptyDeck) => {
                debug!(seat = %actor, owed, drawn = outcome.drawn.len(), "deck ran out during chain penalty");
                break;
            }
            Err(TableError::NoDiscard) => break,
        }
    }
    state.reset_chain();
}

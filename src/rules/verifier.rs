//! Play legality.

use crate::cards::{Card, Color};

/// Decide whether `candidate` may be placed on `top`.
///
/// 1. A jack is always playable.
/// 2. While a jack is on top and a color was wished, only that color fits.
///    The same-rank shortcut does not apply.
/// 3. Otherwise the same color fits.
/// 4. Otherwise the same rank fits.
///
/// ```
/// use maumau_link::cards::{Card, Color, Rank};
/// use maumau_link::rules::can_play;
///
/// let top = Card::new(Color::Hearts, Rank::Jack);
/// let wish = Some(Color::Spades);
///
/// assert!(can_play(Card::new(Color::Spades, Rank::Two), top, wish));
/// assert!(!can_play(Card::new(Color::Hearts, Rank::Two), top, wish));
/// ```
#[must_use]
pub fn can_play(candidate: Card, top: Card, wished_color: Option<Color>) -> bool {
    if candidate.is_jack() {
        return true;
    }

    if let (Some(wish), true) = (wished_color, top.is_jack()) {
        return candidate.color == wish;
    }

    candidate.color == top.color || candidate.rank == top.rank
}

/// Whether any card in `hand` still fits on `top` by color, or is a jack.
///
/// Used to tell a seat that cannot draw whether it may still play. Rank
/// matches are not considered here.
#[must_use]
pub fn has_fitting_card(hand: &[Card], top: Card) -> bool {
    hand.iter().any(|card| card.color == top.color || card.is_jack())
}

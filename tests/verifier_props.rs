//! Property tests for play legality.

mod support;

use maumau_link::cards::{Card, Color, Rank};
use maumau_link::rules::{can_play, has_fitting_card};
use proptest::prelude::*;
use support::gens;

proptest! {
    /// A jack fits on anything, whatever was wished.
    #[test]
    fn prop_jack_always_playable(
        color in gens::color(),
        top in gens::card(),
        wish in proptest::option::of(gens::color()),
    ) {
        prop_assert!(can_play(Card::new(color, Rank::Jack), top, wish));
    }

    /// Under a wish, only the wished color fits, whatever the rank.
    #[test]
    fn prop_wish_decides_by_color_only(
        top_color in gens::color(),
        wish in gens::color(),
        color in gens::color(),
        rank in gens::plain_rank(),
    ) {
        let top = Card::new(top_color, Rank::Jack);
        prop_assert_eq!(can_play(Card::new(color, rank), top, Some(wish)), color == wish);
    }

    /// Without a wish, color or rank must match.
    #[test]
    fn prop_plain_match(candidate in gens::card(), top in gens::card()) {
        prop_assume!(!candidate.is_jack());
        let expected = candidate.color == top.color || candidate.rank == top.rank;
        prop_assert_eq!(can_play(candidate, top, None), expected);
    }

    /// A wish left over on a non-jack top card has no effect.
    #[test]
    fn prop_stale_wish_ignored(
        candidate in gens::card(),
        top_color in gens::color(),
        top_rank in gens::plain_rank(),
        wish in gens::color(),
    ) {
        let top = Card::new(top_color, top_rank);
        prop_assert_eq!(can_play(candidate, top, Some(wish)), can_play(candidate, top, None));
    }
}

#[test]
fn test_fitting_card_ignores_rank() {
    support::init_test_logging();

    let top = Card::new(Color::Hearts, Rank::Nine);
    let hand = [Card::new(Color::Clubs, Rank::Nine), Card::new(Color::Spades, Rank::Two)];

    assert!(!has_fitting_card(&hand, top));
    assert!(has_fitting_card(&[Card::new(Color::Spades, Rank::Jack)], top));
    assert!(has_fitting_card(&[Card::new(Color::Hearts, Rank::Two)], top));
}

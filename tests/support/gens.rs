// Proptest generators for card types.

use maumau_link::cards::{Card, Color, Rank};
use proptest::prelude::*;

pub fn color() -> impl Strategy<Value = Color> {
    prop::sample::select(Color::ALL.to_vec())
}

pub fn rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::ALL.to_vec())
}

/// Any rank except jack.
pub fn plain_rank() -> impl Strategy<Value = Rank> {
    rank().prop_filter("not a jack", |r| *r != Rank::Jack)
}

pub fn card() -> impl Strategy<Value = Card> {
    (color(), rank()).prop_map(|(color, rank)| Card::new(color, rank))
}

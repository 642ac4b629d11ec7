// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown Poker cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use showdown_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd: Card = "KD".parse().unwrap();
//! assert!(ah < kd);
//! ```
//!
//! a [Deck] type that deals cards one at a time:
//!
//! ```
//! # use showdown_cards::{Deck, Error};
//! let mut deck = Deck::new_and_shuffled(&mut rand::rng());
//! for _ in 0..Deck::SIZE {
//!     deck.draw().unwrap();
//! }
//! assert_eq!(deck.draw(), Err(Error::DeckExhausted));
//! ```
//!
//! and a [Hand] type that holds a player private and visible cards:
//!
//! ```
//! # use showdown_cards::{Card, Hand};
//! let mut hand = Hand::default();
//! hand.add_hole_card("AS".parse().unwrap()).unwrap();
//! hand.add_community_card("KS".parse().unwrap()).unwrap();
//! assert_eq!(hand.visible_cards().len(), 1);
//! assert_eq!(hand.all_cards().len(), 2);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, Rank, Suit};

mod hand;
pub use hand::Hand;

/// Cards errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// There are no more cards in the deck.
    #[error("deck exhausted")]
    DeckExhausted,
    /// The card is already in the hand.
    #[error("card {0} is already in the hand")]
    DuplicateCard(Card),
    /// The card is not in the hand hole cards.
    #[error("card {0} is not in the hand")]
    CardNotInHand(Card),
    /// A rank number outside the 1..=13 range.
    #[error("invalid rank {0}")]
    InvalidRank(u8),
    /// A card string that cannot be parsed.
    #[error("invalid card {0:?}")]
    InvalidCard(String),
}

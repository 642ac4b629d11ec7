// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown Poker hand evaluator.
//!
//! Poker hand evaluator for hands of 5 or more cards, when more than 5 cards
//! are given all the 5 cards subsets are evaluated and the best one is
//! returned.
//!
//! To use the evaluator create a hand and use [HandValue] to evaluate the hand
//! and get its rank:
//!
//! ```
//! # use showdown_eval::*;
//! let cards = ["AH", "KH", "QH", "JH", "TH", "2C", "3D"]
//!     .iter()
//!     .map(|c| c.parse::<Card>().unwrap())
//!     .collect::<Vec<_>>();
//!
//! let v1 = HandValue::eval(&cards).unwrap();
//! assert_eq!(v1.rank(), HandRank::StraightFlush);
//!
//! let v2 = HandValue::eval(&cards[2..]).unwrap();
//! assert!(v1 > v2);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{EvalError, HandRank, HandValue};

// Reexport cards types.
pub use showdown_cards::{Card, Deck, Rank, Suit};

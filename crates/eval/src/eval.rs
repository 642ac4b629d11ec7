// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! A hand value is made of a [HandRank] category and a tuple of ranks used to
//! break ties between hands in the same category, suits never break ties.
//!
//! The tie break tuple for each category is:
//!
//! ```text
//!   StraightFlush, Straight  [high]              (wheel A-2-3-4-5 high is 5)
//!   FourOfAKind              [quads, kicker]
//!   FullHouse                [trips, pair]
//!   Flush, HighCard          [c1, c2, c3, c4, c5]
//!   ThreeOfAKind             [trips, k1, k2]
//!   TwoPair                  [high pair, low pair, kicker]
//!   OnePair                  [pair, k1, k2, k3]
//! ```
//!
//! with the ace valued 14 and unused slots set to 0.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

use showdown_cards::Card;

/// Evaluation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// Fewer than 5 cards were given.
    #[error("insufficient cards: {0} given at least 5 required")]
    InsufficientCards(usize),
}

/// The hand category from the lowest to the highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// No pairs.
    HighCard,
    /// One pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three cards of the same rank.
    ThreeOfAKind,
    /// Five ranks in sequence.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four cards of the same rank.
    FourOfAKind,
    /// A straight of the same suit.
    StraightFlush,
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pairs",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
        };

        write!(f, "{name}")
    }
}

/// The value of a poker hand.
///
/// Values compare by category first and by the tie break ranks after, two
/// hands with equal values split a pot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HandValue {
    rank: HandRank,
    ranks: [u8; 5],
    hand: [Card; 5],
}

impl HandValue {
    /// Evaluates the best 5 cards hand out of the given cards.
    pub fn eval(cards: &[Card]) -> Result<Self, EvalError> {
        let n = cards.len();
        if n < 5 {
            return Err(EvalError::InsufficientCards(n));
        }

        let mut best: Option<HandValue> = None;
        for c1 in 0..n {
            for c2 in (c1 + 1)..n {
                for c3 in (c2 + 1)..n {
                    for c4 in (c3 + 1)..n {
                        for c5 in (c4 + 1)..n {
                            let hand = [cards[c1], cards[c2], cards[c3], cards[c4], cards[c5]];
                            let value = Self::eval5(hand);
                            if best.is_none_or(|b| value > b) {
                                best = Some(value);
                            }
                        }
                    }
                }
            }
        }

        best.ok_or(EvalError::InsufficientCards(n))
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        self.rank
    }

    /// The tie break ranks.
    pub fn tie_break(&self) -> &[u8; 5] {
        &self.ranks
    }

    /// The best 5 cards.
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    fn eval5(mut hand: [Card; 5]) -> HandValue {
        hand.sort_unstable_by(|a, b| b.rank().high_value().cmp(&a.rank().high_value()));
        let values = hand.map(|c| c.rank().high_value());

        // Count ranks, sorted by count and then by rank.
        let mut groups: Vec<(u8, u8)> = Vec::with_capacity(5);
        for v in values {
            match groups.iter_mut().find(|(_, gv)| *gv == v) {
                Some((count, _)) => *count += 1,
                None => groups.push((1, v)),
            }
        }
        groups.sort_unstable_by(|a, b| b.cmp(a));

        let is_flush = hand.iter().all(|c| c.suit() == hand[0].suit());
        let straight_high = if groups.len() < 5 {
            None
        } else if values[0] - values[4] == 4 {
            Some(values[0])
        } else if values == [14, 5, 4, 3, 2] {
            Some(5)
        } else {
            None
        };

        let second = groups.get(1).map_or(0, |g| g.0);
        let rank = match (straight_high, is_flush, groups[0].0, second) {
            (Some(_), true, _, _) => HandRank::StraightFlush,
            (_, _, 4, _) => HandRank::FourOfAKind,
            (_, _, 3, 2) => HandRank::FullHouse,
            (_, true, _, _) => HandRank::Flush,
            (Some(_), _, _, _) => HandRank::Straight,
            (_, _, 3, _) => HandRank::ThreeOfAKind,
            (_, _, 2, 2) => HandRank::TwoPair,
            (_, _, 2, _) => HandRank::OnePair,
            _ => HandRank::HighCard,
        };

        let mut ranks = [0u8; 5];
        match straight_high {
            Some(high) if matches!(rank, HandRank::Straight | HandRank::StraightFlush) => {
                ranks[0] = high;
            }
            _ => {
                for (slot, (_, v)) in ranks.iter_mut().zip(&groups) {
                    *slot = *v;
                }
            }
        }

        HandValue { rank, ranks, hand }
    }
}

impl PartialEq for HandValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HandValue {}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.ranks.cmp(&other.ranks))
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rank)?;
        for card in &self.hand {
            write!(f, " {card}")?;
        }
        Ok(())
    }
}

// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards and deck definitions.
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, fmt, str::FromStr};

use crate::Error;

/// A Poker card.
///
/// Cards are ordered by rank first and suit second so that they can be stored
/// in ordered sets, note that with this order the ace is the lowest rank.
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    /// Create a card given a suit and rank.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    /// Create a card given a suit and a rank number where 1 is the ace and 13
    /// the king.
    pub fn from_number(suit: Suit, number: u8) -> Result<Card, Error> {
        let rank = Rank::from_number(number).ok_or(Error::InvalidRank(number))?;
        Ok(Card::new(rank, suit))
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        self.rank
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = Error;

    /// Parses a two characters card like `AH` or `td`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(r), Some(s_), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(Error::InvalidCard(s.to_string()));
        };

        let rank = Rank::ranks()
            .find(|rank| rank.symbol() == r.to_ascii_uppercase())
            .ok_or_else(|| Error::InvalidCard(s.to_string()))?;

        let suit = Suit::suits()
            .find(|suit| suit.symbol() == s_.to_ascii_uppercase())
            .ok_or_else(|| Error::InvalidCard(s.to_string()))?;

        Ok(Card::new(rank, suit))
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Ace
    Ace = 1,
    /// Deuce
    Deuce,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
}

impl Rank {
    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            Ace, Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King,
        ]
        .into_iter()
    }

    /// Returns the rank for a number in 1..=13.
    pub fn from_number(number: u8) -> Option<Rank> {
        Rank::ranks().find(|r| r.number() == number)
    }

    /// The rank number, 1 for the ace up to 13 for the king.
    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// The rank value used for hand evaluation where the ace is high (14).
    pub fn high_value(&self) -> u8 {
        match self {
            Rank::Ace => 14,
            r => r.number(),
        }
    }

    fn symbol(&self) -> char {
        match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Hearts suit.
    Hearts,
    /// Clubs suit.
    Clubs,
    /// Diamonds suit.
    Diamonds,
    /// Spades suit.
    Spades,
}

impl Suit {
    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Hearts, Suit::Clubs, Suit::Diamonds, Suit::Spades].into_iter()
    }

    fn symbol(&self) -> char {
        match self {
            Suit::Hearts => 'H',
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Spades => 'S',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A cards Deck.
///
/// The deck only tracks undealt cards, cards are drawn from the front.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.shuffle(rng);
        deck
    }

    /// Creates a stacked deck that deals the given cards in order.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards: cards.into(),
        }
    }

    /// Restores all the 52 cards in unshuffled order.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Shuffles the undealt cards.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.make_contiguous().shuffle(rng);
    }

    /// Draws a card from the front of the deck.
    pub fn draw(&mut self) -> Result<Card, Error> {
        self.cards.pop_front().ok_or(Error::DeckExhausted)
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Suit::suits()
            .flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
            .collect();
        Self { cards }
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::collections::vec_deque::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashSet;
    use rand::rngs::StdRng;

    #[test]
    fn card_to_string() {
        let c = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(c.to_string(), "KD");

        let c = Card::new(Rank::Five, Suit::Spades);
        assert_eq!(c.to_string(), "5S");

        let c = Card::new(Rank::Jack, Suit::Clubs);
        assert_eq!(c.to_string(), "JC");

        let c = Card::new(Rank::Ten, Suit::Hearts);
        assert_eq!(c.to_string(), "TH");

        let c = Card::new(Rank::Ace, Suit::Hearts);
        assert_eq!(c.to_string(), "AH");
    }

    #[test]
    fn card_from_str() {
        assert_eq!("KD".parse::<Card>(), Ok(Card::new(Rank::King, Suit::Diamonds)));
        assert_eq!("ts".parse::<Card>(), Ok(Card::new(Rank::Ten, Suit::Spades)));
        assert!(matches!("1H".parse::<Card>(), Err(Error::InvalidCard(_))));
        assert!(matches!("AHX".parse::<Card>(), Err(Error::InvalidCard(_))));
        assert!(matches!("A".parse::<Card>(), Err(Error::InvalidCard(_))));
    }

    #[test]
    fn card_from_number() {
        let c = Card::from_number(Suit::Clubs, 1).unwrap();
        assert_eq!(c.rank(), Rank::Ace);
        assert_eq!(c.rank().high_value(), 14);

        let c = Card::from_number(Suit::Clubs, 13).unwrap();
        assert_eq!(c.rank(), Rank::King);

        assert_eq!(Card::from_number(Suit::Clubs, 0), Err(Error::InvalidRank(0)));
        assert_eq!(Card::from_number(Suit::Clubs, 14), Err(Error::InvalidRank(14)));
    }

    #[test]
    fn card_ordering() {
        let ah = Card::new(Rank::Ace, Suit::Hearts);
        let as_ = Card::new(Rank::Ace, Suit::Spades);
        let kh = Card::new(Rank::King, Suit::Hearts);
        let th = Card::new(Rank::Ten, Suit::Hearts);

        // Rank first, suit breaks ties.
        assert!(ah < as_);
        assert!(as_ < th);
        assert!(th < kh);
    }

    #[test]
    fn drain_shuffled_deck() {
        let mut deck = Deck::new_and_shuffled(&mut StdRng::seed_from_u64(7));
        assert_eq!(deck.count(), Deck::SIZE);

        let mut cards = AHashSet::default();
        while let Ok(card) = deck.draw() {
            assert!(cards.insert(card));
        }

        assert_eq!(cards.len(), Deck::SIZE);
        assert!(deck.is_empty());
        assert_eq!(deck.draw(), Err(Error::DeckExhausted));

        deck.reset();
        assert_eq!(deck.count(), Deck::SIZE);
        let unshuffled = Deck::default().into_iter().collect::<Vec<_>>();
        assert_eq!(deck.into_iter().collect::<Vec<_>>(), unshuffled);
    }

    #[test]
    fn shuffle_changes_order() {
        let mut deck = Deck::default();
        deck.shuffle(&mut StdRng::seed_from_u64(42));

        let shuffled = deck.clone().into_iter().collect::<Vec<_>>();
        let unshuffled = Deck::default().into_iter().collect::<Vec<_>>();
        assert_ne!(shuffled, unshuffled);

        // Same cards in a different order.
        let a = shuffled.iter().collect::<AHashSet<_>>();
        let b = unshuffled.iter().collect::<AHashSet<_>>();
        assert_eq!(a, b);
    }

    #[test]
    fn stacked_deck() {
        let cards = vec![
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::King, Suit::Spades),
        ];
        let mut deck = Deck::from_cards(cards.clone());
        assert_eq!(deck.draw(), Ok(cards[0]));
        assert_eq!(deck.draw(), Ok(cards[1]));
        assert_eq!(deck.draw(), Err(Error::DeckExhausted));
    }
}

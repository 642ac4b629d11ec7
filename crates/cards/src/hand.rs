// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A player hand.
use std::collections::BTreeSet;

use crate::{Card, Error};

/// The cards held by a player.
///
/// Hole cards are private to the player, community cards are visible to all
/// players, they can be shared board cards or face up cards dealt to this
/// player only. A card is never in both sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    hole: BTreeSet<Card>,
    community: BTreeSet<Card>,
}

impl Hand {
    /// Adds a face down card.
    pub fn add_hole_card(&mut self, card: Card) -> Result<(), Error> {
        self.check_new(card)?;
        self.hole.insert(card);
        Ok(())
    }

    /// Adds a face up card.
    pub fn add_community_card(&mut self, card: Card) -> Result<(), Error> {
        self.check_new(card)?;
        self.community.insert(card);
        Ok(())
    }

    /// Removes the given hole cards.
    ///
    /// The hand is left unchanged if any of the cards is not a hole card.
    pub fn remove_hole_cards(&mut self, cards: &BTreeSet<Card>) -> Result<(), Error> {
        if let Some(card) = cards.iter().find(|c| !self.hole.contains(c)) {
            return Err(Error::CardNotInHand(*card));
        }

        self.hole.retain(|c| !cards.contains(c));
        Ok(())
    }

    /// The cards only the owner can see.
    pub fn hole_cards(&self) -> &BTreeSet<Card> {
        &self.hole
    }

    /// The cards all players can see.
    pub fn visible_cards(&self) -> &BTreeSet<Card> {
        &self.community
    }

    /// All the cards in this hand, used for evaluation.
    pub fn all_cards(&self) -> BTreeSet<Card> {
        self.hole.union(&self.community).copied().collect()
    }

    /// Checks if a card is in this hand.
    pub fn contains(&self, card: Card) -> bool {
        self.hole.contains(&card) || self.community.contains(&card)
    }

    /// The total number of cards.
    pub fn len(&self) -> usize {
        self.hole.len() + self.community.len()
    }

    /// Checks if this hand has no cards.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all cards.
    pub fn clear(&mut self) {
        self.hole.clear();
        self.community.clear();
    }

    fn check_new(&self, card: Card) -> Result<(), Error> {
        if self.contains(card) {
            Err(Error::DuplicateCard(card))
        } else {
            Ok(())
        }
    }
}

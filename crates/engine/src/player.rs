// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table player types.
use serde::{Deserialize, Serialize};
use std::fmt;

use showdown_cards::Hand;

use crate::{Action, Chips};

/// A unique player identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Creates a player id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A table player state.
#[derive(Debug, Clone)]
pub struct Player {
    /// The player id.
    pub player_id: PlayerId,
    /// This player name.
    pub name: String,
    /// This player chips.
    pub stack: Chips,
    /// The chips committed in the current betting round.
    pub committed_this_round: Chips,
    /// The chips committed in the current hand, antes included.
    pub total_committed: Chips,
    /// The player has folded.
    pub is_folded: bool,
    /// The player has no more chips to bet.
    pub is_all_in: bool,
    /// The player has been dealt in the current hand.
    pub in_hand: bool,
    /// The player has the button.
    pub has_button: bool,
    /// The last player action.
    pub action: Option<Action>,
    /// This player cards.
    pub hand: Hand,
}

impl Player {
    /// Creates a new player.
    pub fn new(player_id: PlayerId, name: String, stack: Chips) -> Self {
        Self {
            player_id,
            name,
            stack,
            committed_this_round: Chips::ZERO,
            total_committed: Chips::ZERO,
            is_folded: false,
            is_all_in: false,
            in_hand: false,
            has_button: false,
            action: None,
            hand: Hand::default(),
        }
    }

    /// Moves up to `chips` from the stack to the current round bet, returns
    /// the chips committed.
    ///
    /// A player that cannot cover the amount goes all in.
    pub fn commit(&mut self, chips: Chips) -> Chips {
        let chips = self.take(chips);
        self.committed_this_round += chips;
        chips
    }

    /// Pays an ante, antes do not count toward the round bet.
    pub fn post_ante(&mut self, chips: Chips) -> Chips {
        self.take(chips)
    }

    /// Adds chips won from a pot.
    pub fn award(&mut self, chips: Chips) {
        self.stack += chips;
    }

    /// Sets this player in fold state.
    pub fn fold(&mut self) {
        self.is_folded = true;
        self.action = Some(Action::Fold);
    }

    /// The player is in the hand and can still act.
    pub fn is_active(&self) -> bool {
        self.is_contending() && !self.is_all_in
    }

    /// The player is in the hand and has not folded.
    pub fn is_contending(&self) -> bool {
        self.in_hand && !self.is_folded
    }

    fn take(&mut self, chips: Chips) -> Chips {
        let chips = chips.min(self.stack);
        self.stack -= chips;
        self.total_committed += chips;
        if self.stack == Chips::ZERO && self.in_hand {
            self.is_all_in = true;
        }
        chips
    }

    /// Reset state for a new hand.
    fn start_hand(&mut self) {
        self.in_hand = self.stack > Chips::ZERO;
        self.has_button = false;
        self.committed_this_round = Chips::ZERO;
        self.total_committed = Chips::ZERO;
        self.is_folded = false;
        self.is_all_in = false;
        self.action = None;
        self.hand.clear();
    }

    /// Reset state for a new betting round.
    fn start_round(&mut self) {
        self.committed_this_round = Chips::ZERO;
        if !self.is_folded {
            self.action = None;
        }
    }
}

/// The table players in seat order.
#[derive(Debug, Default)]
pub struct Seats {
    players: Vec<Player>,
    button: usize,
}

impl Seats {
    /// Adds a player to the table.
    pub fn join(&mut self, player: Player) {
        self.players.push(player);
    }

    /// Removes a player from the table.
    pub fn leave(&mut self, player_id: PlayerId) -> Option<Player> {
        let pos = self.index_of(player_id)?;
        let player = self.players.remove(pos);

        // Keep the button on the same seat.
        if pos < self.button {
            self.button -= 1;
        }

        if self.button >= self.players.len() {
            self.button = 0;
        }

        Some(player)
    }

    /// Returns total number of players.
    pub fn count(&self) -> usize {
        self.players.len()
    }

    /// Returns the number of players who have chips.
    pub fn count_with_chips(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.stack > Chips::ZERO)
            .count()
    }

    /// Returns the number of players in the hand who have not folded.
    pub fn count_contending(&self) -> usize {
        self.players.iter().filter(|p| p.is_contending()).count()
    }

    /// Returns the number of players who can still act.
    pub fn count_active(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    /// Returns the seat index of a player.
    pub fn index_of(&self, player_id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.player_id == player_id)
    }

    /// Returns a player.
    pub fn get(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.player_id == player_id)
    }

    /// Returns a mutable player.
    pub fn get_mut(&mut self, player_id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.player_id == player_id)
    }

    /// The players in seat order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The mutable players in seat order.
    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    /// Returns an iterator to all players.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Returns a mutable iterator to all players.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    /// The button seat.
    pub fn button(&self) -> usize {
        self.button
    }

    /// The first seat after `from` in clockwise order that matches the
    /// predicate, `from` itself is checked last.
    pub fn next_seat<F>(&self, from: usize, pred: F) -> Option<usize>
    where
        F: Fn(&Player) -> bool,
    {
        let n = self.players.len();
        (1..=n)
            .map(|offset| (from + offset) % n)
            .find(|&idx| pred(&self.players[idx]))
    }

    /// All seats in clockwise order starting left of the button, the button
    /// seat is the last one.
    pub fn clockwise_from_button(&self) -> Vec<usize> {
        let n = self.players.len();
        (1..=n).map(|offset| (self.button + offset) % n).collect()
    }

    /// Set state for a new hand.
    pub fn start_hand(&mut self) {
        for player in &mut self.players {
            player.start_hand();
        }

        if self.players.is_empty() {
            return;
        }

        // The button must be on a player dealt in.
        if !self.players[self.button].in_hand {
            if let Some(idx) = self.next_seat(self.button, |p| p.in_hand) {
                self.button = idx;
            }
        }

        self.players[self.button].has_button = true;
    }

    /// Starts a new betting round.
    pub fn start_round(&mut self) {
        self.players.iter_mut().for_each(Player::start_round);
    }

    /// The hand has ended, moves the button to the next player with chips.
    pub fn end_hand(&mut self) {
        if let Some(idx) = self.next_seat(self.button, |p| p.stack > Chips::ZERO) {
            self.button = idx;
        }
    }
}

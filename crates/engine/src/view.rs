// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! What a player can see of the table.
use serde::Serialize;
use std::collections::BTreeSet;

use showdown_cards::Card;

use crate::{Action, Chips, HandState, Player, PlayerId};

/// The public state of a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicPlayer {
    /// The player id.
    pub player_id: PlayerId,
    /// The player name.
    pub name: String,
    /// The player chips.
    pub stack: Chips,
    /// The chips committed in the current round.
    pub committed_this_round: Chips,
    /// The chips committed in the current hand.
    pub total_committed: Chips,
    /// The player has folded.
    pub is_folded: bool,
    /// The player is all in.
    pub is_all_in: bool,
    /// The player was dealt in.
    pub in_hand: bool,
    /// The player has the button.
    pub has_button: bool,
    /// The player last action.
    pub action: Option<Action>,
    /// The player face up cards.
    pub visible_cards: BTreeSet<Card>,
}

impl From<&Player> for PublicPlayer {
    fn from(p: &Player) -> Self {
        Self {
            player_id: p.player_id,
            name: p.name.clone(),
            stack: p.stack,
            committed_this_round: p.committed_this_round,
            total_committed: p.total_committed,
            is_folded: p.is_folded,
            is_all_in: p.is_all_in,
            in_hand: p.in_hand,
            has_button: p.has_button,
            action: p.action,
            visible_cards: p.hand.visible_cards().clone(),
        }
    }
}

/// The table as seen by one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    /// The player this view was built for.
    pub viewer: PlayerId,
    /// The viewer own hole cards.
    pub hole_cards: BTreeSet<Card>,
    /// All players in seat order.
    pub players: Vec<PublicPlayer>,
    /// The board cards.
    pub board: Vec<Card>,
    /// The chips committed in this hand.
    pub pot: Chips,
    /// The hand state.
    pub state: HandState,
    /// The hand number.
    pub hand_number: u64,
}

impl TableView {
    /// Returns a player public state.
    pub fn player(&self, player_id: PlayerId) -> Option<&PublicPlayer> {
        self.players.iter().find(|p| p.player_id == player_id)
    }
}

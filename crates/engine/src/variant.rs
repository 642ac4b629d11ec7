// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game types.
use serde::{Deserialize, Serialize};
use std::fmt;

use showdown_cards::Deck;

/// Five card draw settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawGame {
    /// The maximum number of cards a player can replace.
    pub max_discards: usize,
}

impl Default for DrawGame {
    fn default() -> Self {
        Self { max_discards: 3 }
    }
}

/// Community cards settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityGame {
    /// The hole cards dealt to each player.
    pub hole_cards: usize,
}

impl Default for CommunityGame {
    fn default() -> Self {
        Self { hole_cards: 2 }
    }
}

/// Seven card stud settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudGame;

/// The game played at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameType {
    /// Five card draw with one replacement round.
    Draw(DrawGame),
    /// Shared board cards.
    Community(CommunityGame),
    /// Face up cards dealt to each player.
    Stud(StudGame),
}

/// The cards dealt before a betting round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Street {
    /// Face down cards to each player.
    pub hole: usize,
    /// Face up cards to each player.
    pub up: usize,
    /// Shared board cards.
    pub board: usize,
}

impl GameType {
    const DRAW_HAND: usize = 5;
    const BOARD_CARDS: usize = 5;
    const MAX_COMMUNITY_PLAYERS: usize = 10;
    const STUD_CARDS: usize = 7;

    /// Five card draw.
    pub fn draw() -> Self {
        GameType::Draw(DrawGame::default())
    }

    /// Hold'em with two hole cards.
    pub fn holdem() -> Self {
        GameType::Community(CommunityGame::default())
    }

    /// Seven card stud.
    pub fn stud() -> Self {
        GameType::Stud(StudGame)
    }

    /// The number of betting rounds.
    pub fn deal_count(&self) -> usize {
        match self {
            GameType::Draw(_) => 2,
            GameType::Community(_) => 4,
            GameType::Stud(_) => 5,
        }
    }

    /// The cards dealt before betting round `round`.
    pub fn street(&self, round: usize) -> Street {
        match (self, round) {
            (GameType::Draw(_), 0) => Street {
                hole: Self::DRAW_HAND,
                ..Street::default()
            },
            (GameType::Community(game), 0) => Street {
                hole: game.hole_cards,
                ..Street::default()
            },
            (GameType::Community(_), 1) => Street {
                board: 3,
                ..Street::default()
            },
            (GameType::Community(_), 2 | 3) => Street {
                board: 1,
                ..Street::default()
            },
            (GameType::Stud(_), 0) => Street {
                hole: 2,
                up: 1,
                board: 0,
            },
            (GameType::Stud(_), 1..=3) => Street {
                up: 1,
                ..Street::default()
            },
            (GameType::Stud(_), 4) => Street {
                hole: 1,
                ..Street::default()
            },
            _ => Street::default(),
        }
    }

    /// Checks if players replace cards before betting round `round`.
    pub fn replacement_before(&self, round: usize) -> bool {
        self.replacement_allowed() && round == 1
    }

    /// Checks if this game has a replacement round.
    pub fn replacement_allowed(&self) -> bool {
        matches!(self, GameType::Draw(_))
    }

    /// The maximum number of cards a player can replace.
    pub fn max_discards(&self) -> usize {
        match self {
            GameType::Draw(game) => game.max_discards,
            _ => 0,
        }
    }

    /// The number of shared board cards.
    pub fn community_cards(&self) -> usize {
        match self {
            GameType::Community(_) => Self::BOARD_CARDS,
            _ => 0,
        }
    }

    /// The maximum number of players that can be dealt without running out
    /// of cards.
    pub fn max_players(&self) -> usize {
        match self {
            GameType::Draw(game) => Deck::SIZE / (Self::DRAW_HAND + game.max_discards),
            GameType::Community(game) => {
                let dealt = Deck::SIZE - self.community_cards();
                (dealt / game.hole_cards.max(1)).min(Self::MAX_COMMUNITY_PLAYERS)
            }
            GameType::Stud(_) => Deck::SIZE / Self::STUD_CARDS,
        }
    }

    /// The game name.
    pub fn name(&self) -> &'static str {
        match self {
            GameType::Draw(_) => "Five Card Draw",
            GameType::Community(_) => "Hold'em",
            GameType::Stud(_) => "Seven Card Stud",
        }
    }
}

impl Default for GameType {
    fn default() -> Self {
        Self::holdem()
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

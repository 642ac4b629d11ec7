// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Engine errors.
use serde::Serialize;
use thiserror::Error;

use showdown_cards::Card;
use showdown_eval::EvalError;

use crate::{Chips, PlayerId};

/// Engine result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Engine errors.
///
/// [Error::IllegalAction] is recoverable, the same player can be asked to
/// act again. [Error::DeckExhausted], [Error::CardNotInHand],
/// [Error::DuplicateCard] and [Error::InsufficientCards] raised during a
/// hand are fatal to the hand, the other errors reject a request without
/// changing any state.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum Error {
    /// No more cards in the deck.
    #[error("deck exhausted")]
    DeckExhausted,
    /// An action that breaks the betting rules.
    #[error("illegal action: {0}")]
    IllegalAction(#[from] IllegalAction),
    /// A card that is not in the player hole cards.
    #[error("card {0} is not in the hand")]
    CardNotInHand(Card),
    /// A card dealt twice to the same hand.
    #[error("card {0} is already in the hand")]
    DuplicateCard(Card),
    /// A malformed card.
    #[error("invalid card {0}")]
    InvalidCard(String),
    /// Players cannot join or leave, or the game type cannot change, while a
    /// hand is in progress.
    #[error("roster locked while a hand is in progress")]
    RosterLocked,
    /// A showdown hand with fewer than 5 cards.
    #[error("insufficient cards to evaluate: {0}")]
    InsufficientCards(usize),
    /// All seats are taken.
    #[error("table full")]
    TableFull,
    /// No player with this id.
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),
    /// Fewer than two players with chips.
    #[error("not enough players to start a hand")]
    NotEnoughPlayers,
    /// The request needs a hand in progress.
    #[error("no hand in progress")]
    NoHandInProgress,
    /// The players at the table exceed the game type maximum.
    #[error("{players} players above the game maximum {max}")]
    TooManyPlayers {
        /// Players at the table.
        players: usize,
        /// Maximum for the game type.
        max: usize,
    },
}

/// The reason an action was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
pub enum IllegalAction {
    /// The player is not the one expected to act.
    #[error("not the player turn")]
    NotPlayersTurn,
    /// Check when there is a bet to call.
    #[error("cannot check with {to_call} to call")]
    CannotCheck {
        /// The amount to call.
        to_call: Chips,
    },
    /// Call when there is no bet.
    #[error("nothing to call")]
    NothingToCall,
    /// Bet when the round has already been opened.
    #[error("cannot bet after a bet, raise instead")]
    BetNotAllowed,
    /// Raise when there is no bet.
    #[error("cannot raise without a bet, bet instead")]
    RaiseNotAllowed,
    /// Bet or raise below the policy minimum.
    #[error("amount {amount} below the minimum {min}")]
    BelowMinimum {
        /// The requested amount.
        amount: Chips,
        /// The minimum amount.
        min: Chips,
    },
    /// Bet or raise above the policy maximum.
    #[error("amount {amount} above the maximum {max}")]
    AboveMaximum {
        /// The requested amount.
        amount: Chips,
        /// The maximum amount.
        max: Chips,
    },
    /// The round reached the maximum number of raises.
    #[error("raise cap of {0} reached")]
    RaiseCapReached(u32),
    /// Ante and blinds are collected by the engine.
    #[error("ante and blinds are forced bets")]
    ForcedBetOnly,
    /// Too many cards to replace.
    #[error("{count} discards above the maximum {max}")]
    TooManyDiscards {
        /// The number of discards.
        count: usize,
        /// The maximum number of discards.
        max: usize,
    },
}

impl From<showdown_cards::Error> for Error {
    fn from(err: showdown_cards::Error) -> Self {
        use showdown_cards::Error as E;
        match err {
            E::DeckExhausted => Error::DeckExhausted,
            E::DuplicateCard(card) => Error::DuplicateCard(card),
            E::CardNotInHand(card) => Error::CardNotInHand(card),
            e @ (E::InvalidRank(_) | E::InvalidCard(_)) => Error::InvalidCard(e.to_string()),
        }
    }
}

impl From<EvalError> for Error {
    fn from(err: EvalError) -> Self {
        match err {
            EvalError::InsufficientCards(n) => Error::InsufficientCards(n),
        }
    }
}

impl Error {
    /// Checks if this error must abort a hand in progress.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::DeckExhausted
                | Error::CardNotInHand(_)
                | Error::DuplicateCard(_)
                | Error::InvalidCard(_)
                | Error::InsufficientCards(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::from(IllegalAction::BelowMinimum {
            amount: Chips::new(50),
            min: Chips::new(100),
        });
        assert_eq!(err.to_string(), "illegal action: amount 50 below the minimum 100");
        assert!(!err.is_fatal());
    }

    #[test]
    fn card_errors_conversion() {
        let card = "AS".parse::<Card>().unwrap();
        assert_eq!(
            Error::from(showdown_cards::Error::CardNotInHand(card)),
            Error::CardNotInHand(card)
        );
        assert_eq!(
            Error::from(showdown_cards::Error::DeckExhausted),
            Error::DeckExhausted
        );
        assert!(Error::DeckExhausted.is_fatal());
        assert_eq!(
            Error::from(EvalError::InsufficientCards(3)),
            Error::InsufficientCards(3)
        );
    }
}

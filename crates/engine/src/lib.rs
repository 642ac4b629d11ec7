// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown Poker hand engine.
//!
//! A [Game] runs one hand at a time from antes and blinds to the payout,
//! enforcing the betting rules of the hand [Policy], building side pots when
//! players go all in at different amounts and ranking hands at showdown.
//!
//! The engine stops every time it needs a player decision:
//!
//! ```
//! # use showdown_engine::*;
//! let mut game = Game::new(GameConfig::default());
//! let alice = game.add_player("Alice", Chips::new(1_000)).unwrap();
//! let bob = game.add_player("Bob", Chips::new(1_000)).unwrap();
//!
//! let policy = Policy::no_limit(Chips::new(5), Chips::new(10));
//! game.start_hand(&policy).unwrap();
//!
//! // Heads up the button posts the small blind and acts first.
//! let Some(Pending::Action(req)) = game.pending() else { unreachable!() };
//! assert_eq!(req.player_id, alice);
//! assert_eq!(req.to_call, Chips::new(5));
//!
//! game.act(alice, Action::Fold).unwrap();
//! assert_eq!(game.state(), HandState::Idle);
//! assert_eq!(game.last_result().unwrap().won_by(bob), Chips::new(15));
//! ```
//!
//! or it can be driven by [play_hand] with an [ActionProvider] for each
//! player.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

mod betting;
pub use betting::{Action, ActionKind, ActionRequest, BettingRound};

mod chips;
pub use chips::Chips;

mod dealer;
pub use dealer::{ActionProvider, Decision, play_hand};

mod error;
pub use error::{Error, IllegalAction, Result};

mod game;
pub use game::{DiscardRequest, Game, GameConfig, HandState, Pending};

mod player;
pub use player::{Player, PlayerId, Seats};

mod policy;
pub use policy::{Policy, PolicySource};

mod pot;
pub use pot::{HandResult, LedgerSeat, PotLayer, PotLedger, PotResult, Split};

mod variant;
pub use variant::{CommunityGame, DrawGame, GameType, Street, StudGame};

mod view;
pub use view::{PublicPlayer, TableView};

// Reexport cards and evaluator types.
pub use showdown_cards::{Card, Deck, Hand, Rank, Suit};
pub use showdown_eval::{HandRank, HandValue};

// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Bot strategies.
use ahash::AHashMap;
use rand::{Rng, rngs::StdRng};
use std::collections::BTreeSet;

use showdown_engine::{
    Action, ActionKind, ActionRequest, Card, Chips, DiscardRequest, Rank, TableView,
};

/// A bot strategy.
pub trait Strategy {
    /// Execute an action given the table view.
    fn execute(&mut self, req: &ActionRequest, view: &TableView) -> Action;

    /// The cards to replace, keeps pairs and discards the lowest cards.
    fn discards(&mut self, req: &DiscardRequest) -> BTreeSet<Card> {
        let counts = rank_counts(req.hole_cards.iter());
        let mut singles = req
            .hole_cards
            .iter()
            .filter(|c| counts.get(&c.rank()).copied().unwrap_or_default() < 2)
            .copied()
            .collect::<Vec<_>>();

        singles.sort_by_key(|c| c.rank().high_value());
        singles.into_iter().take(req.max_discards).collect()
    }
}

/// Calls any bet, never folds.
#[derive(Debug, Clone, Copy)]
pub struct AlwaysCallOrCheck;

impl Strategy for AlwaysCallOrCheck {
    fn execute(&mut self, req: &ActionRequest, _view: &TableView) -> Action {
        if req.is_legal(ActionKind::Call) {
            Action::Call
        } else if req.is_legal(ActionKind::Check) {
            Action::Check
        } else {
            Action::Fold
        }
    }
}

/// Random actions with a small chance to fold or raise.
#[derive(Debug)]
pub struct RandomBot {
    rng: StdRng,
}

impl RandomBot {
    /// Creates a random bot.
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl Strategy for RandomBot {
    fn execute(&mut self, req: &ActionRequest, view: &TableView) -> Action {
        let p = self.rng.random::<f64>();
        if p > 0.85 {
            if let Some(action) = open_or_raise(req) {
                return action;
            }
        }

        passive(req, view, p < 0.1)
    }
}

/// Raises with a pair, otherwise mostly calls.
#[derive(Debug)]
pub struct TightBot {
    rng: StdRng,
}

impl TightBot {
    /// Creates a tight bot.
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl Strategy for TightBot {
    fn execute(&mut self, req: &ActionRequest, view: &TableView) -> Action {
        // Some randomness.
        let p = self.rng.random::<f64>();

        let own_cards = view.hole_cards.iter().chain(
            view.player(view.viewer)
                .into_iter()
                .flat_map(|player| player.visible_cards.iter()),
        );
        let has_pair = rank_counts(own_cards).values().any(|&n| n >= 2);

        // Raise with a pair until the round is raised twice.
        if has_pair && req.raises < 2 && p > 0.2 {
            if let Some(action) = open_or_raise(req) {
                return action;
            }
        }

        passive(req, view, p < 0.3)
    }
}

fn rank_counts<'a>(cards: impl Iterator<Item = &'a Card>) -> AHashMap<Rank, usize> {
    let mut counts = AHashMap::new();
    for card in cards {
        *counts.entry(card.rank()).or_default() += 1;
    }
    counts
}

fn open_or_raise(req: &ActionRequest) -> Option<Action> {
    if req.is_legal(ActionKind::Bet) {
        Some(Action::Bet(req.min_amount))
    } else if req.is_legal(ActionKind::Raise) {
        Some(Action::Raise(req.min_amount))
    } else {
        None
    }
}

/// Checks when possible, folds large bets when `fold` is set, calls otherwise.
fn passive(req: &ActionRequest, view: &TableView, fold: bool) -> Action {
    if req.is_legal(ActionKind::Check) {
        return Action::Check;
    }

    let stack = view
        .player(req.player_id)
        .map(|p| p.stack)
        .unwrap_or(Chips::ZERO);

    if fold && req.to_call * 4 > stack {
        Action::Fold
    } else if req.is_legal(ActionKind::Call) {
        Action::Call
    } else {
        Action::Fold
    }
}

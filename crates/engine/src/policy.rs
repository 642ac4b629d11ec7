// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Betting limits for a hand.
use serde::{Deserialize, Serialize};

use crate::Chips;

/// The limits applied to a hand.
///
/// A policy is taken from a [PolicySource] when a hand starts and does not
/// change until the hand ends. A zero `max_bet` or `max_raises` means no
/// limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// The ante paid by each player before the deal.
    pub ante: Chips,
    /// The small blind.
    pub small_blind: Chips,
    /// The big blind, no blinds are collected if zero.
    pub big_blind: Chips,
    /// The minimum bet or raise amount.
    pub min_bet: Chips,
    /// The maximum bet or raise amount.
    pub max_bet: Chips,
    /// The maximum number of raises in a betting round.
    pub max_raises: u32,
}

impl Policy {
    /// A policy without forced bets and limits.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// A no limit policy with the given blinds, the minimum bet is the big blind.
    pub fn no_limit(small_blind: Chips, big_blind: Chips) -> Self {
        Self {
            small_blind,
            big_blind,
            min_bet: big_blind,
            ..Self::default()
        }
    }

    /// A fixed limit policy where every bet and raise is `bet` with at most
    /// `max_raises` raises per round.
    pub fn fixed_limit(small_blind: Chips, big_blind: Chips, bet: Chips, max_raises: u32) -> Self {
        Self {
            small_blind,
            big_blind,
            min_bet: bet,
            max_bet: bet,
            max_raises,
            ..Self::default()
        }
    }

    /// Sets the ante.
    pub fn with_ante(mut self, ante: Chips) -> Self {
        self.ante = ante;
        self
    }

    /// The smallest legal bet or raise amount.
    pub fn min_amount(&self) -> Chips {
        self.min_bet.max(Chips::new(1))
    }

    /// The largest legal bet or raise amount if there is a limit.
    pub fn max_amount(&self) -> Option<Chips> {
        (self.max_bet > Chips::ZERO).then_some(self.max_bet)
    }

    /// Checks if no more raises are allowed after `raises` raises.
    pub fn is_capped(&self, raises: u32) -> bool {
        self.max_raises > 0 && raises >= self.max_raises
    }
}

/// Provides the policy for the next hand.
pub trait PolicySource {
    /// The currently active policy.
    fn current_policy(&self) -> Policy;
}

impl PolicySource for Policy {
    fn current_policy(&self) -> Policy {
        *self
    }
}

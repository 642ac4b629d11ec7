// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Pot ledger and side pots.
use ahash::AHashMap;
use serde::Serialize;

use showdown_eval::HandValue;

use crate::{Chips, Error, PlayerId};

/// Tracks the chips committed by each player during a hand.
///
/// Chips committed in the current betting round are kept in a pending tally
/// that is merged at the end of the round, the pot layers are built from the
/// hand totals.
#[derive(Debug, Clone, Default)]
pub struct PotLedger {
    committed: AHashMap<PlayerId, Chips>,
    pending: AHashMap<PlayerId, Chips>,
}

/// A player entry used to build pot layers.
#[derive(Debug, Clone, Copy)]
pub struct LedgerSeat {
    /// The player id.
    pub player_id: PlayerId,
    /// The player has folded.
    pub is_folded: bool,
    /// The player is all in.
    pub is_all_in: bool,
}

/// A pot layer, the main pot is the first layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotLayer {
    /// The contribution level that caps this layer.
    pub level: Chips,
    /// The chips in this layer.
    pub amount: Chips,
    /// The players who can win this layer in clockwise order from the button.
    pub eligible: Vec<PlayerId>,
}

/// How a layer is divided among its winners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    /// The chips paid to each winner.
    pub amount_each: Chips,
    /// The odd chips left after an even split.
    pub remainder: Chips,
    /// The winner who receives the odd chips.
    pub remainder_recipient: Option<PlayerId>,
}

impl PotLedger {
    /// Adds chips committed by a player in the current round.
    pub fn add(&mut self, player_id: PlayerId, chips: Chips) {
        if chips > Chips::ZERO {
            *self.pending.entry(player_id).or_default() += chips;
        }
    }

    /// Merges the current round tally into the hand totals.
    pub fn end_round(&mut self) {
        for (player_id, chips) in self.pending.drain() {
            *self.committed.entry(player_id).or_default() += chips;
        }
    }

    /// The chips committed in the current round.
    pub fn pending(&self) -> Chips {
        self.pending.values().copied().sum()
    }

    /// The chips committed in this hand.
    pub fn total(&self) -> Chips {
        self.committed.values().copied().sum::<Chips>() + self.pending()
    }

    /// The chips committed in this hand by a player.
    pub fn committed(&self, player_id: PlayerId) -> Chips {
        let committed = self.committed.get(&player_id).copied().unwrap_or_default();
        let pending = self.pending.get(&player_id).copied().unwrap_or_default();
        committed + pending
    }

    /// Removes all the chips.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.pending.clear();
    }

    /// Builds the pot layers, `seats` must be in clockwise order from the
    /// button.
    ///
    /// A layer is created for each distinct all in level of players who have
    /// not folded plus a last layer for the uncapped bets. Folded players
    /// chips fund the layers they reached, a layer nobody can win is merged
    /// into the layer below.
    pub fn layers(&self, seats: &[LedgerSeat]) -> Vec<PotLayer> {
        let mut levels = seats
            .iter()
            .filter(|s| !s.is_folded && s.is_all_in)
            .map(|s| self.committed(s.player_id))
            .collect::<Vec<_>>();

        let top = seats
            .iter()
            .map(|s| self.committed(s.player_id))
            .max()
            .unwrap_or_default();
        levels.push(top);

        levels.sort();
        levels.dedup();

        let mut layers: Vec<PotLayer> = Vec::new();
        let mut prev = Chips::ZERO;
        let mut carry = Chips::ZERO;

        for level in levels.into_iter().filter(|&l| l > Chips::ZERO) {
            let amount = seats
                .iter()
                .map(|s| {
                    let committed = self.committed(s.player_id);
                    committed.min(level) - committed.min(prev)
                })
                .sum::<Chips>();

            let eligible = seats
                .iter()
                .filter(|s| !s.is_folded && self.committed(s.player_id) >= level)
                .map(|s| s.player_id)
                .collect::<Vec<_>>();

            prev = level;

            if eligible.is_empty() {
                match layers.last_mut() {
                    Some(layer) => layer.amount += amount,
                    None => carry += amount,
                }
            } else {
                layers.push(PotLayer {
                    level,
                    amount: amount + carry,
                    eligible,
                });
                carry = Chips::ZERO;
            }
        }

        layers
    }
}

impl PotLayer {
    /// Splits this layer among winners given in clockwise order from the
    /// button, the first winner receives the odd chips.
    pub fn split(&self, winners: &[PlayerId]) -> Split {
        let count = winners.len() as u32;
        if count == 0 {
            return Split {
                amount_each: Chips::ZERO,
                remainder: self.amount,
                remainder_recipient: None,
            };
        }

        let remainder = self.amount % count;
        Split {
            amount_each: self.amount / count,
            remainder,
            remainder_recipient: (remainder > Chips::ZERO).then_some(winners[0]),
        }
    }
}

/// The payout of a pot layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PotResult {
    /// The layer index, 0 is the main pot.
    pub index: usize,
    /// The chips in the layer.
    pub amount: Chips,
    /// The players who won the layer.
    pub winners: Vec<PlayerId>,
    /// The chips paid to each winner.
    pub amount_each: Chips,
    /// The odd chips.
    pub remainder: Chips,
    /// The winner who received the odd chips.
    pub remainder_recipient: Option<PlayerId>,
    /// The winning hand if the layer went to showdown.
    pub winning_hand: Option<HandValue>,
}

impl PotResult {
    /// The chips won by a player from this layer.
    pub fn won_by(&self, player_id: PlayerId) -> Chips {
        if !self.winners.contains(&player_id) {
            return Chips::ZERO;
        }

        if self.remainder_recipient == Some(player_id) {
            self.amount_each + self.remainder
        } else {
            self.amount_each
        }
    }
}

/// The result of a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandResult {
    /// The hand number.
    pub hand_number: u64,
    /// The pot layers payouts, for an aborted hand the refunds.
    pub pots: Vec<PotResult>,
    /// The reason the hand was aborted.
    pub aborted: Option<Error>,
}

impl HandResult {
    /// The total chips paid.
    pub fn total(&self) -> Chips {
        self.pots
            .iter()
            .map(|p| p.amount_each * p.winners.len() as u32 + p.remainder)
            .sum()
    }

    /// The chips won by a player.
    pub fn won_by(&self, player_id: PlayerId) -> Chips {
        self.pots.iter().map(|p| p.won_by(player_id)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> PlayerId {
        PlayerId::new(n)
    }

    fn seat(n: u32, is_folded: bool, is_all_in: bool) -> LedgerSeat {
        LedgerSeat {
            player_id: id(n),
            is_folded,
            is_all_in,
        }
    }

    #[test]
    fn pending_and_totals() {
        let mut ledger = PotLedger::default();
        ledger.add(id(0), Chips::new(10));
        ledger.add(id(1), Chips::new(20));
        assert_eq!(ledger.pending(), Chips::new(30));

        ledger.end_round();
        assert_eq!(ledger.pending(), Chips::ZERO);

        ledger.add(id(0), Chips::new(5));
        assert_eq!(ledger.total(), Chips::new(35));
        assert_eq!(ledger.committed(id(0)), Chips::new(15));
        assert_eq!(ledger.committed(id(2)), Chips::ZERO);
    }

    #[test]
    fn single_layer_without_all_in() {
        let mut ledger = PotLedger::default();
        for n in 0..3 {
            ledger.add(id(n), Chips::new(50));
        }

        let seats = [seat(0, false, false), seat(1, true, false), seat(2, false, false)];
        let layers = ledger.layers(&seats);
        assert_eq!(
            layers,
            vec![PotLayer {
                level: Chips::new(50),
                amount: Chips::new(150),
                eligible: vec![id(0), id(2)],
            }]
        );
    }

    #[test]
    fn all_in_side_pot() {
        // X all in for 100, Y and Z bet to 300.
        let mut ledger = PotLedger::default();
        ledger.add(id(0), Chips::new(100));
        ledger.add(id(1), Chips::new(300));
        ledger.add(id(2), Chips::new(300));

        let seats = [seat(0, false, true), seat(1, false, false), seat(2, false, false)];
        let layers = ledger.layers(&seats);

        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].amount, Chips::new(300));
        assert_eq!(layers[0].eligible, vec![id(0), id(1), id(2)]);
        assert_eq!(layers[1].amount, Chips::new(400));
        assert_eq!(layers[1].eligible, vec![id(1), id(2)]);

        let total = layers.iter().map(|l| l.amount).sum::<Chips>();
        assert_eq!(total, ledger.total());
    }

    #[test]
    fn folded_chips_fund_layers() {
        // A all in for 50, B folds after 80, C and D bet 200.
        let mut ledger = PotLedger::default();
        ledger.add(id(0), Chips::new(50));
        ledger.add(id(1), Chips::new(80));
        ledger.add(id(2), Chips::new(200));
        ledger.add(id(3), Chips::new(200));

        let seats = [
            seat(0, false, true),
            seat(1, true, false),
            seat(2, false, false),
            seat(3, false, false),
        ];
        let layers = ledger.layers(&seats);

        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].amount, Chips::new(200));
        assert_eq!(layers[0].eligible, vec![id(0), id(2), id(3)]);
        assert_eq!(layers[1].amount, Chips::new(30 + 150 + 150));
        assert_eq!(layers[1].eligible, vec![id(2), id(3)]);
        assert_eq!(layers.iter().map(|l| l.amount).sum::<Chips>(), Chips::new(530));
    }

    #[test]
    fn unreachable_layer_is_merged() {
        // A all in for 100, B bets 300 and folds to a raise, C wins uncalled.
        let mut ledger = PotLedger::default();
        ledger.add(id(0), Chips::new(100));
        ledger.add(id(1), Chips::new(300));
        ledger.add(id(2), Chips::new(200));

        let seats = [seat(0, false, true), seat(1, true, false), seat(2, false, true)];
        let layers = ledger.layers(&seats);

        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].amount, Chips::new(300));
        assert_eq!(layers[1].amount, Chips::new(200 + 100));
        assert_eq!(layers[1].eligible, vec![id(2)]);
        assert_eq!(layers.iter().map(|l| l.amount).sum::<Chips>(), ledger.total());
    }

    #[test]
    fn split_with_remainder() {
        let layer = PotLayer {
            level: Chips::new(35),
            amount: Chips::new(105),
            eligible: vec![id(2), id(0), id(1)],
        };

        let split = layer.split(&[id(2), id(1)]);
        assert_eq!(split.amount_each, Chips::new(52));
        assert_eq!(split.remainder, Chips::new(1));
        assert_eq!(split.remainder_recipient, Some(id(2)));

        let split = layer.split(&[id(0)]);
        assert_eq!(split.amount_each, Chips::new(105));
        assert_eq!(split.remainder_recipient, None);
    }

    #[test]
    fn result_totals() {
        let result = HandResult {
            hand_number: 1,
            pots: vec![PotResult {
                index: 0,
                amount: Chips::new(105),
                winners: vec![id(2), id(1)],
                amount_each: Chips::new(52),
                remainder: Chips::new(1),
                remainder_recipient: Some(id(2)),
                winning_hand: None,
            }],
            aborted: None,
        };

        assert_eq!(result.total(), Chips::new(105));
        assert_eq!(result.won_by(id(2)), Chips::new(53));
        assert_eq!(result.won_by(id(1)), Chips::new(52));
        assert_eq!(result.won_by(id(0)), Chips::ZERO);
    }
}

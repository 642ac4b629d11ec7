// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Betting round types.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Chips, IllegalAction, Player, PlayerId, Policy, PotLedger};

/// A player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Forced ante, posted by the engine.
    Ante(Chips),
    /// Forced blind, posted by the engine.
    Blind(Chips),
    /// Pass without betting.
    Check,
    /// Open the round with a bet.
    Bet(Chips),
    /// Raise by the given amount over the highest bet.
    Raise(Chips),
    /// Match the highest bet.
    Call,
    /// Give up the hand.
    Fold,
}

impl Action {
    /// The kind of this action.
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Ante(_) => ActionKind::Ante,
            Action::Blind(_) => ActionKind::Blind,
            Action::Check => ActionKind::Check,
            Action::Bet(_) => ActionKind::Bet,
            Action::Raise(_) => ActionKind::Raise,
            Action::Call => ActionKind::Call,
            Action::Fold => ActionKind::Fold,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Ante(c) => write!(f, "ANTE {c}"),
            Action::Blind(c) => write!(f, "BLIND {c}"),
            Action::Check => write!(f, "CHECK"),
            Action::Bet(c) => write!(f, "BET {c}"),
            Action::Raise(c) => write!(f, "RAISE {c}"),
            Action::Call => write!(f, "CALL"),
            Action::Fold => write!(f, "FOLD"),
        }
    }
}

/// An action without amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// See [Action::Ante].
    Ante,
    /// See [Action::Blind].
    Blind,
    /// See [Action::Check].
    Check,
    /// See [Action::Bet].
    Bet,
    /// See [Action::Raise].
    Raise,
    /// See [Action::Call].
    Call,
    /// See [Action::Fold].
    Fold,
}

/// The request sent to the player who has to act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// The player who has to act.
    pub player_id: PlayerId,
    /// The legal actions.
    pub actions: Vec<ActionKind>,
    /// The chips needed to call.
    pub to_call: Chips,
    /// The smallest bet or raise amount.
    pub min_amount: Chips,
    /// The largest bet or raise amount.
    pub max_amount: Chips,
    /// The highest commitment in this round.
    pub highest: Chips,
    /// The number of raises in this round.
    pub raises: u32,
}

impl ActionRequest {
    /// Checks if an action kind is legal for this request.
    pub fn is_legal(&self, kind: ActionKind) -> bool {
        self.actions.contains(&kind)
    }
}

/// A betting round.
///
/// The round tracks which seats still have to act, a seat needs to act until
/// it has acted since the last raise, it has folded or it is all in.
#[derive(Debug, Clone)]
pub struct BettingRound {
    highest: Chips,
    raises: u32,
    needs_action: Vec<bool>,
    to_act: Option<usize>,
}

impl BettingRound {
    /// Starts a round with action on `first` or the next seat that has to act.
    ///
    /// `highest` is the amount to match, the highest blind for a first round.
    pub fn new(players: &[Player], first: usize, highest: Chips) -> Self {
        let active = players.iter().filter(|p| p.is_active()).count();
        let needs_action = players
            .iter()
            .map(|p| p.is_active() && (active > 1 || p.committed_this_round < highest))
            .collect();

        let mut round = Self {
            highest,
            raises: 0,
            needs_action,
            to_act: None,
        };

        if !players.is_empty() {
            round.to_act = round.next_to_act(players, first + players.len() - 1);
        }

        round
    }

    /// The seat that has to act, none if the round is closed.
    pub fn to_act(&self) -> Option<usize> {
        self.to_act
    }

    /// Checks if the round is closed.
    pub fn is_closed(&self) -> bool {
        self.to_act.is_none()
    }

    /// The highest commitment in this round.
    pub fn highest(&self) -> Chips {
        self.highest
    }

    /// The number of full bets and raises in this round.
    pub fn raises(&self) -> u32 {
        self.raises
    }

    /// The request for the seat that has to act.
    pub fn request(&self, players: &[Player], policy: &Policy) -> Option<ActionRequest> {
        let seat = self.to_act?;
        let player = &players[seat];
        let to_call = self.highest - player.committed_this_round;
        let behind = player.stack - to_call;

        Some(ActionRequest {
            player_id: player.player_id,
            actions: self.legal_actions(players, seat, policy),
            to_call,
            min_amount: policy.min_amount().min(behind),
            max_amount: policy.max_amount().unwrap_or(behind).min(behind),
            highest: self.highest,
            raises: self.raises,
        })
    }

    /// Applies an action for `seat`, returns the chips moved into the ledger.
    ///
    /// A rejected action leaves players, ledger and round unchanged.
    pub fn apply(
        &mut self,
        seat: usize,
        players: &mut [Player],
        action: Action,
        policy: &Policy,
        ledger: &mut PotLedger,
    ) -> Result<Chips, IllegalAction> {
        if self.to_act != Some(seat) {
            return Err(IllegalAction::NotPlayersTurn);
        }

        let to_call = self.highest - players[seat].committed_this_round;
        let (action, chips) = match action {
            Action::Ante(_) | Action::Blind(_) => return Err(IllegalAction::ForcedBetOnly),
            Action::Fold => {
                players[seat].fold();
                (Action::Fold, Chips::ZERO)
            }
            Action::Check => {
                if to_call > Chips::ZERO {
                    return Err(IllegalAction::CannotCheck { to_call });
                }
                (Action::Check, Chips::ZERO)
            }
            Action::Call => {
                if to_call == Chips::ZERO {
                    return Err(IllegalAction::NothingToCall);
                }
                (Action::Call, players[seat].commit(to_call))
            }
            Action::Bet(amount) => {
                if self.highest > Chips::ZERO {
                    return Err(IllegalAction::BetNotAllowed);
                }
                self.check_raise(players, seat, amount, policy)?;
                let chips = players[seat].commit(amount);
                (Action::Bet(chips), chips)
            }
            Action::Raise(amount) => {
                if self.highest == Chips::ZERO {
                    return Err(IllegalAction::RaiseNotAllowed);
                }
                self.check_raise(players, seat, amount, policy)?;
                let chips = players[seat].commit(to_call + amount);
                let committed = players[seat].committed_this_round;
                if committed > self.highest {
                    (Action::Raise(committed - self.highest), chips)
                } else {
                    // All in for less than a call.
                    (Action::Call, chips)
                }
            }
        };

        let player = &mut players[seat];
        player.action = Some(action);
        ledger.add(player.player_id, chips);
        self.needs_action[seat] = false;

        let committed = player.committed_this_round;
        if committed > self.highest {
            if committed - self.highest >= policy.min_amount() {
                self.raises += 1;
            }

            self.highest = committed;

            // Everybody else has to act again.
            for (idx, p) in players.iter().enumerate() {
                if idx != seat {
                    self.needs_action[idx] = p.is_active();
                }
            }
        }

        let contending = players.iter().filter(|p| p.is_contending()).count();
        self.to_act = if contending < 2 {
            None
        } else {
            self.next_to_act(players, seat)
        };

        Ok(chips)
    }

    /// The legal actions for a seat.
    fn legal_actions(&self, players: &[Player], seat: usize, policy: &Policy) -> Vec<ActionKind> {
        let player = &players[seat];
        let to_call = self.highest - player.committed_this_round;

        let mut actions = vec![ActionKind::Fold];

        if to_call == Chips::ZERO {
            actions.push(ActionKind::Check);
        } else {
            actions.push(ActionKind::Call);
        }

        let others_active = players
            .iter()
            .enumerate()
            .any(|(idx, p)| idx != seat && p.is_active());

        if others_active && player.stack > to_call && !policy.is_capped(self.raises) {
            if self.highest == Chips::ZERO {
                actions.push(ActionKind::Bet);
            } else {
                actions.push(ActionKind::Raise);
            }
        }

        actions
    }

    fn check_raise(
        &self,
        players: &[Player],
        seat: usize,
        amount: Chips,
        policy: &Policy,
    ) -> Result<(), IllegalAction> {
        let actions = self.legal_actions(players, seat, policy);
        if !actions.contains(&ActionKind::Bet) && !actions.contains(&ActionKind::Raise) {
            return if policy.is_capped(self.raises) {
                Err(IllegalAction::RaiseCapReached(policy.max_raises))
            } else if self.highest == Chips::ZERO {
                Err(IllegalAction::BetNotAllowed)
            } else {
                Err(IllegalAction::RaiseNotAllowed)
            };
        }

        if let Some(max) = policy.max_amount() {
            if amount > max {
                return Err(IllegalAction::AboveMaximum { amount, max });
            }
        }

        let player = &players[seat];
        let to_call = self.highest - player.committed_this_round;
        let all_in = to_call + amount >= player.stack;
        let min = policy.min_amount();
        if amount < min && !all_in {
            return Err(IllegalAction::BelowMinimum { amount, min });
        }

        Ok(())
    }

    /// The first seat after `from` that has to act.
    fn next_to_act(&self, players: &[Player], from: usize) -> Option<usize> {
        let n = players.len();
        (1..=n)
            .map(|offset| (from + offset) % n)
            .find(|&idx| self.needs_action[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(stacks: &[u32]) -> Vec<Player> {
        stacks
            .iter()
            .enumerate()
            .map(|(idx, stack)| {
                let mut p = Player::new(
                    PlayerId::new(idx as u32),
                    format!("P{idx}"),
                    Chips::new(*stack),
                );
                p.in_hand = true;
                p
            })
            .collect()
    }

    struct Table {
        players: Vec<Player>,
        round: BettingRound,
        policy: Policy,
        ledger: PotLedger,
    }

    impl Table {
        fn new(stacks: &[u32], policy: Policy) -> Self {
            let players = players(stacks);
            let round = BettingRound::new(&players, 0, Chips::ZERO);
            Self {
                players,
                round,
                policy,
                ledger: PotLedger::default(),
            }
        }

        fn act(&mut self, action: Action) -> Result<Chips, IllegalAction> {
            let seat = self.round.to_act().unwrap();
            self.round.apply(
                seat,
                &mut self.players,
                action,
                &self.policy,
                &mut self.ledger,
            )
        }
    }

    #[test]
    fn all_check_closes_after_one_cycle() {
        let mut table = Table::new(&[100, 100, 100], Policy::unlimited());

        for seat in 0..3 {
            assert_eq!(table.round.to_act(), Some(seat));
            table.act(Action::Check).unwrap();
        }

        assert!(table.round.is_closed());
        assert_eq!(table.round.raises(), 0);
        assert_eq!(table.ledger.total(), Chips::ZERO);
    }

    #[test]
    fn raise_reopens_action() {
        let mut table = Table::new(&[100, 100, 100], Policy::unlimited());

        table.act(Action::Check).unwrap();
        table.act(Action::Bet(Chips::new(10))).unwrap();
        table.act(Action::Raise(Chips::new(20))).unwrap();

        // Seat 0 checked, seat 1 bet, both must act again.
        assert_eq!(table.round.to_act(), Some(0));
        table.act(Action::Call).unwrap();
        assert_eq!(table.round.to_act(), Some(1));
        table.act(Action::Call).unwrap();

        assert!(table.round.is_closed());
        assert_eq!(table.round.highest(), Chips::new(30));
        assert_eq!(table.round.raises(), 2);
        assert_eq!(table.ledger.total(), Chips::new(90));
        assert!(table.players.iter().all(|p| p.stack == Chips::new(70)));
        assert_eq!(table.players[2].action, Some(Action::Raise(Chips::new(20))));
    }

    #[test]
    fn illegal_actions() {
        let mut table = Table::new(&[100, 100], Policy::fixed_limit(
            Chips::ZERO,
            Chips::ZERO,
            Chips::new(10),
            1,
        ));

        assert_eq!(table.act(Action::Call), Err(IllegalAction::NothingToCall));
        assert_eq!(
            table.act(Action::Raise(Chips::new(10))),
            Err(IllegalAction::RaiseNotAllowed)
        );
        assert_eq!(
            table.act(Action::Bet(Chips::new(5))),
            Err(IllegalAction::BelowMinimum {
                amount: Chips::new(5),
                min: Chips::new(10)
            })
        );
        assert_eq!(
            table.act(Action::Bet(Chips::new(20))),
            Err(IllegalAction::AboveMaximum {
                amount: Chips::new(20),
                max: Chips::new(10)
            })
        );
        assert_eq!(
            table.act(Action::Blind(Chips::new(10))),
            Err(IllegalAction::ForcedBetOnly)
        );

        // Rejected actions leave the round unchanged.
        assert_eq!(table.round.to_act(), Some(0));
        assert_eq!(table.players[0].stack, Chips::new(100));

        table.act(Action::Bet(Chips::new(10))).unwrap();
        assert_eq!(
            table.act(Action::Check),
            Err(IllegalAction::CannotCheck {
                to_call: Chips::new(10)
            })
        );
        assert_eq!(
            table.act(Action::Raise(Chips::new(10))),
            Err(IllegalAction::RaiseCapReached(1))
        );

        let req = table.round.request(&table.players, &table.policy).unwrap();
        assert_eq!(req.actions, vec![ActionKind::Fold, ActionKind::Call]);
        assert_eq!(req.to_call, Chips::new(10));

        assert_eq!(
            table.round.apply(
                0,
                &mut table.players,
                Action::Fold,
                &table.policy,
                &mut table.ledger
            ),
            Err(IllegalAction::NotPlayersTurn)
        );
    }

    #[test]
    fn short_call_goes_all_in() {
        let mut table = Table::new(&[200, 50, 200], Policy::unlimited());

        table.act(Action::Bet(Chips::new(100))).unwrap();
        assert_eq!(table.act(Action::Call), Ok(Chips::new(50)));
        assert!(table.players[1].is_all_in);

        table.act(Action::Call).unwrap();
        assert!(table.round.is_closed());
        assert_eq!(table.ledger.total(), Chips::new(250));
    }

    #[test]
    fn oversized_bet_is_capped_to_stack() {
        let mut table = Table::new(&[40, 100], Policy::no_limit(Chips::new(5), Chips::new(10)));

        assert_eq!(table.act(Action::Bet(Chips::new(500))), Ok(Chips::new(40)));
        assert!(table.players[0].is_all_in);
        assert_eq!(table.players[0].action, Some(Action::Bet(Chips::new(40))));

        // The other player can only call or fold.
        let req = table.round.request(&table.players, &table.policy).unwrap();
        assert_eq!(req.actions, vec![ActionKind::Fold, ActionKind::Call]);

        table.act(Action::Call).unwrap();
        assert!(table.round.is_closed());
    }

    #[test]
    fn fold_to_single_player_closes() {
        let mut table = Table::new(&[100, 100, 100], Policy::unlimited());

        table.act(Action::Bet(Chips::new(10))).unwrap();
        table.act(Action::Fold).unwrap();
        table.act(Action::Fold).unwrap();

        assert!(table.round.is_closed());
        assert!(table.players[1].is_folded);
    }

    #[test]
    fn big_blind_option() {
        let mut players = players(&[100, 100, 100]);
        let mut ledger = PotLedger::default();
        for (seat, blind) in [(1, 5), (2, 10)] {
            let chips = players[seat].commit(Chips::new(blind));
            ledger.add(players[seat].player_id, chips);
        }

        let policy = Policy::no_limit(Chips::new(5), Chips::new(10));
        let mut round = BettingRound::new(&players, 0, Chips::new(10));

        for seat in [0, 1] {
            assert_eq!(round.to_act(), Some(seat));
            round
                .apply(seat, &mut players, Action::Call, &policy, &mut ledger)
                .unwrap();
        }

        // Big blind can still raise.
        assert_eq!(round.to_act(), Some(2));
        let req = round.request(&players, &policy).unwrap();
        assert!(req.is_legal(ActionKind::Check));
        assert!(req.is_legal(ActionKind::Raise));

        round
            .apply(2, &mut players, Action::Check, &policy, &mut ledger)
            .unwrap();
        assert!(round.is_closed());
        assert_eq!(ledger.total(), Chips::new(30));
    }

    #[test]
    fn round_with_one_active_player() {
        let mut players = players(&[100, 100]);
        players[1].commit(Chips::new(100));

        let round = BettingRound::new(&players, 0, Chips::ZERO);
        assert!(round.is_closed());

        // A player facing an all in still has to call or fold.
        let round = BettingRound::new(&players, 0, Chips::new(100));
        assert_eq!(round.to_act(), Some(0));
    }
}

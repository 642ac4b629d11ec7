// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Drives a hand asking players for their decisions.
use ahash::AHashMap;
use log::warn;
use std::{collections::BTreeSet, future::Future};

use showdown_cards::Card;

use crate::{
    Action, ActionRequest, DiscardRequest, Error, Game, HandResult, Pending, PlayerId,
    PolicySource, Result, TableView,
};

/// A player decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision<T> {
    /// The player decided.
    Ready(T),
    /// The player did not decide in time.
    Timeout,
}

/// Provides the decisions of a player, a human or a bot.
pub trait ActionProvider {
    /// Asks for a betting action.
    fn request_action(
        &mut self,
        req: &ActionRequest,
        view: &TableView,
    ) -> impl Future<Output = Decision<Action>>;

    /// Asks for the hole cards to replace, stands pat by default.
    fn request_discards(
        &mut self,
        _req: &DiscardRequest,
        _view: &TableView,
    ) -> impl Future<Output = Decision<BTreeSet<Card>>> {
        async { Decision::Ready(BTreeSet::new()) }
    }
}

/// Plays a hand to the end.
///
/// A player who keeps sending illegal actions is asked again up to the
/// configured number of retries and then folds, a player without provider
/// times out. A hand aborted by a fatal error returns its refunds result.
pub async fn play_hand<S, P>(
    game: &mut Game,
    source: &S,
    providers: &mut AHashMap<PlayerId, P>,
) -> Result<HandResult>
where
    S: PolicySource + ?Sized,
    P: ActionProvider,
{
    if let Err(e) = game.start_hand(source) {
        if !e.is_fatal() {
            return Err(e);
        }
    }

    let max_retries = game.config().max_retries;
    let mut failures = 0;

    while let Some(pending) = game.pending() {
        let player_id = pending.player_id();
        let view = game.view(player_id);

        let res = match (&pending, providers.get_mut(&player_id)) {
            (_, None) => {
                warn!("No action provider for player {player_id}");
                game.timeout(player_id)
            }
            (Pending::Action(req), Some(provider)) => {
                match provider.request_action(req, &view).await {
                    Decision::Ready(action) => game.act(player_id, action),
                    Decision::Timeout => game.timeout(player_id),
                }
            }
            (Pending::Discard(req), Some(provider)) => {
                match provider.request_discards(req, &view).await {
                    Decision::Ready(cards) => game.discard(player_id, &cards),
                    Decision::Timeout => game.timeout(player_id),
                }
            }
        };

        match res {
            Ok(()) => failures = 0,
            Err(Error::IllegalAction(e)) => {
                failures += 1;
                if failures > max_retries {
                    warn!("Player {player_id} failed {failures} times: {e}");
                    failures = 0;

                    if let Err(e) = game.timeout(player_id) {
                        if !e.is_fatal() {
                            return Err(e);
                        }
                    }
                }
            }
            // The hand has been aborted.
            Err(e) if e.is_fatal() => break,
            Err(e) => return Err(e),
        }
    }

    game.last_result().cloned().ok_or(Error::NoHandInProgress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActionKind, Chips, GameConfig, GameType, HandState, Policy};
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::VecDeque;

    /// Plays scripted actions first, then checks or calls.
    #[derive(Default)]
    struct Scripted {
        actions: VecDeque<Action>,
        discards: VecDeque<usize>,
        requests: usize,
        discard_requests: usize,
    }

    impl Scripted {
        fn new(actions: &[Action]) -> Self {
            Self {
                actions: actions.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl ActionProvider for Scripted {
        async fn request_action(
            &mut self,
            req: &ActionRequest,
            _view: &TableView,
        ) -> Decision<Action> {
            self.requests += 1;

            if let Some(action) = self.actions.pop_front() {
                return Decision::Ready(action);
            }

            if req.is_legal(ActionKind::Check) {
                Decision::Ready(Action::Check)
            } else {
                Decision::Ready(Action::Call)
            }
        }

        async fn request_discards(
            &mut self,
            req: &DiscardRequest,
            _view: &TableView,
        ) -> Decision<BTreeSet<Card>> {
            self.discard_requests += 1;

            match self.discards.pop_front() {
                Some(count) => Decision::Ready(req.hole_cards.iter().take(count).copied().collect()),
                None => Decision::Timeout,
            }
        }
    }

    fn new_game(game_type: GameType, players: usize) -> (Game, Vec<PlayerId>) {
        let config = GameConfig {
            game_type,
            max_retries: 3,
        };

        let mut game = Game::with_rng(config, StdRng::seed_from_u64(42));
        let ids = (0..players)
            .map(|n| game.add_player(&format!("P{n}"), Chips::new(1_000)).unwrap())
            .collect();

        (game, ids)
    }

    #[tokio::test]
    async fn illegal_actions_fold_after_retries() {
        let (mut game, ids) = new_game(GameType::holdem(), 2);
        let policy = Policy::unlimited().with_ante(Chips::new(5));

        let mut providers = AHashMap::new();
        providers.insert(ids[0], Scripted::default());
        providers.insert(ids[1], Scripted::new(&[Action::Call; 4]));

        let result = play_hand(&mut game, &policy, &mut providers).await.unwrap();

        // The first attempt plus three retries.
        assert_eq!(providers[&ids[1]].requests, 4);
        assert!(game.player(ids[1]).unwrap().is_folded);
        assert_eq!(result.pots[0].winners, vec![ids[0]]);
        assert_eq!(result.won_by(ids[0]), Chips::new(10));
        assert_eq!(game.state(), HandState::Idle);
    }

    #[tokio::test]
    async fn illegal_action_then_legal() {
        let (mut game, ids) = new_game(GameType::holdem(), 2);
        let policy = Policy::unlimited().with_ante(Chips::new(5));

        let mut providers = AHashMap::new();
        providers.insert(ids[0], Scripted::default());
        providers.insert(ids[1], Scripted::new(&[Action::Call, Action::Call]));

        let result = play_hand(&mut game, &policy, &mut providers).await.unwrap();

        // Two rejected calls then checks to the showdown.
        assert!(!game.player(ids[1]).unwrap().is_folded);
        assert_eq!(providers[&ids[1]].requests, 2 + 4);
        assert!(result.pots[0].winning_hand.is_some());
        assert_eq!(result.total(), Chips::new(10));
    }

    #[tokio::test]
    async fn missing_provider_folds() {
        let (mut game, ids) = new_game(GameType::holdem(), 3);
        let policy = Policy::no_limit(Chips::new(5), Chips::new(10));

        let mut providers = AHashMap::new();
        providers.insert(ids[1], Scripted::default());
        providers.insert(ids[2], Scripted::default());

        let result = play_hand(&mut game, &policy, &mut providers).await.unwrap();
        assert!(game.player(ids[0]).unwrap().is_folded);
        assert_eq!(result.won_by(ids[0]), Chips::ZERO);
        assert_eq!(result.total(), Chips::new(20));
    }

    #[tokio::test]
    async fn chips_are_conserved_across_hands() {
        let (mut game, ids) = new_game(GameType::holdem(), 4);
        let policy = Policy::no_limit(Chips::new(10), Chips::new(20)).with_ante(Chips::new(5));

        let mut providers = AHashMap::new();
        providers.insert(ids[0], Scripted::new(&[Action::Raise(Chips::new(2_000))]));
        for id in &ids[1..] {
            providers.insert(*id, Scripted::default());
        }

        for hand in 1..=10 {
            if game.players().iter().filter(|p| p.stack > Chips::ZERO).count() < 2 {
                break;
            }

            let result = play_hand(&mut game, &policy, &mut providers).await.unwrap();
            assert_eq!(result.hand_number, hand);
            assert!(result.aborted.is_none());

            let total = game.players().iter().map(|p| p.stack).sum::<Chips>();
            assert_eq!(total, Chips::new(4_000));
        }
    }

    #[tokio::test]
    async fn draw_hand_with_discards() {
        let (mut game, ids) = new_game(GameType::draw(), 3);
        let policy = Policy::unlimited().with_ante(Chips::new(2));

        let mut providers = AHashMap::new();
        for id in &ids {
            providers.insert(*id, Scripted::default());
        }

        // Too many discards are asked again.
        providers.get_mut(&ids[1]).unwrap().discards = VecDeque::from([4, 2]);

        let result = play_hand(&mut game, &policy, &mut providers).await.unwrap();
        assert!(result.aborted.is_none());
        assert_eq!(result.total(), Chips::new(6));

        assert_eq!(providers[&ids[1]].discard_requests, 2);
        assert_eq!(providers[&ids[0]].discard_requests, 1);
        assert_eq!(game.muck().len(), 2);
        assert_eq!(game.hole_cards(ids[1]).unwrap().len(), 5);
    }
}

// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand state machine.
use ahash::AHashMap;
use log::{debug, error, info, warn};
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

use showdown_cards::{Card, Deck};
use showdown_eval::HandValue;

use crate::{
    Action, ActionRequest, BettingRound, Chips, Error, GameType, HandResult, IllegalAction,
    LedgerSeat, Player, PlayerId, Policy, PolicySource, PotLedger, PotResult, PublicPlayer,
    Result, Seats, TableView,
};

/// The hand state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandState {
    /// No hand in progress, the roster and the game type can change.
    Idle,
    /// Collect the antes.
    AnteCollection,
    /// Collect the blinds.
    BlindCollection,
    /// Deal the cards for a betting round.
    Dealing(usize),
    /// Players betting.
    Betting(usize),
    /// Players replace cards before a betting round.
    CardReplacement(usize),
    /// Rank the hands of players still in the hand.
    Showdown,
    /// Pay the pots.
    Payout,
}

/// The engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// The game played at the table.
    pub game_type: GameType,
    /// How many times a player is asked again after an illegal action before
    /// the engine folds the player.
    pub max_retries: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_type: GameType::default(),
            max_retries: 3,
        }
    }
}

/// Request to replace hole cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardRequest {
    /// The player who has to discard.
    pub player_id: PlayerId,
    /// The player hole cards.
    pub hole_cards: BTreeSet<Card>,
    /// The maximum number of cards to discard.
    pub max_discards: usize,
}

/// The decision the engine is waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    /// A betting action.
    Action(ActionRequest),
    /// Cards to replace.
    Discard(DiscardRequest),
}

impl Pending {
    /// The player who has to decide.
    pub fn player_id(&self) -> PlayerId {
        match self {
            Pending::Action(req) => req.player_id,
            Pending::Discard(req) => req.player_id,
        }
    }
}

/// A poker table that runs one hand at a time.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    seats: Seats,
    state: HandState,
    policy: Policy,
    deck: Deck,
    stacked: Option<Deck>,
    pot: PotLedger,
    round: Option<BettingRound>,
    big_blind_seat: Option<usize>,
    board: Vec<Card>,
    muck: Vec<Card>,
    replacements: VecDeque<usize>,
    values: AHashMap<PlayerId, HandValue>,
    hand_number: u64,
    last_result: Option<HandResult>,
    next_id: u32,
    rng: StdRng,
}

impl Game {
    /// Creates a new game.
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Creates a new game with user initialized randomness.
    pub fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        Self {
            config,
            seats: Seats::default(),
            state: HandState::Idle,
            policy: Policy::default(),
            deck: Deck::default(),
            stacked: None,
            pot: PotLedger::default(),
            round: None,
            big_blind_seat: None,
            board: Vec::default(),
            muck: Vec::default(),
            replacements: VecDeque::default(),
            values: AHashMap::default(),
            hand_number: 0,
            last_result: None,
            next_id: 0,
            rng,
        }
    }

    /// Adds a player to the table.
    pub fn add_player(&mut self, name: &str, stack: Chips) -> Result<PlayerId> {
        self.check_idle()?;

        if self.seats.count() >= self.config.game_type.max_players() {
            return Err(Error::TableFull);
        }

        let player_id = PlayerId::new(self.next_id);
        self.next_id += 1;

        self.seats
            .join(Player::new(player_id, name.to_string(), stack));
        info!("Player {name} {player_id} joined with {stack} chips");

        Ok(player_id)
    }

    /// Removes a player from the table.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<Player> {
        self.check_idle()?;

        let player = self
            .seats
            .leave(player_id)
            .ok_or(Error::PlayerNotFound(player_id))?;
        info!("Player {} {player_id} left", player.name);

        Ok(player)
    }

    /// Changes the game type.
    pub fn set_game_type(&mut self, game_type: GameType) -> Result<()> {
        self.set_config(GameConfig {
            game_type,
            ..self.config
        })
    }

    /// Changes the configuration.
    pub fn set_config(&mut self, config: GameConfig) -> Result<()> {
        self.check_idle()?;

        let max = config.game_type.max_players();
        if self.seats.count() > max {
            return Err(Error::TooManyPlayers {
                players: self.seats.count(),
                max,
            });
        }

        self.config = config;
        Ok(())
    }

    /// Uses the given deck as is for the next hand instead of a shuffled one.
    pub fn stack_deck(&mut self, deck: Deck) -> Result<()> {
        self.check_idle()?;
        self.stacked = Some(deck);
        Ok(())
    }

    /// The configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The hand state.
    pub fn state(&self) -> HandState {
        self.state
    }

    /// The policy of the current or last hand.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// The players in seat order.
    pub fn players(&self) -> &[Player] {
        self.seats.players()
    }

    /// Returns a player.
    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.seats.get(player_id)
    }

    /// The board cards.
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// The chips committed in the current hand.
    pub fn pot(&self) -> Chips {
        self.pot.total()
    }

    /// The cards left in the deck.
    pub fn deck_count(&self) -> usize {
        self.deck.count()
    }

    /// The folded and discarded cards.
    pub fn muck(&self) -> &[Card] {
        &self.muck
    }

    /// The number of hands started.
    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }

    /// The result of the last hand.
    pub fn last_result(&self) -> Option<&HandResult> {
        self.last_result.as_ref()
    }

    /// The player own hole cards.
    pub fn hole_cards(&self, viewer: PlayerId) -> Option<&BTreeSet<Card>> {
        self.seats.get(viewer).map(|p| p.hand.hole_cards())
    }

    /// The face up cards of a player.
    pub fn visible_cards(&self, player_id: PlayerId) -> Option<&BTreeSet<Card>> {
        self.seats.get(player_id).map(|p| p.hand.visible_cards())
    }

    /// The table as seen by `viewer`.
    pub fn view(&self, viewer: PlayerId) -> TableView {
        TableView {
            viewer,
            hole_cards: self.hole_cards(viewer).cloned().unwrap_or_default(),
            players: self.seats.iter().map(PublicPlayer::from).collect(),
            board: self.board.clone(),
            pot: self.pot.total(),
            state: self.state,
            hand_number: self.hand_number,
        }
    }

    /// The decision the engine is waiting for.
    pub fn pending(&self) -> Option<Pending> {
        match self.state {
            HandState::Betting(_) => self
                .round
                .as_ref()
                .and_then(|r| r.request(self.seats.players(), &self.policy))
                .map(Pending::Action),
            HandState::CardReplacement(_) => self.replacements.front().map(|&seat| {
                let player = &self.seats.players()[seat];
                Pending::Discard(DiscardRequest {
                    player_id: player.player_id,
                    hole_cards: player.hand.hole_cards().clone(),
                    max_discards: self.config.game_type.max_discards(),
                })
            }),
            _ => None,
        }
    }

    /// Starts a new hand with the policy from `source`.
    ///
    /// The engine runs until it needs a player decision, see [Game::pending].
    pub fn start_hand<S: PolicySource + ?Sized>(&mut self, source: &S) -> Result<()> {
        self.check_idle()?;

        if self.seats.count_with_chips() < 2 {
            return Err(Error::NotEnoughPlayers);
        }

        self.policy = source.current_policy();
        self.hand_number += 1;
        self.last_result = None;

        self.seats.start_hand();

        self.deck = match self.stacked.take() {
            Some(deck) => deck,
            None => Deck::new_and_shuffled(&mut self.rng),
        };

        self.pot.clear();
        self.round = None;
        self.big_blind_seat = None;
        self.board.clear();
        self.muck.clear();
        self.replacements.clear();
        self.values.clear();

        info!(
            "Hand {} started: {} with {} players",
            self.hand_number,
            self.config.game_type,
            self.seats.count_contending()
        );

        self.state = HandState::AnteCollection;
        self.run()
    }

    /// Applies a betting action for a player.
    ///
    /// An illegal action is rejected and the same player is asked again.
    pub fn act(&mut self, player_id: PlayerId, action: Action) -> Result<()> {
        let HandState::Betting(_) = self.state else {
            return Err(self.not_betting());
        };

        let seat = self
            .seats
            .index_of(player_id)
            .ok_or(Error::PlayerNotFound(player_id))?;
        let round = self.round.as_mut().ok_or(Error::NoHandInProgress)?;

        match round.apply(
            seat,
            self.seats.players_mut(),
            action,
            &self.policy,
            &mut self.pot,
        ) {
            Ok(chips) => {
                let player = &mut self.seats.players_mut()[seat];
                debug!(
                    "Player {} {}, committed {chips} stack {}",
                    player.player_id,
                    player.action.unwrap_or(action),
                    player.stack
                );

                // Board cards stay on the board.
                if player.is_folded {
                    let board = &self.board;
                    self.muck.extend(
                        player
                            .hand
                            .all_cards()
                            .into_iter()
                            .filter(|card| !board.contains(card)),
                    );
                    player.hand.clear();
                }
            }
            Err(e) => {
                warn!("Player {player_id} illegal action {action}: {e}");
                return Err(e.into());
            }
        }

        self.run()
    }

    /// Replaces a player hole cards.
    ///
    /// Too many cards are rejected and the same player is asked again, a
    /// card the player does not hold aborts the hand.
    pub fn discard(&mut self, player_id: PlayerId, cards: &BTreeSet<Card>) -> Result<()> {
        let HandState::CardReplacement(_) = self.state else {
            return Err(self.not_betting());
        };

        let seat = self
            .seats
            .index_of(player_id)
            .ok_or(Error::PlayerNotFound(player_id))?;

        if self.replacements.front() != Some(&seat) {
            return Err(IllegalAction::NotPlayersTurn.into());
        }

        let max = self.config.game_type.max_discards();
        if cards.len() > max {
            warn!("Player {player_id} discards {} cards", cards.len());
            return Err(IllegalAction::TooManyDiscards {
                count: cards.len(),
                max,
            }
            .into());
        }

        if let Err(e) = self.replace_cards(seat, cards) {
            self.abort(e.clone());
            return Err(e);
        }

        self.replacements.pop_front();
        self.run()
    }

    /// The player did not decide in time, a betting player folds and a
    /// player replacing cards stands pat.
    pub fn timeout(&mut self, player_id: PlayerId) -> Result<()> {
        warn!("Player {player_id} timed out");
        match self.state {
            HandState::CardReplacement(_) => self.discard(player_id, &BTreeSet::new()),
            _ => self.act(player_id, Action::Fold),
        }
    }

    fn check_idle(&self) -> Result<()> {
        if self.state == HandState::Idle {
            Ok(())
        } else {
            Err(Error::RosterLocked)
        }
    }

    fn not_betting(&self) -> Error {
        if self.state == HandState::Idle {
            Error::NoHandInProgress
        } else {
            IllegalAction::NotPlayersTurn.into()
        }
    }

    /// Runs the state machine, a failure aborts the hand.
    fn run(&mut self) -> Result<()> {
        if let Err(e) = self.advance() {
            self.abort(e.clone());
            return Err(e);
        }

        Ok(())
    }

    /// Moves through the states until a player decision is needed or the hand
    /// has ended.
    fn advance(&mut self) -> Result<()> {
        loop {
            match self.state {
                HandState::Idle => return Ok(()),
                HandState::AnteCollection => self.collect_antes(),
                HandState::BlindCollection => self.collect_blinds(),
                HandState::Dealing(round) => self.enter_betting(round)?,
                HandState::Betting(round) => {
                    if self.round.as_ref().is_some_and(|r| !r.is_closed()) {
                        return Ok(());
                    }

                    self.end_round(round);
                }
                HandState::CardReplacement(round) => {
                    if !self.replacements.is_empty() {
                        return Ok(());
                    }

                    self.state = HandState::Dealing(round);
                }
                HandState::Showdown => self.enter_payout_with_showdown()?,
                HandState::Payout => self.enter_payout(),
            }
        }
    }

    fn collect_antes(&mut self) {
        let ante = self.policy.ante;
        if ante > Chips::ZERO {
            for player in self.seats.iter_mut().filter(|p| p.in_hand) {
                let chips = player.post_ante(ante);
                player.action = Some(Action::Ante(chips));
                self.pot.add(player.player_id, chips);
            }
        }

        self.state = HandState::BlindCollection;
    }

    /// Posts small and big blind, heads up the button posts the small blind.
    fn collect_blinds(&mut self) {
        self.state = HandState::Dealing(0);

        if self.policy.big_blind == Chips::ZERO {
            return;
        }

        let button = self.seats.button();
        let small = if self.seats.count_contending() == 2 {
            Some(button)
        } else {
            self.seats.next_seat(button, |p| p.in_hand)
        };
        let big = small.and_then(|sb| self.seats.next_seat(sb, |p| p.in_hand));

        for (seat, blind) in [(small, self.policy.small_blind), (big, self.policy.big_blind)] {
            if let Some(seat) = seat {
                let player = &mut self.seats.players_mut()[seat];
                let chips = player.commit(blind);
                player.action = Some(Action::Blind(chips));
                self.pot.add(player.player_id, chips);
                debug!("Player {} posts blind {chips}", player.player_id);
            }
        }

        self.big_blind_seat = big;
    }

    /// Deals the street for `round` and starts the betting.
    fn enter_betting(&mut self, round: usize) -> Result<()> {
        self.deal_street(round)?;

        let players = self.seats.players();
        let anchor = match (round, self.big_blind_seat) {
            (0, Some(seat)) => seat,
            _ => self.seats.button(),
        };
        let first = (anchor + 1) % players.len();
        let highest = players
            .iter()
            .map(|p| p.committed_this_round)
            .max()
            .unwrap_or_default();

        self.round = Some(BettingRound::new(players, first, highest));
        self.state = HandState::Betting(round);

        Ok(())
    }

    fn deal_street(&mut self, round: usize) -> Result<()> {
        let street = self.config.game_type.street(round);

        let order = self
            .seats
            .clockwise_from_button()
            .into_iter()
            .filter(|&idx| self.seats.players()[idx].is_contending())
            .collect::<Vec<_>>();

        for _ in 0..street.hole {
            for &idx in &order {
                let card = self.deck.draw()?;
                self.seats.players_mut()[idx].hand.add_hole_card(card)?;
            }
        }

        for _ in 0..street.up {
            for &idx in &order {
                let card = self.deck.draw()?;
                self.seats.players_mut()[idx].hand.add_community_card(card)?;
            }
        }

        for _ in 0..street.board {
            let card = self.deck.draw()?;
            self.board.push(card);
            for &idx in &order {
                self.seats.players_mut()[idx].hand.add_community_card(card)?;
            }
        }

        if street != Default::default() {
            debug!(
                "Dealt round {round}: {} hole {} up, board {:?}",
                street.hole, street.up, self.board
            );
        }

        Ok(())
    }

    /// The betting round has closed, moves to the next state.
    fn end_round(&mut self, round: usize) {
        self.pot.end_round();
        self.seats.start_round();
        self.round = None;

        let next = round + 1;
        let game_type = self.config.game_type;

        self.state = if self.seats.count_contending() < 2 {
            HandState::Payout
        } else if next == game_type.deal_count() {
            HandState::Showdown
        } else if game_type.replacement_before(next) {
            self.replacements = self
                .seats
                .clockwise_from_button()
                .into_iter()
                .filter(|&idx| self.seats.players()[idx].is_contending())
                .collect();
            HandState::CardReplacement(next)
        } else {
            HandState::Dealing(next)
        };
    }

    fn replace_cards(&mut self, seat: usize, cards: &BTreeSet<Card>) -> Result<()> {
        let player = &mut self.seats.players_mut()[seat];
        player.hand.remove_hole_cards(cards)?;
        self.muck.extend(cards.iter().copied());

        for _ in 0..cards.len() {
            let card = self.deck.draw()?;
            self.seats.players_mut()[seat].hand.add_hole_card(card)?;
        }

        debug!(
            "Player {} replaced {} cards",
            self.seats.players()[seat].player_id,
            cards.len()
        );

        Ok(())
    }

    /// Ranks the hands of contending players, then moves to payout.
    fn enter_payout_with_showdown(&mut self) -> Result<()> {
        for player in self.seats.iter().filter(|p| p.is_contending()) {
            let cards = player.hand.all_cards().into_iter().collect::<Vec<_>>();
            let value = HandValue::eval(&cards)?;
            debug!("Player {} shows {value}", player.player_id);
            self.values.insert(player.player_id, value);
        }

        self.state = HandState::Payout;
        Ok(())
    }

    /// Pays each pot layer to its winners and ends the hand.
    fn enter_payout(&mut self) {
        self.pot.end_round();

        let seats = self
            .seats
            .clockwise_from_button()
            .into_iter()
            .map(|idx| &self.seats.players()[idx])
            .filter(|p| p.in_hand)
            .map(|p| LedgerSeat {
                player_id: p.player_id,
                is_folded: p.is_folded,
                is_all_in: p.is_all_in,
            })
            .collect::<Vec<_>>();

        let mut pots = Vec::new();
        for (index, layer) in self.pot.layers(&seats).into_iter().enumerate() {
            let best = layer
                .eligible
                .iter()
                .filter_map(|id| self.values.get(id))
                .max()
                .copied();

            let winners = match best {
                Some(best) if layer.eligible.len() > 1 => layer
                    .eligible
                    .iter()
                    .copied()
                    .filter(|id| self.values.get(id) == Some(&best))
                    .collect::<Vec<_>>(),
                _ => layer.eligible.clone(),
            };

            let split = layer.split(&winners);
            for &player_id in &winners {
                let mut chips = split.amount_each;
                if split.remainder_recipient == Some(player_id) {
                    chips += split.remainder;
                }

                if let Some(player) = self.seats.get_mut(player_id) {
                    player.award(chips);
                    info!("Player {player_id} wins {chips} from pot {index}");
                }
            }

            pots.push(PotResult {
                index,
                amount: layer.amount,
                winners,
                amount_each: split.amount_each,
                remainder: split.remainder,
                remainder_recipient: split.remainder_recipient,
                winning_hand: best,
            });
        }

        self.pot.clear();
        self.finish_hand(HandResult {
            hand_number: self.hand_number,
            pots,
            aborted: None,
        });
        self.seats.end_hand();
    }

    /// Aborts the hand refunding each player chips.
    fn abort(&mut self, err: Error) {
        error!("Hand {} aborted: {err}", self.hand_number);

        let mut pots = Vec::new();
        for player in self.seats.iter_mut() {
            let refund = player.total_committed;
            if refund == Chips::ZERO {
                continue;
            }

            player.award(refund);
            player.total_committed = Chips::ZERO;
            player.committed_this_round = Chips::ZERO;

            pots.push(PotResult {
                index: pots.len(),
                amount: refund,
                winners: vec![player.player_id],
                amount_each: refund,
                remainder: Chips::ZERO,
                remainder_recipient: None,
                winning_hand: None,
            });
        }

        for player in self.seats.iter_mut() {
            player.hand.clear();
        }

        self.pot.clear();
        self.board.clear();
        self.muck.clear();
        self.round = None;
        self.replacements.clear();

        self.finish_hand(HandResult {
            hand_number: self.hand_number,
            pots,
            aborted: Some(err),
        });
        self.seats.end_hand();
    }

    fn finish_hand(&mut self, result: HandResult) {
        info!(
            "Hand {} ended, paid {} chips",
            result.hand_number,
            result.total()
        );

        self.last_result = Some(result);
        self.state = HandState::Idle;
    }
}

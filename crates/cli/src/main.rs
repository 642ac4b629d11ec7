// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown Poker command line simulator.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use ahash::AHashMap;
use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use log::{error, info};
use rand::{SeedableRng, rngs::StdRng};
use std::{collections::BTreeSet, io, time::Duration};

use showdown_engine::{
    Action, ActionProvider, ActionRequest, Card, Chips, Decision, DiscardRequest, Game,
    GameConfig, GameType, PlayerId, Policy, TableView, play_hand,
};

pub mod bots;
pub mod human;
pub mod terminal;

use bots::{AlwaysCallOrCheck, RandomBot, Strategy, TightBot};
use human::Human;

const NICKNAMES: [&str; 10] = [
    "Alice", "Bob", "Carol", "Dave", "Erin", "Frank", "Grace", "Heidi", "Ivan", "Judy",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Variant {
    Holdem,
    Draw,
    Stud,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BotKind {
    Calling,
    Random,
    Tight,
}

#[derive(Debug, Parser)]
struct Cli {
    /// Number of players at the table.
    #[clap(long, short, default_value_t = 4, value_parser = clap::value_parser!(u8).range(2..=10))]
    players: u8,
    /// Number of hands to play.
    #[clap(long, default_value_t = 10)]
    hands: u64,
    /// The game variant.
    #[clap(long, short, value_enum, default_value_t = Variant::Holdem)]
    game: Variant,
    /// Starting chips for each player.
    #[clap(long, short, default_value_t = 1_000)]
    stack: u32,
    /// The ante paid by each player.
    #[clap(long, default_value_t = 0)]
    ante: u32,
    /// The small blind.
    #[clap(long, default_value_t = 5)]
    small_blind: u32,
    /// The big blind.
    #[clap(long, default_value_t = 10)]
    big_blind: u32,
    /// The minimum bet, defaults to the big blind.
    #[clap(long)]
    min_bet: Option<u32>,
    /// The maximum bet, zero for no limit.
    #[clap(long, default_value_t = 0)]
    max_bet: u32,
    /// The maximum raises in a betting round, zero for no limit.
    #[clap(long, default_value_t = 0)]
    max_raises: u32,
    /// The random seed for a reproducible session.
    #[clap(long)]
    seed: Option<u64>,
    /// Play the first seat from the terminal.
    #[clap(long)]
    human: bool,
    /// Seconds a human player has to act.
    #[clap(long, default_value_t = 60)]
    timeout: u64,
    /// The bots strategy.
    #[clap(long, short, value_enum, default_value_t = BotKind::Tight)]
    bots: BotKind,
    /// Print each hand result as a JSON line.
    #[clap(long)]
    json: bool,
}

impl Cli {
    fn policy(&self) -> Policy {
        Policy {
            ante: Chips::new(self.ante),
            small_blind: Chips::new(self.small_blind),
            big_blind: Chips::new(self.big_blind),
            min_bet: Chips::new(self.min_bet.unwrap_or(self.big_blind)),
            max_bet: Chips::new(self.max_bet),
            max_raises: self.max_raises,
        }
    }

    fn game_type(&self) -> GameType {
        match self.game {
            Variant::Holdem => GameType::holdem(),
            Variant::Draw => GameType::draw(),
            Variant::Stud => GameType::stud(),
        }
    }
}

/// A seat at the table.
enum Seat {
    Bot(Box<dyn Strategy>),
    Human(Human),
}

impl ActionProvider for Seat {
    async fn request_action(&mut self, req: &ActionRequest, view: &TableView) -> Decision<Action> {
        match self {
            Seat::Bot(strategy) => Decision::Ready(strategy.execute(req, view)),
            Seat::Human(human) => human.request_action(req, view).await,
        }
    }

    async fn request_discards(
        &mut self,
        req: &DiscardRequest,
        view: &TableView,
    ) -> Decision<BTreeSet<Card>> {
        match self {
            Seat::Bot(strategy) => Decision::Ready(strategy.discards(req)),
            Seat::Human(human) => human.request_discards(req, view).await,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let game_type = cli.game_type();
    if cli.players as usize > game_type.max_players() {
        bail!(
            "{} allows at most {} players",
            game_type,
            game_type.max_players()
        );
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let config = GameConfig {
        game_type,
        ..GameConfig::default()
    };
    let mut game = Game::with_rng(config, StdRng::from_rng(&mut rng));

    let mut seats = AHashMap::<PlayerId, Seat>::default();
    for (idx, name) in NICKNAMES.iter().take(cli.players as usize).enumerate() {
        let player_id = game.add_player(name, Chips::new(cli.stack))?;
        let seat = if cli.human && idx == 0 {
            Seat::Human(Human::new(Duration::from_secs(cli.timeout)))
        } else {
            let strategy: Box<dyn Strategy> = match cli.bots {
                BotKind::Calling => Box::new(AlwaysCallOrCheck),
                BotKind::Random => Box::new(RandomBot::new(StdRng::from_rng(&mut rng))),
                BotKind::Tight => Box::new(TightBot::new(StdRng::from_rng(&mut rng))),
            };
            Seat::Bot(strategy)
        };

        seats.insert(player_id, seat);
    }

    let policy = cli.policy();
    info!("Playing {} hands of {} with {:?}", cli.hands, game_type, policy);

    let mut stdout = io::stdout();
    for _ in 0..cli.hands {
        if game.players().iter().filter(|p| p.stack > Chips::ZERO).count() < 2 {
            info!("Not enough players with chips");
            break;
        }

        let result = play_hand(&mut game, &policy, &mut seats).await?;
        if let Some(e) = &result.aborted {
            error!("Hand {} aborted: {e}", result.hand_number);
        }

        if cli.json {
            println!("{}", serde_json::to_string(&result)?);
        } else {
            terminal::print_result(&mut stdout, &game, &result)?;
        }
    }

    if !cli.json {
        terminal::print_standings(&mut stdout, game.players())?;
    }

    Ok(())
}

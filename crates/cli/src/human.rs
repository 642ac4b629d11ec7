// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A player at the terminal.
use log::warn;
use std::{collections::BTreeSet, io, time::Duration};
use tokio::{
    io::{AsyncBufReadExt, BufReader, Lines, Stdin},
    time::{Instant, timeout_at},
};

use showdown_engine::{
    Action, ActionKind, ActionProvider, ActionRequest, Card, Chips, Decision, DiscardRequest,
    TableView,
};

use crate::terminal;

/// Reads the player decisions from stdin.
pub struct Human {
    lines: Lines<BufReader<Stdin>>,
    timeout: Duration,
}

impl Human {
    /// Creates a player that must decide within `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            timeout,
        }
    }

    /// Reads lines until `parse` accepts one or the deadline expires.
    async fn read<T>(&mut self, parse: impl Fn(&str) -> Option<T>) -> Decision<T> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match timeout_at(deadline, self.lines.next_line()).await {
                Ok(Ok(Some(line))) => match parse(&line) {
                    Some(value) => return Decision::Ready(value),
                    None => println!("Invalid input '{}'", line.trim()),
                },
                Ok(Ok(None)) => {
                    warn!("Stdin closed");
                    return Decision::Timeout;
                }
                Ok(Err(e)) => {
                    warn!("Stdin error {e}");
                    return Decision::Timeout;
                }
                Err(_) => {
                    println!("Timeout");
                    return Decision::Timeout;
                }
            }
        }
    }
}

impl ActionProvider for Human {
    async fn request_action(&mut self, req: &ActionRequest, view: &TableView) -> Decision<Action> {
        if let Err(e) = terminal::print_view(&mut io::stdout(), view) {
            warn!("Terminal error {e}");
        }

        println!("{}", prompt(req));
        self.read(parse_action).await
    }

    async fn request_discards(
        &mut self,
        req: &DiscardRequest,
        view: &TableView,
    ) -> Decision<BTreeSet<Card>> {
        if let Err(e) = terminal::print_view(&mut io::stdout(), view) {
            warn!("Terminal error {e}");
        }

        println!(
            "Discard up to {} cards (e.g. 'd 2C 7H'), empty line to stand pat:",
            req.max_discards
        );
        self.read(parse_discards).await
    }
}

fn prompt(req: &ActionRequest) -> String {
    let actions = req
        .actions
        .iter()
        .map(|kind| match kind {
            ActionKind::Fold => "[f]old".to_string(),
            ActionKind::Check => "chec[k]".to_string(),
            ActionKind::Call => format!("[c]all {}", req.to_call),
            ActionKind::Bet => format!("[b]et {}-{}", req.min_amount, req.max_amount),
            ActionKind::Raise => format!("[r]aise {}-{}", req.min_amount, req.max_amount),
            ActionKind::Ante | ActionKind::Blind => format!("{kind:?}"),
        })
        .collect::<Vec<_>>();

    actions.join(" | ")
}

/// Parses an action like `f`, `call` or `r 40`.
fn parse_action(line: &str) -> Option<Action> {
    let mut words = line.split_whitespace();
    let cmd = words.next()?.to_ascii_lowercase();
    let amount = words.next().and_then(|w| w.parse::<u32>().ok()).map(Chips::new);
    if words.next().is_some() {
        return None;
    }

    match (cmd.as_str(), amount) {
        ("f" | "fold", None) => Some(Action::Fold),
        ("k" | "check", None) => Some(Action::Check),
        ("c" | "call", None) => Some(Action::Call),
        ("b" | "bet", Some(amount)) => Some(Action::Bet(amount)),
        ("r" | "raise", Some(amount)) => Some(Action::Raise(amount)),
        _ => None,
    }
}

/// Parses the cards to discard like `d AH 7c`, an empty line stands pat.
fn parse_discards(line: &str) -> Option<BTreeSet<Card>> {
    let mut words = line.split_whitespace();
    match words.next() {
        None => Some(BTreeSet::new()),
        Some(cmd) if cmd.eq_ignore_ascii_case("d") => {
            words.map(|w| w.parse::<Card>().ok()).collect()
        }
        Some(_) => None,
    }
}

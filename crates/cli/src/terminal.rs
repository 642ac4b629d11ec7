// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Terminal output.
use anyhow::Result;
use crossterm::{
    queue,
    style::{self, Stylize},
};
use std::io;

use showdown_engine::{Card, Chips, Game, HandResult, Player, PublicPlayer, TableView};

/// Prints the table as seen by a player.
pub fn print_view(w: &mut impl io::Write, view: &TableView) -> Result<()> {
    let header = format!(
        "Hand {} pot {} board [{}]",
        view.hand_number,
        view.pot,
        join_cards(view.board.iter())
    );
    queue!(w, style::PrintStyledContent(header.bold()), style::Print("\n"))?;

    for p in &view.players {
        let cards = if p.player_id == view.viewer {
            join_cards(view.hole_cards.iter().chain(&p.visible_cards))
        } else if p.in_hand && !p.is_folded {
            let covered = "▒▒ ".repeat(hidden_cards(view, p));
            format!("{covered}{}", join_cards(p.visible_cards.iter()))
        } else {
            String::new()
        };

        let text = player_row(p, &cards);
        if p.player_id == view.viewer {
            queue!(w, style::PrintStyledContent(text.dark_green()))?;
        } else {
            queue!(w, style::Print(text))?;
        }
        queue!(w, style::Print("\n"))?;
    }

    w.flush()?;
    Ok(())
}

/// Prints a hand result.
pub fn print_result(w: &mut impl io::Write, game: &Game, result: &HandResult) -> Result<()> {
    let name = |id| {
        game.player(id)
            .map(|p| p.name.as_str())
            .unwrap_or("unknown")
    };

    if let Some(err) = &result.aborted {
        let text = format!("Hand {} aborted: {err}", result.hand_number);
        queue!(w, style::PrintStyledContent(text.red()), style::Print("\n"))?;
    }

    for pot in &result.pots {
        let winners = pot
            .winners
            .iter()
            .map(|id| name(*id))
            .collect::<Vec<_>>()
            .join(", ");

        let hand = pot
            .winning_hand
            .map(|v| format!(" with {} [{}]", v.rank(), join_cards(v.hand().iter())))
            .unwrap_or_default();

        let text = if result.aborted.is_some() {
            format!("  refund {} to {winners}", pot.amount)
        } else {
            format!(
                "Hand {} pot {} of {}: {winners} won {}{hand}",
                result.hand_number, pot.index, pot.amount, pot.amount_each
            )
        };
        queue!(w, style::PrintStyledContent(text.dark_yellow()), style::Print("\n"))?;

        if let Some(id) = pot.remainder_recipient {
            let text = format!("  odd chips {} to {}", pot.remainder, name(id));
            queue!(w, style::Print(text), style::Print("\n"))?;
        }
    }

    w.flush()?;
    Ok(())
}

/// Prints the players chips.
pub fn print_standings(w: &mut impl io::Write, players: &[Player]) -> Result<()> {
    queue!(w, style::PrintStyledContent("Standings".bold()), style::Print("\n"))?;

    let mut players = players.iter().collect::<Vec<_>>();
    players.sort_by(|a, b| b.stack.cmp(&a.stack));

    for p in players {
        let text = format!("{:<10.10}|{:>10}", p.name, p.stack);
        let text = if p.stack == Chips::ZERO {
            text.dark_grey()
        } else {
            text.white()
        };
        queue!(w, style::PrintStyledContent(text), style::Print("\n"))?;
    }

    w.flush()?;
    Ok(())
}

fn player_row(p: &PublicPlayer, cards: &str) -> String {
    let action = p.action.map(|a| a.to_string()).unwrap_or_default();
    let bet = if p.committed_this_round > Chips::ZERO {
        p.committed_this_round.to_string()
    } else {
        String::new()
    };
    let button = if p.has_button { "D" } else { "" };

    format!(
        "{button:^3}|{:<10.10}|{:<10.10}|{:<10.10}|{:<10.10}|{cards}",
        p.name,
        p.stack.to_string(),
        action,
        bet,
    )
}

/// The number of face down cards of another player, the hole cards are not
/// part of the view so they are inferred from the viewer own hand.
fn hidden_cards(view: &TableView, p: &PublicPlayer) -> usize {
    let own_visible = view
        .player(view.viewer)
        .map(|v| v.visible_cards.len())
        .unwrap_or_default();
    let shared = view.board.len();

    // Board cards are part of every visible set, up cards only of the owner.
    let own_up = own_visible.saturating_sub(shared);
    let other_up = p.visible_cards.len().saturating_sub(shared);
    (view.hole_cards.len() + own_up).saturating_sub(other_up)
}

fn join_cards<'a>(cards: impl Iterator<Item = &'a Card>) -> String {
    cards.map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
}

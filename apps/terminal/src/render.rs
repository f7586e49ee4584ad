use std::fmt::Write as _;

use client_core::{ClientState, InputState};
use shared::{
    domain::{GameSnapshot, PlayerId},
    protocol::ServerEvent,
};

pub const ROLL_PROMPT: &str = ">>> Your turn! Type 'r' to roll: ";
pub const REROLL_PROMPT: &str =
    ">>> Dice to reroll (e.g. 1,3,5), or press Enter to pick a category: ";

pub fn event(state: &ClientState, event: &ServerEvent) -> String {
    let mut out = String::new();
    match event {
        ServerEvent::PlayerId { id } => {
            let _ = writeln!(out, "Joined the game as {}.", id.label());
            let _ = writeln!(out, "Waiting for the game to start...");
        }
        ServerEvent::GameStart(snapshot) => {
            out.push_str("\n=== Game start ===\n");
            out.push_str(&scoreboard(snapshot, state.player_id()));
            out.push_str(&turn_prompt(state, snapshot));
        }
        ServerEvent::DiceResult {
            dice,
            player,
            rolls_left,
        } => {
            if Some(*player) == state.player_id() {
                let _ = writeln!(out, "\nDice: {dice}");
                let _ = writeln!(out, "Rolls left: {rolls_left}");
                match state.input() {
                    InputState::Reroll => out.push_str(REROLL_PROMPT),
                    InputState::Category => out.push_str(&category_prompt(state)),
                    _ => {}
                }
            } else {
                let _ = writeln!(out, "{} rolled {dice}", player.label());
            }
        }
        ServerEvent::TurnEnd {
            category,
            score,
            player,
            game_state,
        } => {
            let _ = writeln!(out, "\n{}: {category} = {score} points", player.label());
            out.push_str(&scoreboard(game_state, state.player_id()));
            out.push_str(&turn_prompt(state, game_state));
        }
        ServerEvent::GameEnd { winner, scores } => {
            out.push_str("\n=== Game over ===\n");
            let _ = writeln!(out, "Winner: {}", winner.label());
            let _ = writeln!(
                out,
                "Scores: {} {}, {} {}",
                PlayerId::FIRST.label(),
                scores[0],
                PlayerId::SECOND.label(),
                scores[1]
            );
            match state.player_id() {
                Some(me) if me == *winner => out.push_str("You win!\n"),
                Some(_) => out.push_str("You lose.\n"),
                None => {}
            }
        }
    }
    out
}

pub fn scoreboard(snapshot: &GameSnapshot, me: Option<PlayerId>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Round {} | current turn: {}",
        snapshot.round,
        snapshot.current_player.label()
    );
    for id in PlayerId::ALL {
        let player = snapshot.player(id);
        let marker = if Some(id) == me { " (you)" } else { "" };
        let _ = writeln!(out, "{}{marker}: total {}", player.name, player.scores.total());
        for (category, score) in player.scores.entries() {
            let _ = writeln!(out, "  {category}: {score}");
        }
    }
    out
}

pub fn category_prompt(state: &ClientState) -> String {
    let mut out = String::from("\nChoose a category:\n");
    for (index, (category, preview)) in state.category_options().into_iter().enumerate() {
        let _ = writeln!(out, "{}. {category}: {preview} points", index + 1);
    }
    out.push_str(">>> Selection (number): ");
    out
}

fn turn_prompt(state: &ClientState, snapshot: &GameSnapshot) -> String {
    match state.input() {
        InputState::Roll => ROLL_PROMPT.to_string(),
        _ => format!(
            "\n>>> Waiting for {}'s turn...\n",
            snapshot.current_player.label()
        ),
    }
}

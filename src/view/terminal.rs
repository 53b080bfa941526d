//! @acp:module "Terminal View"
//! @acp:summary "Colored console output and interactive move prompts"
//! @acp:domain cli
//! @acp:layer api

use console::{style, StyledObject};
use dialoguer::{theme::ColorfulTheme, Select};

use super::GameView;
use crate::controller::ControllerHandle;
use crate::deck::{Card, CardEffect, Color};
use crate::game::{GameEnd, GameOutcome, GameState, SeatSummary};
use crate::player::TurnAction;

/// Console front-end; prompts run on a blocking thread and answer through the handle
#[derive(Debug, Clone)]
pub struct TerminalView {
    handle: ControllerHandle,
}

impl TerminalView {
    pub fn new(handle: ControllerHandle) -> Self {
        Self { handle }
    }
}

/// Card text in its own color
pub fn styled_card(card: &Card) -> StyledObject<String> {
    let text = card.to_string();
    match card.color() {
        Color::Red => style(text).red().bold(),
        Color::Yellow => style(text).yellow().bold(),
        Color::Green => style(text).green().bold(),
        Color::Blue => style(text).blue().bold(),
        Color::Black => style(text).magenta().bold(),
    }
}

impl GameView for TerminalView {
    fn update_view(&mut self, state: &GameState) {
        println!();
        println!("{} Top card: {}", style("→").cyan(), styled_card(&state.top_card));
        if state.malus > 0 {
            println!("  {} Pending penalty: {}", style("⚠").yellow(), state.malus);
        }

        let seats: Vec<String> = state
            .seats
            .iter()
            .map(|s| format!("{} ({})", s.label, s.cards))
            .collect();
        let direction = if state.clockwise { "↻" } else { "↺" };
        println!("  {} {}", style(direction).dim(), seats.join(", "));
        println!("  {} {} cards in the deck", style("•").dim(), state.draw_pile);

        if state.is_human_turn() {
            let hand: Vec<String> = state
                .active_hand
                .iter()
                .map(|c| styled_card(c).to_string())
                .collect();
            println!("  Your hand: {}", hand.join("  "));
        }
    }

    fn show_current_player(&mut self, seat: &SeatSummary) {
        let marker = if seat.is_bot { "bot" } else { "human" };
        println!(
            "\n{} {} [{}]",
            style("▶").cyan().bold(),
            style(&seat.label).bold(),
            style(marker).dim()
        );
    }

    fn show_message(&mut self, message: &str) {
        println!("  {}", message);
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    fn show_outcome(&mut self, outcome: &GameOutcome) {
        println!();
        match (outcome.end, outcome.winner) {
            (GameEnd::Finished, Some(winner)) => println!(
                "{} Game over! Player {} wins {} points after {} turns",
                style("✓").green().bold(),
                winner,
                outcome.winner_points(),
                outcome.turns
            ),
            (GameEnd::Stopped, _) => {
                println!("{} Game stopped after {} turns", style("!").yellow(), outcome.turns)
            }
            _ => println!(
                "{} No winner after {} turns",
                style("!").yellow(),
                outcome.turns
            ),
        }
    }

    fn request_human_move(&mut self, state: &GameState) {
        let hand = state.active_hand.clone();
        let malus = state.malus;
        let handle = self.handle.clone();

        tokio::task::spawn_blocking(move || match prompt_move(&hand, malus) {
            Ok(action) => handle.submit(action),
            Err(e) => {
                tracing::warn!("Prompt failed: {}", e);
                handle.stop();
            }
        });
    }
}

fn prompt_move(hand: &[Card], malus: u32) -> dialoguer::Result<TurnAction> {
    let theme = ColorfulTheme::default();

    let mut items: Vec<String> = hand.iter().map(|c| styled_card(c).to_string()).collect();
    items.push(if malus > 0 {
        format!("Take the penalty (draw {})", malus)
    } else {
        "Draw a card".to_string()
    });

    let choice = Select::with_theme(&theme)
        .with_prompt("Your move")
        .items(&items)
        .default(0)
        .interact()?;

    let Some(card) = hand.get(choice).cloned() else {
        return Ok(TurnAction::Draw);
    };

    let color = if card.has_effect(CardEffect::ChangeColor) {
        let names: Vec<&str> = Color::PLAYABLE.iter().map(|c| c.name()).collect();
        let picked = Select::with_theme(&theme)
            .with_prompt("Declare a color")
            .items(&names)
            .default(0)
            .interact()?;
        Color::PLAYABLE.get(picked).copied()
    } else {
        None
    };

    Ok(TurnAction::Play { card, color })
}

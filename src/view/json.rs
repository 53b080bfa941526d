//! @acp:module "JSON View"
//! @acp:summary "Line-delimited JSON events out, JSON moves in"
//! @acp:domain cli
//! @acp:layer api
//!
//! Every event is written to stdout as one JSON object. When a human seat is to
//! move, one line is read from stdin: `{"draw": true}` or
//! `{"play": <hand index>, "color": "red"}`.

use std::io::BufRead;

use serde::Deserialize;

use super::{GameView, ViewEvent};
use crate::controller::ControllerHandle;
use crate::deck::{Card, Color};
use crate::game::{GameOutcome, GameState, SeatSummary};
use crate::player::TurnAction;

/// A move as typed on stdin
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JsonMove {
    #[serde(default)]
    pub draw: bool,
    #[serde(default)]
    pub play: Option<usize>,
    #[serde(default)]
    pub color: Option<Color>,
}

impl JsonMove {
    /// Resolve against the current hand
    pub fn into_action(self, hand: &[Card]) -> Result<TurnAction, String> {
        match (self.draw, self.play) {
            (true, None) => Ok(TurnAction::Draw),
            (false, Some(index)) => hand
                .get(index)
                .cloned()
                .map(|card| TurnAction::Play {
                    card,
                    color: self.color,
                })
                .ok_or_else(|| format!("no card at index {} (hand has {})", index, hand.len())),
            _ => Err("expected either \"draw\": true or \"play\": <index>".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JsonView {
    handle: ControllerHandle,
}

impl JsonView {
    pub fn new(handle: ControllerHandle) -> Self {
        Self { handle }
    }

    fn emit(&self, event: &ViewEvent) {
        match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::error!("Failed to encode event: {}", e),
        }
    }
}

impl GameView for JsonView {
    fn update_view(&mut self, state: &GameState) {
        let mut state = state.clone();
        // bots' hands stay hidden
        if !state.is_human_turn() {
            state.active_hand.clear();
        }
        self.emit(&ViewEvent::State { state });
    }

    fn show_current_player(&mut self, seat: &SeatSummary) {
        self.emit(&ViewEvent::CurrentPlayer { seat: seat.clone() });
    }

    fn show_message(&mut self, message: &str) {
        self.emit(&ViewEvent::Message {
            text: message.to_string(),
        });
    }

    fn show_error(&mut self, message: &str) {
        self.emit(&ViewEvent::Error {
            text: message.to_string(),
        });
    }

    fn show_outcome(&mut self, outcome: &GameOutcome) {
        self.emit(&ViewEvent::Outcome {
            outcome: outcome.clone(),
        });
    }

    fn request_human_move(&mut self, state: &GameState) {
        // the human's own hand, which indexes in the reply refer to
        self.update_view(state);
        self.emit(&ViewEvent::MoveRequested {
            player: state.active_player,
        });

        let hand = state.active_hand.clone();
        let handle = self.handle.clone();
        tokio::task::spawn_blocking(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        tracing::warn!("Failed to read move: {}", e);
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }

                let parsed = serde_json::from_str::<JsonMove>(&line)
                    .map_err(|e| e.to_string())
                    .and_then(|m| m.into_action(&hand));
                match parsed {
                    Ok(action) => {
                        handle.submit(action);
                        return;
                    }
                    Err(reason) => {
                        let event = ViewEvent::Error { text: reason };
                        if let Ok(line) = serde_json::to_string(&event) {
                            println!("{}", line);
                        }
                    }
                }
            }
            // stdin closed
            handle.stop();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Value;

    #[test]
    fn test_json_move_resolution() {
        let hand = vec![Card::new(Color::Red, Value::One), Card::new(Color::Blue, Value::Two)];

        let draw: JsonMove = serde_json::from_str(r#"{"draw": true}"#).unwrap();
        assert_eq!(draw.into_action(&hand), Ok(TurnAction::Draw));

        let play: JsonMove = serde_json::from_str(r#"{"play": 1}"#).unwrap();
        assert_eq!(
            play.into_action(&hand),
            Ok(TurnAction::play(Card::new(Color::Blue, Value::Two)))
        );

        let out_of_range: JsonMove = serde_json::from_str(r#"{"play": 5}"#).unwrap();
        assert!(out_of_range.into_action(&hand).is_err());

        assert!(JsonMove::default().into_action(&hand).is_err());
    }
}

//! @acp:module "Recording View"
//! @acp:summary "Keeps every event in memory"
//! @acp:domain game
//! @acp:layer api

use std::sync::{Arc, Mutex};

use super::{GameView, ViewEvent};
use crate::game::{GameOutcome, GameState, SeatSummary};

/// Collects events; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    events: Arc<Mutex<Vec<ViewEvent>>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Message { text } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Error { text } => Some(text),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ViewEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl GameView for RecordingView {
    fn update_view(&mut self, state: &GameState) {
        self.push(ViewEvent::State {
            state: state.clone(),
        });
    }

    fn show_current_player(&mut self, seat: &SeatSummary) {
        self.push(ViewEvent::CurrentPlayer { seat: seat.clone() });
    }

    fn show_message(&mut self, message: &str) {
        self.push(ViewEvent::Message {
            text: message.to_string(),
        });
    }

    fn show_error(&mut self, message: &str) {
        self.push(ViewEvent::Error {
            text: message.to_string(),
        });
    }

    fn show_outcome(&mut self, outcome: &GameOutcome) {
        self.push(ViewEvent::Outcome {
            outcome: outcome.clone(),
        });
    }

    fn request_human_move(&mut self, state: &GameState) {
        self.push(ViewEvent::MoveRequested {
            player: state.active_player,
        });
    }
}

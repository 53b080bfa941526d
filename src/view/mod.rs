//! @acp:module "Views"
//! @acp:summary "Output surfaces the controller reports to"
//! @acp:domain game
//! @acp:layer api
//!
//! The controller talks to any number of views. Views that can collect input
//! answer [`GameView::request_human_move`] by sending a move through a
//! [`crate::controller::ControllerHandle`].

pub mod json;
pub mod recording;
pub mod terminal;

pub use json::JsonView;
pub use recording::RecordingView;
pub use terminal::TerminalView;

use serde::{Deserialize, Serialize};

use crate::game::{GameOutcome, GameState, PlayerId, SeatSummary};

/// Everything a view can be told, as data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ViewEvent {
    State { state: GameState },
    CurrentPlayer { seat: SeatSummary },
    Message { text: String },
    Error { text: String },
    MoveRequested { player: PlayerId },
    Outcome { outcome: GameOutcome },
}

/// @acp:summary "Receiver of game updates"
pub trait GameView: Send {
    fn update_view(&mut self, state: &GameState);

    fn show_current_player(&mut self, seat: &SeatSummary);

    fn show_message(&mut self, message: &str);

    fn show_error(&mut self, message: &str);

    fn show_outcome(&mut self, outcome: &GameOutcome);

    /// A human seat is to move; views without input ignore this
    fn request_human_move(&mut self, state: &GameState) {
        let _ = state;
    }
}

//! @acp:module "Game"
//! @acp:summary "Turn order, table state and the rules engine"
//! @acp:domain game
//! @acp:layer service

pub mod manager;
pub mod scheduler;
pub mod state;

pub use manager::GameManager;
pub use scheduler::Scheduler;
pub use state::{GameEnd, GameOutcome, GameState, PlayerSetupData, SeatSummary, TurnReport};

/// Seat identifier; seats are numbered from 1 in turn order
pub type PlayerId = u32;

#![forbid(unsafe_code)]

//! @acp:module "Primus Library"
//! @acp:summary "Shedding card game engine with bots, views and a CLI"
//! @acp:domain game
//! @acp:layer api
//! @acp:stability stable
//!
//! # Primus
//!
//! A color-and-value matching card game for one human and any number of bots.
//!
//! ## Features
//!
//! - **Data-driven decks**: card effects and draw amounts come from a JSON/YAML catalog
//! - **Bots**: Fortuitus plays at random, Implacabilis attacks, Fallax cheats
//! - **Async controller**: views submit human moves through a channel
//! - **Simulation**: bot-only tournaments in parallel
//!
//! ## Example
//!
//! ```rust,no_run
//! use primus::{Config, PrimusApp};
//! use primus::app::LaunchOptions;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let app = PrimusApp::new(Config::load_or_default())?;
//!     let outcome = app.launch(LaunchOptions::default()).await?;
//!     println!("winner: {:?}", outcome.winner);
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod commands;
pub mod config;
pub mod controller;
pub mod deck;
pub mod descriptor;
pub mod error;
pub mod game;
pub mod player;
pub mod rules;
pub mod simulation;
pub mod view;

// Re-exports
pub use app::PrimusApp;
pub use config::{Config, SeatConfig, SeatKind};
pub use controller::{ControllerHandle, GameController};
pub use deck::{Card, CardEffect, Color, Deck, DeckCatalog, DropPile, Value};
pub use descriptor::BuildDescriptor;
pub use error::{PrimusError, Result};
pub use game::{GameEnd, GameManager, GameOutcome, GameState, PlayerId, TurnReport};
pub use player::{Player, TurnAction};
pub use rules::{MoveRejection, Sanctioner, Validator};
pub use simulation::{simulate, SimulationReport};
pub use view::{GameView, JsonView, RecordingView, TerminalView};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

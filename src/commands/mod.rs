//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Provides implementations for all CLI commands.
//! Each command is in its own submodule for maintainability.

pub mod deck;
pub mod info;
pub mod init;
pub mod play;
pub mod simulate;

pub use deck::{execute_deck, DeckOptions};
pub use info::{execute_info, InfoOptions};
pub use init::{execute_init, InitOptions};
pub use play::{execute_play, PlayOptions};
pub use simulate::{execute_simulate, SimulateOptions};

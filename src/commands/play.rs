//! @acp:module "Play Command"
//! @acp:summary "Play a game at the configured table"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;

use crate::app::{LaunchOptions, PrimusApp};
use crate::config::{Config, SeatConfig, SeatKind};
use crate::game::GameEnd;

/// Options for the play command
#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    /// Override the configured seed
    pub seed: Option<u64>,
    /// Override the configured bot pause
    pub bot_delay_ms: Option<u64>,
    /// Override the configured seats
    pub seats: Vec<SeatKind>,
    /// JSON lines instead of the interactive terminal
    pub json: bool,
}

/// Execute the play command
pub async fn execute_play(options: PlayOptions, mut config: Config) -> Result<()> {
    if let Some(seed) = options.seed {
        config.seed = Some(seed);
    }
    if let Some(delay) = options.bot_delay_ms {
        config.bot_delay_ms = delay;
    }
    if !options.seats.is_empty() {
        config.seats = options.seats.iter().map(|k| SeatConfig::new(*k)).collect();
    }

    let app = PrimusApp::new(config)?;
    let outcome = app.launch(LaunchOptions { json: options.json }).await?;

    if outcome.end == GameEnd::Stopped {
        if !options.json {
            eprintln!("{} Bye", style("•").dim());
        }
        // A prompt may still be waiting on stdin
        std::process::exit(130);
    }

    Ok(())
}

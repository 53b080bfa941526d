//! @acp:module "Application"
//! @acp:summary "Process entry point: wires manager, views and controller"
//! @acp:domain cli
//! @acp:layer api

use crate::config::Config;
use crate::controller::{GameController, ControllerSettings};
use crate::deck::DeckCatalog;
use crate::error::Result;
use crate::game::{GameManager, GameOutcome};
use crate::view::{GameView, JsonView, TerminalView};

/// How the game talks to the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    /// JSON lines on stdout/stdin instead of the interactive terminal
    pub json: bool,
}

/// @acp:summary "The Primus application"
#[derive(Debug, Clone)]
pub struct PrimusApp {
    config: Config,
    catalog: DeckCatalog,
}

impl PrimusApp {
    /// Resolve the deck named by `config` (or the standard one)
    pub fn new(config: Config) -> Result<Self> {
        let catalog = DeckCatalog::load_or_standard(config.deck.as_deref())?;
        Ok(Self::with_catalog(config, catalog))
    }

    pub fn with_catalog(config: Config, catalog: DeckCatalog) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Play one game; ctrl-c stops it cleanly
    pub async fn launch(self, options: LaunchOptions) -> Result<GameOutcome> {
        let manager = GameManager::new(self.config.clone(), &self.catalog)?;
        let mut controller = GameController::new(manager, ControllerSettings::from(&self.config));
        let handle = controller.handle();

        let view: Box<dyn GameView> = if options.json {
            Box::new(JsonView::new(handle.clone()))
        } else {
            Box::new(TerminalView::new(handle.clone()))
        };
        controller.add_view(view);

        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Interrupted, stopping the game");
                handle.stop();
            }
        });

        let outcome = controller.start().await;
        interrupt.abort();
        outcome
    }
}

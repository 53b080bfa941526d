//! @acp:module "Init Command"
//! @acp:summary "Write a table configuration"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements `primus init` command for table setup.

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};

use crate::config::{Config, SeatConfig, SeatKind, CONFIG_FILE, MAX_SEATS};

/// Options for the init command
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Force overwrite existing config
    pub force: bool,
    /// Seats in turn order
    pub seats: Vec<SeatKind>,
    /// Cards dealt to each seat
    pub hand_size: Option<usize>,
    /// Fixed seed
    pub seed: Option<u64>,
    /// Skip interactive prompts
    pub yes: bool,
}

/// Execute the init command
pub fn execute_init(options: InitOptions) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE);

    if config_path.exists() && !options.force {
        eprintln!(
            "{} Config file already exists. Use --force to overwrite.",
            style("✗").red()
        );
        std::process::exit(1);
    }

    let mut config = Config::default();

    // Interactive mode if no CLI options and not using --yes
    let interactive = !options.yes
        && options.seats.is_empty()
        && options.hand_size.is_none()
        && options.seed.is_none();

    if interactive {
        run_interactive_init(&mut config)?;
    } else {
        apply_cli_options(&mut config, &options);
    }

    config.validate(crate::deck::DeckCatalog::standard()?.size())?;
    config.save(&config_path)?;
    println!(
        "{} Created {}",
        style("✓").green(),
        config_path.display()
    );

    // Print next steps
    println!("\n{}", style("Next steps:").bold());
    println!("  1. Run {} to start a game", style("primus play").cyan());
    println!(
        "  2. Run {} to pit the bots against each other",
        style("primus simulate").cyan()
    );

    Ok(())
}

fn run_interactive_init(config: &mut Config) -> Result<()> {
    println!("{} Primus Table Setup\n", style("→").cyan());

    let opponents = [SeatKind::Fortuitus, SeatKind::Implacabilis, SeatKind::Fallax];
    let items: Vec<String> = opponents
        .iter()
        .map(|kind| format!("{} ({})", kind.default_label(), describe(*kind)))
        .collect();

    let selections = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Pick your opponents")
        .items(&items)
        .defaults(&[true, true, true])
        .interact()?;

    if selections.is_empty() {
        println!("{} No opponent picked, keeping the default table\n", style("⚠").yellow());
    } else {
        config.seats = std::iter::once(SeatConfig::new(SeatKind::Human))
            .chain(selections.iter().map(|&idx| SeatConfig::new(opponents[idx])))
            .collect();
    }

    config.hand_size = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Cards per hand")
        .default(config.hand_size)
        .interact_text()?;

    let fast = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Let bots move without pausing?")
        .default(false)
        .interact()?;
    if fast {
        config.bot_delay_ms = 0;
    }

    Ok(())
}

fn describe(kind: SeatKind) -> &'static str {
    match kind {
        SeatKind::Human => "you",
        SeatKind::Fortuitus => "plays at random",
        SeatKind::Implacabilis => "always attacks",
        SeatKind::Fallax => "peeks at your hand",
    }
}

fn apply_cli_options(config: &mut Config, options: &InitOptions) {
    if !options.seats.is_empty() {
        config.seats = options
            .seats
            .iter()
            .take(MAX_SEATS)
            .map(|kind| SeatConfig::new(*kind))
            .collect();
    }
    if let Some(hand_size) = options.hand_size {
        config.hand_size = hand_size;
    }
    config.seed = options.seed;
}

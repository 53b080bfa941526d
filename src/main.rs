#![forbid(unsafe_code)]
//! Primus Command Line Interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use primus::commands::{
    execute_deck, execute_info, execute_init, execute_play, execute_simulate, DeckOptions,
    InfoOptions, InitOptions, PlayOptions, SimulateOptions,
};
use primus::config::CONFIG_FILE;
use primus::{Config, SeatKind};

#[derive(Parser)]
#[command(name = "primus")]
#[command(about = "Primus - a shedding card game against bots")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game (the default)
    Play {
        /// Seed for a reproducible game
        #[arg(long)]
        seed: Option<u64>,

        /// Pause before each bot move, in milliseconds
        #[arg(long)]
        bot_delay: Option<u64>,

        /// Seats in turn order (human, fortuitus, implacabilis, fallax)
        #[arg(long = "seat", value_delimiter = ',')]
        seats: Vec<SeatKind>,

        /// JSON lines on stdout, moves as JSON lines on stdin
        #[arg(long)]
        json: bool,
    },

    /// Run bot-only games and report how each seat fared
    Simulate {
        /// Number of games
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// First seed; game N uses seed + N
        #[arg(long)]
        seed: Option<u64>,

        /// Number of parallel workers
        #[arg(long)]
        workers: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate and summarize a deck catalog
    Deck {
        /// Catalog file (.json, .yaml); the standard deck when omitted
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show build information
    Info {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a table configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,

        /// Seats in turn order (can specify multiple)
        #[arg(long = "seat", value_delimiter = ',')]
        seats: Vec<SeatKind>,

        /// Cards dealt to each seat
        #[arg(long)]
        hand_size: Option<usize>,

        /// Fixed seed for every game
        #[arg(long)]
        seed: Option<u64>,

        /// Skip interactive prompts (use defaults + CLI args)
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    // Load config
    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::load_or_default()
    };

    let command = cli.command.unwrap_or(Commands::Play {
        seed: None,
        bot_delay: None,
        seats: Vec::new(),
        json: false,
    });

    match command {
        Commands::Play { seed, bot_delay, seats, json } => {
            let options = PlayOptions {
                seed,
                bot_delay_ms: bot_delay,
                seats,
                json,
            };
            execute_play(options, config).await?;
        }

        Commands::Simulate { games, seed, workers, json } => {
            let options = SimulateOptions {
                games,
                seed,
                workers,
                json,
            };
            execute_simulate(options, config)?;
        }

        Commands::Deck { file, json } => {
            let file = file.or(config.deck);
            execute_deck(DeckOptions { file, json })?;
        }

        Commands::Info { json } => {
            execute_info(InfoOptions { json })?;
        }

        Commands::Init { force, seats, hand_size, seed, yes } => {
            let options = InitOptions {
                force,
                seats,
                hand_size,
                seed,
                yes,
            };
            execute_init(options)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "primus=debug" } else { "warn" };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

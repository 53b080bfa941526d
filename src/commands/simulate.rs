//! @acp:module "Simulate Command"
//! @acp:summary "Run many bot-only games and report win rates"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Config;
use crate::deck::DeckCatalog;
use crate::simulation::simulate;

/// Options for the simulate command
#[derive(Debug, Clone)]
pub struct SimulateOptions {
    /// Number of games
    pub games: u32,
    /// First seed; games use consecutive seeds
    pub seed: Option<u64>,
    /// Worker threads (default: number of CPUs)
    pub workers: Option<usize>,
    /// Output as JSON
    pub json: bool,
}

/// Execute the simulate command
pub fn execute_simulate(options: SimulateOptions, config: Config) -> Result<()> {
    let humans = config.human_seats();
    let config = if humans.is_empty() {
        config
    } else {
        if !options.json {
            println!(
                "{} Human seats {:?} are played by Fortuitus for the simulation",
                style("!").yellow(),
                humans
            );
        }
        config.bots_only()
    };

    let catalog = DeckCatalog::load_or_standard(config.deck.as_deref())?;
    let base_seed = options.seed.or(config.seed).unwrap_or_else(rand::random);

    let progress = if options.json {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(u64::from(options.games));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} games")?
                .progress_chars("=> "),
        );
        bar
    };

    let run = || simulate(&config, &catalog, options.games, base_seed, |_| progress.inc(1));
    let report = match options.workers {
        Some(workers) => rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()?
            .install(run)?,
        None => run()?,
    };
    progress.finish_and_clear();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} games from seed {} ({} finished, {} hit the turn limit)",
        style("✓").green(),
        report.games,
        base_seed,
        report.finished,
        report.turn_limited
    );
    println!("  Average length: {:.1} turns\n", report.average_turns);

    for (id, label) in &report.labels {
        let wins = report.wins.get(id).copied().unwrap_or(0);
        let points = report.points.get(id).copied().unwrap_or(0);
        println!(
            "  {} {:<14} {:>5} wins  {:>5.1}%  {:>7} pts",
            style(format!("#{}", id)).dim(),
            style(label).cyan(),
            wins,
            report.win_rate(*id) * 100.0,
            points
        );
    }

    Ok(())
}

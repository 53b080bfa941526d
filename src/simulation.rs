//! @acp:module "Simulation"
//! @acp:summary "Bot-only games played back to back, in parallel"
//! @acp:domain game
//! @acp:layer service

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;

use crate::config::Config;
use crate::deck::DeckCatalog;
use crate::error::{PrimusError, Result};
use crate::game::{GameEnd, GameManager, GameOutcome, PlayerId};

/// Play one bot-only game synchronously with a fixed seed
pub fn simulate_game(config: &Config, catalog: &DeckCatalog, seed: u64) -> Result<GameOutcome> {
    if !config.human_seats().is_empty() {
        return Err(PrimusError::InvalidConfig {
            field: "seats".to_string(),
            reason: "simulations need a table without human seats".to_string(),
        });
    }

    let config = Config {
        seed: Some(seed),
        ..config.clone()
    };
    let max_turns = config.max_turns;
    let mut manager = GameManager::new(config, catalog)?;

    let end = loop {
        if manager.winner().is_some() {
            break GameEnd::Finished;
        }
        if manager.turns() >= max_turns {
            break GameEnd::TurnLimit;
        }
        manager.advance_turn();
        manager.play_bot_turn()?;
    };

    Ok(manager.outcome(end))
}

/// @acp:summary "Aggregated results of a batch of games"
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimulationReport {
    pub games: u32,
    pub finished: u32,
    pub turn_limited: u32,
    pub labels: BTreeMap<PlayerId, String>,
    pub wins: BTreeMap<PlayerId, u32>,
    /// Points collected by each seat across its wins
    pub points: BTreeMap<PlayerId, u64>,
    pub average_turns: f64,
}

impl SimulationReport {
    fn from_outcomes(config: &Config, outcomes: &[GameOutcome]) -> Self {
        let mut report = Self {
            games: outcomes.len() as u32,
            ..Self::default()
        };

        for (index, seat) in config.seats.iter().enumerate() {
            let id = Config::seat_id(index);
            report.labels.insert(id, seat.label());
            report.wins.insert(id, 0);
            report.points.insert(id, 0);
        }

        let mut total_turns = 0u64;
        for outcome in outcomes {
            total_turns += u64::from(outcome.turns);
            match (outcome.end, outcome.winner) {
                (GameEnd::Finished, Some(winner)) => {
                    report.finished += 1;
                    *report.wins.entry(winner).or_default() += 1;
                    *report.points.entry(winner).or_default() += u64::from(outcome.winner_points());
                }
                _ => report.turn_limited += 1,
            }
        }

        if !outcomes.is_empty() {
            report.average_turns = total_turns as f64 / outcomes.len() as f64;
        }
        report
    }

    /// Share of finished games won by `id`
    pub fn win_rate(&self, id: PlayerId) -> f64 {
        if self.finished == 0 {
            return 0.0;
        }
        f64::from(self.wins.get(&id).copied().unwrap_or(0)) / f64::from(self.finished)
    }
}

/// Run `games` games with seeds `base_seed`, `base_seed + 1`, ...
///
/// `on_game` is called once per finished game, from worker threads.
pub fn simulate<F>(
    config: &Config,
    catalog: &DeckCatalog,
    games: u32,
    base_seed: u64,
    on_game: F,
) -> Result<SimulationReport>
where
    F: Fn(&GameOutcome) + Sync,
{
    tracing::info!("Simulating {} games from seed {}", games, base_seed);

    let outcomes = (0..games)
        .into_par_iter()
        .map(|i| -> Result<GameOutcome> {
            let outcome = simulate_game(config, catalog, base_seed.wrapping_add(u64::from(i)))?;
            on_game(&outcome);
            Ok(outcome)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SimulationReport::from_outcomes(config, &outcomes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SeatConfig, SeatKind};

    fn bots() -> Config {
        Config {
            seats: vec![
                SeatConfig::new(SeatKind::Fortuitus),
                SeatConfig::new(SeatKind::Implacabilis),
                SeatConfig::new(SeatKind::Fallax),
            ],
            ..Config::default()
        }
    }

    #[test]
    fn test_humans_rejected() {
        let catalog = DeckCatalog::standard().unwrap();
        let result = simulate_game(&Config::default(), &catalog, 1);
        assert!(matches!(result, Err(PrimusError::InvalidConfig { .. })));
    }

    #[test]
    fn test_report_totals() {
        let catalog = DeckCatalog::standard().unwrap();
        let report = simulate(&bots(), &catalog, 6, 100, |_| {}).unwrap();

        assert_eq!(report.games, 6);
        assert_eq!(report.finished + report.turn_limited, 6);
        assert_eq!(report.wins.values().sum::<u32>(), report.finished);
        assert_eq!(report.labels.get(&3).map(String::as_str), Some("Fallax"));
        assert!(report.average_turns > 0.0);
    }

    #[test]
    fn test_same_seed_same_game() {
        let catalog = DeckCatalog::standard().unwrap();
        let a = simulate_game(&bots(), &catalog, 7).unwrap();
        let b = simulate_game(&bots(), &catalog, 7).unwrap();
        assert_eq!(a.winner, b.winner);
        assert_eq!(a.turns, b.turns);
        assert_eq!(a.scores, b.scores);
    }
}

//! @acp:module "Configuration"
//! @acp:summary "Table configuration loading, defaults and validation"
//! @acp:domain cli
//! @acp:layer config

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PrimusError, Result};
use crate::game::PlayerId;

/// File name looked up in the working directory
pub const CONFIG_FILE: &str = ".primus.config.json";

/// Seats a table can hold
pub const MIN_SEATS: usize = 2;
pub const MAX_SEATS: usize = 10;

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_hand_size() -> usize {
    7
}

fn default_bot_delay_ms() -> u64 {
    1000
}

fn default_max_turns() -> u32 {
    5000
}

fn default_seats() -> Vec<SeatConfig> {
    vec![
        SeatConfig::new(SeatKind::Human),
        SeatConfig::new(SeatKind::Fortuitus),
        SeatConfig::new(SeatKind::Implacabilis),
        SeatConfig::new(SeatKind::Fallax),
    ]
}

/// @acp:summary "Main Primus configuration structure"
/// @acp:lock normal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Configuration format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Cards dealt to each seat
    #[serde(default = "default_hand_size")]
    pub hand_size: usize,

    /// Pause before each bot move, in milliseconds
    #[serde(default = "default_bot_delay_ms")]
    pub bot_delay_ms: u64,

    /// Fixed seed for reproducible games
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Turns after which a game is abandoned
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,

    /// Custom deck catalog (JSON or YAML); the standard deck when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<PathBuf>,

    /// Seats in turn order; seat ids are 1-based positions
    #[serde(default = "default_seats")]
    pub seats: Vec<SeatConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            hand_size: default_hand_size(),
            bot_delay_ms: default_bot_delay_ms(),
            seed: None,
            max_turns: default_max_turns(),
            deck: None,
            seats: default_seats(),
        }
    }
}

impl Config {
    /// @acp:summary "Load config from a JSON file"
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Per-user config location
    pub fn user_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("primus").join("config.json"))
    }

    /// @acp:summary "Load from the project file, then the user file, else defaults"
    pub fn load_or_default() -> Self {
        let candidates = std::iter::once(PathBuf::from(CONFIG_FILE)).chain(Self::user_path());
        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::load(&path) {
                Ok(config) => {
                    tracing::debug!("Loaded config from {}", path.display());
                    return config;
                }
                Err(e) => tracing::warn!("Ignoring unreadable config {}: {}", path.display(), e),
            }
        }
        Self::default()
    }

    /// Seat id of the seat at `index`
    pub fn seat_id(index: usize) -> PlayerId {
        index as PlayerId + 1
    }

    /// Ids of the human seats
    pub fn human_seats(&self) -> Vec<PlayerId> {
        self.seats
            .iter()
            .enumerate()
            .filter(|(_, seat)| seat.kind == SeatKind::Human)
            .map(|(index, _)| Self::seat_id(index))
            .collect()
    }

    /// Who the cheating bot at `index` spies on: the configured victim, the first
    /// human, or the seat after it
    pub fn fallax_victim(&self, index: usize) -> PlayerId {
        if let Some(victim) = self.seats.get(index).and_then(|s| s.victim) {
            return victim;
        }
        let own = Self::seat_id(index);
        self.human_seats()
            .into_iter()
            .find(|id| *id != own)
            .unwrap_or_else(|| Self::seat_id((index + 1) % self.seats.len().max(1)))
    }

    /// Check the table can be dealt from a deck of `deck_size` cards
    pub fn validate(&self, deck_size: usize) -> Result<()> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&self.seats.len()) {
            return Err(invalid(
                "seats",
                format!(
                    "{} seats configured, expected {} to {}",
                    self.seats.len(),
                    MIN_SEATS,
                    MAX_SEATS
                ),
            ));
        }

        if self.hand_size == 0 {
            return Err(invalid("hand_size", "must be at least 1"));
        }

        let needed = self
            .hand_size
            .checked_mul(self.seats.len())
            .and_then(|cards| cards.checked_add(1))
            .ok_or_else(|| invalid("hand_size", format!("{} is too large", self.hand_size)))?;
        if needed > deck_size {
            return Err(invalid(
                "hand_size",
                format!(
                    "dealing {} cards to {} seats needs {} cards, the deck has {}",
                    self.hand_size,
                    self.seats.len(),
                    needed,
                    deck_size
                ),
            ));
        }

        if self.max_turns == 0 {
            return Err(invalid("max_turns", "must be at least 1"));
        }

        for (index, seat) in self.seats.iter().enumerate() {
            if seat.victim.is_some() && seat.kind != SeatKind::Fallax {
                return Err(invalid(
                    "seats",
                    format!("seat {} is not a fallax bot but names a victim", Self::seat_id(index)),
                ));
            }
            if seat.kind == SeatKind::Fallax {
                let victim = self.fallax_victim(index);
                if victim == Self::seat_id(index) {
                    return Err(invalid("seats", format!("seat {} cannot spy on itself", victim)));
                }
                if victim == 0 || victim as usize > self.seats.len() {
                    return Err(invalid("seats", format!("victim {} is not a seat", victim)));
                }
            }
        }

        Ok(())
    }

    /// Same table with every human seat replaced by a random bot
    pub fn bots_only(&self) -> Self {
        let mut config = self.clone();
        for seat in &mut config.seats {
            if seat.kind == SeatKind::Human {
                *seat = SeatConfig::new(SeatKind::Fortuitus);
            }
        }
        config
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> PrimusError {
    PrimusError::InvalidConfig {
        field: field.to_string(),
        reason: reason.into(),
    }
}

/// Who sits in a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatKind {
    Human,
    /// Random card, random color
    Fortuitus,
    /// Most punishing card, most frequent color
    Implacabilis,
    /// Spies on a victim's hand
    Fallax,
}

impl SeatKind {
    pub fn default_label(&self) -> &'static str {
        match self {
            SeatKind::Human => "Player",
            SeatKind::Fortuitus => "Fortuitus",
            SeatKind::Implacabilis => "Implacabilis",
            SeatKind::Fallax => "Fallax",
        }
    }

    pub fn is_bot(&self) -> bool {
        *self != SeatKind::Human
    }
}

impl std::str::FromStr for SeatKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(SeatKind::Human),
            "fortuitus" | "random" => Ok(SeatKind::Fortuitus),
            "implacabilis" | "aggressive" => Ok(SeatKind::Implacabilis),
            "fallax" | "cheater" => Ok(SeatKind::Fallax),
            _ => Err(format!(
                "Unknown seat kind: {}. Use human, fortuitus, implacabilis or fallax.",
                s
            )),
        }
    }
}

/// @acp:summary "One seat at the table"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    pub kind: SeatKind,

    /// Display name; defaults to the personality name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Seat a fallax bot spies on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub victim: Option<PlayerId>,
}

impl SeatConfig {
    pub fn new(kind: SeatKind) -> Self {
        Self {
            kind,
            name: None,
            victim: None,
        }
    }

    pub fn label(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.kind.default_label().to_string())
    }
}

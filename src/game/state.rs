//! @acp:module "Game State"
//! @acp:summary "Snapshots and records handed from the game core to views"
//! @acp:domain game
//! @acp:layer model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PlayerId;
use crate::deck::Card;

/// Public information about one seat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSummary {
    pub id: PlayerId,
    pub label: String,
    pub is_bot: bool,
    pub cards: usize,
}

/// @acp:summary "Immutable snapshot of the table at one moment"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub top_card: Card,
    /// Hand of the active player
    pub active_hand: Vec<Card>,
    pub active_player: PlayerId,
    /// Pending penalty, zero when none
    pub malus: u32,
    pub seats: Vec<SeatSummary>,
    pub draw_pile: usize,
    pub clockwise: bool,
}

impl GameState {
    pub fn with_top_card(&self, top_card: Card) -> Self {
        Self {
            top_card,
            ..self.clone()
        }
    }

    pub fn with_active_player(&self, active_player: PlayerId) -> Self {
        Self {
            active_player,
            ..self.clone()
        }
    }

    pub fn with_added_card(&self, card: Card) -> Self {
        let mut next = self.clone();
        next.active_hand.push(card);
        next
    }

    pub fn seat(&self, id: PlayerId) -> Option<&SeatSummary> {
        self.seats.iter().find(|s| s.id == id)
    }

    /// Whether the active seat is played by a person
    pub fn is_human_turn(&self) -> bool {
        self.seat(self.active_player).is_some_and(|s| !s.is_bot)
    }
}

/// What a view needs to know to set up a seat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetupData {
    pub id: PlayerId,
    pub label: String,
    pub is_human: bool,
}

/// Result of an accepted move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnReport {
    /// The card now on top of the drop pile
    Played { card: Card },
    /// A pending penalty was answered with `card`
    Defended { card: Card, malus: u32 },
    /// Cards actually drawn; may be fewer than asked when the piles run dry
    Drew { count: usize },
    /// Took the pending penalty
    TookPenalty { malus: u32, count: usize },
}

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEnd {
    Finished,
    Stopped,
    TurnLimit,
}

/// @acp:summary "Final record of a game"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameOutcome {
    pub game_id: Uuid,
    pub winner: Option<PlayerId>,
    pub turns: u32,
    pub end: GameEnd,
    /// Points left in each hand, by seat
    pub scores: Vec<(PlayerId, u32)>,
    pub finished_at: DateTime<Utc>,
}

impl GameOutcome {
    /// Points the winner collects from the other hands
    pub fn winner_points(&self) -> u32 {
        self.scores.iter().map(|(_, points)| points).sum()
    }
}

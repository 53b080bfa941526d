//! @acp:module "Scheduler"
//! @acp:summary "Turn order over seat ids, both directions, with skips"
//! @acp:domain game
//! @acp:layer service

use super::PlayerId;
use crate::error::{PrimusError, Result};

/// @acp:summary "Round-robin turn order"
#[derive(Debug, Clone)]
pub struct Scheduler {
    seats: Vec<PlayerId>,
    current: usize,
    clockwise: bool,
}

impl Scheduler {
    /// Seats take turns in the given order, starting with the first one
    pub fn new(seats: Vec<PlayerId>) -> Result<Self> {
        if seats.is_empty() {
            return Err(PrimusError::NoPlayers);
        }
        Ok(Self {
            seats,
            current: 0,
            clockwise: true,
        })
    }

    /// The seat whose turn it is, without advancing
    pub fn current_player(&self) -> PlayerId {
        self.seats[self.current]
    }

    /// Advance one seat in the current direction and return it
    pub fn next_player(&mut self) -> PlayerId {
        self.move_index();
        self.current_player()
    }

    pub fn reverse_direction(&mut self) {
        self.clockwise = !self.clockwise;
    }

    /// Pass over the next seat; the following `next_player` lands one further
    pub fn skip_turn(&mut self) {
        self.move_index();
    }

    pub fn is_clockwise(&self) -> bool {
        self.clockwise
    }

    pub fn seats(&self) -> &[PlayerId] {
        &self.seats
    }

    fn move_index(&mut self) {
        let len = self.seats.len();
        self.current = if self.clockwise {
            (self.current + 1) % len
        } else {
            (self.current + len - 1) % len
        };
    }
}

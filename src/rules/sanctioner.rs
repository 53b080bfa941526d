//! @acp:module "Sanctioner"
//! @acp:summary "Accumulates draw penalties until someone takes them"
//! @acp:domain game
//! @acp:layer service

use crate::deck::Card;

/// Pending penalty counter
#[derive(Debug, Clone, Default)]
pub struct Sanctioner {
    malus: u32,
}

impl Sanctioner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.malus > 0
    }

    pub fn malus_amount(&self) -> u32 {
        self.malus
    }

    /// Stack the card's draw amount onto the pending penalty
    pub fn accumulate(&mut self, card: &Card) {
        self.malus = self.malus.saturating_add(card.draw_amount());
    }

    pub fn reset(&mut self) {
        self.malus = 0;
    }
}

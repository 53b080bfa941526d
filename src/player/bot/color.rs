//! @acp:module "Color Strategies"
//! @acp:summary "How bots declare the color of a wild card"
//! @acp:domain game
//! @acp:layer service

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::deck::Color;
use crate::player::Hand;

/// Declares a color for a wild card; never returns `Black`
pub trait ColorStrategy: Send {
    fn name(&self) -> &'static str;

    fn choose_color(&mut self, hand: &Hand) -> Color;
}

#[derive(Debug, Clone)]
pub struct RandomColorStrategy {
    rng: StdRng,
}

impl RandomColorStrategy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ColorStrategy for RandomColorStrategy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose_color(&mut self, _hand: &Hand) -> Color {
        Color::PLAYABLE
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Color::Red)
    }
}

/// The color the hand holds most of; ties and empty hands resolve in `Color::PLAYABLE` order
#[derive(Debug, Clone, Default)]
pub struct MostFrequentColorStrategy;

impl MostFrequentColorStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl ColorStrategy for MostFrequentColorStrategy {
    fn name(&self) -> &'static str {
        "most-frequent"
    }

    fn choose_color(&mut self, hand: &Hand) -> Color {
        let mut best = (Color::PLAYABLE[0], 0);
        for (color, count) in hand.color_counts() {
            if count > best.1 {
                best = (color, count);
            }
        }
        best.0
    }
}

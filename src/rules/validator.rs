//! @acp:module "Validator"
//! @acp:summary "Decides which cards may be played on the current top card"
//! @acp:domain game
//! @acp:layer service

use crate::deck::{Card, CardEffect, Color};

/// Stateless move checker
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Normal play: always-playable cards, a colorless top card, matching color or value
    pub fn is_valid_card(&self, top: &Card, card: &Card) -> bool {
        card.has_effect(CardEffect::AlwaysPlayable)
            || top.color() == Color::Black
            || card.color() == top.color()
            || card.value() == top.value()
    }

    /// Answering a pending malus requires a playable card that itself makes someone draw
    pub fn is_valid_defense(&self, top: &Card, card: &Card) -> bool {
        card.draw_amount() > 0 && self.is_valid_card(top, card)
    }

    /// Cards from `hand` that would be accepted right now
    pub fn playable(&self, top: &Card, hand: &[Card], malus_active: bool) -> Vec<Card> {
        hand.iter()
            .filter(|card| {
                if malus_active {
                    self.is_valid_defense(top, card)
                } else {
                    self.is_valid_card(top, card)
                }
            })
            .cloned()
            .collect()
    }
}

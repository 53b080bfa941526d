//! @acp:module "Piles"
//! @acp:summary "Draw deck and discard pile"
//! @acp:domain game
//! @acp:layer model

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::card::Card;
use crate::error::{PrimusError, Result};

/// @acp:summary "Shuffled draw deck built from a card template"
#[derive(Debug, Clone)]
pub struct Deck {
    template: Vec<Card>,
    cards: Vec<Card>,
    rng: StdRng,
}

impl Deck {
    /// Build a deck from `template` and shuffle it with a seeded generator
    pub fn new(template: Vec<Card>, seed: u64) -> Self {
        let mut deck = Self {
            template,
            cards: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        };
        deck.init();
        deck
    }

    /// Put every template card back and shuffle
    pub fn init(&mut self) {
        self.cards = self.template.clone();
        self.shuffle();
    }

    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    pub fn draw_card(&mut self) -> Result<Card> {
        self.cards.pop().ok_or(PrimusError::EmptyDeck)
    }

    pub fn size(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Move everything but the top card of `pile` back into the deck
    ///
    /// Wild cards lose their declared color on the way back.
    pub fn refill_from(&mut self, pile: &mut DropPile) {
        let recycled = pile.extract_all_except_top();
        tracing::debug!("Refilling deck with {} discarded cards", recycled.len());
        self.cards
            .extend(recycled.into_iter().map(|card| card.restored()));
        self.shuffle();
    }
}

/// @acp:summary "Discard pile; the last card added is the one in play"
///
/// A pile is opened with its start card and never runs empty.
#[derive(Debug, Clone)]
pub struct DropPile {
    buried: Vec<Card>,
    top: Card,
}

impl DropPile {
    pub fn new(start: Card) -> Self {
        Self {
            buried: Vec::new(),
            top: start,
        }
    }

    pub fn add_card(&mut self, card: Card) {
        let previous = std::mem::replace(&mut self.top, card);
        self.buried.push(previous);
    }

    pub fn peek(&self) -> &Card {
        &self.top
    }

    /// Remove and return every card except the top one, oldest first
    pub fn extract_all_except_top(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.buried)
    }

    pub fn size(&self) -> usize {
        self.buried.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{CardEffect, Color, Value};

    #[test]
    fn test_same_seed_same_order() {
        let template: Vec<Card> = (0..20)
            .map(|i| Card::new(Color::PLAYABLE[i % 4], Value::Five))
            .collect();
        let mut a = Deck::new(template.clone(), 42);
        let mut b = Deck::new(template, 42);
        for _ in 0..20 {
            assert_eq!(a.draw_card().unwrap(), b.draw_card().unwrap());
        }
    }

    #[test]
    fn test_fresh_pile_keeps_start_card() {
        let start = Card::new(Color::Green, Value::Four);
        let mut pile = DropPile::new(start.clone());
        assert!(pile.extract_all_except_top().is_empty());
        assert_eq!(pile.peek(), &start);
        assert_eq!(pile.size(), 1);
    }

    #[test]
    fn test_refill_restores_wild_color() {
        let mut deck = Deck::new(Vec::new(), 1);
        let wild = Card::with_effects(Color::Black, Value::Wild, 0, [CardEffect::ChangeColor]);
        let mut pile = DropPile::new(wild.with_color(Color::Red));
        pile.add_card(Card::new(Color::Red, Value::Two));

        deck.refill_from(&mut pile);

        assert_eq!(deck.size(), 1);
        assert_eq!(deck.draw_card().unwrap(), wild);
        assert_eq!(pile.size(), 1);
    }
}

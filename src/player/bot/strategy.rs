//! @acp:module "Card Strategies"
//! @acp:summary "How bots pick a card among the playable ones"
//! @acp:domain game
//! @acp:layer service

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::deck::{Card, CardEffect};
use crate::game::PlayerId;
use crate::player::TurnContext;

/// Picks one of the playable cards, or `None` to draw instead
pub trait CardStrategy: Send {
    fn name(&self) -> &'static str;

    /// `playable` is never empty
    fn choose_card(&mut self, playable: &[Card], ctx: &TurnContext) -> Option<Card>;
}

/// Ordering used by the aggressive strategies: bigger penalties, then more effects, then points
fn aggression(card: &Card) -> (u32, usize, u32) {
    let effects = card
        .effects()
        .filter(|e| *e != CardEffect::AlwaysPlayable)
        .count();
    (card.draw_amount(), effects, card.points())
}

/// Any playable card, uniformly
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl CardStrategy for RandomStrategy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose_card(&mut self, playable: &[Card], _ctx: &TurnContext) -> Option<Card> {
        playable.choose(&mut self.rng).cloned()
    }
}

/// Always plays the most punishing card available
#[derive(Debug, Clone, Default)]
pub struct AggressiveStrategy;

impl AggressiveStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl CardStrategy for AggressiveStrategy {
    fn name(&self) -> &'static str {
        "aggressive"
    }

    fn choose_card(&mut self, playable: &[Card], _ctx: &TurnContext) -> Option<Card> {
        // max_by_key keeps the last maximum; reverse so ties go to the first card
        playable.iter().rev().max_by_key(|c| aggression(*c)).cloned()
    }
}

/// Which seat a cheating bot spies on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentInfo {
    pub victim: PlayerId,
}

impl OpponentInfo {
    pub fn new(victim: PlayerId) -> Self {
        Self { victim }
    }
}

/// Looks at the victim's hand and plays what the victim cannot answer
#[derive(Debug, Clone)]
pub struct CheaterStrategy {
    info: OpponentInfo,
}

impl CheaterStrategy {
    pub fn new(info: OpponentInfo) -> Self {
        Self { info }
    }
}

impl CardStrategy for CheaterStrategy {
    fn name(&self) -> &'static str {
        "cheater"
    }

    fn choose_card(&mut self, playable: &[Card], ctx: &TurnContext) -> Option<Card> {
        let Some(victim) = ctx.opponent(self.info.victim) else {
            return AggressiveStrategy.choose_card(playable, ctx);
        };

        let victim_can_defend = victim.cards.iter().any(|c| c.draw_amount() > 0);
        let score = |card: &Card| {
            let mut score = 0;
            if !card.is_native_black() && !victim.cards.iter().any(|c| c.color() == card.color()) {
                score += 2;
            }
            if card.draw_amount() > 0 && !victim_can_defend {
                score += 3;
            }
            (score, aggression(card))
        };

        playable.iter().rev().max_by_key(|c| score(*c)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{Color, Value};
    use crate::player::OpponentView;

    fn ctx(opponents: Vec<OpponentView>) -> TurnContext {
        TurnContext {
            top_card: Card::new(Color::Red, Value::Five),
            malus: 0,
            opponents,
        }
    }

    #[test]
    fn test_random_picks_from_playable() {
        let mut strategy = RandomStrategy::new(7);
        let playable = vec![
            Card::new(Color::Red, Value::One),
            Card::new(Color::Blue, Value::Five),
        ];
        for _ in 0..10 {
            let card = strategy.choose_card(&playable, &ctx(vec![])).unwrap();
            assert!(playable.contains(&card));
        }
    }

    #[test]
    fn test_aggressive_prefers_penalties() {
        let mut strategy = AggressiveStrategy::new();
        let draw_two = Card::with_effects(Color::Red, Value::DrawTwo, 2, [CardEffect::SkipNext]);
        let playable = vec![
            Card::new(Color::Red, Value::Nine),
            draw_two.clone(),
            Card::with_effects(Color::Red, Value::Skip, 0, [CardEffect::SkipNext]),
        ];
        assert_eq!(strategy.choose_card(&playable, &ctx(vec![])), Some(draw_two));
    }

    #[test]
    fn test_aggressive_tie_goes_to_first() {
        let mut strategy = AggressiveStrategy::new();
        let playable = vec![
            Card::new(Color::Red, Value::Nine),
            Card::new(Color::Blue, Value::Five),
            Card::new(Color::Green, Value::Nine),
        ];
        assert_eq!(
            strategy.choose_card(&playable, &ctx(vec![])),
            Some(Card::new(Color::Red, Value::Nine))
        );
    }

    #[test]
    fn test_cheater_avoids_victim_colors() {
        let mut strategy = CheaterStrategy::new(OpponentInfo::new(2));
        let victim = OpponentView {
            id: 2,
            cards: vec![Card::new(Color::Red, Value::Two), Card::new(Color::Red, Value::Three)],
        };
        let playable = vec![
            Card::new(Color::Red, Value::Nine),
            Card::new(Color::Blue, Value::Five),
        ];
        assert_eq!(
            strategy.choose_card(&playable, &ctx(vec![victim])),
            Some(Card::new(Color::Blue, Value::Five))
        );
    }

    #[test]
    fn test_cheater_without_victim_plays_aggressive() {
        let mut strategy = CheaterStrategy::new(OpponentInfo::new(9));
        let skip = Card::with_effects(Color::Red, Value::Skip, 0, [CardEffect::SkipNext]);
        let playable = vec![Card::new(Color::Red, Value::Nine), skip.clone()];
        assert_eq!(strategy.choose_card(&playable, &ctx(vec![])), Some(skip));
    }
}

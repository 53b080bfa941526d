//! @acp:module "Bots"
//! @acp:summary "Computer-controlled seats and the factory that builds them"
//! @acp:domain game
//! @acp:layer service
//!
//! A bot is a hand plus two pluggable strategies: one picks the card, the other
//! declares a color for wild cards. The factory names the stock personalities.

pub mod color;
pub mod strategy;

pub use color::{ColorStrategy, MostFrequentColorStrategy, RandomColorStrategy};
pub use strategy::{
    AggressiveStrategy, CardStrategy, CheaterStrategy, OpponentInfo, RandomStrategy,
};

use crate::deck::{Card, CardEffect};
use crate::game::PlayerId;
use crate::player::{Hand, Player, TurnAction, TurnContext};
use crate::rules::Validator;

/// @acp:summary "Strategy-driven player"
pub struct Bot {
    id: PlayerId,
    label: String,
    hand: Hand,
    card_strategy: Box<dyn CardStrategy>,
    color_strategy: Box<dyn ColorStrategy>,
    validator: Validator,
    /// Cards refused earlier in the current turn
    rejected: Vec<Card>,
}

impl Bot {
    pub fn new(
        id: PlayerId,
        label: impl Into<String>,
        card_strategy: Box<dyn CardStrategy>,
        color_strategy: Box<dyn ColorStrategy>,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            hand: Hand::new(),
            card_strategy,
            color_strategy,
            validator: Validator::new(),
            rejected: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Names of the strategies in use, for display
    pub fn strategy_names(&self) -> (&'static str, &'static str) {
        (self.card_strategy.name(), self.color_strategy.name())
    }
}

impl std::fmt::Debug for Bot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bot")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("cards", &self.hand.len())
            .field("strategy", &self.card_strategy.name())
            .finish()
    }
}

impl Player for Bot {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn hand(&self) -> &Hand {
        &self.hand
    }

    fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    fn is_bot(&self) -> bool {
        true
    }

    fn decide(&mut self, ctx: &TurnContext) -> Option<TurnAction> {
        let playable: Vec<Card> = self
            .validator
            .playable(&ctx.top_card, self.hand.cards(), ctx.malus_active())
            .into_iter()
            .filter(|card| !self.rejected.contains(card))
            .collect();

        if playable.is_empty() {
            self.rejected.clear();
            return Some(TurnAction::Draw);
        }

        let Some(card) = self.card_strategy.choose_card(&playable, ctx) else {
            self.rejected.clear();
            return Some(TurnAction::Draw);
        };

        let color = card
            .has_effect(CardEffect::ChangeColor)
            .then(|| self.color_strategy.choose_color(&self.hand));

        Some(TurnAction::Play { card, color })
    }

    fn reset_turn(&mut self) {
        self.rejected.clear();
    }

    fn notify_move_result(&mut self, card: &Card, accepted: bool) {
        if accepted {
            self.rejected.clear();
        } else {
            tracing::debug!("Bot {} had {} rejected", self.id, card);
            self.rejected.push(card.clone());
        }
    }
}

/// @acp:summary "Builds the stock bot personalities"
#[derive(Debug, Clone, Copy, Default)]
pub struct BotFactory {
    seed: u64,
}

impl BotFactory {
    /// Every bot built by this factory derives its randomness from `seed`
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn seed_for(&self, id: PlayerId) -> u64 {
        self.seed.wrapping_add(u64::from(id).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Plays at random, declares colors at random
    pub fn create_fortuitus(&self, id: PlayerId) -> Bot {
        let seed = self.seed_for(id);
        Bot::new(
            id,
            "Fortuitus",
            Box::new(RandomStrategy::new(seed)),
            Box::new(RandomColorStrategy::new(seed.rotate_left(17))),
        )
    }

    /// Always plays the most punishing card
    pub fn create_implacabilis(&self, id: PlayerId) -> Bot {
        Bot::new(
            id,
            "Implacabilis",
            Box::new(AggressiveStrategy::new()),
            Box::new(MostFrequentColorStrategy::new()),
        )
    }

    /// Peeks at `victim`'s hand
    pub fn create_fallax(&self, id: PlayerId, victim: PlayerId) -> Bot {
        Bot::new(
            id,
            "Fallax",
            Box::new(CheaterStrategy::new(OpponentInfo::new(victim))),
            Box::new(MostFrequentColorStrategy::new()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{Color, Value};

    fn ctx(top: Card, malus: u32) -> TurnContext {
        TurnContext {
            top_card: top,
            malus,
            opponents: Vec::new(),
        }
    }

    #[test]
    fn test_draws_without_playable_cards() {
        let mut bot = BotFactory::new(1).create_implacabilis(1);
        bot.add_cards(vec![Card::new(Color::Blue, Value::One)]);
        let action = bot.decide(&ctx(Card::new(Color::Red, Value::Five), 0));
        assert_eq!(action, Some(TurnAction::Draw));
    }

    #[test]
    fn test_wild_gets_a_color() {
        let mut bot = BotFactory::new(1).create_implacabilis(1);
        let wild = Card::with_effects(
            Color::Black,
            Value::Wild,
            0,
            [CardEffect::ChangeColor, CardEffect::AlwaysPlayable],
        );
        bot.add_cards(vec![wild.clone(), Card::new(Color::Green, Value::One)]);

        let action = bot.decide(&ctx(Card::new(Color::Red, Value::Five), 0));
        assert_eq!(
            action,
            Some(TurnAction::Play {
                card: wild,
                color: Some(Color::Green)
            })
        );
    }

    #[test]
    fn test_rejected_card_not_proposed_again() {
        let mut bot = BotFactory::new(1).create_implacabilis(1);
        let red = Card::new(Color::Red, Value::Nine);
        bot.add_cards(vec![red.clone()]);
        let top = Card::new(Color::Red, Value::Five);

        assert_eq!(bot.decide(&ctx(top.clone(), 0)), Some(TurnAction::play(red.clone())));
        bot.notify_move_result(&red, false);
        assert_eq!(bot.decide(&ctx(top.clone(), 0)), Some(TurnAction::Draw));
        // drawing starts over
        assert_eq!(bot.decide(&ctx(top, 0)), Some(TurnAction::play(red)));
    }

    #[test]
    fn test_forced_end_of_turn_forgets_rejections() {
        let mut bot = BotFactory::new(1).create_implacabilis(1);
        let red = Card::new(Color::Red, Value::Nine);
        bot.add_cards(vec![red.clone()]);
        let top = Card::new(Color::Red, Value::Five);

        bot.notify_move_result(&red, false);
        bot.reset_turn();
        assert_eq!(bot.decide(&ctx(top, 0)), Some(TurnAction::play(red)));
    }

    #[test]
    fn test_under_malus_only_defends() {
        let mut bot = BotFactory::new(1).create_fortuitus(2);
        bot.add_cards(vec![Card::new(Color::Red, Value::Nine)]);
        let top = Card::with_effects(Color::Red, Value::DrawTwo, 2, [CardEffect::SkipNext]);
        assert_eq!(bot.decide(&ctx(top, 2)), Some(TurnAction::Draw));
    }

    #[test]
    fn test_factory_personalities() {
        let factory = BotFactory::new(5);
        assert_eq!(factory.create_fortuitus(1).strategy_names(), ("random", "random"));
        assert_eq!(
            factory.create_implacabilis(2).strategy_names(),
            ("aggressive", "most-frequent")
        );
        assert_eq!(factory.create_fallax(3, 1).strategy_names(), ("cheater", "most-frequent"));
    }
}

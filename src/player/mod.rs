//! @acp:module "Players"
//! @acp:summary "Player abstraction, hands and the human seat"
//! @acp:domain game
//! @acp:layer model
//!
//! Every seat implements [`Player`]. Bots decide on their own through
//! [`Player::decide`]; humans return `None` and their moves arrive through the
//! controller instead.

pub mod bot;

pub use bot::{Bot, BotFactory};

use serde::{Deserialize, Serialize};

use crate::deck::{Card, Color};
use crate::game::PlayerId;

/// What a player wants to do on their turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TurnAction {
    /// Play `card` from the hand; wild cards need `color`
    Play { card: Card, color: Option<Color> },
    /// Draw a card, or take the pending penalty
    Draw,
}

impl TurnAction {
    pub fn play(card: Card) -> Self {
        TurnAction::Play { card, color: None }
    }
}

/// What a seat knows about another seat when deciding
#[derive(Debug, Clone)]
pub struct OpponentView {
    pub id: PlayerId,
    /// Full hand; honest strategies only look at its length
    pub cards: Vec<Card>,
}

/// Snapshot handed to [`Player::decide`]
#[derive(Debug, Clone)]
pub struct TurnContext {
    pub top_card: Card,
    /// Pending penalty, zero when none
    pub malus: u32,
    pub opponents: Vec<OpponentView>,
}

impl TurnContext {
    pub fn malus_active(&self) -> bool {
        self.malus > 0
    }

    pub fn opponent(&self, id: PlayerId) -> Option<&OpponentView> {
        self.opponents.iter().find(|o| o.id == id)
    }
}

/// Cards held by one seat
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn add(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Remove one copy of `card`
    pub fn remove(&mut self, card: &Card) -> Option<Card> {
        let index = self.cards.iter().position(|c| c == card)?;
        Some(self.cards.remove(index))
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn points(&self) -> u32 {
        self.cards.iter().map(Card::points).sum()
    }

    /// How many cards of each playable color the hand holds
    pub fn color_counts(&self) -> [(Color, usize); 4] {
        Color::PLAYABLE.map(|color| {
            let count = self.cards.iter().filter(|c| c.color() == color).count();
            (color, count)
        })
    }
}

/// @acp:summary "A seat at the table"
pub trait Player: Send {
    fn id(&self) -> PlayerId;

    /// Display name
    fn label(&self) -> &str;

    fn hand(&self) -> &Hand;

    fn hand_mut(&mut self) -> &mut Hand;

    fn is_bot(&self) -> bool;

    /// Pick an action for the current turn; `None` means the decision comes from outside
    fn decide(&mut self, ctx: &TurnContext) -> Option<TurnAction>;

    /// Told after each attempted play whether the rules accepted it
    fn notify_move_result(&mut self, card: &Card, accepted: bool) {
        let _ = (card, accepted);
    }

    /// The turn ended without the player's own choice; forget per-turn state
    fn reset_turn(&mut self) {}

    fn add_cards(&mut self, cards: Vec<Card>) {
        self.hand_mut().add(cards);
    }
}

/// Seat driven by a person through a view
#[derive(Debug, Clone)]
pub struct HumanPlayer {
    id: PlayerId,
    label: String,
    hand: Hand,
}

impl HumanPlayer {
    pub fn new(id: PlayerId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            hand: Hand::new(),
        }
    }
}

impl Player for HumanPlayer {
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
        false
    }

    fn decide(&mut self, _ctx: &TurnContext) -> Option<TurnAction> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Value;

    #[test]
    fn test_hand_remove_single_copy() {
        let mut hand = Hand::new();
        let five = Card::new(Color::Red, Value::Five);
        hand.add([five.clone(), five.clone(), Card::new(Color::Blue, Value::One)]);

        assert_eq!(hand.remove(&five), Some(five.clone()));
        assert_eq!(hand.len(), 2);
        assert!(hand.contains(&five));
        assert_eq!(hand.remove(&Card::new(Color::Green, Value::One)), None);
    }

    #[test]
    fn test_color_counts_and_points() {
        let mut hand = Hand::new();
        hand.add([
            Card::new(Color::Red, Value::Five),
            Card::new(Color::Red, Value::Skip),
            Card::new(Color::Blue, Value::Two),
        ]);
        assert_eq!(hand.color_counts()[0], (Color::Red, 2));
        assert_eq!(hand.points(), 27);
    }

    #[test]
    fn test_human_never_decides() {
        let mut human = HumanPlayer::new(1, "You");
        let ctx = TurnContext {
            top_card: Card::new(Color::Red, Value::One),
            malus: 0,
            opponents: Vec::new(),
        };
        assert!(human.decide(&ctx).is_none());
        assert!(!human.is_bot());
    }
}

//! @acp:module "Card Types"
//! @acp:summary "Colors, values, effects and the immutable card type"
//! @acp:domain game
//! @acp:layer model

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Card color. `Black` marks a wild card that has not been given a color yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
    Black,
}

impl Color {
    /// Colors a wild card may be turned into
    pub const PLAYABLE: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];

    pub fn name(&self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Yellow => "Yellow",
            Color::Green => "Green",
            Color::Blue => "Blue",
            Color::Black => "Black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Face value of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

impl Value {
    /// Points a card of this value is worth when left in a hand at the end of a game
    pub fn points(&self) -> u32 {
        match self {
            Value::Zero => 0,
            Value::One => 1,
            Value::Two => 2,
            Value::Three => 3,
            Value::Four => 4,
            Value::Five => 5,
            Value::Six => 6,
            Value::Seven => 7,
            Value::Eight => 8,
            Value::Nine => 9,
            Value::Skip | Value::Reverse | Value::DrawTwo => 20,
            Value::Wild | Value::WildDrawFour => 50,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(
            self,
            Value::Zero
                | Value::One
                | Value::Two
                | Value::Three
                | Value::Four
                | Value::Five
                | Value::Six
                | Value::Seven
                | Value::Eight
                | Value::Nine
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Value::Zero => "0",
            Value::One => "1",
            Value::Two => "2",
            Value::Three => "3",
            Value::Four => "4",
            Value::Five => "5",
            Value::Six => "6",
            Value::Seven => "7",
            Value::Eight => "8",
            Value::Nine => "9",
            Value::Skip => "Skip",
            Value::Reverse => "Reverse",
            Value::DrawTwo => "Draw Two",
            Value::Wild => "Wild",
            Value::WildDrawFour => "Wild Draw Four",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Special behaviour carried by a card, independent of its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardEffect {
    /// The next seat loses its turn
    SkipNext,
    /// Turn order flips direction
    ReverseTurn,
    /// The player declares the card's color when playing it
    ChangeColor,
    /// Can be played on top of anything
    AlwaysPlayable,
}

/// @acp:summary "Immutable playing card"
///
/// Effects and draw amount are data, not derived from the value, so custom decks can
/// attach any behaviour to any face.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "CardRecord")]
pub struct Card {
    color: Color,
    value: Value,
    draw_amount: u32,
    effects: BTreeSet<CardEffect>,
    native_black: bool,
}

/// Card as read from JSON; a missing `native_black` follows the color
#[derive(Deserialize)]
struct CardRecord {
    color: Color,
    value: Value,
    #[serde(default)]
    draw_amount: u32,
    #[serde(default)]
    effects: BTreeSet<CardEffect>,
    native_black: Option<bool>,
}

impl From<CardRecord> for Card {
    fn from(record: CardRecord) -> Self {
        Self {
            native_black: record.native_black.unwrap_or(record.color == Color::Black),
            color: record.color,
            value: record.value,
            draw_amount: record.draw_amount,
            effects: record.effects,
        }
    }
}

impl Card {
    /// Plain card without effects
    pub fn new(color: Color, value: Value) -> Self {
        Self::with_effects(color, value, 0, [] as [CardEffect; 0])
    }

    /// Card with an explicit draw amount and effect set
    pub fn with_effects(
        color: Color,
        value: Value,
        draw_amount: u32,
        effects: impl IntoIterator<Item = CardEffect>,
    ) -> Self {
        Self {
            color,
            value,
            draw_amount,
            effects: effects.into_iter().collect(),
            native_black: color == Color::Black,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn value(&self) -> Value {
        self.value
    }

    /// Cards the next player must take unless they defend
    pub fn draw_amount(&self) -> u32 {
        self.draw_amount
    }

    pub fn effects(&self) -> impl Iterator<Item = CardEffect> + '_ {
        self.effects.iter().copied()
    }

    pub fn has_effect(&self, effect: CardEffect) -> bool {
        self.effects.contains(&effect)
    }

    /// Whether the card was printed black, even if it has since been colored
    pub fn is_native_black(&self) -> bool {
        self.native_black
    }

    /// Copy of this card with another color; everything else is preserved
    pub fn with_color(&self, color: Color) -> Self {
        Self {
            color,
            ..self.clone()
        }
    }

    /// The card as it was printed, undoing any declared color
    pub fn restored(&self) -> Self {
        if self.native_black {
            self.with_color(Color::Black)
        } else {
            self.clone()
        }
    }

    pub fn points(&self) -> u32 {
        self.value.points()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.native_black, self.color) {
            (true, Color::Black) => write!(f, "{}", self.value),
            (true, color) => write!(f, "{} ({})", self.value, color),
            (false, color) => write!(f, "{} {}", color, self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialized_black_card_is_native_black() {
        let card: Card = serde_json::from_str(
            r#"{"color":"black","value":"wild","effects":["change_color","always_playable"]}"#,
        )
        .unwrap();
        assert!(card.is_native_black());

        let recolored = card.with_color(Color::Green);
        let json = serde_json::to_string(&recolored).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, recolored);
        assert_eq!(back.restored(), card);
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::new(Color::Red, Value::Seven).to_string(), "Red 7");
        let wild = Card::with_effects(Color::Black, Value::Wild, 0, [CardEffect::ChangeColor]);
        assert_eq!(wild.to_string(), "Wild");
        assert_eq!(wild.with_color(Color::Green).to_string(), "Wild (Green)");
    }

    #[test]
    fn test_restored_resets_wild_color() {
        let wild = Card::with_effects(Color::Black, Value::Wild, 0, [CardEffect::ChangeColor]);
        let blue = wild.with_color(Color::Blue);
        assert_ne!(blue, wild);
        assert_eq!(blue.restored(), wild);

        let plain = Card::new(Color::Yellow, Value::Two);
        assert_eq!(plain.restored(), plain);
    }

    #[test]
    fn test_points() {
        assert_eq!(Value::Nine.points(), 9);
        assert_eq!(Value::DrawTwo.points(), 20);
        assert_eq!(Value::WildDrawFour.points(), 50);
        assert!(Value::Zero.is_number());
        assert!(!Value::Skip.is_number());
    }
}

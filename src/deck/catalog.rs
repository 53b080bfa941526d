//! @acp:module "Deck Catalog"
//! @acp:summary "Data-driven card definitions loaded from JSON or YAML"
//! @acp:domain game
//! @acp:layer data
//!
//! The standard 108 card deck is embedded at compile time. Custom decks use the
//! same format and may attach any draw amount or effect to any face.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::card::{Card, CardEffect, Color, Value};
use crate::error::{PrimusError, Result};

const STANDARD_DECK: &str = include_str!("../../assets/deck.json");

/// Largest penalty a single card may carry
pub const MAX_DRAW_AMOUNT: u32 = 100;

/// Largest number of copies of one entry per color
pub const MAX_COPIES: u32 = 100;

fn default_copies() -> u32 {
    1
}

/// One line of a catalog: `copies` cards of `value` in each of `colors`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub colors: Vec<Color>,
    pub value: Value,
    #[serde(default = "default_copies")]
    pub copies: u32,
    #[serde(default)]
    pub draw_amount: u32,
    #[serde(default)]
    pub effects: Vec<CardEffect>,
}

/// @acp:summary "Named set of card definitions"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCatalog {
    pub name: String,
    pub entries: Vec<CatalogEntry>,
}

impl DeckCatalog {
    /// The embedded standard deck
    pub fn standard() -> Result<Self> {
        Self::from_json(STANDARD_DECK)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let catalog: Self = serde_yaml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog file, picking the format from its extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Err(PrimusError::UnsupportedDeckFormat(path.to_path_buf())),
        }
    }

    /// Load `path` if given, otherwise the standard deck
    pub fn load_or_standard(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Self::standard(),
        }
    }

    /// Check the structural rules every catalog must follow
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(PrimusError::InvalidDeck(format!(
                "catalog '{}' has no entries",
                self.name
            )));
        }

        for entry in &self.entries {
            if entry.copies == 0 {
                return Err(PrimusError::InvalidDeck(format!(
                    "{} entry has zero copies",
                    entry.value
                )));
            }
            if entry.copies > MAX_COPIES {
                return Err(PrimusError::InvalidDeck(format!(
                    "{} entry has {} copies, at most {} allowed",
                    entry.value, entry.copies, MAX_COPIES
                )));
            }
            if entry.draw_amount > MAX_DRAW_AMOUNT {
                return Err(PrimusError::InvalidDeck(format!(
                    "{} entry draws {} cards, at most {} allowed",
                    entry.value, entry.draw_amount, MAX_DRAW_AMOUNT
                )));
            }
            if entry.colors.is_empty() {
                return Err(PrimusError::InvalidDeck(format!(
                    "{} entry lists no colors",
                    entry.value
                )));
            }

            let changes_color = entry.effects.contains(&CardEffect::ChangeColor);
            for color in &entry.colors {
                match (color, changes_color) {
                    (Color::Black, false) => {
                        return Err(PrimusError::InvalidDeck(format!(
                            "black {} must carry change_color",
                            entry.value
                        )));
                    }
                    (c, true) if *c != Color::Black => {
                        return Err(PrimusError::InvalidDeck(format!(
                            "{} {} cannot carry change_color",
                            c, entry.value
                        )));
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Expand entries into individual cards, in catalog order
    pub fn cards(&self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(self.size());
        for entry in &self.entries {
            for color in &entry.colors {
                for _ in 0..entry.copies {
                    cards.push(Card::with_effects(
                        *color,
                        entry.value,
                        entry.draw_amount,
                        entry.effects.iter().copied(),
                    ));
                }
            }
        }
        cards
    }

    /// Number of cards the catalog expands to
    pub fn size(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.colors.len() * e.copies as usize)
            .sum()
    }

    /// SHA-256 of the canonical JSON form
    pub fn fingerprint(&self) -> Result<String> {
        let canonical = serde_json::to_vec(self)?;
        Ok(format!("{:x}", Sha256::digest(&canonical)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_deck_size() {
        let catalog = DeckCatalog::standard().unwrap();
        assert_eq!(catalog.size(), 108);
        assert_eq!(catalog.cards().len(), 108);
    }

    #[test]
    fn test_black_entry_without_change_color_is_rejected() {
        let yaml = r#"
name: broken
entries:
  - colors: [black]
    value: wild
    copies: 4
"#;
        let err = DeckCatalog::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, PrimusError::InvalidDeck(_)));
    }

    #[test]
    fn test_colored_change_color_is_rejected() {
        let json = r#"{"name":"x","entries":[{"colors":["red"],"value":"seven","effects":["change_color"]}]}"#;
        assert!(DeckCatalog::from_json(json).is_err());
    }

    #[test]
    fn test_zero_copies_is_rejected() {
        let json = r#"{"name":"x","entries":[{"colors":["red"],"value":"seven","copies":0}]}"#;
        assert!(DeckCatalog::from_json(json).is_err());
    }

    #[test]
    fn test_oversized_draw_amount_is_rejected() {
        let json = r#"{"name":"x","entries":[{"colors":["red"],"value":"draw_two","draw_amount":3000000000}]}"#;
        assert!(matches!(
            DeckCatalog::from_json(json),
            Err(PrimusError::InvalidDeck(_))
        ));

        let at_limit = format!(
            r#"{{"name":"x","entries":[{{"colors":["red"],"value":"draw_two","draw_amount":{}}}]}}"#,
            MAX_DRAW_AMOUNT
        );
        assert!(DeckCatalog::from_json(&at_limit).is_ok());
    }

    #[test]
    fn test_oversized_copies_is_rejected() {
        let json = r#"{"name":"x","entries":[{"colors":["red"],"value":"seven","copies":4000000000}]}"#;
        assert!(matches!(
            DeckCatalog::from_json(json),
            Err(PrimusError::InvalidDeck(_))
        ));
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let a = DeckCatalog::standard().unwrap();
        let b = DeckCatalog::standard().unwrap();
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
        assert_eq!(a.fingerprint().unwrap().len(), 64);
    }

    #[test]
    fn test_yaml_defaults() {
        let yaml = r#"
name: tiny
entries:
  - colors: [red, blue]
    value: five
"#;
        let catalog = DeckCatalog::from_yaml(yaml).unwrap();
        assert_eq!(catalog.size(), 2);
        assert_eq!(catalog.cards()[1], Card::new(Color::Blue, Value::Five));
    }
}

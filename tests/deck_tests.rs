//! Deck integration tests
//!
//! Standard catalog, draw deck, drop pile and data-driven card properties.

use primus::deck::{Card, CardEffect, Color, Deck, DeckCatalog, DropPile, Value};
use primus::PrimusError;

const STANDARD_DECK_SIZE: usize = 108;

fn standard_deck(seed: u64) -> Deck {
    Deck::new(DeckCatalog::standard().unwrap().cards(), seed)
}

fn drain(deck: &mut Deck) -> Vec<Card> {
    let mut drawn = Vec::new();
    while let Ok(card) = deck.draw_card() {
        drawn.push(card);
    }
    drawn
}

// =============================================================================
// Draw deck
// =============================================================================

mod draw_deck_tests {
    use super::*;

    #[test]
    fn test_standard_deck_has_108_cards() {
        let deck = standard_deck(1);
        assert_eq!(deck.size(), STANDARD_DECK_SIZE);
        assert!(!deck.is_empty());
    }

    #[test]
    fn test_draw_reduces_size() {
        let mut deck = standard_deck(2);
        deck.draw_card().unwrap();
        assert_eq!(deck.size(), STANDARD_DECK_SIZE - 1);
    }

    #[test]
    fn test_draw_from_empty_deck_fails() {
        let mut deck = standard_deck(3);
        assert_eq!(drain(&mut deck).len(), STANDARD_DECK_SIZE);
        assert!(deck.is_empty());
        assert!(matches!(deck.draw_card(), Err(PrimusError::EmptyDeck)));
    }

    #[test]
    fn test_init_restores_full_deck() {
        let mut deck = standard_deck(4);
        drain(&mut deck);
        deck.init();
        assert_eq!(deck.size(), STANDARD_DECK_SIZE);
    }

    #[test]
    fn test_refill_from_drop_pile() {
        let mut deck = standard_deck(5);
        drain(&mut deck);

        let mut pile = DropPile::new(Card::new(Color::Yellow, Value::One));
        for _ in 0..9 {
            pile.add_card(Card::new(Color::Yellow, Value::One));
        }
        assert_eq!(pile.size(), 10);

        deck.refill_from(&mut pile);
        assert_eq!(deck.size(), 9);
        assert_eq!(pile.size(), 1);
        assert!(!deck.is_empty());
    }
}

// =============================================================================
// Drop pile
// =============================================================================

mod drop_pile_tests {
    use super::*;

    #[test]
    fn test_extract_all_except_top() {
        let c1 = Card::new(Color::Red, Value::Five);
        let c2 = Card::new(Color::Blue, Value::Two);
        let top = Card::with_effects(Color::Green, Value::Skip, 0, [CardEffect::SkipNext]);

        let mut pile = DropPile::new(c1.clone());
        pile.add_card(c2.clone());
        pile.add_card(top.clone());

        let recycled = pile.extract_all_except_top();
        assert_eq!(recycled, vec![c1, c2]);
        assert!(!recycled.contains(&top));
        assert_eq!(pile.peek(), &top);
    }
}

// =============================================================================
// Card properties from the catalog
// =============================================================================

mod card_property_tests {
    use super::*;

    fn find(value: Value) -> Card {
        let mut deck = standard_deck(6);
        drain(&mut deck)
            .into_iter()
            .find(|c| c.value() == value)
            .unwrap()
    }

    #[test]
    fn test_draw_two_properties() {
        let card = find(Value::DrawTwo);
        assert_eq!(card.draw_amount(), 2);
        assert!(card.has_effect(CardEffect::SkipNext));
        assert!(!card.has_effect(CardEffect::AlwaysPlayable));
    }

    #[test]
    fn test_wild_draw_four_properties() {
        let card = find(Value::WildDrawFour);
        assert_eq!(card.color(), Color::Black);
        assert_eq!(card.draw_amount(), 4);
        assert!(card.has_effect(CardEffect::ChangeColor));
        assert!(card.has_effect(CardEffect::SkipNext));
        assert!(card.has_effect(CardEffect::AlwaysPlayable));
    }

    #[test]
    fn test_number_cards_have_no_effects() {
        let card = find(Value::Seven);
        assert_eq!(card.draw_amount(), 0);
        assert_eq!(card.effects().count(), 0);
    }

    #[test]
    fn test_custom_card_keeps_its_data() {
        let chaos = Card::with_effects(
            Color::Red,
            Value::Nine,
            10,
            [CardEffect::ReverseTurn, CardEffect::SkipNext],
        );
        assert_eq!(chaos.draw_amount(), 10);
        assert!(chaos.has_effect(CardEffect::ReverseTurn));
        assert!(chaos.has_effect(CardEffect::SkipNext));
        assert!(!chaos.has_effect(CardEffect::ChangeColor));
    }

    #[test]
    fn test_recolor_keeps_properties() {
        let wild = find(Value::WildDrawFour);
        let green = wild.with_color(Color::Green);

        assert_eq!(green.color(), Color::Green);
        assert_eq!(green.value(), Value::WildDrawFour);
        assert_eq!(green.draw_amount(), 4);
        assert!(green.has_effect(CardEffect::ChangeColor));
        assert!(green.is_native_black());
        assert_eq!(green.restored(), wild);
    }
}

// =============================================================================
// Catalog files
// =============================================================================

mod catalog_file_tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_yaml_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mini.yaml");
        fs::write(
            &path,
            r#"
name: mini
entries:
  - colors: [red, blue]
    value: one
    copies: 3
  - colors: [black]
    value: wild
    copies: 2
    effects: [change_color, always_playable]
"#,
        )
        .unwrap();

        let catalog = DeckCatalog::load(&path).unwrap();
        assert_eq!(catalog.name, "mini");
        assert_eq!(catalog.size(), 8);
        assert_eq!(catalog.cards().len(), 8);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.csv");
        fs::write(&path, "red,one,2").unwrap();

        assert!(matches!(
            DeckCatalog::load(&path),
            Err(PrimusError::UnsupportedDeckFormat(_))
        ));
    }

    #[test]
    fn test_black_card_without_color_change_is_invalid() {
        let json = r#"{"name":"bad","entries":[{"colors":["black"],"value":"wild","copies":1}]}"#;
        assert!(matches!(
            DeckCatalog::from_json(json),
            Err(PrimusError::InvalidDeck(_))
        ));
    }
}

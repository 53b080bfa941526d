//! @acp:module "Deck"
//! @acp:summary "Cards, catalogs, draw deck and discard pile"
//! @acp:domain game
//! @acp:layer model

pub mod card;
pub mod catalog;
pub mod pile;

pub use card::{Card, CardEffect, Color, Value};
pub use catalog::{CatalogEntry, DeckCatalog};
pub use pile::{Deck, DropPile};

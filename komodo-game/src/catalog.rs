//! Static card catalog: embedded definitions, lookup, and duel pairing.

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;

use crate::card::Card;

pub(crate) const DEFAULT_CARD_DATA: &str = include_str!("../assets/data/cards.json");

/// Errors raised when card data violates load-time invariants.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("card data malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate card id '{id}'")]
    DuplicateId { id: String },
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    cards: Vec<Card>,
}

/// Immutable ordered card catalog with unique ids.
///
/// Order is load order and never changes at runtime, so positional rules
/// (duel pairing) stay reproducible for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CardCatalog {
    cards: Vec<Card>,
}

impl CardCatalog {
    /// Create an empty catalog (useful for tests).
    #[must_use]
    pub const fn empty() -> Self {
        Self { cards: Vec::new() }
    }

    /// Build a catalog from pre-parsed cards, enforcing id uniqueness.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` when two cards share an id.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for card in &cards {
            if !seen.insert(card.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    id: card.id.clone(),
                });
            }
        }
        Ok(Self { cards })
    }

    /// Load a catalog from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or ids collide.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_cards(file.cards)
    }

    /// Load the embedded card data shipped with the crate.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_CARD_DATA).unwrap_or_default()
    }

    /// Shared instance of the embedded catalog, parsed once.
    #[must_use]
    pub fn default_catalog() -> &'static Self {
        static CATALOG: OnceLock<CardCatalog> = OnceLock::new();
        CATALOG.get_or_init(Self::load_from_static)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }

    #[must_use]
    pub fn card_at(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Opponent paired with the given card: the next catalog entry, wrapping
    /// around at the end. Returns `None` for ids not in the catalog.
    #[must_use]
    pub fn duel_opponent(&self, player_id: &str) -> Option<&Card> {
        let index = self.index_of(player_id)?;
        self.cards.get((index + 1) % self.cards.len())
    }
}

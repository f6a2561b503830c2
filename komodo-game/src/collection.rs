//! Player card collection: insertion-ordered and deduplicated by card id.

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::rewards::RewardBatch;

/// An owned set of cards in acquisition order.
///
/// Ids are unique; merging keeps the first copy of a card and drops later
/// ones, so reward batches can be applied without pre-filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Collection {
    cards: Vec<Card>,
}

impl Collection {
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
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
    pub fn owns(&self, card_id: &str) -> bool {
        self.cards.iter().any(|card| card.id == card_id)
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Merge a reward batch into the collection, keeping batch order and
    /// dropping cards already owned. Returns how many cards were added.
    pub fn merge(&mut self, batch: RewardBatch) -> usize {
        let mut added = 0;
        for card in batch.cards {
            if self.owns(&card.id) {
                continue;
            }
            self.cards.push(card);
            added += 1;
        }
        added
    }

    /// Remove a card by id. Returns whether anything was removed.
    pub fn remove(&mut self, card_id: &str) -> bool {
        let before = self.cards.len();
        self.cards.retain(|card| card.id != card_id);
        self.cards.len() != before
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardStats, CardType, Rarity};

    fn sample_card(id: &str) -> Card {
        Card {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            image: String::new(),
            rarity: Rarity::Common,
            card_type: CardType::Balanced,
            stats: CardStats::default(),
            habitat: String::new(),
            ability: String::new(),
        }
    }

    fn batch_of(ids: &[&str]) -> RewardBatch {
        RewardBatch {
            cards: ids.iter().map(|id| sample_card(id)).collect(),
            rarity_bonus: 0.1,
        }
    }

    #[test]
    fn merge_appends_in_batch_order() {
        let mut collection = Collection::new();
        let added = collection.merge(batch_of(&["alpha", "beta", "gamma"]));
        assert_eq!(added, 3);
        let ids: Vec<&str> = collection.iter().map(|card| card.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn merge_drops_already_owned_ids() {
        let mut collection = Collection::new();
        collection.merge(batch_of(&["alpha", "beta"]));
        let added = collection.merge(batch_of(&["beta", "gamma", "alpha"]));
        assert_eq!(added, 1);
        assert_eq!(collection.len(), 3);
        assert!(collection.owns("gamma"));
    }

    #[test]
    fn merge_deduplicates_within_a_single_batch() {
        let mut collection = Collection::new();
        let added = collection.merge(batch_of(&["alpha", "alpha", "alpha"]));
        assert_eq!(added, 1);
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn remove_takes_out_exactly_one_id() {
        let mut collection = Collection::new();
        collection.merge(batch_of(&["alpha", "beta"]));
        assert!(collection.remove("alpha"));
        assert!(!collection.owns("alpha"));
        assert_eq!(collection.len(), 1);
        assert!(!collection.remove("alpha"), "second removal finds nothing");
    }

    #[test]
    fn serializes_as_a_plain_card_array() {
        let mut collection = Collection::new();
        collection.merge(batch_of(&["alpha"]));
        let json = serde_json::to_value(&collection).expect("collection serializes");
        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), 1);

        let back: Collection = serde_json::from_value(json).expect("collection deserializes");
        assert_eq!(back, collection);
    }
}

//! Reward selection: shuffled pack draws with an advisory rarity roll.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::catalog::CardCatalog;
#[cfg(debug_assertions)]
use crate::constants::DEBUG_ENV_VAR;
use crate::constants::{
    PACK_SIZE, ROLL_EPIC_THRESHOLD, ROLL_LEGENDARY_THRESHOLD, ROLL_RARE_THRESHOLD,
    ROLL_UNCOMMON_THRESHOLD, STANDARD_PACK_RARITY_BONUS,
};

#[cfg(debug_assertions)]
fn debug_log_enabled() -> bool {
    matches!(std::env::var(DEBUG_ENV_VAR), Ok(val) if val != "0")
}

#[cfg(not(debug_assertions))]
const fn debug_log_enabled() -> bool {
    false
}

/// Tier classification of a single rarity roll.
///
/// The roll is `uniform[0,1) + rarity_bonus`, so a bonus shifts draws toward
/// the higher tiers. Selection itself is a uniform shuffle; the tier is an
/// eligibility signal attached to each draw, not a filter over the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RollTier {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl RollTier {
    fn from_roll(roll: f64) -> Self {
        if roll > ROLL_LEGENDARY_THRESHOLD {
            Self::Legendary
        } else if roll > ROLL_EPIC_THRESHOLD {
            Self::Epic
        } else if roll > ROLL_RARE_THRESHOLD {
            Self::Rare
        } else if roll > ROLL_UNCOMMON_THRESHOLD {
            Self::Uncommon
        } else {
            Self::Common
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }
}

/// An ephemeral batch of drawn cards plus the bonus that produced it.
///
/// The batch is owned by the caller until merged into a collection; nothing
/// is mutated by the draw itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RewardBatch {
    pub cards: Vec<Card>,
    pub rarity_bonus: f64,
}

impl RewardBatch {
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Draw `count` distinct cards from the catalog.
///
/// The catalog order is shuffled and the first `count` entries are taken, so
/// a batch never repeats a card and `count` beyond the catalog size clamps
/// silently. Each drawn card gets a rarity roll of `uniform[0,1) +
/// rarity_bonus`; every tier currently admits the draw unchanged, which keeps
/// same-seed draws identical across any bonus value.
pub fn select_cards<R: Rng + ?Sized>(
    catalog: &CardCatalog,
    count: usize,
    rarity_bonus: f64,
    rng: &mut R,
) -> RewardBatch {
    let mut deck: Vec<Card> = catalog.cards().to_vec();
    deck.shuffle(rng);
    deck.truncate(count.min(catalog.len()));

    if debug_log_enabled() {
        println!(
            "Pack draw | requested:{count} drawn:{} bonus:{rarity_bonus:.2}",
            deck.len()
        );
    }

    let mut cards = Vec::with_capacity(deck.len());
    for card in deck {
        let roll = rng.r#gen::<f64>() + rarity_bonus;
        let tier = RollTier::from_roll(roll);
        if debug_log_enabled() {
            println!("Pack roll | card:{} roll:{roll:.3} tier:{}", card.id, tier.as_str());
        }
        let admitted = match tier {
            RollTier::Legendary => card,
            RollTier::Epic => card,
            RollTier::Rare => card,
            RollTier::Uncommon => card,
            RollTier::Common => card,
        };
        cards.push(admitted);
    }

    RewardBatch {
        cards,
        rarity_bonus,
    }
}

/// Draw a standard pack: three cards with the fixed store bonus.
pub fn open_standard_pack<R: Rng + ?Sized>(catalog: &CardCatalog, rng: &mut R) -> RewardBatch {
    select_cards(catalog, PACK_SIZE, STANDARD_PACK_RARITY_BONUS, rng)
}

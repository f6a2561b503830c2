//! Card data model: rarity tiers, combat archetypes, and stat blocks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rarity tier of a card, ordered from most to least frequent.
///
/// The derived `Ord` follows declaration order, so `Rarity::Common <
/// Rarity::Legendary` holds and collections can be sorted by scarcity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }

    /// Uppercase badge text shown on card frames.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Common => "COMMON",
            Self::Uncommon => "UNCOMMON",
            Self::Rare => "RARE",
            Self::Epic => "EPIC",
            Self::Legendary => "LEGENDARY",
        }
    }

    /// Hex accent color keyed to the tier.
    #[must_use]
    pub const fn accent_color(self) -> &'static str {
        match self {
            Self::Common => "#B8C1B8",
            Self::Uncommon => "#4ADE80",
            Self::Rare => "#60A5FA",
            Self::Epic => "#A78BFA",
            Self::Legendary => "#FF6F2C",
        }
    }

    pub const ALL: [Self; 5] = [
        Self::Common,
        Self::Uncommon,
        Self::Rare,
        Self::Epic,
        Self::Legendary,
    ];
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "common" => Ok(Self::Common),
            "uncommon" => Ok(Self::Uncommon),
            "rare" => Ok(Self::Rare),
            "epic" => Ok(Self::Epic),
            "legendary" => Ok(Self::Legendary),
            _ => Err(()),
        }
    }
}

impl From<Rarity> for String {
    fn from(value: Rarity) -> Self {
        value.as_str().to_string()
    }
}

/// Combat archetype determining a card's role in duels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Tank,
    Rogue,
    #[default]
    Balanced,
}

impl CardType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tank => "tank",
            Self::Rogue => "rogue",
            Self::Balanced => "balanced",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tank" => Ok(Self::Tank),
            "rogue" => Ok(Self::Rogue),
            "balanced" => Ok(Self::Balanced),
            _ => Err(()),
        }
    }
}

/// The five combat stats carried by every card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CardStats {
    pub attack: i32,
    pub defense: i32,
    pub hp: i32,
    pub energy: i32,
    pub speed: i32,
}

/// A single collectible creature card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub rarity: Rarity,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub stats: CardStats,
    pub habitat: String,
    pub ability: String,
}

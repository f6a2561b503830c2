//! Battle resolution: deterministic composite-score duels between two cards.

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::constants::{
    DUEL_DRAW_FACTOR, DUEL_HP_SCALE, DUEL_LOSER_GRAZE_FACTOR, DUEL_OFFENSE_WEIGHT,
    DUEL_RESILIENCE_WEIGHT, DUEL_WINNER_STRIKE_FACTOR,
};
use crate::numbers::floor_f64_to_i32;

/// Offensive power of a card: attack plus speed.
#[must_use]
pub fn power(card: &Card) -> f64 {
    f64::from(card.stats.attack) + f64::from(card.stats.speed)
}

/// Defensive rating of a card: defense plus half its hit points.
#[must_use]
pub fn defense_score(card: &Card) -> f64 {
    f64::from(card.stats.defense) + f64::from(card.stats.hp) * DUEL_HP_SCALE
}

/// Composite duel score weighting offense over defense.
///
/// Kept in full `f64` precision; no rounding happens before comparison, so
/// a draw requires exact score equality.
#[must_use]
pub fn composite_score(card: &Card) -> f64 {
    power(card) * DUEL_OFFENSE_WEIGHT + defense_score(card) * DUEL_RESILIENCE_WEIGHT
}

/// Which side took the duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleWinner {
    Player,
    Opponent,
    Draw,
}

/// Outcome of a resolved duel.
///
/// Damage fields record what each side receives: the winner strikes for 80%
/// of its own power and takes a 30% graze back from the loser; a draw costs
/// each side half its own power. All damage floors to whole points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub winner: BattleWinner,
    pub player_damage: i32,
    pub opponent_damage: i32,
    pub headline: String,
}

/// Resolve a duel between the player's card and the opponent's card.
///
/// Pure and idempotent: identical cards in always produce the identical
/// outcome, including the headline.
#[must_use]
pub fn resolve_battle(player: &Card, opponent: &Card) -> BattleOutcome {
    let player_score = composite_score(player);
    let opponent_score = composite_score(opponent);
    let player_power = power(player);
    let opponent_power = power(opponent);

    if player_score > opponent_score {
        BattleOutcome {
            winner: BattleWinner::Player,
            player_damage: floor_f64_to_i32(opponent_power * DUEL_LOSER_GRAZE_FACTOR),
            opponent_damage: floor_f64_to_i32(player_power * DUEL_WINNER_STRIKE_FACTOR),
            headline: format!("{} dominates with a powerful strike!", player.name),
        }
    } else if opponent_score > player_score {
        BattleOutcome {
            winner: BattleWinner::Opponent,
            player_damage: floor_f64_to_i32(opponent_power * DUEL_WINNER_STRIKE_FACTOR),
            opponent_damage: floor_f64_to_i32(player_power * DUEL_LOSER_GRAZE_FACTOR),
            headline: format!("{} counters with devastating force!", opponent.name),
        }
    } else {
        BattleOutcome {
            winner: BattleWinner::Draw,
            player_damage: floor_f64_to_i32(player_power * DUEL_DRAW_FACTOR),
            opponent_damage: floor_f64_to_i32(opponent_power * DUEL_DRAW_FACTOR),
            headline: String::from("It's a fierce stalemate!"),
        }
    }
}

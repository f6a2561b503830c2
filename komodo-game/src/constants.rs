//! Centralized balance and tuning constants for Komodo Kingdom game logic.
//!
//! These values define the deterministic math for packs, quizzes, and duels.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! JSON assets.

// Logging keys -------------------------------------------------------------
pub(crate) const DEBUG_ENV_VAR: &str = "KOMODO_DEBUG_LOGS";

// Pack tuning --------------------------------------------------------------
pub(crate) const PACK_SIZE: usize = 3;
pub(crate) const STANDARD_PACK_RARITY_BONUS: f64 = 0.1;
pub(crate) const ROLL_LEGENDARY_THRESHOLD: f64 = 0.95;
pub(crate) const ROLL_EPIC_THRESHOLD: f64 = 0.85;
pub(crate) const ROLL_RARE_THRESHOLD: f64 = 0.70;
pub(crate) const ROLL_UNCOMMON_THRESHOLD: f64 = 0.50;

// Quiz tuning --------------------------------------------------------------
pub(crate) const QUIZ_LENGTH: usize = 3;
pub(crate) const QUIZ_SEED_STEP: usize = QUIZ_LENGTH;
pub(crate) const CORRECT_ANSWER_RARITY_BONUS: f64 = 0.15;
pub(crate) const OPTIONS_PER_QUESTION: usize = 4;

// Duel tuning --------------------------------------------------------------
pub(crate) const DUEL_OFFENSE_WEIGHT: f64 = 0.6;
pub(crate) const DUEL_RESILIENCE_WEIGHT: f64 = 0.4;
pub(crate) const DUEL_HP_SCALE: f64 = 0.5;
pub(crate) const DUEL_WINNER_STRIKE_FACTOR: f64 = 0.8;
pub(crate) const DUEL_LOSER_GRAZE_FACTOR: f64 = 0.3;
pub(crate) const DUEL_DRAW_FACTOR: f64 = 0.5;

#[cfg(test)]
pub(crate) const FLOAT_EPSILON: f64 = 1e-9;

//! Player profile and the live session wrapper binding it to RNG streams.

use serde::{Deserialize, Serialize};

use crate::catalog::CardCatalog;
use crate::collection::Collection;
#[cfg(debug_assertions)]
use crate::constants::DEBUG_ENV_VAR;
use crate::quiz::{QuizPhase, QuizSession};
use crate::rewards::{RewardBatch, open_standard_pack};
use crate::rng::RngStreams;

#[cfg(debug_assertions)]
fn debug_log_enabled() -> bool {
    matches!(std::env::var(DEBUG_ENV_VAR), Ok(val) if val != "0")
}

#[cfg(not(debug_assertions))]
const fn debug_log_enabled() -> bool {
    false
}

/// Persistent account data for one player.
///
/// Everything the store persists lives here; the RNG streams and any open
/// quiz belong to the session and die with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub collection: Collection,
    #[serde(default)]
    pub packs_opened: u32,
    #[serde(default)]
    pub quizzes_completed: u32,
    #[serde(default)]
    pub correct_answers: u32,
}

impl PlayerProfile {
    /// Fresh profile with an empty collection and zeroed counters.
    #[must_use]
    pub fn new(id: &str, username: &str, email: &str) -> Self {
        Self {
            id: id.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            collection: Collection::new(),
            packs_opened: 0,
            quizzes_completed: 0,
            correct_answers: 0,
        }
    }
}

/// A logged-in player: the profile plus the session's RNG streams.
///
/// Created on login and consumed on logout; engine components never reach
/// into it, they take plain parameters.
#[derive(Debug, Clone)]
pub struct PlayerSession {
    profile: PlayerProfile,
    rng: RngStreams,
}

impl PlayerSession {
    /// Open a session with entropy-seeded streams.
    #[must_use]
    pub fn new(profile: PlayerProfile) -> Self {
        Self {
            profile,
            rng: RngStreams::from_entropy(),
        }
    }

    /// Open a reproducible session from a user-visible seed.
    #[must_use]
    pub fn with_seed(profile: PlayerProfile, seed: u64) -> Self {
        Self {
            profile,
            rng: RngStreams::from_user_seed(seed),
        }
    }

    #[must_use]
    pub const fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    pub const fn profile_mut(&mut self) -> &mut PlayerProfile {
        &mut self.profile
    }

    #[must_use]
    pub const fn collection(&self) -> &Collection {
        &self.profile.collection
    }

    /// Borrow the session's RNG streams.
    #[must_use]
    pub const fn rng(&self) -> &RngStreams {
        &self.rng
    }

    /// Draw a standard three-card pack over the session's pack stream.
    ///
    /// The draw itself mutates nothing on the profile; the batch only counts
    /// once claimed.
    #[must_use]
    pub fn draw_standard_pack(&self, catalog: &CardCatalog) -> RewardBatch {
        open_standard_pack(catalog, &mut *self.rng.pack())
    }

    /// Claim a drawn batch: merge it into the collection and count the pack.
    /// Returns how many cards were new.
    pub fn claim(&mut self, batch: RewardBatch) -> usize {
        let added = self.profile.collection.merge(batch);
        self.profile.packs_opened = self.profile.packs_opened.saturating_add(1);
        if debug_log_enabled() {
            println!(
                "Collection merge | added:{added} owned:{} packs:{}",
                self.profile.collection.len(),
                self.profile.packs_opened
            );
        }
        added
    }

    /// Advance an open quiz, routing any completing reward draw through the
    /// session's quiz stream.
    pub fn advance_quiz(&self, quiz: &mut QuizSession, catalog: &CardCatalog) -> QuizPhase {
        quiz.advance(catalog, &mut *self.rng.quiz())
    }

    /// Record a finished quiz on the profile counters.
    pub fn record_quiz(&mut self, correct: u32) {
        self.profile.quizzes_completed = self.profile.quizzes_completed.saturating_add(1);
        self.profile.correct_answers = self.profile.correct_answers.saturating_add(correct);
    }

    /// Consume the session, returning the profile for persistence.
    #[must_use]
    pub fn into_profile(self) -> PlayerProfile {
        self.profile
    }
}

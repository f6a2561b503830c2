//! Komodo Kingdom Game Engine
//!
//! Platform-agnostic core game logic for the Komodo Kingdom trading-card game.
//! This crate provides pack draws, trivia rewards, and battle resolution
//! without UI or platform-specific dependencies.

pub mod battle;
pub mod card;
pub mod catalog;
pub mod collection;
pub mod constants;
pub mod numbers;
pub mod quiz;
pub mod rewards;
pub mod rng;
pub mod session;

// Re-export commonly used types
pub use battle::{BattleOutcome, BattleWinner, composite_score, power, resolve_battle};
pub use card::{Card, CardStats, CardType, Rarity};
pub use catalog::{CardCatalog, CatalogError};
pub use collection::Collection;
pub use quiz::{
    AnswerRecord, Difficulty, PackGrade, QuestionPool, QuizDataError, QuizPhase, QuizQuestion,
    QuizSession, pick_questions,
};
pub use rewards::{RewardBatch, open_standard_pack, select_cards};
pub use rng::{CountingRng, RngStreams};
pub use session::{PlayerProfile, PlayerSession};

use thiserror::Error;

/// Trait for abstracting static game-data loading
/// Platform-specific implementations should provide this
pub trait CatalogSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the card catalog from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the card data cannot be loaded or is malformed.
    fn load_catalog(&self) -> Result<CardCatalog, Self::Error>;

    /// Load the trivia question pool from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the question data cannot be loaded or is malformed.
    fn load_question_pool(&self) -> Result<QuestionPool, Self::Error>;
}

/// Trait for abstracting profile persistence
/// Platform-specific implementations should provide this
pub trait ProfileStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist a player profile
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be saved.
    fn save_profile(&self, profile: &PlayerProfile) -> Result<(), Self::Error>;

    /// Load a player profile by user id
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be loaded.
    fn load_profile(&self, user_id: &str) -> Result<Option<PlayerProfile>, Self::Error>;

    /// Delete a stored profile
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be deleted.
    fn delete_profile(&self, user_id: &str) -> Result<(), Self::Error>;
}

/// Errors from the embedded data source.
#[derive(Debug, Error)]
pub enum DataError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Quiz(#[from] QuizDataError),
}

/// Catalog source backed by the JSON assets embedded in the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinData;

impl CatalogSource for BuiltinData {
    type Error = DataError;

    fn load_catalog(&self) -> Result<CardCatalog, Self::Error> {
        Ok(CardCatalog::from_json(catalog::DEFAULT_CARD_DATA)?)
    }

    fn load_question_pool(&self) -> Result<QuestionPool, Self::Error> {
        Ok(QuestionPool::from_json(quiz::DEFAULT_QUESTION_DATA)?)
    }
}

/// Main game engine for managing player sessions
///
/// The catalog and question pool are loaded once at construction and never
/// change for the lifetime of the engine.
pub struct GameEngine<S>
where
    S: ProfileStore,
{
    catalog: CardCatalog,
    questions: QuestionPool,
    storage: S,
}

impl<S> GameEngine<S>
where
    S: ProfileStore,
{
    /// Create a new game engine, loading static data from the provided source
    ///
    /// # Errors
    ///
    /// Returns an error if the card catalog or question pool cannot be loaded.
    pub fn new<L: CatalogSource>(source: &L, storage: S) -> Result<Self, L::Error> {
        let catalog = source.load_catalog()?;
        let questions = source.load_question_pool()?;
        Ok(Self {
            catalog,
            questions,
            storage,
        })
    }

    #[must_use]
    pub const fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn question_pool(&self) -> &QuestionPool {
        &self.questions
    }

    /// Register a new player and open a session for them.
    ///
    /// The user id is the lowercased username with spaces collapsed to
    /// hyphens; the store keys profiles by this id.
    #[must_use]
    pub fn register(&self, username: &str, email: &str) -> PlayerSession {
        let id = slugify(username);
        PlayerSession::new(PlayerProfile::new(&id, username, email))
    }

    /// Open a session for a previously stored profile
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be loaded from storage.
    pub fn login(&self, user_id: &str) -> Result<Option<PlayerSession>, anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        let profile = self.storage.load_profile(user_id).map_err(Into::into)?;
        Ok(profile.map(PlayerSession::new))
    }

    /// Close a session, persisting its profile
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be saved.
    pub fn logout(&self, session: PlayerSession) -> Result<(), S::Error> {
        let profile = session.into_profile();
        self.storage.save_profile(&profile)
    }

    /// Start a trivia quiz over the engine's question pool.
    #[must_use]
    pub fn start_quiz(&self, seed: usize) -> QuizSession {
        QuizSession::new(&self.questions, seed)
    }

    /// Run a duel between the named card and its catalog-paired opponent.
    /// Returns `None` when the card is not in the catalog.
    #[must_use]
    pub fn duel(&self, player_card_id: &str) -> Option<BattleOutcome> {
        let player = self.catalog.get(player_card_id)?;
        let opponent = self.catalog.duel_opponent(player_card_id)?;
        Some(resolve_battle(player, opponent))
    }
}

fn slugify(username: &str) -> String {
    username
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

//! Trivia quiz engine: deterministic question picking and the answer
//! lock-in state machine that converts correct answers into pack rewards.

use std::sync::OnceLock;

use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::catalog::CardCatalog;
use crate::constants::{
    CORRECT_ANSWER_RARITY_BONUS, OPTIONS_PER_QUESTION, PACK_SIZE, QUIZ_LENGTH, QUIZ_SEED_STEP,
};
use crate::rewards::{RewardBatch, select_cards};

pub(crate) const DEFAULT_QUESTION_DATA: &str = include_str!("../assets/data/questions.json");

/// Difficulty tag carried by each question. Informational only; it never
/// changes scoring or rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// A single multiple-choice question with exactly four options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub difficulty: Difficulty,
}

/// Errors raised when question data violates load-time invariants.
#[derive(Debug, Error)]
pub enum QuizDataError {
    #[error("question data malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("question '{id}' has {count} options (expected {OPTIONS_PER_QUESTION})")]
    WrongOptionCount { id: String, count: usize },
    #[error("question '{id}' marks option {index} correct but only has {count} options")]
    AnswerOutOfRange {
        id: String,
        index: usize,
        count: usize,
    },
}

#[derive(Debug, Deserialize)]
struct QuestionFile {
    questions: Vec<QuizQuestion>,
}

/// Fixed ordered pool of quiz questions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionPool {
    questions: Vec<QuizQuestion>,
}

impl QuestionPool {
    /// Create an empty pool (useful for tests).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            questions: Vec::new(),
        }
    }

    /// Build a pool from pre-parsed questions, enforcing option-shape
    /// invariants.
    ///
    /// # Errors
    ///
    /// Returns an error when a question does not carry exactly four options
    /// or marks an out-of-range option as correct.
    pub fn from_questions(questions: Vec<QuizQuestion>) -> Result<Self, QuizDataError> {
        for question in &questions {
            if question.options.len() != OPTIONS_PER_QUESTION {
                return Err(QuizDataError::WrongOptionCount {
                    id: question.id.clone(),
                    count: question.options.len(),
                });
            }
            if question.correct_answer >= question.options.len() {
                return Err(QuizDataError::AnswerOutOfRange {
                    id: question.id.clone(),
                    index: question.correct_answer,
                    count: question.options.len(),
                });
            }
        }
        Ok(Self { questions })
    }

    /// Load a pool from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or a question is
    /// malformed.
    pub fn from_json(json: &str) -> Result<Self, QuizDataError> {
        let file: QuestionFile = serde_json::from_str(json)?;
        Self::from_questions(file.questions)
    }

    /// Load the embedded question data shipped with the crate.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_QUESTION_DATA).unwrap_or_default()
    }

    /// Shared instance of the embedded pool, parsed once.
    #[must_use]
    pub fn default_pool() -> &'static Self {
        static POOL: OnceLock<QuestionPool> = OnceLock::new();
        POOL.get_or_init(Self::load_from_static)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }
}

/// Pick `count` questions starting at `seed`, walking the pool in order and
/// wrapping around at the end. Same pool and seed always yield the same
/// questions; a short pool clamps the count.
#[must_use]
pub fn pick_questions(pool: &QuestionPool, count: usize, seed: usize) -> Vec<QuizQuestion> {
    let len = pool.len();
    if len == 0 {
        return Vec::new();
    }
    let base = seed % len;
    (0..count.min(len))
        .map(|offset| pool.questions[(base + offset) % len].clone())
        .collect()
}

/// Where a quiz session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizPhase {
    /// The pool was empty; no question was ever presented.
    NotReady,
    /// A question is on screen awaiting an answer or an advance.
    InProgress,
    /// All questions answered; the earned reward awaits collection.
    Complete,
}

/// One locked-in answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub choice: usize,
    pub correct: bool,
}

/// Answer records stored inline for quiz-length journals.
pub type AnswerJournal = SmallVec<[AnswerRecord; QUIZ_LENGTH]>;

/// Grade of the pack earned by a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackGrade {
    Standard,
    Rare,
    Legendary,
}

impl PackGrade {
    /// Grade for `correct` answers out of `total` questions: a perfect run
    /// earns legendary, two or more correct earns rare, anything else is
    /// standard.
    #[must_use]
    pub const fn from_results(correct: u32, total: u32) -> Self {
        if total > 0 && correct == total {
            Self::Legendary
        } else if correct >= 2 {
            Self::Rare
        } else {
            Self::Standard
        }
    }

    /// Result banner shown when the quiz wraps up.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Legendary => "Perfect score! You earned a Legendary Pack!",
            Self::Rare => "Great job! You earned a Rare Pack!",
            Self::Standard => "Good effort! You earned a Standard Pack!",
        }
    }
}

/// A single run through a three-question quiz.
///
/// Answers lock in on first submission; advancing past the final question
/// draws the reward pack and parks it on the session until taken.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSession {
    seed: usize,
    questions: Vec<QuizQuestion>,
    index: usize,
    answers: AnswerJournal,
    reward: Option<RewardBatch>,
    phase: QuizPhase,
}

impl QuizSession {
    /// Start a quiz at the given seed. An empty pool yields a `NotReady`
    /// session that ignores every operation.
    #[must_use]
    pub fn new(pool: &QuestionPool, seed: usize) -> Self {
        let questions = pick_questions(pool, QUIZ_LENGTH, seed);
        let phase = if questions.is_empty() {
            QuizPhase::NotReady
        } else {
            QuizPhase::InProgress
        };
        Self {
            seed,
            questions,
            index: 0,
            answers: AnswerJournal::new(),
            reward: None,
            phase,
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn seed(&self) -> usize {
        self.seed
    }

    /// The question currently awaiting an answer, if any.
    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        if self.phase == QuizPhase::InProgress {
            self.questions.get(self.index)
        } else {
            None
        }
    }

    /// Zero-based position of the current question.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// Number of correct answers locked in so far.
    #[must_use]
    pub fn correct_count(&self) -> u32 {
        let correct = self.answers.iter().filter(|record| record.correct).count();
        u32::try_from(correct).unwrap_or(u32::MAX)
    }

    /// Rarity bonus the finished quiz feeds into the reward draw.
    #[must_use]
    pub fn rarity_bonus(&self) -> f64 {
        f64::from(self.correct_count()) * CORRECT_ANSWER_RARITY_BONUS
    }

    /// Lock in an answer for the current question.
    ///
    /// The first submission records the choice and scores it; repeats return
    /// the recorded result unchanged. Out-of-range choices score as
    /// incorrect. Returns `None` when no question is awaiting an answer.
    pub fn submit_answer(&mut self, choice: usize) -> Option<AnswerRecord> {
        if self.phase != QuizPhase::InProgress {
            return None;
        }
        if let Some(recorded) = self.answers.get(self.index) {
            return Some(*recorded);
        }
        let question = self.questions.get(self.index)?;
        let record = AnswerRecord {
            choice,
            correct: choice == question.correct_answer,
        };
        self.answers.push(record);
        Some(record)
    }

    /// Move to the next question, or finish the quiz after the last one.
    ///
    /// Ignored while the current question is unanswered. Finishing draws
    /// `PACK_SIZE` cards with the earned rarity bonus and parks them on the
    /// session. Returns the phase after the call.
    pub fn advance<R: Rng + ?Sized>(&mut self, catalog: &CardCatalog, rng: &mut R) -> QuizPhase {
        if self.phase != QuizPhase::InProgress {
            return self.phase;
        }
        if self.answers.len() <= self.index {
            return self.phase;
        }
        if self.index + 1 < self.questions.len() {
            self.index += 1;
        } else {
            let batch = select_cards(catalog, PACK_SIZE, self.rarity_bonus(), rng);
            self.reward = Some(batch);
            self.phase = QuizPhase::Complete;
        }
        self.phase
    }

    /// Grade of the earned pack, available once the quiz is complete.
    #[must_use]
    pub fn pack_grade(&self) -> Option<PackGrade> {
        if self.phase != QuizPhase::Complete {
            return None;
        }
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        Some(PackGrade::from_results(self.correct_count(), total))
    }

    /// Take the earned reward, at most once.
    pub fn take_reward(&mut self) -> Option<RewardBatch> {
        self.reward.take()
    }

    /// Begin a fresh run over the same pool, stepping the seed so retries
    /// see a different question window.
    pub fn restart(&mut self, pool: &QuestionPool) {
        let next_seed = if pool.is_empty() {
            0
        } else {
            (self.seed % pool.len() + QUIZ_SEED_STEP) % pool.len()
        };
        *self = Self::new(pool, next_seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FLOAT_EPSILON;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn answer_correctly(session: &mut QuizSession) -> AnswerRecord {
        let correct = session
            .current_question()
            .expect("question available")
            .correct_answer;
        session.submit_answer(correct).expect("answer recorded")
    }

    #[test]
    fn builtin_pool_loads_twelve_questions() {
        let pool = QuestionPool::default_pool();
        assert_eq!(pool.len(), 12);
        for question in pool.questions() {
            assert_eq!(question.options.len(), OPTIONS_PER_QUESTION);
            assert!(question.correct_answer < question.options.len());
        }
    }

    #[test]
    fn malformed_questions_are_rejected() {
        let short = QuizQuestion {
            id: "bad".to_string(),
            prompt: "Too few options?".to_string(),
            options: vec!["yes".to_string(), "no".to_string()],
            correct_answer: 0,
            difficulty: Difficulty::Easy,
        };
        let err = QuestionPool::from_questions(vec![short]).unwrap_err();
        assert!(matches!(err, QuizDataError::WrongOptionCount { count: 2, .. }));

        let out_of_range = QuizQuestion {
            id: "bad2".to_string(),
            prompt: "Which index?".to_string(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer: 4,
            difficulty: Difficulty::Hard,
        };
        let err = QuestionPool::from_questions(vec![out_of_range]).unwrap_err();
        assert!(matches!(err, QuizDataError::AnswerOutOfRange { index: 4, .. }));
    }

    #[test]
    fn picking_walks_the_pool_in_order() {
        let pool = QuestionPool::default_pool();
        let picked = pick_questions(pool, 3, 0);
        let ids: Vec<&str> = picked.iter().map(|question| question.id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2", "q3"]);

        let picked = pick_questions(pool, 3, 5);
        let ids: Vec<&str> = picked.iter().map(|question| question.id.as_str()).collect();
        assert_eq!(ids, vec!["q6", "q7", "q8"]);
    }

    #[test]
    fn picking_wraps_around_the_pool() {
        let pool = QuestionPool::default_pool();
        let picked = pick_questions(pool, 3, 10);
        let ids: Vec<&str> = picked.iter().map(|question| question.id.as_str()).collect();
        assert_eq!(ids, vec!["q11", "q12", "q1"]);

        // A seed beyond the pool size reduces modulo the pool length.
        let reduced = pick_questions(pool, 3, 22);
        let wrapped = pick_questions(pool, 3, 10);
        assert_eq!(reduced, wrapped);
    }

    #[test]
    fn picking_clamps_to_pool_size() {
        let pool = QuestionPool::default_pool();
        let picked = pick_questions(pool, 40, 0);
        assert_eq!(picked.len(), pool.len());
        assert!(pick_questions(&QuestionPool::empty(), 3, 0).is_empty());
    }

    #[test]
    fn empty_pool_session_never_presents_a_question() {
        let pool = QuestionPool::empty();
        let mut session = QuizSession::new(&pool, 0);
        assert_eq!(session.phase(), QuizPhase::NotReady);
        assert!(session.current_question().is_none());
        assert!(session.submit_answer(0).is_none());

        let catalog = CardCatalog::default_catalog();
        let mut rng = ChaCha20Rng::from_seed([0u8; 32]);
        assert_eq!(session.advance(catalog, &mut rng), QuizPhase::NotReady);
        assert!(session.take_reward().is_none());
    }

    #[test]
    fn first_answer_locks_in() {
        let pool = QuestionPool::default_pool();
        let mut session = QuizSession::new(&pool, 0);
        let correct = session.current_question().unwrap().correct_answer;
        let wrong = (correct + 1) % OPTIONS_PER_QUESTION;

        let first = session.submit_answer(wrong).unwrap();
        assert!(!first.correct);
        assert_eq!(first.choice, wrong);

        // A second submission cannot overwrite the recorded answer.
        let repeat = session.submit_answer(correct).unwrap();
        assert_eq!(repeat, first);
        assert_eq!(session.correct_count(), 0);
    }

    #[test]
    fn out_of_range_choice_scores_incorrect() {
        let pool = QuestionPool::default_pool();
        let mut session = QuizSession::new(&pool, 0);
        let record = session.submit_answer(99).unwrap();
        assert!(!record.correct);
        assert_eq!(record.choice, 99);
    }

    #[test]
    fn advance_requires_an_answer() {
        let pool = QuestionPool::default_pool();
        let catalog = CardCatalog::default_catalog();
        let mut rng = ChaCha20Rng::from_seed([0u8; 32]);
        let mut session = QuizSession::new(&pool, 0);

        assert_eq!(session.advance(catalog, &mut rng), QuizPhase::InProgress);
        assert_eq!(session.index(), 0);

        session.submit_answer(0).unwrap();
        assert_eq!(session.advance(catalog, &mut rng), QuizPhase::InProgress);
        assert_eq!(session.index(), 1);
    }

    #[test]
    fn perfect_run_earns_legendary_grade_and_full_bonus() {
        let pool = QuestionPool::default_pool();
        let catalog = CardCatalog::default_catalog();
        let mut rng = ChaCha20Rng::from_seed([5u8; 32]);
        let mut session = QuizSession::new(&pool, 0);

        for _ in 0..QUIZ_LENGTH {
            answer_correctly(&mut session);
            session.advance(catalog, &mut rng);
        }

        assert_eq!(session.phase(), QuizPhase::Complete);
        assert_eq!(session.correct_count(), 3);
        assert!((session.rarity_bonus() - 0.45).abs() < FLOAT_EPSILON);
        assert_eq!(session.pack_grade(), Some(PackGrade::Legendary));

        let reward = session.take_reward().expect("reward parked on completion");
        assert_eq!(reward.len(), PACK_SIZE);
        assert!((reward.rarity_bonus - 0.45).abs() < FLOAT_EPSILON);
        assert!(session.take_reward().is_none(), "reward taken exactly once");
    }

    #[test]
    fn mixed_run_grades_by_correct_count() {
        let pool = QuestionPool::default_pool();
        let catalog = CardCatalog::default_catalog();
        let mut rng = ChaCha20Rng::from_seed([5u8; 32]);
        let mut session = QuizSession::new(&pool, 0);

        answer_correctly(&mut session);
        session.advance(catalog, &mut rng);
        answer_correctly(&mut session);
        session.advance(catalog, &mut rng);
        let correct = session.current_question().unwrap().correct_answer;
        session.submit_answer((correct + 1) % OPTIONS_PER_QUESTION).unwrap();
        session.advance(catalog, &mut rng);

        assert_eq!(session.phase(), QuizPhase::Complete);
        assert_eq!(session.correct_count(), 2);
        assert!((session.rarity_bonus() - 0.30).abs() < FLOAT_EPSILON);
        assert_eq!(session.pack_grade(), Some(PackGrade::Rare));
    }

    #[test]
    fn zero_correct_still_earns_a_standard_pack() {
        let pool = QuestionPool::default_pool();
        let catalog = CardCatalog::default_catalog();
        let mut rng = ChaCha20Rng::from_seed([5u8; 32]);
        let mut session = QuizSession::new(&pool, 0);

        for _ in 0..QUIZ_LENGTH {
            let correct = session.current_question().unwrap().correct_answer;
            session.submit_answer((correct + 1) % OPTIONS_PER_QUESTION).unwrap();
            session.advance(catalog, &mut rng);
        }

        assert_eq!(session.correct_count(), 0);
        assert!(session.rarity_bonus().abs() < FLOAT_EPSILON);
        assert_eq!(session.pack_grade(), Some(PackGrade::Standard));
        let reward = session.take_reward().unwrap();
        assert_eq!(reward.len(), PACK_SIZE, "a losing quiz still pays out");
    }

    #[test]
    fn restart_steps_the_seed_window() {
        let pool = QuestionPool::default_pool();
        let mut session = QuizSession::new(&pool, 0);
        session.restart(&pool);
        assert_eq!(session.seed(), 3);
        let ids: Vec<&str> = session
            .questions
            .iter()
            .map(|question| question.id.as_str())
            .collect();
        assert_eq!(ids, vec!["q4", "q5", "q6"]);

        let mut late = QuizSession::new(&pool, 9);
        late.restart(&pool);
        assert_eq!(late.seed(), 0);
    }

    #[test]
    fn completed_session_ignores_further_input() {
        let pool = QuestionPool::default_pool();
        let catalog = CardCatalog::default_catalog();
        let mut rng = ChaCha20Rng::from_seed([5u8; 32]);
        let mut session = QuizSession::new(&pool, 0);

        for _ in 0..QUIZ_LENGTH {
            answer_correctly(&mut session);
            session.advance(catalog, &mut rng);
        }
        assert_eq!(session.phase(), QuizPhase::Complete);
        assert!(session.submit_answer(0).is_none());
        assert_eq!(session.advance(catalog, &mut rng), QuizPhase::Complete);
        assert_eq!(session.correct_count(), 3);
    }

    #[test]
    fn pack_grades_cover_the_score_range() {
        assert_eq!(PackGrade::from_results(3, 3), PackGrade::Legendary);
        assert_eq!(PackGrade::from_results(2, 3), PackGrade::Rare);
        assert_eq!(PackGrade::from_results(1, 3), PackGrade::Standard);
        assert_eq!(PackGrade::from_results(0, 3), PackGrade::Standard);
        assert!(PackGrade::Legendary.message().starts_with("Perfect score!"));
    }
}

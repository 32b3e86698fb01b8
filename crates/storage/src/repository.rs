use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clario_core::model::{
    CategoryScore, QuizResult, QuizResultDraft, QuizResultId, UserId,
};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("remote store responded with status {status}")]
    Remote { status: u16 },
}

/// A quiz result waiting to be stored; the backend assigns the id.
#[derive(Debug, Clone)]
pub struct NewQuizResult {
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub scores: Vec<CategoryScore>,
    pub recommended_stream: Option<String>,
}

impl NewQuizResult {
    #[must_use]
    pub fn new(user_id: UserId, created_at: DateTime<Utc>, draft: QuizResultDraft) -> Self {
        Self {
            user_id,
            created_at,
            scores: draft.scores,
            recommended_stream: draft.recommended_stream,
        }
    }

    /// Validate into a domain result under the given id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the draft does not validate.
    pub fn into_result(self, id: QuizResultId) -> Result<QuizResult, StorageError> {
        QuizResultDraft {
            scores: self.scores,
            recommended_stream: self.recommended_stream,
        }
        .validate(id, self.user_id, self.created_at)
        .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

/// Repository contract for quiz results.
#[async_trait]
pub trait QuizResultRepository: Send + Sync {
    /// Most recent result for a user, by creation time (newest id on ties).
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the user has no results, or other
    /// storage errors.
    async fn latest_for_user(&self, user_id: UserId) -> Result<QuizResult, StorageError>;

    /// Store a new result and return its id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the result is invalid or cannot be stored.
    async fn append_result(&self, result: &NewQuizResult) -> Result<QuizResultId, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    results: Arc<Mutex<Vec<QuizResult>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizResultRepository for InMemoryRepository {
    async fn latest_for_user(&self, user_id: UserId) -> Result<QuizResult, StorageError> {
        let guard = self
            .results
            .lock()
            .map_err(|_| StorageError::Connection("poisoned lock".into()))?;
        guard
            .iter()
            .filter(|r| r.user_id() == user_id)
            .max_by_key(|r| (r.created_at(), r.id()))
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn append_result(&self, result: &NewQuizResult) -> Result<QuizResultId, StorageError> {
        let mut guard = self
            .results
            .lock()
            .map_err(|_| StorageError::Connection("poisoned lock".into()))?;
        let next = guard.iter().map(|r| r.id().value()).max().unwrap_or(0) + 1;
        let id = QuizResultId::new(next);
        let stored = result.clone().into_result(id)?;
        guard.push(stored);
        Ok(id)
    }
}

/// Aggregates repository implementations for easy wiring.
#[derive(Clone)]
pub struct Storage {
    pub quiz_results: Arc<dyn QuizResultRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let quiz_results: Arc<dyn QuizResultRepository> = Arc::new(InMemoryRepository::new());
        Self { quiz_results }
    }
}

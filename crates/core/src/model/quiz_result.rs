use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{QuizResultId, UserId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizResultError {
    #[error("score category cannot be empty")]
    EmptyCategory,

    #[error("duplicate score category: {0}")]
    DuplicateCategory(String),

    #[error("recommended stream cannot be blank")]
    BlankRecommendation,
}

//
// ─── SCORES ────────────────────────────────────────────────────────────────────
//

/// Points a user earned for one aptitude/interest category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub score: u32,
}

impl CategoryScore {
    #[must_use]
    pub fn new(category: impl Into<String>, score: u32) -> Self {
        Self {
            category: category.into(),
            score,
        }
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated input for a quiz result, before it gets an id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizResultDraft {
    pub scores: Vec<CategoryScore>,
    pub recommended_stream: Option<String>,
}

impl QuizResultDraft {
    /// Trim and check the draft, producing a result owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `QuizResultError` for empty or duplicated categories or a blank
    /// recommendation.
    pub fn validate(
        self,
        id: QuizResultId,
        user_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Result<QuizResult, QuizResultError> {
        let mut seen = HashSet::new();
        let mut scores = Vec::with_capacity(self.scores.len());
        for score in self.scores {
            let category = score.category.trim().to_owned();
            if category.is_empty() {
                return Err(QuizResultError::EmptyCategory);
            }
            if !seen.insert(category.to_lowercase()) {
                return Err(QuizResultError::DuplicateCategory(category));
            }
            scores.push(CategoryScore::new(category, score.score));
        }

        let recommended_stream = match self.recommended_stream {
            Some(stream) => {
                let trimmed = stream.trim();
                if trimmed.is_empty() {
                    return Err(QuizResultError::BlankRecommendation);
                }
                Some(trimmed.to_owned())
            }
            None => None,
        };

        Ok(QuizResult {
            id,
            user_id,
            created_at,
            scores,
            recommended_stream,
        })
    }
}

//
// ─── RESULT ────────────────────────────────────────────────────────────────────
//

/// Stored outcome of one completed quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    id: QuizResultId,
    user_id: UserId,
    created_at: DateTime<Utc>,
    scores: Vec<CategoryScore>,
    recommended_stream: Option<String>,
}

impl QuizResult {
    /// Rehydrate a result read back from storage.
    ///
    /// # Errors
    ///
    /// Returns `QuizResultError` if the persisted data no longer validates.
    pub fn from_persisted(
        id: QuizResultId,
        user_id: UserId,
        created_at: DateTime<Utc>,
        scores: Vec<CategoryScore>,
        recommended_stream: Option<String>,
    ) -> Result<Self, QuizResultError> {
        QuizResultDraft {
            scores,
            recommended_stream,
        }
        .validate(id, user_id, created_at)
    }

    #[must_use]
    pub fn id(&self) -> QuizResultId {
        self.id
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn scores(&self) -> &[CategoryScore] {
        &self.scores
    }

    #[must_use]
    pub fn recommended_stream(&self) -> Option<&str> {
        self.recommended_stream.as_deref()
    }

    #[must_use]
    pub fn total_score(&self) -> u64 {
        self.scores.iter().map(|s| u64::from(s.score)).sum()
    }

    /// Highest scoring category; the first one listed wins ties.
    #[must_use]
    pub fn top_category(&self) -> Option<&CategoryScore> {
        self.scores
            .iter()
            .fold(None, |best: Option<&CategoryScore>, s| match best {
                Some(b) if b.score >= s.score => Some(b),
                _ => Some(s),
            })
    }
}

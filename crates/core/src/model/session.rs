use serde::{Deserialize, Serialize};

use crate::model::ids::UserId;

/// The signed-in user as reported by the session provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub is_quiz_done: bool,
}

impl SessionUser {
    #[must_use]
    pub fn new(id: UserId, is_quiz_done: bool) -> Self {
        Self { id, is_quiz_done }
    }
}

/// One emission of the session provider: the user (if resolved) and whether
/// the provider is still loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub user: Option<SessionUser>,
    pub loading: bool,
}

impl SessionSnapshot {
    #[must_use]
    pub fn loading() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn signed_in(user: SessionUser) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    /// The user whose quiz result may be fetched: resolved, not loading, and
    /// with the quiz completed.
    #[must_use]
    pub fn quiz_ready_user(&self) -> Option<SessionUser> {
        match self.user {
            Some(user) if !self.loading && user.is_quiz_done => Some(user),
            _ => None,
        }
    }
}

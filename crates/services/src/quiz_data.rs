//! Reactive cache of the signed-in user's latest quiz result.
//!
//! The service is the single writer of [`QuizDataState`]; UI code observes it
//! through [`QuizDataService::subscribe`] and may only trigger
//! [`QuizDataService::refresh`]. Overlapping fetches are fenced with a
//! monotonically increasing request token: only the most recently issued
//! request may publish its outcome.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use clario_core::model::{QuizResult, SessionSnapshot};
use storage::repository::{QuizResultRepository, StorageError};
use tokio::sync::watch;
use tracing::{debug, error, info};

/// What consumers see: the cached record (if any) and whether a fetch is
/// outstanding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizDataState {
    pub quiz_data: Option<QuizResult>,
    pub loading_quiz: bool,
}

/// How a single fetch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Preconditions not met; nothing was requested and nothing changed.
    Skipped,
    /// A record was found and published.
    Loaded,
    /// The user has no stored result; state cleared.
    Missing,
    /// The store failed; state cleared.
    Failed,
    /// A newer request was issued while this one was in flight; its result
    /// was dropped.
    Superseded,
}

struct Inner {
    session: SessionSnapshot,
    issued: u64,
}

pub struct QuizDataService {
    repo: Arc<dyn QuizResultRepository>,
    inner: Mutex<Inner>,
    state: watch::Sender<QuizDataState>,
}

impl QuizDataService {
    #[must_use]
    pub fn new(repo: Arc<dyn QuizResultRepository>) -> Self {
        let (state, _) = watch::channel(QuizDataState::default());
        Self {
            repo,
            inner: Mutex::new(Inner {
                session: SessionSnapshot::default(),
                issued: 0,
            }),
            state,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QuizDataState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn state(&self) -> QuizDataState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn session(&self) -> SessionSnapshot {
        self.lock().session
    }

    /// Reactive entry point: record the new `(user, loading)` pair, then fetch.
    ///
    /// A snapshot without a quiz-ready user resets the cache to absent and
    /// fences off any request still in flight for the previous identity.
    pub async fn on_session_change(&self, session: SessionSnapshot) -> FetchOutcome {
        {
            let mut inner = self.lock();
            inner.session = session;
            if session.quiz_ready_user().is_none() {
                inner.issued += 1;
                self.state.send_if_modified(|state| {
                    let changed = state.quiz_data.is_some() || state.loading_quiz;
                    *state = QuizDataState::default();
                    changed
                });
            }
        }
        self.fetch().await
    }

    /// Load the latest result for the current session's user.
    ///
    /// No-op unless a user is resolved, the session is not loading and the
    /// user has completed the quiz. Failures (including "no row") clear the
    /// cache and are logged; they are never returned as errors.
    ///
    /// Dropping the future mid-request leaves the cached record alone but
    /// still clears `loading_quiz` if no newer request took over.
    pub async fn fetch(&self) -> FetchOutcome {
        let (user, token) = {
            let mut inner = self.lock();
            let Some(user) = inner.session.quiz_ready_user() else {
                debug!(session = ?inner.session, "quiz fetch skipped: session not ready");
                return FetchOutcome::Skipped;
            };
            inner.issued += 1;
            let token = inner.issued;
            self.state.send_modify(|state| state.loading_quiz = true);
            (user, token)
        };

        let mut pending = PendingFetch {
            service: self,
            token: Some(token),
        };
        let result = self.repo.latest_for_user(user.id).await;
        // no await past this point, so the outcome below always lands
        pending.token = None;

        let inner = self.lock();
        if inner.issued != token {
            debug!(user_id = %user.id, token, latest = inner.issued, "discarding stale quiz fetch");
            return FetchOutcome::Superseded;
        }

        let (quiz_data, outcome) = match result {
            Ok(record) => {
                info!(user_id = %user.id, quiz_result_id = %record.id(), "quiz data loaded");
                (Some(record), FetchOutcome::Loaded)
            }
            Err(StorageError::NotFound) => {
                error!(user_id = %user.id, "error fetching quiz data: no quiz result found");
                (None, FetchOutcome::Missing)
            }
            Err(err) => {
                error!(user_id = %user.id, error = %err, "error fetching quiz data");
                (None, FetchOutcome::Failed)
            }
        };
        self.state.send_replace(QuizDataState {
            quiz_data,
            loading_quiz: false,
        });
        drop(inner);
        outcome
    }

    /// Manual re-trigger for consumers, e.g. after the user retakes the quiz.
    pub async fn refresh(&self) -> FetchOutcome {
        self.fetch().await
    }
}

/// Armed while a request is awaiting the store.
struct PendingFetch<'a> {
    service: &'a QuizDataService,
    token: Option<u64>,
}

impl Drop for PendingFetch<'_> {
    fn drop(&mut self) {
        let Some(token) = self.token else {
            return;
        };
        let inner = self.service.lock();
        if inner.issued == token {
            debug!(token, "quiz fetch dropped before completion");
            self.service
                .state
                .send_if_modified(|state| std::mem::replace(&mut state.loading_quiz, false));
        }
    }
}

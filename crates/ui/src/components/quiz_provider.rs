use std::sync::Arc;

use clario_core::model::QuizResult;
use dioxus::prelude::*;
use services::{QuizDataService, QuizDataState};

use crate::components::session_provider::use_session;
use crate::context::AppContext;

/// What descendants get from [`QuizDataProvider`]: read access plus refresh.
#[derive(Clone)]
pub struct QuizDataHandle {
    state: Signal<QuizDataState>,
    service: Arc<QuizDataService>,
}

impl QuizDataHandle {
    #[must_use]
    pub fn state(&self) -> QuizDataState {
        self.state.read().clone()
    }

    #[must_use]
    pub fn quiz_data(&self) -> Option<QuizResult> {
        self.state.read().quiz_data.clone()
    }

    #[must_use]
    pub fn loading_quiz(&self) -> bool {
        self.state.read().loading_quiz
    }

    /// Runs on the tokio runtime rather than the caller's scope, so the
    /// request outlives the button that triggered it.
    pub fn refresh(&self) {
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            service.refresh().await;
        });
    }
}

/// Mirrors [`QuizDataService`] into a signal and re-fetches whenever the
/// session snapshot changes.
#[component]
pub fn QuizDataProvider(children: Element) -> Element {
    let ctx = use_context::<AppContext>();
    let service = use_hook(|| ctx.quiz_data());
    let session = use_session();
    let mut state = use_signal(|| service.state());

    let watched = Arc::clone(&service);
    use_future(move || {
        let service = Arc::clone(&watched);
        async move {
            let mut rx = service.subscribe();
            state.set(rx.borrow_and_update().clone());
            while rx.changed().await.is_ok() {
                let next = rx.borrow_and_update().clone();
                state.set(next);
            }
        }
    });

    let fetcher = Arc::clone(&service);
    use_effect(move || {
        let snapshot = session.snapshot();
        let service = Arc::clone(&fetcher);
        spawn(async move {
            service.on_session_change(snapshot).await;
        });
    });

    use_context_provider(|| QuizDataHandle {
        state,
        service: Arc::clone(&service),
    });

    rsx! { {children} }
}

#[must_use]
pub fn use_quiz_data() -> QuizDataHandle {
    use_context::<QuizDataHandle>()
}

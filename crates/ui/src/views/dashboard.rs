use dioxus::prelude::*;
use dioxus_router::Link;

use crate::components::{CountdownGauge, use_quiz_data, use_session};
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewState, view_state_from_quiz};
use crate::vm::QuizResultVm;

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let settings = ctx.gauge_settings();
    let session = use_session().snapshot();
    let quiz = use_quiz_data();
    let state = view_state_from_quiz(&quiz.state());
    let quiz_done = session.user.is_some_and(|user| user.is_quiz_done);

    rsx! {
        div { class: "page dashboard",
            h2 { "Dashboard" }

            section { class: "dashboard-gauge",
                h3 { "Focus timer" }
                CountdownGauge {
                    min: settings.bounds.min(),
                    max: settings.bounds.max(),
                    primary_color: settings.palette.primary.clone(),
                    secondary_color: settings.palette.secondary.clone(),
                    class: "dashboard-ring",
                }
            }

            section { class: "dashboard-quiz",
                h3 { "Your quiz result" }
                match state {
                    ViewState::Loading => rsx! {
                        p { class: "quiz-loading", "Loading quiz result..." }
                    },
                    ViewState::Ready(vm) => rsx! {
                        QuizSummaryCard { vm }
                    },
                    ViewState::Idle => rsx! {
                        if session.loading {
                            p { "Checking your session..." }
                        } else if session.user.is_none() {
                            p { "Sign in to see your quiz result." }
                        } else if !quiz_done {
                            p { "Complete the quiz to see your recommended stream." }
                        } else {
                            p { "No quiz result found." }
                        }
                    },
                }
                button {
                    class: "btn",
                    disabled: !quiz_done,
                    onclick: move |_| quiz.refresh(),
                    "Refresh"
                }
            }
        }
    }
}

#[component]
fn QuizSummaryCard(vm: QuizResultVm) -> Element {
    rsx! {
        div { class: "quiz-card",
            p { class: "quiz-recommendation", "Recommended stream: {vm.recommendation}" }
            if let Some(top) = vm.top_category.clone() {
                p { "Strongest area: {top}" }
            }
            p { class: "quiz-taken-at", "Taken {vm.taken_at_str}" }
            Link { to: Route::QuizResult {}, "See all scores" }
        }
    }
}

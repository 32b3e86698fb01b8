use dioxus::prelude::*;

use crate::components::use_quiz_data;
use crate::views::{ViewState, view_state_from_quiz};

#[component]
pub fn QuizResultView() -> Element {
    let quiz = use_quiz_data();
    let state = view_state_from_quiz(&quiz.state());

    rsx! {
        div { class: "page",
            h2 { "Quiz result" }

            match state {
                ViewState::Idle => rsx! {
                    p { "No quiz result to show." }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(vm) => rsx! {
                    p { "Recommended stream: {vm.recommendation}" }
                    p { "Taken {vm.taken_at_str} | Total: {vm.total}" }
                    table { class: "quiz-scores",
                        thead {
                            tr {
                                th { "Category" }
                                th { "Score" }
                            }
                        }
                        tbody {
                            for row in vm.scores.iter() {
                                tr { "data-top": "{row.is_top}",
                                    td { "{row.category}" }
                                    td { "{row.score}" }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

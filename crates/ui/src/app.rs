use dioxus::prelude::*;
use dioxus_router::Router;

use crate::components::{QuizDataProvider, SessionProvider};
use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    // gauges look the registry up on their own; keep it reachable without AppContext
    use_context_provider(|| ctx.tickers());

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Clario" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                SessionProvider { initial: ctx.initial_session(),
                    QuizDataProvider {
                        Router::<Route> {}
                    }
                }
            }
        }
    }
}

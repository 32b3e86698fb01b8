use std::sync::Arc;
use std::time::Duration;

use clario_core::model::{CategoryScore, QuizResultDraft, QuizResultId, SessionSnapshot, UserId};
use clario_core::time::fixed_now;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{AppServices, QuizDataService, TickerRegistry};
use storage::repository::{NewQuizResult, Storage};

use crate::components::{CountdownGauge, QuizDataProvider, SessionProvider};
use crate::context::{GaugeSettings, UiApp, build_app_context};
use crate::views::{DashboardView, QuizResultView};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
    session: SessionSnapshot,
    gauge: GaugeSettings,
}

impl UiApp for TestApp {
    fn quiz_data(&self) -> Arc<QuizDataService> {
        self.services.quiz_data()
    }

    fn tickers(&self) -> TickerRegistry {
        self.services.tickers()
    }

    fn initial_session(&self) -> SessionSnapshot {
        self.session
    }

    fn gauge_settings(&self) -> GaugeSettings {
        self.gauge.clone()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    Result,
    Gauge { min: i32, max: i32 },
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let ctx = use_context_provider(|| build_app_context(&app));
    use_context_provider(|| ctx.tickers());
    use_context_provider(|| props.view);

    rsx! {
        SessionProvider { initial: ctx.initial_session(),
            QuizDataProvider {
                Router::<TestRoute> {}
            }
        }
    }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Result => rsx! { QuizResultView {} },
        ViewKind::Gauge { min, max } => rsx! {
            CountdownGauge { min, max, primary_color: "red", secondary_color: "gray" }
        },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub tickers: TickerRegistry,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(20), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive until spawned fetches and their signal updates have landed.
    pub async fn settle(&mut self) {
        for _ in 0..5 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, session: SessionSnapshot) -> ViewHarness {
    setup_with_storage(view, session, Storage::in_memory())
}

pub fn setup_with_storage(view: ViewKind, session: SessionSnapshot, storage: Storage) -> ViewHarness {
    let services = AppServices::from_storage(storage.clone());
    let tickers = services.tickers();
    let app = Arc::new(TestApp {
        services,
        session,
        gauge: GaugeSettings::default(),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness {
        dom,
        storage,
        tickers,
    }
}

pub async fn seed_result(storage: &Storage, user_id: UserId, stream: &str) -> QuizResultId {
    let draft = QuizResultDraft {
        scores: vec![
            CategoryScore::new("Analytical", 8),
            CategoryScore::new("Creative", 5),
        ],
        recommended_stream: Some(stream.to_owned()),
    };
    storage
        .quiz_results
        .append_result(&NewQuizResult::new(user_id, fixed_now(), draft))
        .await
        .expect("append result")
}

use std::sync::Arc;

use clario_core::gauge::GaugeBounds;
use clario_core::model::SessionSnapshot;
use services::{QuizDataService, TickerRegistry};

use crate::vm::GaugePalette;

/// Bounds and colours for the dashboard gauge.
#[derive(Clone, Debug, PartialEq)]
pub struct GaugeSettings {
    pub bounds: GaugeBounds,
    pub palette: GaugePalette,
}

impl Default for GaugeSettings {
    fn default() -> Self {
        Self {
            bounds: GaugeBounds::default(),
            palette: GaugePalette::default(),
        }
    }
}

/// What the composition root (e.g. `crates/app`) hands to the UI.
pub trait UiApp: Send + Sync {
    fn quiz_data(&self) -> Arc<QuizDataService>;
    fn tickers(&self) -> TickerRegistry;
    fn initial_session(&self) -> SessionSnapshot;
    fn gauge_settings(&self) -> GaugeSettings;
}

#[derive(Clone)]
pub struct AppContext {
    quiz_data: Arc<QuizDataService>,
    tickers: TickerRegistry,
    initial_session: SessionSnapshot,
    gauge_settings: GaugeSettings,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quiz_data: app.quiz_data(),
            tickers: app.tickers(),
            initial_session: app.initial_session(),
            gauge_settings: app.gauge_settings(),
        }
    }

    #[must_use]
    pub fn quiz_data(&self) -> Arc<QuizDataService> {
        Arc::clone(&self.quiz_data)
    }

    #[must_use]
    pub fn tickers(&self) -> TickerRegistry {
        self.tickers.clone()
    }

    #[must_use]
    pub fn initial_session(&self) -> SessionSnapshot {
        self.initial_session
    }

    #[must_use]
    pub fn gauge_settings(&self) -> GaugeSettings {
        self.gauge_settings.clone()
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

use thiserror::Error;

use crate::gauge::GaugeConfigError;
use crate::model::QuizResultError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    GaugeConfig(#[from] GaugeConfigError),
    #[error(transparent)]
    QuizResult(#[from] QuizResultError),
}

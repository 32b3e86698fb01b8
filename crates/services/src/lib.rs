#![forbid(unsafe_code)]

pub mod app_services;
pub mod countdown;
pub mod error;
pub mod quiz_data;

pub use app_services::{AppServices, StoreConfig};
pub use countdown::{CountdownTimer, TickerRegistry};
pub use error::AppServicesError;
pub use quiz_data::{FetchOutcome, QuizDataService, QuizDataState};

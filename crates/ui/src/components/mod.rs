mod countdown_gauge;
mod quiz_provider;
mod session_provider;

pub use countdown_gauge::CountdownGauge;
pub use quiz_provider::{QuizDataHandle, QuizDataProvider, use_quiz_data};
pub use session_provider::{SessionHandle, SessionProvider, use_session};

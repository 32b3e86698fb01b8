mod ids;
mod quiz_result;
mod session;

pub use ids::{QuizResultId, UserId};
pub use quiz_result::{CategoryScore, QuizResult, QuizResultDraft, QuizResultError};
pub use session::{SessionSnapshot, SessionUser};

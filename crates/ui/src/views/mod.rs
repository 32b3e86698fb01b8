mod dashboard;
mod result;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use dashboard::DashboardView;
pub use result::QuizResultView;
pub use state::{ViewState, view_state_from_quiz};

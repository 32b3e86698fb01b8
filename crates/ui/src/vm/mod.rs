mod gauge_vm;
mod quiz_vm;
mod time_fmt;

pub use gauge_vm::{ArcVm, GaugePalette, GaugeTransition, GaugeVm};
pub use quiz_vm::{QuizResultVm, ScoreRowVm, map_quiz_result};
pub use time_fmt::format_taken_at;

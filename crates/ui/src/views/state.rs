use services::QuizDataState;

use crate::vm::{QuizResultVm, map_quiz_result};

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
}

/// A fetch in flight wins over a previously cached record.
#[must_use]
pub fn view_state_from_quiz(state: &QuizDataState) -> ViewState<QuizResultVm> {
    if state.loading_quiz {
        return ViewState::Loading;
    }
    match &state.quiz_data {
        Some(result) => ViewState::Ready(map_quiz_result(result)),
        None => ViewState::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_flag_takes_precedence() {
        let state = QuizDataState {
            quiz_data: None,
            loading_quiz: true,
        };
        assert_eq!(view_state_from_quiz(&state), ViewState::Loading);
        assert_eq!(view_state_from_quiz(&QuizDataState::default()), ViewState::Idle);
    }
}

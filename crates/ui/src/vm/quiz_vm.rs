use clario_core::model::QuizResult;

use crate::vm::time_fmt::format_taken_at;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreRowVm {
    pub category: String,
    pub score: u32,
    pub is_top: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResultVm {
    pub id: u64,
    pub taken_at_str: String,
    pub recommendation: String,
    pub top_category: Option<String>,
    pub total: u64,
    pub scores: Vec<ScoreRowVm>,
}

#[must_use]
pub fn map_quiz_result(result: &QuizResult) -> QuizResultVm {
    let top = result.top_category().map(|s| s.category.clone());
    let scores = result
        .scores()
        .iter()
        .map(|s| ScoreRowVm {
            category: s.category.clone(),
            score: s.score,
            is_top: top.as_deref() == Some(s.category.as_str()),
        })
        .collect();

    QuizResultVm {
        id: result.id().value(),
        taken_at_str: format_taken_at(result.created_at()),
        recommendation: result
            .recommended_stream()
            .unwrap_or("No recommendation yet")
            .to_owned(),
        top_category: top,
        total: result.total_score(),
        scores,
    }
}

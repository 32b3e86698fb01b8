use clario_core::model::{CategoryScore, QuizResult, QuizResultId, UserId};
use sqlx::Row;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn quiz_result_id_from_i64(v: i64) -> Result<QuizResultId, StorageError> {
    u64::try_from(v)
        .map(QuizResultId::new)
        .map_err(|_| StorageError::Serialization(format!("quiz_result id sign overflow: {v}")))
}

pub(crate) fn user_id_from_str(raw: &str) -> Result<UserId, StorageError> {
    raw.parse::<UserId>()
        .map_err(|e| StorageError::Serialization(format!("invalid user_id {raw}: {e}")))
}

pub(crate) fn scores_to_json(scores: &[CategoryScore]) -> Result<String, StorageError> {
    serde_json::to_string(scores).map_err(ser)
}

pub(crate) fn scores_from_json(raw: &str) -> Result<Vec<CategoryScore>, StorageError> {
    serde_json::from_str(raw).map_err(ser)
}

pub(crate) fn map_quiz_result_row(row: &sqlx::sqlite::SqliteRow) -> Result<QuizResult, StorageError> {
    let id = quiz_result_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?;
    let user_id = user_id_from_str(row.try_get::<String, _>("user_id").map_err(ser)?.as_str())?;
    let created_at: chrono::DateTime<chrono::Utc> = row.try_get("created_at").map_err(ser)?;
    let scores = scores_from_json(row.try_get::<String, _>("scores").map_err(ser)?.as_str())?;
    let recommended_stream: Option<String> = row.try_get("recommended_stream").map_err(ser)?;

    QuizResult::from_persisted(id, user_id, created_at, scores, recommended_stream).map_err(ser)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_json_round_trip_keeps_order() {
        let scores = vec![CategoryScore::new("Logic", 3), CategoryScore::new("Arts", 9)];
        let json = scores_to_json(&scores).unwrap();
        assert_eq!(json, r#"[{"category":"Logic","score":3},{"category":"Arts","score":9}]"#);
        assert_eq!(scores_from_json(&json).unwrap(), scores);
    }

    #[test]
    fn negative_ids_are_rejected() {
        assert!(matches!(
            quiz_result_id_from_i64(-1),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn malformed_user_id_is_serialization_error() {
        assert!(matches!(
            user_id_from_str("nope"),
            Err(StorageError::Serialization(_))
        ));
    }
}

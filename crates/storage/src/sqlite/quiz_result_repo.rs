use clario_core::model::{QuizResultId, UserId};

use super::SqliteRepository;
use super::mapping::{map_quiz_result_row, quiz_result_id_from_i64, scores_to_json};
use crate::repository::{NewQuizResult, QuizResultRepository, StorageError};

#[async_trait::async_trait]
impl QuizResultRepository for SqliteRepository {
    async fn latest_for_user(
        &self,
        user_id: UserId,
    ) -> Result<clario_core::model::QuizResult, StorageError> {
        let row = sqlx::query(
            r"
                SELECT id, user_id, created_at, scores, recommended_stream
                FROM quiz_results
                WHERE user_id = ?1
                ORDER BY created_at DESC, id DESC
                LIMIT 1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .ok_or(StorageError::NotFound)?;

        map_quiz_result_row(&row)
    }

    async fn append_result(&self, result: &NewQuizResult) -> Result<QuizResultId, StorageError> {
        // validate before touching the table; the placeholder id is discarded
        let validated = result.clone().into_result(QuizResultId::new(0))?;
        let scores = scores_to_json(validated.scores())?;

        let res = sqlx::query(
            r"
                INSERT INTO quiz_results (user_id, created_at, scores, recommended_stream)
                VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(validated.user_id().to_string())
        .bind(validated.created_at())
        .bind(scores)
        .bind(validated.recommended_stream())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        quiz_result_id_from_i64(res.last_insert_rowid())
    }
}

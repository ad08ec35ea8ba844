use crate::database::DbError;
use crate::database::batch_session::{BatchSession, BatchSessionRow};
use crate::importer::{BatchState, ImportContext};
use crate::utils::nice_id;
use sqlx::{Executor, Sqlite};

pub struct BatchStore;

impl BatchStore {
    /// Creates a new batch session and returns its id.
    pub async fn create(
        executor: impl Executor<'_, Database = Sqlite>,
        user_id: i64,
        state: &BatchState,
        context: &ImportContext,
    ) -> Result<String, DbError> {
        let session_id = nice_id(12);
        sqlx::query(
            r#"
            INSERT INTO batch_session (id, user_id, state, context)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&session_id)
        .bind(user_id)
        .bind(serde_json::to_string(state)?)
        .bind(serde_json::to_string(context)?)
        .execute(executor)
        .await?;
        Ok(session_id)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Sqlite>,
        session_id: &str,
    ) -> Result<Option<BatchSession>, DbError> {
        let row = sqlx::query_as::<_, BatchSessionRow>(
            "SELECT id, user_id, state, context FROM batch_session WHERE id = $1",
        )
        .bind(session_id)
        .fetch_optional(executor)
        .await?;

        row.map(BatchSession::try_from).transpose()
    }

    pub async fn save_state(
        executor: impl Executor<'_, Database = Sqlite>,
        session_id: &str,
        state: &BatchState,
    ) -> Result<(), DbError> {
        sqlx::query(
            r#"
            UPDATE batch_session
            SET state = $2, updated_at = datetime('now')
            WHERE id = $1
            "#,
        )
        .bind(session_id)
        .bind(serde_json::to_string(state)?)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn delete(
        executor: impl Executor<'_, Database = Sqlite>,
        session_id: &str,
    ) -> Result<(), DbError> {
        sqlx::query("DELETE FROM batch_session WHERE id = $1")
            .bind(session_id)
            .execute(executor)
            .await?;
        Ok(())
    }
}

use crate::database::DbError;
use crate::pager::filters_hash;
use serde_json::Value;
use sqlx::{Executor, Sqlite};

/// Remembers which continuation token was active for each `(filters, page)`
/// pair a user walked through, so the listing can page backwards against a
/// forward-only remote API. Entries never expire; a miss just means the
/// pager starts from the beginning of the subset.
pub struct PageTokenStore;

impl PageTokenStore {
    /// Records the token that advances past `page` for the given filter set.
    pub async fn save(
        executor: impl Executor<'_, Database = Sqlite>,
        user_id: i64,
        filters: &Value,
        page: i64,
        token: &str,
    ) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO page_token (user_id, filter_hash, page_number, token)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, filter_hash, page_number) DO UPDATE
            SET token = excluded.token
            "#,
        )
        .bind(user_id)
        .bind(filters_hash(filters))
        .bind(page)
        .bind(token)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// The token that was active one page before `current_page`, or an empty
    /// string on page 0 or a cache miss.
    pub async fn find_previous(
        executor: impl Executor<'_, Database = Sqlite>,
        user_id: i64,
        filters: &Value,
        current_page: i64,
    ) -> Result<String, DbError> {
        if current_page == 0 {
            return Ok(String::new());
        }

        let token: Option<String> = sqlx::query_scalar(
            r#"
            SELECT token FROM page_token
            WHERE user_id = $1 AND filter_hash = $2 AND page_number = $3
            "#,
        )
        .bind(user_id)
        .bind(filters_hash(filters))
        .bind(current_page - 1)
        .fetch_optional(executor)
        .await?;

        Ok(token.unwrap_or_default())
    }
}

use crate::database::DbError;
use crate::database::app_user::{RemoteAccount, User};
use sqlx::{Executor, Sqlite};

pub struct UserStore;

impl UserStore {
    pub async fn create(
        executor: impl Executor<'_, Database = Sqlite>,
        name: &str,
        email: &str,
        lang_code: &str,
    ) -> Result<User, DbError> {
        Ok(sqlx::query_as::<_, User>(
            r#"
            INSERT INTO app_user (name, email, lang_code)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, lang_code
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(lang_code)
        .fetch_one(executor)
        .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Sqlite>,
        user_id: i64,
    ) -> Result<Option<User>, DbError> {
        Ok(sqlx::query_as::<_, User>(
            "SELECT id, name, email, lang_code FROM app_user WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Stores (or replaces) the user's remote library connection.
    pub async fn connect_remote_account(
        executor: impl Executor<'_, Database = Sqlite>,
        user_id: i64,
        access_token: &str,
        authenticated: bool,
    ) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO remote_account (user_id, access_token, authenticated)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
            SET access_token = excluded.access_token,
                authenticated = excluded.authenticated
            "#,
        )
        .bind(user_id)
        .bind(access_token)
        .bind(authenticated)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn find_remote_account(
        executor: impl Executor<'_, Database = Sqlite>,
        user_id: i64,
    ) -> Result<Option<RemoteAccount>, DbError> {
        Ok(sqlx::query_as::<_, RemoteAccount>(
            "SELECT user_id, access_token, authenticated FROM remote_account WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(executor)
        .await?)
    }
}

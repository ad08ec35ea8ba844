use crate::database::DbError;
use crate::database::event::Event;
use crate::utils::nice_id;
use sqlx::{Executor, Sqlite, SqlitePool};

pub struct EventStore;

impl EventStore {
    pub async fn find_by_external_album_id(
        executor: impl Executor<'_, Database = Sqlite>,
        external_album_id: &str,
    ) -> Result<Option<Event>, DbError> {
        Ok(
            sqlx::query_as::<_, Event>("SELECT * FROM event WHERE external_album_id = $1")
                .bind(external_album_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    /// Loads the event for a remote album, creating it when missing. The
    /// title is only used on creation; an existing event keeps its own.
    pub async fn find_or_create(
        pool: &SqlitePool,
        external_album_id: &str,
        title: &str,
        user_id: Option<i64>,
    ) -> Result<Event, DbError> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO event (id, external_album_id, title, user_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (external_album_id) DO NOTHING
            "#,
        )
        .bind(nice_id(16))
        .bind(external_album_id)
        .bind(title)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        let event = sqlx::query_as::<_, Event>("SELECT * FROM event WHERE external_album_id = $1")
            .bind(external_album_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(event)
    }

    /// Attaches the event to a media item. A no-op when already attached.
    pub async fn attach_to_media(
        executor: impl Executor<'_, Database = Sqlite>,
        event_id: &str,
        media_item_id: &str,
    ) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO event_media_item (event_id, media_item_id)
            VALUES ($1, $2)
            ON CONFLICT (event_id, media_item_id) DO NOTHING
            "#,
        )
        .bind(event_id)
        .bind(media_item_id)
        .execute(executor)
        .await?;
        Ok(())
    }
}

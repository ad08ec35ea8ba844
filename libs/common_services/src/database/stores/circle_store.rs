use crate::database::DbError;
use crate::database::gallery::Circle;
use sqlx::{Executor, Sqlite};

pub struct CircleStore;

impl CircleStore {
    pub async fn create(
        executor: impl Executor<'_, Database = Sqlite>,
        name: &str,
    ) -> Result<Circle, DbError> {
        Ok(
            sqlx::query_as::<_, Circle>("INSERT INTO circle (name) VALUES ($1) RETURNING *")
                .bind(name)
                .fetch_one(executor)
                .await?,
        )
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Sqlite>,
        circle_id: i64,
    ) -> Result<Option<Circle>, DbError> {
        Ok(
            sqlx::query_as::<_, Circle>("SELECT * FROM circle WHERE id = $1")
                .bind(circle_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    pub async fn add_gallery(
        executor: impl Executor<'_, Database = Sqlite>,
        circle_id: i64,
        gallery_id: i64,
    ) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO circle_gallery (circle_id, gallery_id)
            VALUES ($1, $2)
            ON CONFLICT (circle_id, gallery_id) DO NOTHING
            "#,
        )
        .bind(circle_id)
        .bind(gallery_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Propagates a media item into the circle. Ignores duplicates.
    pub async fn add_media_item(
        executor: impl Executor<'_, Database = Sqlite>,
        circle_id: i64,
        media_item_id: &str,
    ) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO circle_media_item (circle_id, media_item_id)
            VALUES ($1, $2)
            ON CONFLICT (circle_id, media_item_id) DO NOTHING
            "#,
        )
        .bind(circle_id)
        .bind(media_item_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Attaches an event to the circle. A no-op when already attached.
    pub async fn add_event(
        executor: impl Executor<'_, Database = Sqlite>,
        circle_id: i64,
        event_id: &str,
    ) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO circle_event (circle_id, event_id)
            VALUES ($1, $2)
            ON CONFLICT (circle_id, event_id) DO NOTHING
            "#,
        )
        .bind(circle_id)
        .bind(event_id)
        .execute(executor)
        .await?;
        Ok(())
    }
}

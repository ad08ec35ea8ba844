use crate::database::DbError;
use crate::database::gallery::{Circle, Gallery};
use sqlx::{Executor, Sqlite};

pub struct GalleryStore;

impl GalleryStore {
    pub async fn create(
        executor: impl Executor<'_, Database = Sqlite>,
        title: &str,
        owner_id: Option<i64>,
    ) -> Result<Gallery, DbError> {
        Ok(sqlx::query_as::<_, Gallery>(
            "INSERT INTO gallery (title, owner_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(title)
        .bind(owner_id)
        .fetch_one(executor)
        .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Sqlite>,
        gallery_id: i64,
    ) -> Result<Option<Gallery>, DbError> {
        Ok(
            sqlx::query_as::<_, Gallery>("SELECT * FROM gallery WHERE id = $1")
                .bind(gallery_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    /// Attaches a media item to the gallery. Ignores duplicates.
    pub async fn add_media_item(
        executor: impl Executor<'_, Database = Sqlite>,
        gallery_id: i64,
        media_item_id: &str,
    ) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO gallery_media_item (gallery_id, media_item_id)
            VALUES ($1, $2)
            ON CONFLICT (gallery_id, media_item_id) DO NOTHING
            "#,
        )
        .bind(gallery_id)
        .bind(media_item_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// All circles this gallery belongs to.
    pub async fn circles_of(
        executor: impl Executor<'_, Database = Sqlite>,
        gallery_id: i64,
    ) -> Result<Vec<Circle>, DbError> {
        Ok(sqlx::query_as::<_, Circle>(
            r#"
            SELECT c.id, c.name
            FROM circle c
            JOIN circle_gallery cg ON c.id = cg.circle_id
            WHERE cg.gallery_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(gallery_id)
        .fetch_all(executor)
        .await?)
    }
}

use crate::database::DbError;
use crate::database::media_item::{CreateMediaItem, MediaItem};
use crate::utils::nice_id;
use sqlx::{Executor, Sqlite, SqlitePool};

pub struct MediaItemStore;

impl MediaItemStore {
    pub async fn find_by_external_id(
        executor: impl Executor<'_, Database = Sqlite>,
        external_id: &str,
    ) -> Result<Option<MediaItem>, DbError> {
        Ok(
            sqlx::query_as::<_, MediaItem>("SELECT * FROM media_item WHERE external_id = $1")
                .bind(external_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    /// Inserts a media item keyed by its external id, or fetches the row that
    /// already claimed that id. Two workers racing on the same external id
    /// both end up with the single surviving row; the loser's metadata is
    /// discarded rather than overwriting what was imported first.
    pub async fn create_or_fetch(
        pool: &SqlitePool,
        create: &CreateMediaItem,
    ) -> Result<MediaItem, DbError> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO media_item (
                id, external_id, relative_path, filename, base_url, mime_type,
                width, height, description, taken_at, user_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (external_id) DO NOTHING
            "#,
        )
        .bind(nice_id(16))
        .bind(&create.external_id)
        .bind(&create.relative_path)
        .bind(&create.filename)
        .bind(&create.base_url)
        .bind(&create.mime_type)
        .bind(create.width)
        .bind(create.height)
        .bind(&create.description)
        .bind(create.taken_at)
        .bind(create.user_id)
        .execute(&mut *tx)
        .await?;

        let item = sqlx::query_as::<_, MediaItem>(
            "SELECT * FROM media_item WHERE external_id = $1",
        )
        .bind(&create.external_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(item)
    }
}

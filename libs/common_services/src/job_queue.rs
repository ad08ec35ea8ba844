use crate::database::DbError;
use crate::database::jobs::JobType;
use crate::importer::{ImportContext, Recipient};
use bon::builder;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportItemPayload {
    pub external_media_id: String,
    pub context: ImportContext,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyCompletionPayload {
    pub recipient: Recipient,
    pub photos_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub albums_count: Option<u64>,
}

/// Appends a durable job. Returns `false` without inserting when an
/// identical job is already queued or running.
#[builder]
pub async fn enqueue_job<T: Serialize + Send + Sync>(
    #[builder(start_fn)] pool: &SqlitePool,
    #[builder(start_fn)] job_type: JobType,
    user_id: Option<i64>,
    max_attempts: Option<i64>,
    payload: Option<&T>,
) -> Result<bool, DbError> {
    let json_payload = payload.map(serde_json::to_string).transpose()?;
    let priority = job_type.get_priority();

    let result = sqlx::query(
        r#"
        INSERT OR IGNORE INTO jobs (job_type, priority, user_id, payload, max_attempts)
        VALUES ($1, $2, $3, $4, coalesce($5, 3))
        "#,
    )
    .bind(job_type)
    .bind(priority)
    .bind(user_id)
    .bind(&json_payload)
    .bind(max_attempts)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        warn!(
            "Not enqueueing {:?} job for user {:?}, an active one already exists.",
            job_type, user_id
        );
        return Ok(false);
    }

    info!(
        "Enqueued {:?} job, user_id: {:?}, payload: {:?}",
        job_type, user_id, json_payload
    );

    Ok(true)
}

/// Enqueues a whole background submission: one import job per selected item
/// followed by exactly one completion notice for the submitting user.
pub async fn enqueue_import_submission(
    pool: &SqlitePool,
    max_attempts: i64,
    user_id: i64,
    external_ids: &[String],
    context: &ImportContext,
    recipient: &Recipient,
    albums_count: Option<u64>,
) -> Result<(), DbError> {
    for external_media_id in external_ids {
        enqueue_job(pool, JobType::ImportItem)
            .user_id(user_id)
            .max_attempts(max_attempts)
            .payload(&ImportItemPayload {
                external_media_id: external_media_id.clone(),
                context: context.clone(),
            })
            .call()
            .await?;
    }

    enqueue_job(pool, JobType::NotifyCompletion)
        .user_id(user_id)
        .payload(&NotifyCompletionPayload {
            recipient: recipient.clone(),
            photos_count: external_ids.len() as u64,
            albums_count,
        })
        .call()
        .await?;

    Ok(())
}

use crate::context::WorkerContext;
use color_eyre::{Report, Result};
use common_services::alert;
use common_services::database::jobs::Job;
use common_services::importer::ImportError;
use sqlx::SqlitePool;
use tracing::warn;

/// Atomically claims the next available job from the queue. A single
/// UPDATE picks the candidate and flips it to running, so concurrent
/// workers never grab the same job.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn claim_next_job(context: &WorkerContext) -> Result<Option<Job>> {
    let job = sqlx::query_as::<_, Job>(
        r#"
        UPDATE jobs
        SET status = 'running', owner = $1, started_at = datetime('now')
        WHERE id = (
            SELECT id FROM jobs
            WHERE status = 'queued' AND scheduled_at <= datetime('now')
            ORDER BY priority, created_at, id
            LIMIT 1
        )
        RETURNING id, job_type, payload, user_id, priority, attempts, max_attempts
        "#,
    )
    .bind(&context.worker_id)
    .fetch_optional(&context.pool)
    .await?;

    Ok(job)
}

/// Marks a successfully handled job as done.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub async fn update_job_on_completion(pool: &SqlitePool, job: &Job) -> Result<()> {
    sqlx::query("UPDATE jobs SET status = 'done', finished_at = datetime('now') WHERE id = $1")
        .bind(job.id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Decides what happens to a failed job: errors that cannot heal on their
/// own (a disconnected remote account) dead-letter immediately, everything
/// else is retried with exponential backoff until the attempt budget runs
/// out.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub async fn update_job_on_failure(pool: &SqlitePool, job: &Job, error: &Report) -> Result<()> {
    let error_string = format!("{error:?}");
    let terminal = error
        .downcast_ref::<ImportError>()
        .is_some_and(|e| !e.is_retryable());

    if terminal || job.attempts + 1 >= job.max_attempts {
        mark_job_failed(pool, job.id, &error_string).await
    } else {
        reschedule_for_retry(pool, job.id, backoff_seconds(job.attempts), &error_string).await
    }
}

const fn backoff_seconds(attempts: i64) -> i64 {
    let capped = if attempts > 6 { 6 } else { attempts as u32 };
    let delay = 30 * (1_i64 << capped);
    if delay > 3600 { 3600 } else { delay }
}

/// Marks a job as failed in the database.
async fn mark_job_failed(pool: &SqlitePool, job_id: i64, last_error: &str) -> Result<()> {
    alert!("‼️ Marking job {} as failed: {}", job_id, last_error);
    sqlx::query(
        r#"
        UPDATE jobs
        SET status = 'failed', finished_at = datetime('now'),
            last_error = $2, attempts = attempts + 1
        WHERE id = $1
        "#,
    )
    .bind(job_id)
    .bind(last_error)
    .execute(pool)
    .await?;
    Ok(())
}

/// Reschedules a job to be tried again after a backoff period.
async fn reschedule_for_retry(
    pool: &SqlitePool,
    job_id: i64,
    backoff_secs: i64,
    last_error: &str,
) -> Result<()> {
    warn!("⚠️ Rescheduling job {}. Backoff: {}s", job_id, backoff_secs);
    sqlx::query(
        r#"
        UPDATE jobs
        SET status = 'queued',
            scheduled_at = datetime('now', '+' || $2 || ' seconds'),
            attempts = attempts + 1, owner = NULL, started_at = NULL, last_error = $3
        WHERE id = $1
        "#,
    )
    .bind(job_id)
    .bind(backoff_secs)
    .bind(last_error)
    .execute(pool)
    .await?;
    Ok(())
}

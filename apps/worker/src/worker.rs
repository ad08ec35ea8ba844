use crate::context::WorkerContext;
use crate::handlers::handle_job;
use crate::jobs::management::{claim_next_job, update_job_on_completion, update_job_on_failure};
use app_state::AppSettings;
use color_eyre::Result;
use common_services::utils::nice_id;
use sqlx::SqlitePool;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

pub async fn create_worker(
    pool: SqlitePool,
    settings: AppSettings,
    stop_on_sleep: bool,
) -> Result<()> {
    let worker_id = nice_id(8);
    info!("🛠️ [Worker ID: {}] Starting.", worker_id);
    let context = WorkerContext::new(pool, settings, worker_id);

    run_worker_loop(&context, stop_on_sleep).await
}

/// Claims and processes queued jobs until the process is stopped. With
/// `stop_on_sleep` the loop returns as soon as the queue runs dry, which is
/// how batch invocations and the test suite drain a submission.
///
/// # Errors
///
/// Returns an error when the queue tables become unreachable while claiming
/// or updating a job. Handler failures do not end the loop; they go through
/// the retry/dead-letter transition instead.
pub async fn run_worker_loop(context: &WorkerContext, stop_on_sleep: bool) -> Result<()> {
    let idle_delay = Duration::from_millis(context.settings.queue.sleep_ms);
    let mut sleeping = false;

    loop {
        let Some(job) = claim_next_job(context).await? else {
            if !sleeping {
                sleeping = true;
                info!("💤 No jobs, going to sleep...");
                if stop_on_sleep {
                    return Ok(());
                }
            }
            sleep(idle_delay).await;
            continue;
        };

        sleeping = false;
        info!("🐜 Picked up {:?} job {}", job.job_type, job.id);

        match handle_job(context, &job).await {
            Ok(()) => update_job_on_completion(&context.pool, &job).await?,
            Err(e) => update_job_on_failure(&context.pool, &job, &e).await?,
        }
    }
}

use crate::context::WorkerContext;
use color_eyre::Result;
use common_services::database::jobs::{Job, JobType};

pub mod import_item;
pub mod notify_completion;

/// Dispatches a job to its corresponding handler.
///
/// # Errors
///
/// This function will return an error if the specific job handler fails
/// during execution. The caller decides between retry and dead-letter.
pub async fn handle_job(context: &WorkerContext, job: &Job) -> Result<()> {
    match job.job_type {
        JobType::ImportItem => import_item::handle(context, job).await,
        JobType::NotifyCompletion => notify_completion::handle(context, job).await,
    }
}

use crate::context::WorkerContext;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use common_services::database::jobs::Job;
use common_services::importer::completion_message;
use common_services::job_queue::NotifyCompletionPayload;
use serde_json::from_value;
use tracing::info;

pub async fn handle(context: &WorkerContext, job: &Job) -> Result<()> {
    let payload_value = job
        .payload
        .as_ref()
        .ok_or_else(|| eyre!("NotifyCompletion job is missing a payload"))?;
    let payload: NotifyCompletionPayload = from_value(payload_value.0.clone())?;

    let message = completion_message(
        &payload.recipient.username,
        payload.photos_count,
        payload.albums_count,
    );
    context.notifier.send(&payload.recipient, &message).await?;

    info!("✅ Sent completion notice to {}", payload.recipient.email);
    Ok(())
}

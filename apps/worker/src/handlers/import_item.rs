use crate::context::WorkerContext;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use common_services::database::jobs::Job;
use common_services::importer::{ImportError, import_one};
use common_services::job_queue::ImportItemPayload;
use serde_json::from_value;
use tracing::info;

pub async fn handle(context: &WorkerContext, job: &Job) -> Result<()> {
    let payload_value = job
        .payload
        .as_ref()
        .ok_or_else(|| eyre!("ImportItem job is missing a payload"))?;
    let payload: ImportItemPayload = from_value(payload_value.0.clone())?;
    let user_id = job
        .user_id
        .ok_or_else(|| eyre!("ImportItem job is missing a user_id"))?;

    // Authenticate as the submitting user, not as whoever this process
    // happens to run as.
    let library = context
        .library_provider
        .connect(&context.pool, user_id)
        .await
        .map_err(ImportError::from)?;

    let media = import_one(
        &context.pool,
        &context.settings,
        library.as_ref(),
        &payload.external_media_id,
        user_id,
        &payload.context,
    )
    .await?;

    info!(
        "✅ Imported media item {} -> {}",
        payload.external_media_id, media.id
    );
    Ok(())
}

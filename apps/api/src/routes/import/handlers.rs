use crate::api_state::ApiContext;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common_services::api::import::error::ImportApiError;
use common_services::api::import::interfaces::{
    BatchTickReport, SubmissionOutcome, SubmitImportRequest,
};
use common_services::api::import::service::{submit_import, tick_batch};
use tracing::info;

/// Accepts a selection and either queues it for the background worker or
/// opens a batch session the client keeps ticking.
pub async fn submit_import_handler(
    State(context): State<ApiContext>,
    Json(payload): Json<SubmitImportRequest>,
) -> Result<(StatusCode, Json<SubmissionOutcome>), ImportApiError> {
    info!(
        "Import submission from user {} (background: {})",
        payload.user_id, payload.background
    );
    let outcome = submit_import(
        &context.pool,
        &context.settings,
        context.library_provider.as_ref(),
        payload,
    )
    .await?;
    Ok((StatusCode::ACCEPTED, Json(outcome)))
}

/// Processes one item of a batch session. Clients call this repeatedly
/// until `finished` reaches 1.0.
pub async fn tick_batch_handler(
    State(context): State<ApiContext>,
    Path(session_id): Path<String>,
) -> Result<Json<BatchTickReport>, ImportApiError> {
    let report = tick_batch(
        &context.pool,
        &context.settings,
        context.library_provider.as_ref(),
        &session_id,
    )
    .await?;
    Ok(Json(report))
}

use crate::api_state::ApiContext;
use crate::routes::import::handlers::{submit_import_handler, tick_batch_handler};
use axum::Router;
use axum::routing::post;

pub fn import_router() -> Router<ApiContext> {
    Router::new()
        .route("/import/submit", post(submit_import_handler))
        .route("/import/batch/{session_id}/tick", post(tick_batch_handler))
}

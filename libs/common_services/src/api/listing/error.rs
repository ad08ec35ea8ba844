use crate::database::DbError;
use crate::photos_client::PhotoLibraryError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("no remote library connection")]
    NotConnected,

    #[error("Remote library error: {0}")]
    RemoteLibrary(String),

    #[error("Database error")]
    Database(#[from] DbError),
}

impl From<PhotoLibraryError> for ListingError {
    fn from(err: PhotoLibraryError) -> Self {
        match err {
            PhotoLibraryError::NotConnected => Self::NotConnected,
            other => Self::RemoteLibrary(other.to_string()),
        }
    }
}

fn log_error(error: &ListingError) {
    match error {
        ListingError::NotConnected => warn!("Listing -> remote account not connected"),
        ListingError::RemoteLibrary(message) => {
            warn!("Listing -> remote library error: {}", message);
        }
        ListingError::Database(e) => warn!("Listing -> database query failed: {}", e),
    }
}

impl IntoResponse for ListingError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::NotConnected => (
                StatusCode::CONFLICT,
                "Please connect your photo account first.".to_owned(),
            ),
            Self::RemoteLibrary(message) => (
                StatusCode::BAD_GATEWAY,
                format!("Could not reach the photo library: {message}"),
            ),
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A database error occurred.".to_owned(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

use crate::database::DbError;
use crate::importer::ImportError;
use crate::photos_client::PhotoLibraryError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ImportApiError {
    #[error("selection is empty")]
    EmptySelection,

    #[error("unknown user: {0}")]
    UnknownUser(i64),

    #[error("unknown batch session: {0}")]
    UnknownSession(String),

    #[error("no remote library connection")]
    NotConnected,

    #[error("Remote library error: {0}")]
    RemoteLibrary(String),

    #[error("Database error")]
    Database(#[from] DbError),
}

impl From<PhotoLibraryError> for ImportApiError {
    fn from(err: PhotoLibraryError) -> Self {
        match err {
            PhotoLibraryError::NotConnected => Self::NotConnected,
            other => Self::RemoteLibrary(other.to_string()),
        }
    }
}

impl From<ImportError> for ImportApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Library(library_err) => library_err.into(),
            ImportError::Database(db_err) => Self::Database(db_err),
            ImportError::ContentRetrieval(message) => Self::RemoteLibrary(message),
        }
    }
}

fn log_error(error: &ImportApiError) {
    match error {
        ImportApiError::EmptySelection => warn!("Import -> empty selection submitted"),
        ImportApiError::UnknownUser(user_id) => warn!("Import -> unknown user: {}", user_id),
        ImportApiError::UnknownSession(session_id) => {
            warn!("Import -> unknown batch session: {}", session_id);
        }
        ImportApiError::NotConnected => warn!("Import -> remote account not connected"),
        ImportApiError::RemoteLibrary(message) => {
            warn!("Import -> remote library error: {}", message);
        }
        ImportApiError::Database(e) => warn!("Import -> database query failed: {}", e),
    }
}

impl IntoResponse for ImportApiError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::EmptySelection => (
                StatusCode::BAD_REQUEST,
                "Nothing was selected for import.".to_owned(),
            ),
            Self::UnknownUser(user_id) => {
                (StatusCode::NOT_FOUND, format!("Unknown user: {user_id}"))
            }
            Self::UnknownSession(session_id) => (
                StatusCode::NOT_FOUND,
                format!("Unknown batch session: {session_id}"),
            ),
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

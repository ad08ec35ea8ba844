use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Query failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Stored JSON is invalid: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

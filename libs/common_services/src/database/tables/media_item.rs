use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A locally imported media item. `external_id` is the dedup key: at most one
/// row exists per remote item, and a re-import never refreshes the metadata
/// that was captured the first time.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaItem {
    pub id: String,
    pub external_id: String,
    pub relative_path: String,
    pub filename: String,
    pub base_url: String,
    pub mime_type: String,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub description: Option<String>,
    pub taken_at: Option<DateTime<Utc>>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct CreateMediaItem {
    pub external_id: String,
    pub relative_path: String,
    pub filename: String,
    pub base_url: String,
    pub mime_type: String,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub description: Option<String>,
    pub taken_at: Option<DateTime<Utc>>,
    pub user_id: Option<i64>,
}

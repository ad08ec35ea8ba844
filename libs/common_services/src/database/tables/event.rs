use serde::Serialize;
use sqlx::FromRow;

/// Grouping entity a media item and its destination get associated with when
/// it was imported through an album. Keyed by the remote album id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: String,
    pub external_album_id: String,
    pub title: String,
    pub user_id: Option<i64>,
}

use serde::Serialize;
use sqlx::FromRow;

/// Destination content entity media gets attached to on import.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Gallery {
    pub id: i64,
    pub title: String,
    pub owner_id: Option<i64>,
}

/// A group of galleries. Media imported into a gallery is propagated to every
/// circle the gallery belongs to.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Circle {
    pub id: i64,
    pub name: String,
}

use crate::database::DbError;
use crate::importer::{BatchState, ImportContext};
use sqlx::FromRow;

/// Raw row shape; `state` and `context` are JSON text columns.
#[derive(Debug, FromRow)]
pub struct BatchSessionRow {
    pub id: String,
    pub user_id: i64,
    pub state: String,
    pub context: String,
}

/// A foreground import in progress, advanced one item per tick. Survives
/// across invocations so an abandoned page reload can simply resume.
#[derive(Debug)]
pub struct BatchSession {
    pub id: String,
    pub user_id: i64,
    pub state: BatchState,
    pub context: ImportContext,
}

impl TryFrom<BatchSessionRow> for BatchSession {
    type Error = DbError;

    fn try_from(row: BatchSessionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            state: serde_json::from_str(&row.state)?,
            context: serde_json::from_str(&row.context)?,
        })
    }
}

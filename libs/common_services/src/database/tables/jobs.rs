use serde_json::Value;
use sqlx::FromRow;
use sqlx::types::Json;

#[derive(Debug, FromRow)]
pub struct Job {
    pub id: i64,
    pub job_type: JobType,
    pub payload: Option<Json<Value>>,
    pub user_id: Option<i64>,
    pub priority: i64,
    pub attempts: i64,
    pub max_attempts: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
pub enum JobType {
    ImportItem,
    NotifyCompletion,
}

impl JobType {
    /// Lower numbers are claimed first. The completion notice sorts after the
    /// import items of the same submission.
    #[must_use]
    pub const fn get_priority(&self) -> i64 {
        match self {
            Self::ImportItem => 50,
            Self::NotifyCompletion => 90,
        }
    }
}

use crate::importer::Destination;
use serde::{Deserialize, Serialize};

/// Notice returned on background submissions. The actual completion
/// message arrives through the notification channel later.
pub const BACKGROUND_NOTICE: &str = "Your item(s) are importing in background. \
You will be notified once the import is finished.";

/// What the user picked in the browser, handed over once per submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Individual media items from the date-based picker.
    Photos(Vec<String>),
    /// Whole albums; each album expands to its member items on submission.
    Albums(Vec<AlbumSelection>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumSelection {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitImportRequest {
    pub user_id: i64,
    pub destination: Destination,
    /// Queue the work instead of processing it in ticked foreground steps.
    #[serde(default)]
    pub background: bool,
    /// Create an event per selected album and link imported items to it.
    #[serde(default)]
    pub auto_create_event: bool,
    pub selection: Selection,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// Background import was queued.
    Scheduled {
        photos_count: u64,
        albums_count: Option<u64>,
        message: String,
    },
    /// Foreground batch created; tick it until `finished` reaches 1.0.
    Batch { session_id: String, total: usize },
}

#[derive(Debug, Serialize)]
pub struct BatchTickReport {
    pub session_id: String,
    pub processed: usize,
    pub total: usize,
    pub finished: f64,
    pub message: String,
    /// Item-level failure of this tick, if any. The batch moves on.
    pub error: Option<String>,
}

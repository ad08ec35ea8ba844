use serde::{Deserialize, Serialize};

/// Everything a single import needs to know about the submission it belongs
/// to. Serialized into queue payloads and batch sessions; never stored
/// anywhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportContext {
    pub destination: Destination,
    /// Which selected album each item belongs to, in submission order.
    /// Empty for date-based imports and album imports without event
    /// auto-creation.
    #[serde(default)]
    pub album_mapping: Vec<AlbumMembers>,
}

/// Where imported media gets attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Destination {
    Gallery(i64),
    Circle(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumMembers {
    pub album_id: String,
    pub title: String,
    pub items: Vec<String>,
}

use serde::{Deserialize, Serialize};

/// Search request against the remote media item index. Either an album id or
/// a set of filters; the remote API rejects both at once.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSearchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<SearchFilters>,
    /// Desired page size. The remote side may return fewer items.
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub media_type_filter: MediaTypeFilter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_filter: Option<DateFilter>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaTypeFilter {
    pub media_types: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateFilter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dates: Vec<RemoteDate>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ranges: Vec<RemoteDateRange>,
}

/// Partial date; zero means unset, matching the remote API convention.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RemoteDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDateRange {
    pub start_date: RemoteDate,
    pub end_date: RemoteDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaItemsPage {
    pub media_items: Vec<RemoteMediaItem>,
    /// Empty when this was the last page.
    pub next_page_token: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteMediaItem {
    pub id: String,
    pub base_url: String,
    pub mime_type: String,
    pub description: Option<String>,
    pub filename: Option<String>,
    pub product_url: Option<String>,
    pub media_metadata: RemoteMediaMetadata,
}

/// The remote API serializes pixel dimensions as strings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteMediaMetadata {
    pub creation_time: String,
    pub width: Option<String>,
    pub height: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlbumsPage {
    pub shared_albums: Vec<RemoteAlbum>,
    pub next_page_token: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteAlbum {
    pub id: String,
    pub title: Option<String>,
    pub cover_photo_base_url: Option<String>,
    pub total_media_items: Option<String>,
}

use serde::Deserialize;
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub media: RawMediaSettings,
    pub remote_library: RemoteLibrarySettings,
    pub api: ApiSettings,
    pub queue: QueueSettings,
    pub secrets: SecretSettings,
}

/// Where downloaded media content ends up on disk.
#[derive(Debug, Deserialize, Clone)]
pub struct RawMediaSettings {
    pub media_folder: PathBuf,
    /// Width hint appended to content URLs when downloading.
    pub download_width: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RemoteLibrarySettings {
    /// Base URL of the remote photo library API.
    pub base_url: Url,
    /// Desired page size for media listings. The remote side may return fewer.
    pub photos_page_size: u32,
    pub albums_page_size: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct QueueSettings {
    /// How often an import job is retried before it is dead-lettered.
    pub max_attempts: i64,
    /// Worker poll interval when the queue is empty.
    pub sleep_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretSettings {
    pub database_url: String,
}

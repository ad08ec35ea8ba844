use crate::{ApiSettings, QueueSettings, RawSettings, RemoteLibrarySettings, SecretSettings};
use serde::Deserialize;
use std::path::{PathBuf, absolute};

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub media: MediaSettings,
    pub remote_library: RemoteLibrarySettings,
    pub api: ApiSettings,
    pub queue: QueueSettings,
    pub secrets: SecretSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MediaSettings {
    /// Absolute root of the local media store.
    pub media_root: PathBuf,
    pub download_width: u32,
}

impl From<RawSettings> for AppSettings {
    fn from(raw: RawSettings) -> Self {
        let media_root = absolute(&raw.media.media_folder).expect("Invalid media_folder");
        Self {
            media: MediaSettings {
                media_root,
                download_width: raw.media.download_width,
            },
            remote_library: raw.remote_library,
            api: raw.api,
            queue: raw.queue,
            secrets: raw.secrets,
        }
    }
}

//! Test support: in-memory stand-ins for the external collaborators.

use crate::database::{CircleStore, GalleryStore, UserStore};
use crate::importer::{NotificationChannel, Recipient};
use crate::photos_client::{
    AlbumsPage, MediaItemsPage, MediaSearchQuery, PhotoLibrary, PhotoLibraryError,
    PhotoLibraryProvider, RemoteAlbum, RemoteMediaItem, RemoteMediaMetadata,
};
use app_state::{
    ApiSettings, AppSettings, MediaSettings, QueueSettings, RemoteLibrarySettings, SecretSettings,
};
use async_trait::async_trait;
use color_eyre::Result;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

/// Settings pointing at a throwaway media root.
#[must_use]
pub fn test_settings(media_root: &Path) -> AppSettings {
    AppSettings {
        media: MediaSettings {
            media_root: media_root.to_path_buf(),
            download_width: 900,
        },
        remote_library: RemoteLibrarySettings {
            base_url: "https://photos.example".parse().expect("invalid url"),
            photos_page_size: 25,
            albums_page_size: 10,
        },
        api: ApiSettings {
            host: "127.0.0.1".to_owned(),
            port: 0,
        },
        queue: QueueSettings {
            max_attempts: 3,
            sleep_ms: 10,
        },
        secrets: SecretSettings {
            database_url: "sqlite::memory:".to_owned(),
        },
    }
}

/// Fresh in-memory database with all migrations applied. A single
/// connection keeps the database alive for the whole test.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("invalid sqlite url")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .max_lifetime(None)
        .idle_timeout(None)
        .connect_with(options)
        .await
        .expect("cannot open test database");
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("migrations failed");
    pool
}

/// Creates a user with a healthy remote library connection.
pub async fn seed_connected_user(pool: &SqlitePool, name: &str, email: &str) -> i64 {
    let user = UserStore::create(pool, name, email, "en")
        .await
        .expect("cannot create user");
    UserStore::connect_remote_account(
        pool,
        user.id,
        r#"{"access_token": "test-token"}"#,
        true,
    )
    .await
    .expect("cannot connect remote account");
    user.id
}

/// Creates a gallery inside a circle and returns `(gallery_id, circle_id)`.
pub async fn seed_gallery_in_circle(pool: &SqlitePool, owner_id: i64) -> (i64, i64) {
    let gallery = GalleryStore::create(pool, "Holiday page", Some(owner_id))
        .await
        .expect("cannot create gallery");
    let circle = CircleStore::create(pool, "Family")
        .await
        .expect("cannot create circle");
    CircleStore::add_gallery(pool, circle.id, gallery.id)
        .await
        .expect("cannot link gallery");
    (gallery.id, circle.id)
}

/// Builds a remote media item the way the remote API would describe it.
#[must_use]
pub fn remote_item(id: &str, filename: &str) -> RemoteMediaItem {
    RemoteMediaItem {
        id: id.to_owned(),
        base_url: format!("https://content.example/{id}"),
        mime_type: "image/jpeg".to_owned(),
        description: None,
        filename: Some(filename.to_owned()),
        product_url: None,
        media_metadata: RemoteMediaMetadata {
            creation_time: "2021-06-05T10:20:30Z".to_owned(),
            width: Some("4032".to_owned()),
            height: Some("3024".to_owned()),
        },
    }
}

/// In-memory photo library. Items live in a map; albums map to member item
/// ids and are served as a single search page.
#[derive(Clone, Default)]
pub struct FakePhotoLibrary {
    pub items: BTreeMap<String, RemoteMediaItem>,
    pub albums: Vec<(RemoteAlbum, Vec<String>)>,
    /// Item ids whose fetch should fail with a remote error.
    pub failing_ids: HashSet<String>,
    pub content: Vec<u8>,
}

impl FakePhotoLibrary {
    #[must_use]
    pub fn with_items(items: Vec<RemoteMediaItem>) -> Self {
        Self {
            items: items.into_iter().map(|i| (i.id.clone(), i)).collect(),
            content: b"jpeg-bytes".to_vec(),
            ..Self::default()
        }
    }

    pub fn add_album(&mut self, id: &str, title: &str, member_ids: &[&str]) {
        self.albums.push((
            RemoteAlbum {
                id: id.to_owned(),
                title: Some(title.to_owned()),
                cover_photo_base_url: None,
                total_media_items: Some(member_ids.len().to_string()),
            },
            member_ids.iter().map(|&m| m.to_owned()).collect(),
        ));
    }
}

#[async_trait]
impl PhotoLibrary for FakePhotoLibrary {
    async fn search_media_items(
        &self,
        query: &MediaSearchQuery,
    ) -> Result<MediaItemsPage, PhotoLibraryError> {
        let media_items = match &query.album_id {
            Some(album_id) => {
                let (_, member_ids) = self
                    .albums
                    .iter()
                    .find(|(album, _)| &album.id == album_id)
                    .ok_or_else(|| {
                        PhotoLibraryError::RemoteServer(format!("no such album: {album_id}"))
                    })?;
                member_ids
                    .iter()
                    .filter_map(|id| self.items.get(id).cloned())
                    .collect()
            }
            None => self.items.values().cloned().collect(),
        };

        Ok(MediaItemsPage {
            media_items,
            next_page_token: String::new(),
        })
    }

    async fn list_shared_albums(
        &self,
        _page_token: Option<&str>,
        _page_size: u32,
    ) -> Result<AlbumsPage, PhotoLibraryError> {
        Ok(AlbumsPage {
            shared_albums: self.albums.iter().map(|(album, _)| album.clone()).collect(),
            next_page_token: String::new(),
        })
    }

    async fn get_media_item(
        &self,
        external_id: &str,
    ) -> Result<RemoteMediaItem, PhotoLibraryError> {
        if self.failing_ids.contains(external_id) {
            return Err(PhotoLibraryError::RemoteServer(format!(
                "item fetch blew up: {external_id}"
            )));
        }
        self.items.get(external_id).cloned().ok_or_else(|| {
            PhotoLibraryError::RemoteServer(format!("no such item: {external_id}"))
        })
    }

    async fn download_content(&self, _url: &str) -> Result<Vec<u8>, PhotoLibraryError> {
        Ok(self.content.clone())
    }
}

/// Provider handing out clones of one fake library, optionally simulating a
/// user without a remote connection.
#[derive(Clone, Default)]
pub struct FakeLibraryProvider {
    pub library: FakePhotoLibrary,
    pub fail_connect: bool,
}

#[async_trait]
impl PhotoLibraryProvider for FakeLibraryProvider {
    async fn connect(
        &self,
        _pool: &SqlitePool,
        _user_id: i64,
    ) -> Result<Box<dyn PhotoLibrary>, PhotoLibraryError> {
        if self.fail_connect {
            return Err(PhotoLibraryError::NotConnected);
        }
        Ok(Box::new(self.library.clone()))
    }
}

/// Captures sent notifications instead of delivering them.
#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<(Recipient, String)>>,
}

#[async_trait]
impl NotificationChannel for RecordingNotifier {
    async fn send(&self, recipient: &Recipient, message: &str) -> Result<()> {
        self.messages
            .lock()
            .expect("notifier mutex poisoned")
            .push((recipient.clone(), message.to_owned()));
        Ok(())
    }
}

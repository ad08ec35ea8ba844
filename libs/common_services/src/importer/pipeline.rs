use crate::database::media_item::{CreateMediaItem, MediaItem};
use crate::database::{CircleStore, DbError, EventStore, GalleryStore, MediaItemStore, UserStore};
use crate::database::event::Event;
use crate::importer::{Destination, ImportContext};
use crate::photos_client::{PhotoLibrary, PhotoLibraryError, RemoteMediaItem};
use app_state::{AppSettings, MakeRelativePath};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use thiserror::Error;
use tokio::fs;
use tracing::info;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Library(#[from] PhotoLibraryError),

    #[error(transparent)]
    Database(#[from] DbError),

    #[error("could not store media content: {0}")]
    ContentRetrieval(String),
}

impl ImportError {
    /// Whether retrying the same import can ever succeed without user
    /// action. A missing remote connection cannot, so the queue driver
    /// dead-letters it instead of backing off.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Library(PhotoLibraryError::NotConnected))
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::ContentRetrieval(err.to_string())
    }
}

/// Imports a single remote media item for the acting user: fetch it, create
/// the local record unless the external id is already claimed, resolve the
/// event it belongs to, and wire up all destination references. The caller
/// owns failure policy; this function only reports what went wrong.
pub async fn import_one(
    pool: &SqlitePool,
    settings: &AppSettings,
    library: &dyn PhotoLibrary,
    external_media_id: &str,
    user_id: i64,
    context: &ImportContext,
) -> Result<MediaItem, ImportError> {
    let remote_item = library.get_media_item(external_media_id).await?;

    let media = find_or_create_media(pool, settings, library, &remote_item, Some(user_id)).await?;
    let event = resolve_event(pool, &remote_item, context, user_id).await?;
    create_media_references(pool, &media, event.as_ref(), context.destination).await?;

    Ok(media)
}

/// Looks up the local record for a remote item, downloading content and
/// creating it when this external id was never imported before. An existing
/// record is returned untouched: re-imports deliberately do not refresh
/// metadata that may have been edited locally since.
pub async fn find_or_create_media(
    pool: &SqlitePool,
    settings: &AppSettings,
    library: &dyn PhotoLibrary,
    remote_item: &RemoteMediaItem,
    user_id: Option<i64>,
) -> Result<MediaItem, ImportError> {
    if let Some(existing) = MediaItemStore::find_by_external_id(pool, &remote_item.id).await? {
        return Ok(existing);
    }

    let filename = content_filename(remote_item);
    let relative_path = retrieve_file(settings, library, remote_item, &filename).await?;

    let taken_at = DateTime::parse_from_rfc3339(&remote_item.media_metadata.creation_time)
        .ok()
        .map(|t| t.with_timezone(&Utc));

    let create = CreateMediaItem {
        external_id: remote_item.id.clone(),
        relative_path,
        filename,
        base_url: remote_item.base_url.clone(),
        mime_type: remote_item.mime_type.clone(),
        width: parse_dimension(remote_item.media_metadata.width.as_deref()),
        height: parse_dimension(remote_item.media_metadata.height.as_deref()),
        description: remote_item.description.clone(),
        taken_at,
        user_id,
    };

    let media = MediaItemStore::create_or_fetch(pool, &create).await?;
    info!("🖼️ Created media item {} for {}", media.id, media.external_id);
    Ok(media)
}

/// Downloads the item's content into the month-partitioned media store and
/// returns the relative path. When the target file already exists the
/// download is skipped and the path reused as-is.
async fn retrieve_file(
    settings: &AppSettings,
    library: &dyn PhotoLibrary,
    remote_item: &RemoteMediaItem,
    filename: &str,
) -> Result<String, ImportError> {
    let month_folder = Utc::now().format("%Y-%m").to_string();
    let target_dir = settings.media.media_root.join(&month_folder);
    let target_path = target_dir.join(filename);
    let relative_path = target_path
        .make_relative(&settings.media.media_root)
        .map_err(|e| ImportError::ContentRetrieval(e.to_string()))?;

    if fs::try_exists(&target_path).await? {
        return Ok(relative_path);
    }

    let download_url = format!(
        "{}=w{}",
        remote_item.base_url, settings.media.download_width
    );
    let content = library.download_content(&download_url).await?;

    fs::create_dir_all(&target_dir).await?;
    fs::write(&target_path, &content).await?;

    Ok(relative_path)
}

fn content_filename(remote_item: &RemoteMediaItem) -> String {
    let name = remote_item
        .filename
        .clone()
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| {
            let extension = remote_item
                .mime_type
                .rsplit('/')
                .next()
                .unwrap_or("bin");
            format!("{}.{extension}", remote_item.id)
        });
    sanitize_filename::sanitize(name)
}

fn parse_dimension(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.parse().ok())
}

/// Finds which selected album (if any) this item belongs to and loads or
/// creates the corresponding event. Items imported outside any album
/// context get no event.
pub async fn resolve_event(
    pool: &SqlitePool,
    remote_item: &RemoteMediaItem,
    context: &ImportContext,
    user_id: i64,
) -> Result<Option<Event>, ImportError> {
    let Some(members) = context
        .album_mapping
        .iter()
        .find(|m| m.items.iter().any(|id| id == &remote_item.id))
    else {
        return Ok(None);
    };

    let title = if members.title.is_empty() {
        generate_event_title(pool, remote_item, context, user_id).await?
    } else {
        members.title.clone()
    };

    let event = EventStore::find_or_create(pool, &members.album_id, &title, Some(user_id)).await?;
    Ok(Some(event))
}

/// Fallback event title for albums without one: the acting user's name, the
/// destination circle's name and the item's creation time.
async fn generate_event_title(
    pool: &SqlitePool,
    remote_item: &RemoteMediaItem,
    context: &ImportContext,
    user_id: i64,
) -> Result<String, ImportError> {
    let account_name = UserStore::find_by_id(pool, user_id)
        .await?
        .map(|u| u.name)
        .unwrap_or_default();

    let container_name = match context.destination {
        Destination::Circle(circle_id) => CircleStore::find_by_id(pool, circle_id)
            .await?
            .map(|c| c.name)
            .unwrap_or_default(),
        Destination::Gallery(gallery_id) => GalleryStore::circles_of(pool, gallery_id)
            .await?
            .last()
            .map(|c| c.name.clone())
            .unwrap_or_default(),
    };

    Ok([
        account_name,
        container_name,
        remote_item.media_metadata.creation_time.clone(),
    ]
    .join(" - "))
}

/// Attaches the media item to its destination. A gallery destination also
/// propagates the item (and event) to every circle the gallery belongs to.
/// All attachments are idempotent.
async fn create_media_references(
    pool: &SqlitePool,
    media: &MediaItem,
    event: Option<&Event>,
    destination: Destination,
) -> Result<(), ImportError> {
    if let Some(event) = event {
        EventStore::attach_to_media(pool, &event.id, &media.id).await?;
    }

    match destination {
        Destination::Gallery(gallery_id) => {
            GalleryStore::add_media_item(pool, gallery_id, &media.id).await?;
            for circle in GalleryStore::circles_of(pool, gallery_id).await? {
                CircleStore::add_media_item(pool, circle.id, &media.id).await?;
                if let Some(event) = event {
                    CircleStore::add_event(pool, circle.id, &event.id).await?;
                }
            }
        }
        Destination::Circle(circle_id) => {
            CircleStore::add_media_item(pool, circle_id, &media.id).await?;
            if let Some(event) = event {
                CircleStore::add_event(pool, circle_id, &event.id).await?;
            }
        }
    }

    Ok(())
}

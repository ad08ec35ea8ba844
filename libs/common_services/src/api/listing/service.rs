use crate::api::listing::error::ListingError;
use crate::api::listing::interfaces::{
    AlbumListingPage, AlbumListingQuery, AlbumSummary, PhotoListingPage, PhotoListingQuery,
    PhotoSummary,
};
use crate::database::PageTokenStore;
use crate::photos_client::{MediaSearchQuery, PhotoLibrary};
use app_state::AppSettings;
use sqlx::SqlitePool;

/// Searches the user's remote photos with the requested filters and drives
/// the page-token cache: walking forward records the token that led past
/// the current page, so the previous-page link can be offered later.
pub async fn list_photos(
    pool: &SqlitePool,
    settings: &AppSettings,
    library: &dyn PhotoLibrary,
    query: &PhotoListingQuery,
) -> Result<PhotoListingPage, ListingError> {
    let filters = query.filters_value();

    if query.page > 0
        && let Some(token) = query.next_page_token.as_deref().filter(|t| !t.is_empty())
    {
        PageTokenStore::save(pool, query.user_id, &filters, query.page, token).await?;
    }

    let search = MediaSearchQuery {
        album_id: None,
        filters: Some(query.to_search_filters()),
        page_size: settings.remote_library.photos_page_size,
        page_token: query.next_page_token.clone(),
    };
    let page = library.search_media_items(&search).await?;

    let prev_page_token = if query.page == 0 {
        String::new()
    } else {
        PageTokenStore::find_previous(pool, query.user_id, &filters, query.page).await?
    };

    Ok(PhotoListingPage {
        items: page.media_items.iter().map(PhotoSummary::from).collect(),
        next_page_token: page.next_page_token,
        prev_page_token,
    })
}

/// Lists the user's shared remote albums. Only shared albums are exposed by
/// the remote API, so that is all the picker can offer.
pub async fn list_albums(
    settings: &AppSettings,
    library: &dyn PhotoLibrary,
    query: &AlbumListingQuery,
) -> Result<AlbumListingPage, ListingError> {
    let page = library
        .list_shared_albums(
            query.page_token.as_deref(),
            settings.remote_library.albums_page_size,
        )
        .await?;

    let items = page
        .shared_albums
        .into_iter()
        .map(|album| AlbumSummary {
            title: album.title.unwrap_or_default(),
            cover_url: album.cover_photo_base_url,
            media_count: album
                .total_media_items
                .and_then(|c| c.parse().ok())
                .unwrap_or(0),
            id: album.id,
        })
        .collect();

    Ok(AlbumListingPage {
        items,
        next_page_token: page.next_page_token,
    })
}

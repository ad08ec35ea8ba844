use crate::api_state::ApiContext;
use axum::Json;
use axum::extract::{Query, State};
use common_services::api::listing::error::ListingError;
use common_services::api::listing::interfaces::{
    AlbumListingPage, AlbumListingQuery, PhotoListingPage, PhotoListingQuery,
};
use common_services::api::listing::service::{list_albums, list_photos};

/// Browse the user's remote photos, filtered by date. Walking forward
/// feeds the page-token cache so backward links keep working.
pub async fn list_photos_handler(
    State(context): State<ApiContext>,
    Query(query): Query<PhotoListingQuery>,
) -> Result<Json<PhotoListingPage>, ListingError> {
    let library = context
        .library_provider
        .connect(&context.pool, query.user_id)
        .await?;
    let page = list_photos(&context.pool, &context.settings, library.as_ref(), &query).await?;
    Ok(Json(page))
}

/// Browse the user's shared remote albums.
pub async fn list_albums_handler(
    State(context): State<ApiContext>,
    Query(query): Query<AlbumListingQuery>,
) -> Result<Json<AlbumListingPage>, ListingError> {
    let library = context
        .library_provider
        .connect(&context.pool, query.user_id)
        .await?;
    let page = list_albums(&context.settings, library.as_ref(), &query).await?;
    Ok(Json(page))
}

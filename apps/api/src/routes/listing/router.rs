use crate::api_state::ApiContext;
use crate::routes::listing::handlers::{list_albums_handler, list_photos_handler};
use axum::Router;
use axum::routing::get;

pub fn listing_router() -> Router<ApiContext> {
    Router::new()
        .route("/photos", get(list_photos_handler))
        .route("/albums", get(list_albums_handler))
}

use crate::api_state::ApiContext;
use axum::Router;

pub mod import;
pub mod listing;
pub mod root;

pub fn create_router(context: ApiContext) -> Router {
    Router::new()
        .merge(root::router::root_router())
        .merge(listing::router::listing_router())
        .merge(import::router::import_router())
        .with_state(context)
}

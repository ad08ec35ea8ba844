use crate::api_state::ApiContext;
use crate::routes::root::handlers::health_handler;
use axum::Router;
use axum::routing::get;

pub fn root_router() -> Router<ApiContext> {
    Router::new().route("/", get(health_handler))
}

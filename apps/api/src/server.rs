use crate::api_state::ApiContext;
use crate::create_router;
use app_state::AppSettings;
use color_eyre::Result;
use common_services::photos_client::HttpLibraryProvider;
use reqwest::Client;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub async fn serve(pool: SqlitePool, settings: AppSettings) -> Result<()> {
    info!("🚀 Initializing server...");
    let base_url = settings.remote_library.base_url.clone();
    let api_state = ApiContext {
        pool,
        settings: settings.clone(),
        library_provider: Arc::new(HttpLibraryProvider::new(Client::new(), base_url)),
    };

    let cors = CorsLayer::new()
        .allow_methods(cors::Any)
        .allow_origin(cors::Any)
        .allow_headers(cors::Any);

    let app = create_router(api_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let address = format!("{}:{}", settings.api.host, settings.api.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("🛰️ Listening on {}", address);
    axum::serve(listener, app).await?;

    Ok(())
}

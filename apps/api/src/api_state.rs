use app_state::AppSettings;
use common_services::photos_client::PhotoLibraryProvider;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiContext {
    pub pool: SqlitePool,
    pub settings: AppSettings,
    pub library_provider: Arc<dyn PhotoLibraryProvider>,
}

use app_state::AppSettings;
use common_services::importer::{LogNotifier, NotificationChannel};
use common_services::photos_client::{HttpLibraryProvider, PhotoLibraryProvider};
use reqwest::Client;
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct WorkerContext {
    pub worker_id: String,
    pub pool: SqlitePool,
    pub settings: AppSettings,
    pub library_provider: Arc<dyn PhotoLibraryProvider>,
    pub notifier: Arc<dyn NotificationChannel>,
}

impl WorkerContext {
    #[must_use]
    pub fn new(pool: SqlitePool, settings: AppSettings, worker_id: String) -> Self {
        let base_url = settings.remote_library.base_url.clone();
        Self {
            worker_id,
            pool,
            settings,
            library_provider: Arc::new(HttpLibraryProvider::new(Client::new(), base_url)),
            notifier: Arc::new(LogNotifier),
        }
    }
}

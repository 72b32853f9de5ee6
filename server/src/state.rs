use airport_booking::config::Config;
use sea_orm::DatabaseConnection;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub media_root: Arc<PathBuf>,
    pub order_page_size: u64,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &Config) -> Self {
        Self {
            db,
            media_root: Arc::new(config.media_root.clone()),
            order_page_size: config.order_page_size,
        }
    }
}

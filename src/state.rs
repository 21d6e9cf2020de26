use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::services::backend::Backend;

pub struct AppState {
    pub config: AppConfig,
    pub backend: Arc<dyn Backend>,
    pub store: Arc<Mutex<Connection>>,
}

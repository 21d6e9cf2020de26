use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_url: String,
    pub database_url: String,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: normalize_base_url(
                &env::var("API_URL").unwrap_or_else(|_| "http://localhost:5000".to_string()),
            ),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "homecare.db".to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = normalize_base_url(api_url);
        self
    }

    pub fn with_database_url(mut self, database_url: impl Into<String>) -> Self {
        self.database_url = database_url.into();
        self
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

use std::env;

/// Listener and observability settings for the HTTP server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// `SERVER_ADDR`, default `0.0.0.0:3000`
    pub addr: String,
    /// `METRICS_PORT`, default 9090
    pub metrics_port: u16,
    /// `LOG_DIR`, default `storage/logs`
    pub log_dir: String,
    /// `DATABASE_URL`; when unset the server runs on in-memory stores
    pub database_url: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            metrics_port: env::var("METRICS_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(9090),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "storage/logs".to_string()),
            database_url: env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
        }
    }
}

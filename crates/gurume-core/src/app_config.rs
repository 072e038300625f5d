use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Access key for the gourmet API. Absence is reported per request, not at startup.
    pub hotpepper_api_key: Option<String>,
    pub hotpepper_base_url: String,
    /// Translate amenity flags into upstream boolean parameters. Off by default.
    pub amenity_mapping: bool,
    /// `None` leaves upstream calls without a timeout.
    pub upstream_timeout_secs: Option<u64>,
    /// Host the shop detail view uses to call back into `/api/shops/{id}`.
    pub api_host: Option<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field(
                "hotpepper_api_key",
                &self.hotpepper_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("hotpepper_base_url", &self.hotpepper_base_url)
            .field("amenity_mapping", &self.amenity_mapping)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("api_host", &self.api_host)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}

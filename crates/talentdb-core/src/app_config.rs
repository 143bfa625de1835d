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
    pub torre_base_url: String,
    pub torre_request_timeout_secs: u64,
    pub torre_user_agent: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// Pause after each profile fetched by an ad-hoc username batch.
    pub collect_profiles_delay_ms: u64,
    /// Pause after each profile fetched by the pending-profile sweep.
    pub pending_profiles_delay_ms: u64,
    /// Pause between fetches in the bulk profile helper.
    pub bulk_profiles_delay_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("torre_base_url", &self.torre_base_url)
            .field(
                "torre_request_timeout_secs",
                &self.torre_request_timeout_secs,
            )
            .field("torre_user_agent", &self.torre_user_agent)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("collect_profiles_delay_ms", &self.collect_profiles_delay_ms)
            .field("pending_profiles_delay_ms", &self.pending_profiles_delay_ms)
            .field("bulk_profiles_delay_ms", &self.bulk_profiles_delay_ms)
            .finish()
    }
}

//! Process configuration, read from the environment at bootstrap.

/// Runtime configuration for the API process.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Socket address to bind, e.g. `0.0.0.0:8080`.
    pub bind_addr: String,
    /// Static bearer token for the auth stub. `None` disables the check.
    pub api_token: Option<String>,
    /// Use the Postgres-backed stores instead of the in-memory ones.
    pub use_persistent_store: bool,
    /// Postgres connection string; required when `use_persistent_store`.
    pub database_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            api_token: std::env::var("API_TOKEN").ok().filter(|t| !t.is_empty()),
            use_persistent_store: std::env::var("USE_PERSISTENT_STORE")
                .unwrap_or_else(|_| "false".to_string())
                .parse::<bool>()
                .unwrap_or(false),
            database_url: std::env::var("DATABASE_URL").ok(),
        }
    }

    /// In-memory, unauthenticated configuration for tests.
    pub fn in_memory() -> Self {
        Self {
            bind_addr: "127.0.0.1:0".to_string(),
            ..Self::default()
        }
    }
}

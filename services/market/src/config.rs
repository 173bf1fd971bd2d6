use std::path::PathBuf;

/// Market service configuration loaded from environment variables.
#[derive(Debug)]
pub struct MarketConfig {
    /// TCP port for the HTTP server (default 3113). Env var: `MARKET_PORT`.
    pub market_port: u16,
    /// Directory holding the JSON collections. Unset means an in-memory
    /// store that forgets everything on restart. Env var: `MARKET_DATA_DIR`.
    pub data_dir: Option<PathBuf>,
    /// Shared secret required to create admin accounts. Env var:
    /// `MARKET_ADMIN_KEY`.
    pub admin_key: String,
}

impl MarketConfig {
    pub fn from_env() -> Self {
        Self {
            market_port: std::env::var("MARKET_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3113),
            data_dir: std::env::var("MARKET_DATA_DIR").ok().map(PathBuf::from),
            admin_key: std::env::var("MARKET_ADMIN_KEY").expect("MARKET_ADMIN_KEY"),
        }
    }
}

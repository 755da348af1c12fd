//! Application configuration
//!
//! All settings come from environment variables (a `.env` file is loaded
//! at startup when present):
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | API_BASE_URL | http://localhost:8080/employee | Directory backend base URL |
//! | REQUEST_TIMEOUT_SECS | 30 | Per-request timeout |
//! | LOG_LEVEL | info | Tracing filter when RUST_LOG is unset |

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory backend base URL; the five endpoint suffixes hang off it
    pub api_base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Tracing filter directive
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            api_base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080/employee".into()),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }

    /// Configuration pointing at a specific backend, for tests
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.api_base_url = base_url.into();
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

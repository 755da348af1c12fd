//! Staffdir Client - HTTP client for the employee directory backend
//!
//! Wraps the backend's five REST endpoints behind a typed API.

pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::DirectoryClient;

// Re-export shared types for convenience
pub use shared::Employee;

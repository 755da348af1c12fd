//! Shared types for the staffdir workspace
//!
//! Wire-level types exchanged with the directory backend, used by both
//! the access client and the TUI frontend.

pub mod models;

// Re-exports
pub use models::Employee;
pub use serde::{Deserialize, Serialize};

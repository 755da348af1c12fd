//! Staffdir TUI - terminal frontend for the employee directory
//!
//! Routes three screens (list, create form, edit form) over the REST
//! access client and renders them with ratatui.

pub mod app;
pub mod config;
pub mod router;
pub mod ui;
pub mod utils;
pub mod views;

// Re-exports
pub use app::{App, NetEvent, Screen};
pub use config::Config;
pub use router::Route;

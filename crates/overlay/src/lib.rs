//! # OVERLAY
//!
//! Application layer over `overlay_ui`:
//! - TOML configuration with a default for every field
//! - The built-in behavior set (`LogState`, `Heartbeat`)
//! - A session that owns the driver and, optionally, the markup watcher

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod app;
pub mod behaviors;
pub mod config;

pub use app::{AppError, Session};
pub use behaviors::builtin_registry;
pub use config::{ConfigError, OverlayConfig};

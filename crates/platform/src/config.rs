//! Application configuration and constants
//!
//! Central naming and capture-geometry values. Reference these constants
//! rather than hardcoding values.

/// The application name
pub const APP_NAME: &str = "Colour Recall";

/// The application type/category
pub const APP_TYPE: &str = "Memory Trainer";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Snapshot canvas width in pixels
pub const FRAME_WIDTH: usize = 300;

/// Snapshot canvas height in pixels
pub const FRAME_HEIGHT: usize = 200;

/// Development mode banner
pub const fn dev_banner() -> &'static str {
    "Colour Recall - Simulator"
}

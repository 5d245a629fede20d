//! soft3d: a CPU-only 3D rasterizer
//!
//! Meshes go through world, view and projection transforms and land in a BGRA
//! color buffer with a z-buffer beside it:
//! - Point, wireframe, flat and Gouraud shaded modes
//! - RON scene files and a few built-in shapes
//! - PNG snapshots of finished frames

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod rasterizer;
pub mod scene;
pub mod config;
pub mod snapshot;
pub mod app;

pub use app::ViewerState;
pub use config::{load_config, ConfigError, ViewerConfig};
pub use snapshot::{save_png, SnapshotError};

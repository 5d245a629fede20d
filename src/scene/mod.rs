//! Scene module - meshes from disk and built-in shapes
//!
//! Scene files are RON, laid out like a flat model export:
//! - Vertex attributes packed into one float array (position, normal, then UVs)
//! - Triangle indices packed three per face
//! - Object position and rotation per mesh

mod format;
mod loader;
pub mod primitives;

pub use format::*;
pub use loader::*;

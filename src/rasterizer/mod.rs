//! Software rasterizer
//!
//! Everything a GPU would do for this pipeline, done on the CPU:
//! - Row-vector 4x4 transforms (world, view, projection) with perspective divide
//! - Point, wireframe (Bresenham), flat and Gouraud shaded modes
//! - Scanline triangle filling with interpolated depth and light
//! - Z-buffer visibility

mod math;
mod matrix;
mod camera;
mod types;
mod lighting;
mod render;

pub use math::*;
pub use matrix::*;
pub use camera::*;
pub use types::*;
pub use lighting::*;
pub use render::*;

/// Resolution presets, smallest first
pub const RESOLUTIONS: [(usize, usize); 4] = [(160, 120), (320, 240), (640, 480), (1024, 768)];

/// Default output size
pub const WIDTH: usize = 640;
pub const HEIGHT: usize = 480;

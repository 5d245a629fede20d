//! Viewer configuration
//!
//! Read from a RON file; every field is optional and falls back to the defaults
//! below.

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::rasterizer::{Camera, Color, RenderMode, RenderSettings, Vec3, HEIGHT, WIDTH};

/// Error type for config loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Everything the frame driver needs to set up the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub width: usize,
    pub height: usize,
    pub render_mode: RenderMode,
    pub light_position: Vec3,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    /// Radians
    pub field_of_view: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    /// Added to every mesh rotation each frame (radians per tick, x = pitch, y = yaw, z = roll)
    pub rotation_step: Vec3,
    pub clear_color: Color,
    pub surface_color: Color,
    pub line_color: Color,
    /// Scene files to cycle through, first one loaded at startup
    pub scenes: Vec<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let camera = Camera::default();
        let settings = RenderSettings::default();
        Self {
            width: WIDTH,
            height: HEIGHT,
            render_mode: settings.mode,
            light_position: settings.light_position,
            camera_position: camera.position,
            camera_target: camera.target,
            field_of_view: camera.fov,
            near_plane: camera.near,
            far_plane: camera.far,
            rotation_step: Vec3::new(0.01, 0.01, 0.0),
            clear_color: Color::BLACK,
            surface_color: settings.surface_color,
            line_color: settings.line_color,
            scenes: vec![PathBuf::from("assets/scenes/cube.ron")],
        }
    }
}

impl ViewerConfig {
    /// Camera for the configured view, with the aspect of the configured resolution
    pub fn camera(&self) -> Camera {
        Camera {
            position: self.camera_position,
            target: self.camera_target,
            fov: self.field_of_view,
            aspect: Camera::aspect_for(self.width, self.height),
            near: self.near_plane,
            far: self.far_plane,
        }
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            mode: self.render_mode,
            light_position: self.light_position,
            line_color: self.line_color,
            point_color: self.line_color,
            surface_color: self.surface_color,
        }
    }
}

/// Load a config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ViewerConfig, ConfigError> {
    let contents = fs::read_to_string(path.as_ref())?;
    let config = load_config_from_str(&contents)?;
    log::info!("loaded config from {}", path.as_ref().display());
    Ok(config)
}

pub fn load_config_from_str(s: &str) -> Result<ViewerConfig, ConfigError> {
    Ok(ron::from_str(s)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = load_config_from_str("()").expect("empty config parses");
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 480);
        assert_eq!(config.render_mode, RenderMode::Wireframe);
        assert_eq!(config.camera_position, Vec3::new(0.0, 0.0, 10.0));
        assert!((config.field_of_view - 0.78).abs() < 1e-6);
    }

    #[test]
    fn test_partial_override() {
        let config = load_config_from_str(
            "(width: 320, height: 240, render_mode: SmoothShading, light_position: (x: 1.0, y: 2.0, z: 3.0))",
        )
        .expect("config parses");
        assert_eq!((config.width, config.height), (320, 240));
        assert_eq!(config.render_mode, RenderMode::SmoothShading);
        assert_eq!(config.render_settings().light_position, Vec3::new(1.0, 2.0, 3.0));
        assert!((config.camera().aspect - 4.0 / 3.0).abs() < 1e-6);
        assert_eq!(config.near_plane, 0.01);
    }

    #[test]
    fn test_bundled_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/viewer.ron");
        let config = load_config(path).expect("bundled config");
        assert_eq!(config.render_mode, RenderMode::FlatShading);
        assert_eq!(config.scenes.len(), 2);
        assert_eq!(config.line_color, Color::YELLOW);
    }

    #[test]
    fn test_bad_config() {
        assert!(matches!(load_config_from_str("(width: \"wide\")"), Err(ConfigError::Parse(_))));
    }
}

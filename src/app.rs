//! Viewer state
//!
//! Everything the interactive frame driver mutates between frames, kept free of
//! any windowing so it can be driven headless.

use std::path::PathBuf;
use crate::config::ViewerConfig;
use crate::rasterizer::{
    Camera, Device, DeviceError, FrameView, Mesh, RenderMode, RenderSettings, Vec3, RESOLUTIONS,
};

/// Smallest and largest field of view the viewer allows (radians)
pub const FOV_RANGE: (f32, f32) = (0.1, 3.0);

/// Main viewer state: the device, what it draws and how
pub struct ViewerState {
    pub device: Device,
    pub camera: Camera,
    pub settings: RenderSettings,
    pub config: ViewerConfig,
    pub meshes: Vec<Mesh>,

    /// Scene files the user can cycle through
    pub scenes: Vec<PathBuf>,
    pub scene_index: usize,

    /// Index into RESOLUTIONS, or None while running at a configured size
    pub resolution_index: Option<usize>,

    status_message: Option<(String, f64)>,
}

impl ViewerState {
    pub fn new(config: ViewerConfig, meshes: Vec<Mesh>) -> Result<Self, DeviceError> {
        let device = Device::new(config.width, config.height)?;
        let resolution_index = RESOLUTIONS
            .iter()
            .position(|&r| r == (config.width, config.height));

        Ok(Self {
            device,
            camera: config.camera(),
            settings: config.render_settings(),
            scenes: config.scenes.clone(),
            scene_index: 0,
            resolution_index,
            config,
            meshes,
            status_message: None,
        })
    }

    /// Advance the scene by one tick: spin every mesh by the configured step
    pub fn tick(&mut self) {
        let step = self.config.rotation_step;
        for mesh in &mut self.meshes {
            mesh.rotation = mesh.rotation + step;
        }
    }

    /// Clear, draw every mesh and hand back the finished frame
    pub fn render_frame(&mut self) -> FrameView<'_> {
        self.device.clear(self.config.clear_color);
        self.device.render(&self.camera, &self.meshes, &self.settings);
        self.device.present()
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        if self.settings.mode != mode {
            self.settings.mode = mode;
            log::debug!("render mode: {}", mode.label());
        }
    }

    /// Switch to the next resolution preset, recreating the device and fixing the aspect
    pub fn cycle_resolution(&mut self) -> Result<(usize, usize), DeviceError> {
        let next = match self.resolution_index {
            Some(i) => (i + 1) % RESOLUTIONS.len(),
            None => 0,
        };
        let (width, height) = RESOLUTIONS[next];
        self.device = Device::new(width, height)?;
        self.resolution_index = Some(next);
        self.camera.aspect = Camera::aspect_for(width, height);
        log::info!("resolution changed to {}x{}", width, height);
        Ok((width, height))
    }

    /// Swap in a freshly loaded scene
    pub fn replace_meshes(&mut self, meshes: Vec<Mesh>) {
        self.meshes = meshes;
    }

    /// Advance to the next scene in the list, returning its path
    pub fn next_scene_path(&mut self) -> Option<PathBuf> {
        if self.scenes.is_empty() {
            return None;
        }
        self.scene_index = (self.scene_index + 1) % self.scenes.len();
        self.scenes.get(self.scene_index).cloned()
    }

    /// Add scenes not already in the list
    pub fn add_scenes<I: IntoIterator<Item = PathBuf>>(&mut self, paths: I) {
        for path in paths {
            if !self.scenes.contains(&path) {
                self.scenes.push(path);
            }
        }
    }

    /// Move camera and target together, so the view direction is unchanged
    pub fn move_camera(&mut self, delta: Vec3) {
        self.camera.position = self.camera.position + delta;
        self.camera.target = self.camera.target + delta;
    }

    pub fn move_light(&mut self, delta: Vec3) {
        self.settings.light_position = self.settings.light_position + delta;
    }

    pub fn adjust_fov(&mut self, delta: f32) {
        self.camera.fov = (self.camera.fov + delta).clamp(FOV_RANGE.0, FOV_RANGE.1);
    }

    /// Set status message that will be shown for a duration
    pub fn set_status(&mut self, message: &str, duration_secs: f64, now: f64) {
        self.status_message = Some((message.to_string(), now + duration_secs));
    }

    /// Get current status message if not expired
    pub fn get_status(&self, now: f64) -> Option<&str> {
        match &self.status_message {
            Some((msg, expiry)) if now < *expiry => Some(msg.as_str()),
            _ => None,
        }
    }
}

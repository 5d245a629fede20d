//! Look-at camera with a perspective projection

use serde::{Serialize, Deserialize};
use super::math::Vec3;
use super::matrix::Mat4;

/// Default field of view in radians (about 45 degrees)
pub const DEFAULT_FOV: f32 = 0.78;
pub const DEFAULT_NEAR: f32 = 0.01;
pub const DEFAULT_FAR: f32 = 1.0;

/// Camera state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians, must lie in (0, PI)
    pub fov: f32,
    /// Width / height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3, aspect: f32) -> Self {
        Self {
            position,
            target,
            fov: DEFAULT_FOV,
            aspect,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }

    /// Aspect ratio that matches a `width` x `height` buffer
    pub fn aspect_for(width: usize, height: usize) -> f32 {
        width as f32 / height as f32
    }

    /// Perspective projection. Maps camera-space depth `near` to 0 and grows towards `far`,
    /// so smaller Z is nearer after the divide.
    pub fn projection_matrix(&self) -> Mat4 {
        let y_scale = 1.0 / (self.fov * 0.5).tan();
        let q = self.far / (self.far - self.near);

        let mut projection = Mat4::ZERO;
        projection.m[0][0] = y_scale / self.aspect;
        projection.m[1][1] = y_scale;
        projection.m[2][2] = q;
        projection.m[2][3] = 1.0;
        projection.m[3][2] = -q * self.near;

        projection
    }

    /// World-to-camera (view) matrix built from an orthonormal basis.
    ///
    /// When `target == position` the forward axis has zero length and the basis
    /// degenerates; nothing guards against that.
    pub fn view_matrix(&self) -> Mat4 {
        let z_axis = (self.target - self.position).normalize();
        let x_axis = Vec3::UP.cross(z_axis).normalize();
        let y_axis = z_axis.cross(x_axis);

        Mat4::from_rows([
            [x_axis.x, y_axis.x, z_axis.x, 0.0],
            [x_axis.y, y_axis.y, z_axis.y, 0.0],
            [x_axis.z, y_axis.z, z_axis.z, 0.0],
            [
                -x_axis.dot(self.position),
                -y_axis.dot(self.position),
                -z_axis.dot(self.position),
                1.0,
            ],
        ])
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 640.0 / 480.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_puts_target_on_forward_axis() {
        let cam = Camera::default();
        let p = cam.view_matrix().transform_point(Vec3::ZERO);
        assert!(p.x.abs() < 1e-5);
        assert!(p.y.abs() < 1e-5);
        assert!((p.z - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_view_keeps_up_direction() {
        let cam = Camera::default();
        let p = cam.view_matrix().transform_point(Vec3::new(0.0, 1.0, 0.0));
        assert!((p.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_projection_near_plane_maps_to_zero_depth() {
        let cam = Camera::default();
        let proj = cam.projection_matrix();
        let p = proj.transform_point(Vec3::new(0.0, 0.0, cam.near));
        assert!(p.z.abs() < 1e-5);
        let far = proj.transform_point(Vec3::new(0.0, 0.0, cam.far));
        assert!((far.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_projection_depth_increases_with_distance() {
        let proj = Camera::default().projection_matrix();
        let a = proj.transform_point(Vec3::new(0.0, 0.0, 2.0)).z;
        let b = proj.transform_point(Vec3::new(0.0, 0.0, 5.0)).z;
        assert!(a < b);
    }

    #[test]
    fn test_projection_scale() {
        let cam = Camera { aspect: 2.0, ..Camera::default() };
        let proj = cam.projection_matrix();
        let y_scale = 1.0 / (cam.fov * 0.5).tan();
        assert!((proj.m[1][1] - y_scale).abs() < 1e-6);
        assert!((proj.m[0][0] - y_scale / 2.0).abs() < 1e-6);
        assert_eq!(proj.m[3][3], 0.0);
    }
}

//! Vector math for 3D rendering
//!
//! Plain `Copy` value types. Nothing here mutates in place; every
//! operation returns a new value.

use std::ops::{Add, Div, Mul, Sub};
use serde::{Serialize, Deserialize};

/// Magnitudes below this are treated as zero
pub const ZERO_TOLERANCE: f32 = 1e-6;

/// True if `value` is within [`ZERO_TOLERANCE`] of zero
pub fn is_zero(value: f32) -> bool {
    value.abs() < ZERO_TOLERANCE
}

pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    min.max(value.min(max))
}

pub fn clamp01(value: f32) -> f32 {
    clamp(value, 0.0, 1.0)
}

/// Linear interpolation between `start` and `end`.
/// The factor is clamped to [0, 1], so the result never leaves the segment.
pub fn lerp(start: f32, end: f32, gradient: f32) -> f32 {
    start + (end - start) * clamp01(gradient)
}

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Euclidean length
    pub fn magnitude(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit-length copy of this vector.
    /// Near-zero vectors come back unchanged rather than blowing up to NaN.
    pub fn normalize(self) -> Vec3 {
        let magnitude = self.magnitude();
        if is_zero(magnitude) {
            return self;
        }
        self.scale(1.0 / magnitude)
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;
    fn div(self, s: f32) -> Vec3 {
        self.scale(1.0 / s)
    }
}

/// Homogeneous coordinate, only alive for the duration of a point transform
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Drop to 3D by scaling with `w`.
    /// Callers store the reciprocal in `w`, so this multiplies rather than divides.
    pub fn scaled_by_w(self) -> Vec3 {
        Vec3::new(self.x * self.w, self.y * self.w, self.z * self.w)
    }
}

/// Rotation quaternion. Only ever built from Euler angles and turned into a matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Build from yaw (around Y), pitch (around X) and roll (around Z), in radians
    pub fn from_euler(yaw: f32, pitch: f32, roll: f32) -> Self {
        let (sin_roll, cos_roll) = (roll * 0.5).sin_cos();
        let (sin_pitch, cos_pitch) = (pitch * 0.5).sin_cos();
        let (sin_yaw, cos_yaw) = (yaw * 0.5).sin_cos();

        Self {
            x: cos_yaw * sin_pitch * cos_roll + sin_yaw * cos_pitch * sin_roll,
            y: sin_yaw * cos_pitch * cos_roll - cos_yaw * sin_pitch * sin_roll,
            z: cos_yaw * cos_pitch * sin_roll - sin_yaw * sin_pitch * cos_roll,
            w: cos_yaw * cos_pitch * cos_roll + sin_yaw * sin_pitch * sin_roll,
        }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }
}

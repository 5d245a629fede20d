//! 4x4 homogeneous transforms
//!
//! Row-major storage, row-vector convention: a point is multiplied as
//! `point * matrix`, so `a * b` applies `a` first. Translation lives in row 3.

use std::ops::Mul;
use super::math::{Quaternion, Vec3, Vec4};

/// Row-major 4x4 matrix, `m[row][col]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const ZERO: Mat4 = Mat4 { m: [[0.0; 4]; 4] };

    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub const fn from_rows(m: [[f32; 4]; 4]) -> Self {
        Self { m }
    }

    /// Rotation from Euler angles in radians (yaw around Y, pitch around X, roll around Z)
    pub fn rotation_yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self::from_quaternion(Quaternion::from_euler(yaw, pitch, roll))
    }

    pub fn from_quaternion(q: Quaternion) -> Self {
        let mut r = Self::IDENTITY;

        r.m[0][0] = 1.0 - 2.0 * (q.y * q.y + q.z * q.z);
        r.m[0][1] = 2.0 * (q.x * q.y + q.z * q.w);
        r.m[0][2] = 2.0 * (q.x * q.z - q.y * q.w);
        r.m[1][0] = 2.0 * (q.x * q.y - q.z * q.w);
        r.m[1][1] = 1.0 - 2.0 * (q.x * q.x + q.z * q.z);
        r.m[1][2] = 2.0 * (q.y * q.z + q.x * q.w);
        r.m[2][0] = 2.0 * (q.x * q.z + q.y * q.w);
        r.m[2][1] = 2.0 * (q.y * q.z - q.x * q.w);
        r.m[2][2] = 1.0 - 2.0 * (q.x * q.x + q.y * q.y);

        r
    }

    pub fn translation(t: Vec3) -> Self {
        let mut r = Self::IDENTITY;
        r.m[3][0] = t.x;
        r.m[3][1] = t.y;
        r.m[3][2] = t.z;
        r
    }

    /// Standard row-times-column product. `a.multiply(&b)` applies `a` first.
    pub fn multiply(&self, other: &Mat4) -> Mat4 {
        let mut result = Mat4::ZERO;
        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    result.m[i][j] += self.m[i][k] * other.m[k][j];
                }
            }
        }
        result
    }

    /// Full homogeneous transform of a point, including the perspective divide.
    ///
    /// The reciprocal of W is taken once and all three components are scaled by it.
    /// For an affine matrix W is 1 and this reduces to an ordinary transform.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let m = &self.m;
        let v = Vec4::new(
            p.x * m[0][0] + p.y * m[1][0] + p.z * m[2][0] + m[3][0],
            p.x * m[0][1] + p.y * m[1][1] + p.z * m[2][1] + m[3][1],
            p.x * m[0][2] + p.y * m[1][2] + p.z * m[2][2] + m[3][2],
            1.0 / (p.x * m[0][3] + p.y * m[1][3] + p.z * m[2][3] + m[3][3]),
        );
        v.scaled_by_w()
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, other: Mat4) -> Mat4 {
        self.multiply(&other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).magnitude() < 1e-5
    }

    #[test]
    fn test_identity_transform() {
        let p = Vec3::new(1.5, -2.0, 3.25);
        assert_eq!(Mat4::IDENTITY.transform_point(p), p);
    }

    #[test]
    fn test_translation_moves_point() {
        let t = Mat4::translation(Vec3::new(1.0, 2.0, 3.0));
        let p = t.transform_point(Vec3::new(1.0, 1.0, 1.0));
        assert!(approx(p, Vec3::new(2.0, 3.0, 4.0)));
    }

    #[test]
    fn test_multiply_applies_left_first() {
        // Rotate a quarter turn around Z, then translate along X
        let rot = Mat4::rotation_yaw_pitch_roll(0.0, 0.0, std::f32::consts::FRAC_PI_2);
        let tr = Mat4::translation(Vec3::new(10.0, 0.0, 0.0));

        let p = Vec3::new(1.0, 0.0, 0.0);
        let rotated_first = (rot * tr).transform_point(p);
        let expected = tr.transform_point(rot.transform_point(p));
        assert!(approx(rotated_first, expected));

        // Translation must not have been rotated
        assert!((rotated_first.x - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_multiply_by_identity() {
        let r = Mat4::rotation_yaw_pitch_roll(0.4, 1.1, -0.7);
        assert_eq!(r * Mat4::IDENTITY, r);
        assert_eq!(Mat4::IDENTITY * r, r);
    }

    #[test]
    fn test_yaw_quarter_turn() {
        let r = Mat4::rotation_yaw_pitch_roll(std::f32::consts::FRAC_PI_2, 0.0, 0.0);
        let p = r.transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!(approx(p, Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_rotation_preserves_length() {
        let r = Mat4::rotation_yaw_pitch_roll(0.9, -0.3, 2.2);
        let p = Vec3::new(1.0, 2.0, -3.0);
        let q = r.transform_point(p);
        assert!((p.magnitude() - q.magnitude()).abs() < 1e-4);
    }

    #[test]
    fn test_perspective_divide() {
        // Copies z into w, so the result is divided by z
        let mut m = Mat4::IDENTITY;
        m.m[2][3] = 1.0;
        m.m[3][3] = 0.0;
        let p = m.transform_point(Vec3::new(2.0, 4.0, 2.0));
        assert!(approx(p, Vec3::new(1.0, 2.0, 1.0)));
    }
}

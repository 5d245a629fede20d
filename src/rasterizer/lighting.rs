//! Diffuse lighting from a single point light
//!
//! No ambient or specular term: the result multiplies the base color directly.

use super::math::{clamp01, Vec3};
use super::types::ProjectedVertex;

/// Diffuse term `clamp01(dot(n, l))` for a surface point facing `normal`
pub fn reflectivity(point: Vec3, normal: Vec3, light_position: Vec3) -> f32 {
    let light_direction = (light_position - point).normalize();
    clamp01(normal.normalize().dot(light_direction))
}

/// Which lighting model a filled triangle uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingModel {
    Flat,
    Smooth,
}

impl ShadingModel {
    pub fn input(self, v1: &ProjectedVertex, v2: &ProjectedVertex, v3: &ProjectedVertex, light_position: Vec3) -> ShadingInput {
        match self {
            ShadingModel::Flat => ShadingInput::flat(v1, v2, v3, light_position),
            ShadingModel::Smooth => ShadingInput::smooth(v1, v2, v3, light_position),
        }
    }
}

/// Lighting for one triangle, chosen once before its scanlines are walked
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShadingInput {
    /// One value for the whole face
    Flat(f32),
    /// One value per vertex, in the same order as the vertices handed to the scan converter
    Smooth(f32, f32, f32),
}

impl ShadingInput {
    /// Face reflectivity from the averaged normal at the centroid
    pub fn flat(v1: &ProjectedVertex, v2: &ProjectedVertex, v3: &ProjectedVertex, light_position: Vec3) -> Self {
        let normal = (v1.world_normal + v2.world_normal + v3.world_normal) / 3.0;
        let center = (v1.world_coordinates + v2.world_coordinates + v3.world_coordinates) / 3.0;
        ShadingInput::Flat(reflectivity(center, normal, light_position))
    }

    pub fn smooth(v1: &ProjectedVertex, v2: &ProjectedVertex, v3: &ProjectedVertex, light_position: Vec3) -> Self {
        ShadingInput::Smooth(
            reflectivity(v1.world_coordinates, v1.world_normal, light_position),
            reflectivity(v2.world_coordinates, v2.world_normal, light_position),
            reflectivity(v3.world_coordinates, v3.world_normal, light_position),
        )
    }

    /// Reflectivity at each vertex. Flat input repeats the face value.
    pub fn per_vertex(&self) -> [f32; 3] {
        match *self {
            ShadingInput::Flat(r) => [r, r, r],
            ShadingInput::Smooth(r1, r2, r3) => [r1, r2, r3],
        }
    }
}

//! Core types for the rasterizer

use serde::{Serialize, Deserialize};
use super::lighting::ShadingModel;
use super::math::Vec3;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };
    pub const YELLOW: Color = Color { r: 255, g: 255, b: 0, a: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Multiply the color channels by an intensity in 0.0-1.0. Alpha is kept.
    pub fn shade(self, intensity: f32) -> Self {
        let i = intensity.clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * i) as u8,
            g: (self.g as f32 * i) as u8,
            b: (self.b as f32 * i) as u8,
            a: self.a,
        }
    }

    /// Byte layout used by the color buffer
    pub fn to_bgra(self) -> [u8; 4] {
        [self.b, self.g, self.r, self.a]
    }

    pub fn from_bgra(bytes: [u8; 4]) -> Self {
        Self { b: bytes[0], g: bytes[1], r: bytes[2], a: bytes[3] }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// How faces are drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// Each projected vertex as a single pixel
    Point,
    /// Triangle edges as lines
    #[default]
    Wireframe,
    /// Filled, one light calculation per face
    FlatShading,
    /// Filled, light calculated per vertex and interpolated (Gouraud)
    SmoothShading,
}

impl RenderMode {
    pub const ALL: [RenderMode; 4] = [
        RenderMode::Point,
        RenderMode::Wireframe,
        RenderMode::FlatShading,
        RenderMode::SmoothShading,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RenderMode::Point => "Point",
            RenderMode::Wireframe => "Wireframe",
            RenderMode::FlatShading => "Flat shading",
            RenderMode::SmoothShading => "Smooth shading",
        }
    }

    /// Lighting model for the filled modes, `None` for the debug views
    pub fn shading(&self) -> Option<ShadingModel> {
        match self {
            RenderMode::FlatShading => Some(ShadingModel::Flat),
            RenderMode::SmoothShading => Some(ShadingModel::Smooth),
            RenderMode::Point | RenderMode::Wireframe => None,
        }
    }

    /// Filled modes need world-space positions and normals at each vertex
    pub fn needs_lighting(&self) -> bool {
        self.shading().is_some()
    }
}

/// Per-frame rasterizer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSettings {
    pub mode: RenderMode,
    /// World-space position of the single point light
    pub light_position: Vec3,
    /// Color of points in Point mode
    pub point_color: Color,
    /// Color of edges in Wireframe mode
    pub line_color: Color,
    /// Base color of filled faces, scaled by reflectivity
    pub surface_color: Color,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            mode: RenderMode::Wireframe,
            light_position: Vec3::new(0.0, 10.0, 10.0),
            point_color: Color::YELLOW,
            line_color: Color::YELLOW,
            surface_color: Color::WHITE,
        }
    }
}

/// A mesh vertex in object space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub coordinates: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(coordinates: Vec3, normal: Vec3) -> Self {
        Self { coordinates, normal }
    }
}

/// A triangle (indices into the owning mesh's vertex array)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl Face {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }

    pub fn indices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }
}

/// A triangle mesh with its object transform.
///
/// Vertex and face slots are fixed once the mesh is created; only their contents,
/// `position` and `rotation` change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub vertices: Box<[Vertex]>,
    pub faces: Box<[Face]>,
    pub position: Vec3,
    /// Euler angles in radians: x = pitch, y = yaw, z = roll
    pub rotation: Vec3,
}

impl Mesh {
    /// Create a mesh with `vertex_count` / `face_count` default-filled slots
    pub fn new(name: &str, vertex_count: usize, face_count: usize) -> Self {
        Self {
            name: name.to_string(),
            vertices: vec![Vertex::default(); vertex_count].into_boxed_slice(),
            faces: vec![Face::default(); face_count].into_boxed_slice(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
        }
    }

    pub fn from_parts(name: &str, vertices: Vec<Vertex>, faces: Vec<Face>) -> Self {
        Self {
            name: name.to_string(),
            vertices: vertices.into_boxed_slice(),
            faces: faces.into_boxed_slice(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
        }
    }

    /// First face index that points outside the vertex array, if any
    pub fn find_invalid_index(&self) -> Option<(usize, usize)> {
        let count = self.vertices.len();
        self.faces.iter().enumerate().find_map(|(face_idx, face)| {
            face.indices()
                .into_iter()
                .find(|&i| i >= count)
                .map(|i| (face_idx, i))
        })
    }
}

/// A vertex after projection. Rebuilt every frame, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProjectedVertex {
    /// X/Y in pixels, Z is the depth key (smaller is nearer)
    pub screen: Vec3,
    /// Only filled in when lighting is needed
    pub world_coordinates: Vec3,
    /// Only filled in when lighting is needed
    pub world_normal: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shade_scales_channels() {
        let c = Color::new(200, 100, 50).shade(0.5);
        assert_eq!(c, Color::new(100, 50, 25));
        assert_eq!(Color::WHITE.shade(2.0), Color::WHITE);
        assert_eq!(Color::WHITE.shade(0.0), Color::BLACK);
    }

    #[test]
    fn test_bgra_byte_order() {
        let c = Color::with_alpha(1, 2, 3, 4);
        assert_eq!(c.to_bgra(), [3, 2, 1, 4]);
        assert_eq!(Color::from_bgra(c.to_bgra()), c);
        assert_eq!(c.to_rgba(), [1, 2, 3, 4]);
    }

    #[test]
    fn test_only_filled_modes_are_lit() {
        let lit: Vec<RenderMode> = RenderMode::ALL.into_iter().filter(|m| m.needs_lighting()).collect();
        assert_eq!(lit, vec![RenderMode::FlatShading, RenderMode::SmoothShading]);
    }

    #[test]
    fn test_mesh_slots_fixed() {
        let mesh = Mesh::new("empty", 4, 2);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.faces.len(), 2);
        assert!(mesh.find_invalid_index().is_none());
    }

    #[test]
    fn test_find_invalid_index() {
        let mut mesh = Mesh::new("bad", 3, 2);
        mesh.faces[1] = Face::new(0, 3, 1);
        assert_eq!(mesh.find_invalid_index(), Some((1, 3)));
    }
}

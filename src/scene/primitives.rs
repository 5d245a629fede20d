//! Built-in meshes for tests, demos and the empty-scene fallback

use crate::rasterizer::{Face, Mesh, Vec3, Vertex};

/// Axis-aligned cube centered on the origin with edges of length `size`.
///
/// 8 shared corners with normals pointing out through each corner, 12 triangles.
pub fn cube(name: &str, size: f32) -> Mesh {
    let h = size * 0.5;
    let corners = [
        // Front (+Z)
        Vec3::new(-h, -h, h),
        Vec3::new(h, -h, h),
        Vec3::new(h, h, h),
        Vec3::new(-h, h, h),
        // Back (-Z)
        Vec3::new(-h, -h, -h),
        Vec3::new(h, -h, -h),
        Vec3::new(h, h, -h),
        Vec3::new(-h, h, -h),
    ];

    let vertices = corners
        .iter()
        .map(|&c| Vertex::new(c, c.normalize()))
        .collect();

    let faces = vec![
        // Front
        Face::new(0, 1, 2),
        Face::new(0, 2, 3),
        // Back
        Face::new(5, 4, 7),
        Face::new(5, 7, 6),
        // Top
        Face::new(3, 2, 6),
        Face::new(3, 6, 7),
        // Bottom
        Face::new(4, 5, 1),
        Face::new(4, 1, 0),
        // Right
        Face::new(1, 5, 6),
        Face::new(1, 6, 2),
        // Left
        Face::new(4, 0, 3),
        Face::new(4, 3, 7),
    ];

    Mesh::from_parts(name, vertices, faces)
}

/// Single triangle with the face normal on all three corners
pub fn triangle(name: &str, a: Vec3, b: Vec3, c: Vec3) -> Mesh {
    let normal = (b - a).cross(c - a).normalize();
    Mesh::from_parts(
        name,
        vec![
            Vertex::new(a, normal),
            Vertex::new(b, normal),
            Vertex::new(c, normal),
        ],
        vec![Face::new(0, 1, 2)],
    )
}

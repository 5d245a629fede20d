//! On-disk scene layout and its conversion to meshes

use serde::{Serialize, Deserialize};
use crate::rasterizer::{Face, Mesh, Vec3, Vertex};
use super::SceneError;

/// Floats per vertex before any UV sets: position (3) + normal (3)
pub const BASE_VERTEX_STRIDE: usize = 6;

/// Floats per vertex for a mesh carrying `uv_count` UV sets
pub fn vertex_stride(uv_count: usize) -> usize {
    BASE_VERTEX_STRIDE + 2 * uv_count
}

/// A whole scene file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneFile {
    pub meshes: Vec<MeshFile>,
}

/// One mesh as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshFile {
    pub name: String,
    /// Packed per vertex: x, y, z, nx, ny, nz, then `uv_count` (u, v) pairs
    pub vertices: Vec<f32>,
    /// Three per triangle
    pub indices: Vec<usize>,
    /// UV sets per vertex. They are skipped when loading.
    #[serde(default)]
    pub uv_count: usize,
    #[serde(default)]
    pub position: Vec3,
    #[serde(default)]
    pub rotation: Vec3,
}

impl MeshFile {
    /// Unpack into a mesh, checking array sizes and every face index
    pub fn to_mesh(&self) -> Result<Mesh, SceneError> {
        let stride = vertex_stride(self.uv_count);
        if self.vertices.len() % stride != 0 {
            return Err(SceneError::VertexStride {
                mesh: self.name.clone(),
                len: self.vertices.len(),
                stride,
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(SceneError::IndexCount {
                mesh: self.name.clone(),
                len: self.indices.len(),
            });
        }

        let mut mesh = Mesh::new(&self.name, self.vertices.len() / stride, self.indices.len() / 3);

        for (slot, v) in mesh.vertices.iter_mut().zip(self.vertices.chunks_exact(stride)) {
            *slot = Vertex::new(Vec3::new(v[0], v[1], v[2]), Vec3::new(v[3], v[4], v[5]));
        }

        for (slot, f) in mesh.faces.iter_mut().zip(self.indices.chunks_exact(3)) {
            *slot = Face::new(f[0], f[1], f[2]);
        }

        if let Some((face, index)) = mesh.find_invalid_index() {
            return Err(SceneError::FaceIndexOutOfRange {
                mesh: self.name.clone(),
                face,
                index,
                vertex_count: mesh.vertices.len(),
            });
        }

        mesh.position = self.position;
        mesh.rotation = self.rotation;
        Ok(mesh)
    }

    /// Pack a mesh, without UVs
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let vertices = mesh
            .vertices
            .iter()
            .flat_map(|v| {
                [
                    v.coordinates.x,
                    v.coordinates.y,
                    v.coordinates.z,
                    v.normal.x,
                    v.normal.y,
                    v.normal.z,
                ]
            })
            .collect();
        let indices = mesh.faces.iter().flat_map(|f| f.indices()).collect();

        Self {
            name: mesh.name.clone(),
            vertices,
            indices,
            uv_count: 0,
            position: mesh.position,
            rotation: mesh.rotation,
        }
    }
}

impl SceneFile {
    pub fn from_meshes(meshes: &[Mesh]) -> Self {
        Self {
            meshes: meshes.iter().map(MeshFile::from_mesh).collect(),
        }
    }

    pub fn to_meshes(&self) -> Result<Vec<Mesh>, SceneError> {
        self.meshes.iter().map(MeshFile::to_mesh).collect()
    }
}

//! Scene loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable scene files.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use crate::rasterizer::Mesh;
use super::SceneFile;

/// Error type for scene loading
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("mesh '{mesh}': {len} vertex floats is not a multiple of the stride {stride}")]
    VertexStride { mesh: String, len: usize, stride: usize },
    #[error("mesh '{mesh}': {len} indices do not form whole triangles")]
    IndexCount { mesh: String, len: usize },
    #[error("mesh '{mesh}': face {face} uses vertex {index} but only {vertex_count} exist")]
    FaceIndexOutOfRange {
        mesh: String,
        face: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// Load every mesh from a RON scene file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Vec<Mesh>, SceneError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let meshes = load_scene_from_str(&contents)?;
    log::info!("loaded {} mesh(es) from {}", meshes.len(), path.display());
    Ok(meshes)
}

/// Load a scene from a RON string (for embedded scenes or testing)
pub fn load_scene_from_str(s: &str) -> Result<Vec<Mesh>, SceneError> {
    let file: SceneFile = ron::from_str(s)?;
    let meshes = file.to_meshes()?;
    for mesh in &meshes {
        log::debug!(
            "mesh '{}': {} vertices, {} faces",
            mesh.name,
            mesh.vertices.len(),
            mesh.faces.len()
        );
    }
    Ok(meshes)
}

/// Save meshes to a RON scene file
pub fn save_scene<P: AsRef<Path>>(meshes: &[Mesh], path: P) -> Result<(), SceneError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(&SceneFile::from_meshes(meshes), config)?;
    fs::write(path.as_ref(), contents)?;
    log::info!("saved {} mesh(es) to {}", meshes.len(), path.as_ref().display());
    Ok(())
}

/// Scene paths listed in a manifest, one `.ron` file name per line, resolved against `dir`
pub fn parse_manifest<P: AsRef<Path>>(manifest: &str, dir: P) -> Vec<PathBuf> {
    manifest
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.ends_with(".ron"))
        .map(|line| dir.as_ref().join(line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Vec3;
    use crate::scene::primitives::cube;

    const TRIANGLE_SCENE: &str = r#"(
        meshes: [
            (
                name: "Triangle",
                vertices: [
                    -1.0, 0.0, 0.0,  0.0, 0.0, 1.0,
                     1.0, 0.0, 0.0,  0.0, 0.0, 1.0,
                     0.0, 1.0, 0.0,  0.0, 0.0, 1.0,
                ],
                indices: [0, 1, 2],
                position: (x: 0.0, y: 0.5, z: 0.0),
            ),
        ],
    )"#;

    #[test]
    fn test_load_from_str() {
        let meshes = load_scene_from_str(TRIANGLE_SCENE).expect("scene parses");
        assert_eq!(meshes.len(), 1);
        let mesh = &meshes[0];
        assert_eq!(mesh.name, "Triangle");
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.faces.len(), 1);
        assert_eq!(mesh.position, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(mesh.rotation, Vec3::ZERO);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(load_scene_from_str("(meshes: [("), Err(SceneError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("soft3d-does-not-exist.ron");
        assert!(matches!(load_scene(path), Err(SceneError::Io(_))));
    }

    #[test]
    fn test_save_then_load() {
        let mut mesh = cube("Box", 2.0);
        mesh.position = Vec3::new(1.0, -2.0, 0.5);
        mesh.rotation = Vec3::new(0.25, 0.5, 0.0);

        let path = std::env::temp_dir().join(format!("soft3d-scene-{}.ron", std::process::id()));
        save_scene(std::slice::from_ref(&mesh), &path).expect("save");
        let loaded = load_scene(&path).expect("load");
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, vec![mesh]);
    }

    #[test]
    fn test_parse_manifest() {
        let paths = parse_manifest("cube.ron\n\n  domino.ron \nnotes.txt\n", "assets/scenes");
        assert_eq!(
            paths,
            vec![
                PathBuf::from("assets/scenes/cube.ron"),
                PathBuf::from("assets/scenes/domino.ron"),
            ]
        );
    }

    #[test]
    fn test_bundled_scenes_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/scenes");
        for name in ["cube.ron", "domino.ron", "pyramid.ron"] {
            let meshes = load_scene(dir.join(name)).expect(name);
            assert!(!meshes.is_empty(), "{} has no meshes", name);
        }
    }
}

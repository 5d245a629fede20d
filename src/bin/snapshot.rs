//! Render one frame of a scene without a window and write it as PNG
//!
//! Usage: soft3d-snapshot <scene.ron> <out.png> [config.ron]

use std::process::ExitCode;
use soft3d::config::{load_config, ViewerConfig};
use soft3d::scene::load_scene;
use soft3d::{save_png, ViewerState};

fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let (scene_path, out_path) = match args {
        [scene, out, ..] => (scene, out),
        _ => return Err("usage: soft3d-snapshot <scene.ron> <out.png> [config.ron]".into()),
    };

    let config = match args.get(2) {
        Some(path) => load_config(path)?,
        None => ViewerConfig::default(),
    };

    let meshes = load_scene(scene_path)?;
    let mut viewer = ViewerState::new(config, meshes)?;
    let frame = viewer.render_frame();
    save_png(&frame, out_path)?;
    Ok(())
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("soft3d-snapshot: {}", e);
            ExitCode::FAILURE
        }
    }
}

//! soft3d viewer: spins a scene through the software rasterizer
//!
//! Controls:
//! - 1-4: Point / Wireframe / Flat / Smooth
//! - R: next resolution preset
//! - Tab: next scene, O: open a scene file
//! - Arrows, PageUp/PageDown: move the camera
//! - I/J/K/L/U/M: move the light
//! - -/=: field of view
//! - P: save a PNG snapshot

use macroquad::prelude::*;
use soft3d::config::{load_config, ViewerConfig};
use soft3d::rasterizer::{Mesh, RenderMode, Vec3, HEIGHT, WIDTH};
use soft3d::scene::{load_scene_from_str, parse_manifest, primitives};
use soft3d::{ViewerState, VERSION};
use std::path::{Path, PathBuf};

/// Units per second for camera and light movement
const MOVE_SPEED: f32 = 4.0;
/// Radians per second
const FOV_SPEED: f32 = 0.5;
const STATUS_SECS: f64 = 3.0;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("soft3d v{}", VERSION),
        window_width: WIDTH as i32,
        window_height: HEIGHT as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Read and parse a scene through macroquad's file loader (works on native and WASM)
async fn read_scene(path: &Path) -> Result<Vec<Mesh>, String> {
    let contents = load_string(&path.to_string_lossy())
        .await
        .map_err(|e| e.to_string())?;
    load_scene_from_str(&contents).map_err(|e| e.to_string())
}

/// Bundled scenes from the build-time manifest
async fn discover_scenes() -> Vec<PathBuf> {
    match load_string("assets/scenes/manifest.txt").await {
        Ok(manifest) => parse_manifest(&manifest, "assets/scenes"),
        Err(e) => {
            log::warn!("failed to load scene manifest: {}", e);
            Vec::new()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn startup_config() -> ViewerConfig {
    match std::env::args().nth(1) {
        Some(path) => load_config(&path).unwrap_or_else(|e| {
            log::error!("failed to load config {}: {}, using defaults", path, e);
            ViewerConfig::default()
        }),
        None => ViewerConfig::default(),
    }
}

#[cfg(target_arch = "wasm32")]
fn startup_config() -> ViewerConfig {
    ViewerConfig::default()
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let config = startup_config();

    // Fall back to a plain cube when the first scene can't be read
    let meshes = match config.scenes.first() {
        Some(path) => match read_scene(path).await {
            Ok(meshes) => meshes,
            Err(e) => {
                log::error!("failed to load {}: {}", path.display(), e);
                vec![primitives::cube("Cube", 2.0)]
            }
        },
        None => vec![primitives::cube("Cube", 2.0)],
    };

    let mut app = match ViewerState::new(config, meshes) {
        Ok(app) => app,
        Err(e) => {
            log::error!("cannot create device: {}", e);
            return;
        }
    };
    app.add_scenes(discover_scenes().await);

    log::info!("=== soft3d v{} ===", VERSION);

    loop {
        let now = get_time();
        let dt = get_frame_time();

        handle_mode_keys(&mut app);
        handle_movement_keys(&mut app, dt);

        if is_key_pressed(KeyCode::R) {
            match app.cycle_resolution() {
                Ok((w, h)) => app.set_status(&format!("{}x{}", w, h), STATUS_SECS, now),
                Err(e) => app.set_status(&format!("Resize failed: {}", e), STATUS_SECS, now),
            }
        }

        if is_key_pressed(KeyCode::Tab) {
            if let Some(path) = app.next_scene_path() {
                open_scene(&mut app, &path, now).await;
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        if is_key_pressed(KeyCode::O) {
            let dialog = rfd::FileDialog::new()
                .add_filter("RON Scene", &["ron"])
                .set_directory("assets/scenes");
            if let Some(path) = dialog.pick_file() {
                app.add_scenes([path.clone()]);
                open_scene(&mut app, &path, now).await;
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        if is_key_pressed(KeyCode::P) {
            save_snapshot(&mut app, now);
        }

        app.tick();

        clear_background(Color::from_rgba(30, 30, 35, 255));
        let (fb_w, fb_h) = (app.device.width(), app.device.height());
        let frame = app.render_frame();

        // Convert the BGRA frame to a texture and scale it into the window
        let texture = Texture2D::from_rgba8(fb_w as u16, fb_h as u16, &frame.to_rgba8());
        texture.set_filter(FilterMode::Nearest);

        let scale = (screen_width() / fb_w as f32).min(screen_height() / fb_h as f32);
        let draw_w = fb_w as f32 * scale;
        let draw_h = fb_h as f32 * scale;
        draw_texture_ex(
            &texture,
            (screen_width() - draw_w) * 0.5,
            (screen_height() - draw_h) * 0.5,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(draw_w, draw_h)),
                ..Default::default()
            },
        );

        draw_text(
            &format!(
                "{} | {}x{} | FOV {:.2} | {:.0} fps",
                app.settings.mode.label(),
                fb_w,
                fb_h,
                app.camera.fov,
                get_fps(),
            ),
            8.0,
            20.0,
            18.0,
            Color::from_rgba(200, 200, 200, 255),
        );
        if let Some(status) = app.get_status(now) {
            draw_text(status, 8.0, screen_height() - 10.0, 18.0, Color::from_rgba(255, 220, 120, 255));
        }

        next_frame().await;
    }
}

fn handle_mode_keys(app: &mut ViewerState) {
    let keys = [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3, KeyCode::Key4];
    for (key, mode) in keys.into_iter().zip(RenderMode::ALL) {
        if is_key_pressed(key) {
            app.set_mode(mode);
        }
    }
}

/// Held-key movement, scaled by frame time
fn handle_movement_keys(app: &mut ViewerState, dt: f32) {
    let step = MOVE_SPEED * dt;
    let axis = |neg: KeyCode, pos: KeyCode| -> f32 {
        let mut v = 0.0;
        if is_key_down(neg) {
            v -= step;
        }
        if is_key_down(pos) {
            v += step;
        }
        v
    };

    let camera_delta = Vec3::new(
        axis(KeyCode::Left, KeyCode::Right),
        axis(KeyCode::Down, KeyCode::Up),
        axis(KeyCode::PageDown, KeyCode::PageUp),
    );
    if camera_delta != Vec3::ZERO {
        app.move_camera(camera_delta);
    }

    let light_delta = Vec3::new(
        axis(KeyCode::J, KeyCode::L),
        axis(KeyCode::K, KeyCode::I),
        axis(KeyCode::M, KeyCode::U),
    );
    if light_delta != Vec3::ZERO {
        app.move_light(light_delta);
    }

    let fov = axis(KeyCode::Minus, KeyCode::Equal) / MOVE_SPEED * FOV_SPEED;
    if fov != 0.0 {
        app.adjust_fov(fov);
    }
}

async fn open_scene(app: &mut ViewerState, path: &Path, now: f64) {
    match read_scene(path).await {
        Ok(meshes) => {
            app.replace_meshes(meshes);
            app.set_status(&format!("Loaded {}", path.display()), STATUS_SECS, now);
        }
        Err(e) => {
            log::error!("failed to load {}: {}", path.display(), e);
            app.set_status(&format!("Load failed: {}", e), STATUS_SECS * 2.0, now);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn save_snapshot(app: &mut ViewerState, now: f64) {
    let dialog = rfd::FileDialog::new()
        .add_filter("PNG Image", &["png"])
        .set_file_name("snapshot.png");

    if let Some(path) = dialog.save_file() {
        let result = soft3d::save_png(&app.device.present(), &path);
        match result {
            Ok(()) => app.set_status(&format!("Saved {}", path.display()), STATUS_SECS, now),
            Err(e) => app.set_status(&format!("Snapshot failed: {}", e), STATUS_SECS * 2.0, now),
        }
    }
}

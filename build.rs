//! Writes assets/scenes/manifest.txt, one scene file name per line.
//!
//! The WASM viewer reads this instead of listing the directory.

use std::fs;
use std::path::Path;

const SCENES_DIR: &str = "assets/scenes";

fn main() {
    println!("cargo:rerun-if-changed={}", SCENES_DIR);

    let dir = Path::new(SCENES_DIR);
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    let mut names: Vec<String> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_scene(path))
        .filter_map(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    names.sort();

    let listing: String = names.iter().map(|name| format!("{}\n", name)).collect();
    fs::write(dir.join("manifest.txt"), listing).expect("write scene manifest");
}

fn is_scene(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ron"))
}

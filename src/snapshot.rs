//! Export a finished frame as a PNG image

use std::path::Path;
use thiserror::Error;
use crate::rasterizer::FrameView;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("frame is {width}x{height} but holds {len} bytes")]
    Size { width: usize, height: usize, len: usize },
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Convert a frame to an RGBA image
pub fn to_image(frame: &FrameView<'_>) -> Result<image::RgbaImage, SnapshotError> {
    let size_error = || SnapshotError::Size {
        width: frame.width(),
        height: frame.height(),
        len: frame.bytes().len(),
    };
    let width = u32::try_from(frame.width()).map_err(|_| size_error())?;
    let height = u32::try_from(frame.height()).map_err(|_| size_error())?;
    image::RgbaImage::from_raw(width, height, frame.to_rgba8()).ok_or_else(size_error)
}

/// Write a frame to `path` as PNG
pub fn save_png<P: AsRef<Path>>(frame: &FrameView<'_>, path: P) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    to_image(frame)?.save_with_format(path, image::ImageFormat::Png)?;
    log::info!("saved {}x{} snapshot to {}", frame.width(), frame.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::{Color, Device};

    #[test]
    fn test_image_is_rgba() {
        let mut device = Device::new(3, 2).expect("device");
        device.clear(Color::new(10, 20, 30));
        device.set_pixel(2, 1, Color::RED);

        let img = to_image(&device.present()).expect("image");
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30, 255]);
        assert_eq!(img.get_pixel(2, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_save_png() {
        let mut device = Device::new(4, 4).expect("device");
        device.clear(Color::BLUE);

        let path = std::env::temp_dir().join(format!("soft3d-snapshot-{}.png", std::process::id()));
        save_png(&device.present(), &path).expect("save");
        let reloaded = image::open(&path).expect("reload").to_rgba8();
        let _ = std::fs::remove_file(&path);

        assert_eq!(reloaded.get_pixel(3, 3).0, [0, 0, 255, 255]);
    }
}

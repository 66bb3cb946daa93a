//! PNG export of a surface

use std::path::Path;

use anyhow::Context;
use image::{RgbaImage, imageops};
use texpaint_painting::RasterSurface;

/// Surface as an image, top row first
///
/// Surface row 0 is the bottom of the texture, so rows are flipped.
pub fn to_image(surface: &RasterSurface) -> anyhow::Result<RgbaImage> {
    let bytes = surface.as_bytes().context("surface has no pixel buffer")?;
    let image = RgbaImage::from_raw(surface.width(), surface.height(), bytes.to_vec())
        .context("pixel buffer does not match surface size")?;
    Ok(imageops::flip_vertical(&image))
}

pub fn write_png(surface: &RasterSurface, path: &Path) -> anyhow::Result<()> {
    to_image(surface)?
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use texpaint_painting::Rgba8;

    #[test]
    fn test_bottom_row_is_last_image_row() {
        let mut surface = RasterSurface::new(4, 3).unwrap();
        surface.set_background(Rgba8::WHITE);
        surface.set_brush_color(Rgba8::BLUE);
        surface.set_brush_size(1);
        surface.draw_dot(IVec2::new(0, 0));

        let image = to_image(&surface).unwrap();
        assert_eq!(image.dimensions(), (4, 3));
        assert_eq!(image.get_pixel(0, 2).0, [0, 0, 255, 255]);
        assert_eq!(image.get_pixel(3, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_uninitialized_surface_fails() {
        let surface = RasterSurface::new(4, 3).unwrap();
        assert!(to_image(&surface).is_err());
    }

    #[test]
    fn test_write_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let mut surface = RasterSurface::new(8, 8).unwrap();
        surface.set_background(Rgba8::RED);

        write_png(&surface, &path).unwrap();
        let read = image::open(&path).unwrap().to_rgba8();
        assert_eq!(read.get_pixel(5, 5).0, [255, 0, 0, 255]);
    }
}

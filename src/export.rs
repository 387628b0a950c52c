use std::path::Path;

use image::RgbImage;

use crate::error::ExportError;
use crate::renderer::PixelImage;

pub fn to_rgb_image(pixels: &PixelImage) -> Result<RgbImage, ExportError> {
    let (width, height) = (pixels.width() as u32, pixels.height() as u32);
    RgbImage::from_raw(width, height, pixels.to_rgb_bytes())
        .ok_or(ExportError::BufferSize { width, height })
}

/// Writes `pixels` to `path`; the format follows the extension (`.bmp`, `.png`).
pub fn save(pixels: &PixelImage, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    to_rgb_image(pixels)?.save(path)?;
    tracing::info!(path = %path.display(), "saved image");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::geometry::Location2D;
    use crate::ray::SamplePoint;
    use crate::renderer::BitmapRenderer;
    use crate::world::Surface;

    fn wall_image() -> PixelImage {
        let wall = SamplePoint {
            location: Location2D::new(0.0, 0.0),
            length: 1.0,
            distance_traveled: 5.0,
            surface: Surface::WALL,
        };
        BitmapRenderer::new(2, 8, RenderConfig::default())
            .unwrap()
            .render_bitmap(&[wall, SamplePoint::origin(Location2D::new(0.0, 0.0))])
            .unwrap()
    }

    #[test]
    fn conversion_keeps_pixels() {
        let image = to_rgb_image(&wall_image()).unwrap();
        assert_eq!(image.dimensions(), (2, 8));
        assert_eq!(image.get_pixel(0, 4).0, [150, 150, 150]);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn saved_bmp_reads_back() {
        let path = std::env::temp_dir().join(format!("grid_raycaster_{}.bmp", std::process::id()));
        save(&wall_image(), &path).unwrap();
        let decoded = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).ok();
        assert_eq!(decoded.dimensions(), (2, 8));
        assert_eq!(decoded.get_pixel(0, 4).0, [150, 150, 150]);
    }
}

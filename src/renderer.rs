use std::time::Instant;

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::ray::SamplePoint;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::grey(0);

    pub const fn grey(level: u8) -> Self {
        Self {
            r: level,
            g: level,
            b: level,
        }
    }

    /// 0RGB in a `u32`, the layout softbuffer expects.
    #[inline]
    pub fn pack(self) -> u32 {
        (self.b as u32) | ((self.g as u32) << 8) | ((self.r as u32) << 16)
    }
}

/// Row-major RGB image, background black.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelImage {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl PixelImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    #[inline]
    fn set(&mut self, x: usize, y: usize, color: Rgb) {
        self.pixels[y * self.width + x] = color;
    }

    /// Pixels of column `x`, top to bottom.
    pub fn column(&self, x: usize) -> impl Iterator<Item = Rgb> + '_ {
        (0..self.height).filter_map(move |y| self.get(x, y))
    }

    /// Interleaved `r, g, b` bytes, row-major.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| [p.r, p.g, p.b]).collect()
    }
}

/// Turns per-column ray results into a shaded greyscale image.
#[derive(Clone, Debug)]
pub struct BitmapRenderer {
    width: usize,
    height: usize,
    config: RenderConfig,
}

impl BitmapRenderer {
    pub fn new(width: usize, height: usize, config: RenderConfig) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::ZeroDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            config,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// On-screen wall height in pixels, never more than the image height.
    pub fn projected_height(&self, sample: &SamplePoint) -> f64 {
        let surface = sample.surface.height;
        if surface <= 0.0 {
            return 0.0;
        }
        let image_height = self.height as f64;
        let height = image_height * surface
            / (sample.distance_traveled / self.config.perspective_scale);
        height.min(image_height)
    }

    /// Rows left blank above and below a wall of `projected_height`.
    pub fn vertical_padding(&self, projected_height: f64) -> usize {
        let spare = (self.height as f64 - projected_height).max(0.0);
        (spare / 2.0).floor() as usize
    }

    /// Greyscale that darkens linearly with distance, clamped to the channel range.
    pub fn shade(&self, distance_traveled: f64) -> Rgb {
        let percentage = distance_traveled / self.config.max_range * 100.0;
        let brightness = self.config.brightness_base - self.config.brightness_falloff * percentage;
        Rgb::grey(brightness.clamp(0.0, 255.0) as u8)
    }

    fn draw_column(&self, image: &mut PixelImage, column: usize, sample: &SamplePoint) {
        let padding = self.vertical_padding(self.projected_height(sample));
        let color = self.shade(sample.distance_traveled);
        for y in padding..self.height.saturating_sub(padding) {
            image.set(column, y, color);
        }
    }

    pub fn render_bitmap(&self, columns: &[SamplePoint]) -> Result<PixelImage, RenderError> {
        if columns.len() != self.width {
            return Err(RenderError::ColumnCountMismatch {
                expected: self.width,
                found: columns.len(),
            });
        }

        let started = Instant::now();
        let mut image = PixelImage::new(self.width, self.height);
        for (column, sample) in columns.iter().enumerate() {
            self.draw_column(&mut image, column, sample);
        }

        tracing::debug!(
            width = self.width,
            height = self.height,
            elapsed_us = started.elapsed().as_micros() as u64,
            "rendered bitmap"
        );
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Location2D;
    use crate::world::Surface;

    fn sample(distance: f64, surface: Surface) -> SamplePoint {
        SamplePoint {
            location: Location2D::new(0.0, 0.0),
            length: 0.0,
            distance_traveled: distance,
            surface,
        }
    }

    fn renderer(width: usize, height: usize) -> BitmapRenderer {
        BitmapRenderer::new(width, height, RenderConfig::default()).unwrap()
    }

    #[test]
    fn pack_uses_0rgb_layout() {
        let c = Rgb { r: 0x12, g: 0x34, b: 0x56 };
        assert_eq!(c.pack(), 0x0012_3456);
    }

    #[test]
    fn near_walls_fill_the_column() {
        let r = renderer(1, 100);
        for distance in [0.0, 0.5, 2.5] {
            let s = sample(distance, Surface::WALL);
            assert_eq!(r.projected_height(&s), 100.0);
            assert_eq!(r.vertical_padding(r.projected_height(&s)), 0);
        }
    }

    #[test]
    fn projection_scales_inversely_with_distance() {
        let r = renderer(1, 100);
        let s = sample(5.0, Surface::WALL);
        assert_eq!(r.projected_height(&s), 50.0);
        assert_eq!(r.vertical_padding(50.0), 25);
        assert_eq!(r.projected_height(&sample(10.0, Surface::NOTHING)), 0.0);
        assert_eq!(r.projected_height(&sample(0.0, Surface::NOTHING)), 0.0);
    }

    #[test]
    fn projection_never_exceeds_image() {
        let r = renderer(1, 77);
        for i in 0..200 {
            let p = r.projected_height(&sample(i as f64 * 0.05, Surface::WALL));
            assert!(p <= 77.0);
            assert!(r.vertical_padding(p) <= 77 / 2);
        }
    }

    #[test]
    fn shading_is_clamped_and_monotonic() {
        let r = renderer(1, 10);
        assert_eq!(r.shade(0.0), Rgb::grey(200));
        assert_eq!(r.shade(10.0), Rgb::grey(100));
        assert_eq!(r.shade(20.0), Rgb::BLACK);
        assert_eq!(r.shade(35.0), Rgb::BLACK);

        let mut previous = u8::MAX;
        for i in 0..100 {
            let level = r.shade(i as f64 * 0.25).r;
            assert!(level <= previous);
            previous = level;
        }
    }

    #[test]
    fn column_is_painted_between_paddings() {
        let r = renderer(2, 100);
        let image = r
            .render_bitmap(&[sample(5.0, Surface::WALL), sample(30.0, Surface::NOTHING)])
            .unwrap();

        let wall: Vec<Rgb> = image.column(0).collect();
        assert!(wall[..25].iter().all(|&p| p == Rgb::BLACK));
        assert!(wall[25..75].iter().all(|&p| p == Rgb::grey(150)));
        assert!(wall[75..].iter().all(|&p| p == Rgb::BLACK));

        assert!(image.column(1).all(|p| p == Rgb::BLACK));
    }

    #[test]
    fn configured_scale_and_shading_apply() {
        let config = RenderConfig::default()
            .with_perspective_scale(5.0)
            .with_brightness(250.0, 1.0);
        let r = BitmapRenderer::new(1, 100, config).unwrap();
        assert_eq!(r.projected_height(&sample(10.0, Surface::WALL)), 50.0);
        assert_eq!(r.shade(10.0), Rgb::grey(200));
    }

    #[test]
    fn mismatched_column_count_is_rejected() {
        let r = renderer(3, 10);
        let err = r.render_bitmap(&[sample(1.0, Surface::WALL)]).unwrap_err();
        assert_eq!(
            err,
            RenderError::ColumnCountMismatch {
                expected: 3,
                found: 1
            }
        );
    }

    #[test]
    fn zero_sized_renderer_is_rejected() {
        assert_eq!(
            BitmapRenderer::new(0, 10, RenderConfig::default()).unwrap_err(),
            RenderError::ZeroDimension {
                width: 0,
                height: 10
            }
        );
    }

    #[test]
    fn rgb_bytes_are_interleaved() {
        let r = renderer(1, 2);
        let image = r.render_bitmap(&[sample(0.0, Surface::WALL)]).unwrap();
        assert_eq!(image.to_rgb_bytes(), vec![200; 6]);
    }
}

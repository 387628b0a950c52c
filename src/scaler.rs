use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use crate::renderer::{PixelImage, Rgb};

/// Per destination row/column: the two source neighbors and the 8-bit weight of the second.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Taps {
    near: Vec<usize>,
    far: Vec<usize>,
    weight: Vec<u16>,
}

impl Taps {
    fn new(dst: usize, src: usize) -> Self {
        let mut taps = Taps {
            near: Vec::with_capacity(dst),
            far: Vec::with_capacity(dst),
            weight: Vec::with_capacity(dst),
        };
        if src == 0 {
            return taps;
        }

        let ratio = src as f32 / dst as f32;
        for i in 0..dst {
            let f = i as f32 * ratio;
            let near = (f.floor() as usize).min(src - 1);
            taps.near.push(near);
            taps.far.push((near + 1).min(src - 1));
            taps.weight.push(((f - near as f32) * 256.0).round() as u16);
        }
        taps
    }
}

/// Precomputed mapping from a window-sized framebuffer onto a rendered image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScaleLut {
    dst_w: usize,
    dst_h: usize,
    src_w: usize,
    src_h: usize,
    cols: Taps,
    rows: Taps,
}

impl ScaleLut {
    pub fn new(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> Self {
        Self {
            dst_w,
            dst_h,
            src_w,
            src_h,
            cols: Taps::new(dst_w, src_w),
            rows: Taps::new(dst_h, src_h),
        }
    }

    /// Whether this table maps exactly these sizes.
    pub fn fits(&self, dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> bool {
        (self.dst_w, self.dst_h, self.src_w, self.src_h) == (dst_w, dst_h, src_w, src_h)
    }
}

#[inline]
fn lerp_channel(a: u8, b: u8, w256: u32) -> u8 {
    ((a as u32 * (256 - w256) + b as u32 * w256) >> 8) as u8
}

#[inline]
fn lerp_rgb(a: Rgb, b: Rgb, w256: u32) -> Rgb {
    Rgb {
        r: lerp_channel(a.r, b.r, w256),
        g: lerp_channel(a.g, b.g, w256),
        b: lerp_channel(a.b, b.b, w256),
    }
}

/// Bilinear stretch of `src` into the packed 0RGB framebuffer `dst`, rows in parallel.
pub fn stretch_into(dst: &mut [u32], src: &PixelImage, lut: &ScaleLut) {
    if lut.dst_w == 0 || !lut.fits(lut.dst_w, lut.dst_h, src.width(), src.height()) {
        tracing::warn!("scale table does not match image, skipping blit");
        return;
    }
    let pixels = src.pixels();
    let sw = src.width();

    dst.par_chunks_mut(lut.dst_w)
        .take(lut.dst_h)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let row0 = lut.rows.near[y] * sw;
            let row1 = lut.rows.far[y] * sw;
            let wy = lut.rows.weight[y] as u32;

            for (x, out) in dst_row.iter_mut().enumerate() {
                let x0 = lut.cols.near[x];
                let x1 = lut.cols.far[x];
                let wx = lut.cols.weight[x] as u32;

                let top = lerp_rgb(pixels[row0 + x0], pixels[row0 + x1], wx);
                let bottom = lerp_rgb(pixels[row1 + x0], pixels[row1 + x1], wx);
                *out = lerp_rgb(top, bottom, wy).pack();
            }
        });
}

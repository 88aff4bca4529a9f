//! Separable smoothing filters applied before edge detection.
//!
//! The default is the normalised 5-tap binomial kernel `[1, 4, 6, 4, 1] / 16`
//! applied horizontally then vertically, i.e. a 5×5 Gaussian with σ ≈ 1.1.
//! Border samples replicate the nearest edge pixel.
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (left-to-right). An odd tap count centres the kernel.
    fn taps(&self) -> &[f32];
}

/// Simple wrapper around a static filter kernel.
#[derive(Clone, Copy, Debug)]
pub struct StaticSeparableFilter {
    taps: &'static [f32],
}

impl Default for StaticSeparableFilter {
    fn default() -> Self {
        GAUSSIAN_5TAP
    }
}

impl StaticSeparableFilter {
    pub const fn new(taps: &'static [f32]) -> Self {
        Self { taps }
    }
}

impl SeparableFilter for StaticSeparableFilter {
    #[inline]
    fn taps(&self) -> &[f32] {
        self.taps
    }
}

/// Normalised 5-tap Gaussian filter `[1, 4, 6, 4, 1] / 16`.
pub const GAUSSIAN_5TAP: StaticSeparableFilter =
    StaticSeparableFilter::new(&[0.0625, 0.25, 0.375, 0.25, 0.0625]);

/// Convolve `src` with `filter` along x then y, clamping at the borders.
pub fn apply(filter: &dyn SeparableFilter, src: &ImageF32) -> ImageF32 {
    let taps = filter.taps();
    let (w, h) = (src.w, src.h);
    if w == 0 || h == 0 || taps.is_empty() {
        return src.clone();
    }
    let radius = (taps.len() / 2) as isize;

    let mut tmp = ImageF32::new(w, h);
    for y in 0..h {
        let src_row = src.row(y);
        let dst = tmp.row_mut(y);
        for (x, out) in dst.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, &t) in taps.iter().enumerate() {
                let sx = clamp_index(x as isize + k as isize - radius, w);
                acc += t * src_row[sx];
            }
            *out = acc;
        }
    }

    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        let dst = out.row_mut(y);
        for (k, &t) in taps.iter().enumerate() {
            let sy = clamp_index(y as isize + k as isize - radius, h);
            let src_row = tmp.row(sy);
            for (d, &s) in dst.iter_mut().zip(src_row) {
                *d += t * s;
            }
        }
    }
    out
}

/// 5×5 Gaussian smoothing used ahead of Canny.
pub fn gaussian_blur_5x5(src: &ImageF32) -> ImageF32 {
    apply(&GAUSSIAN_5TAP, src)
}

#[inline]
fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_image_is_unchanged() {
        let mut img = ImageF32::new(7, 5);
        img.data.iter_mut().for_each(|v| *v = 42.0);
        let out = gaussian_blur_5x5(&img);
        assert!(out.data.iter().all(|&v| (v - 42.0).abs() < 1e-4));
    }

    #[test]
    fn impulse_spreads_with_binomial_weights() {
        let mut img = ImageF32::new(9, 9);
        img.set(4, 4, 256.0);
        let out = gaussian_blur_5x5(&img);
        // 256 * (6/16)^2 at the centre, 256 * (1/16)^2 at the corner of the support.
        assert!((out.get(4, 4) - 36.0).abs() < 1e-4);
        assert!((out.get(2, 2) - 1.0).abs() < 1e-4);
        assert_eq!(out.get(1, 4), 0.0);
        let total: f32 = out.data.iter().sum();
        assert!((total - 256.0).abs() < 1e-3);
    }
}

//! Sobel 3×3 gradients with per-pixel magnitude.
//!
//! Border pixels replicate their nearest neighbour, so the outermost frame
//! still gets a (one-sided) gradient. Canny ignores that frame anyway.
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// How `gx` and `gy` combine into a magnitude.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GradientNorm {
    /// `|gx| + |gy|`
    #[default]
    L1,
    /// `sqrt(gx² + gy²)`
    L2,
}

impl GradientNorm {
    #[inline]
    pub fn magnitude(self, gx: f32, gy: f32) -> f32 {
        match self {
            Self::L1 => gx.abs() + gy.abs(),
            Self::L2 => (gx * gx + gy * gy).sqrt(),
        }
    }
}

/// Per-pixel gradient buffers, all the size of the input.
#[derive(Clone, Debug, Default)]
pub struct Grad {
    pub gx: ImageF32,
    pub gy: ImageF32,
    pub mag: ImageF32,
}

pub fn sobel_gradients(l: &ImageF32, norm: GradientNorm) -> Grad {
    let (w, h) = (l.w, l.h);
    let mut grad = Grad {
        gx: ImageF32::new(w, h),
        gy: ImageF32::new(w, h),
        mag: ImageF32::new(w, h),
    };
    if l.is_empty() {
        return grad;
    }

    for y in 0..h {
        let up = l.row(y.saturating_sub(1));
        let mid = l.row(y);
        let down = l.row((y + 1).min(h - 1));
        for x in 0..w {
            let (xl, xr) = (x.saturating_sub(1), (x + 1).min(w - 1));
            let gx = (up[xr] - up[xl]) + 2.0 * (mid[xr] - mid[xl]) + (down[xr] - down[xl]);
            let gy = (down[xl] + 2.0 * down[x] + down[xr]) - (up[xl] + 2.0 * up[x] + up[xr]);
            grad.gx.row_mut(y)[x] = gx;
            grad.gy.row_mut(y)[x] = gy;
            grad.mag.row_mut(y)[x] = norm.magnitude(gx, gy);
        }
    }
    grad
}

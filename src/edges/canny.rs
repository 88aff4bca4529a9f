//! Canny edge detector on a (pre-smoothed) single-channel float image.
//!
//! Stages:
//! 1. Sobel gradients with L1 (default) or L2 magnitude.
//! 2. Non-maximum suppression along the gradient direction quantized to
//!    0°/45°/90°/135°. On the axis-aligned directions the comparison is
//!    strict on one side only, so a two-pixel plateau (a symmetric blurred
//!    step) keeps exactly one pixel.
//! 3. Hysteresis: pixels above `high` seed edges; 8-connected pixels above
//!    `low` are kept while connected to a seed.
//!
//! Thresholds are expressed in gradient units of the input scale (0..255
//! intensities give the usual 50/150 style values).
use super::grad::{sobel_gradients, GradientNorm};
use crate::image::{GrayImageU8, ImageF32, ImageView};
use serde::{Deserialize, Serialize};

const TAN_22_5_DEG: f32 = 0.414_213_56;

/// Marker written to the output map for edge pixels.
pub const EDGE: u8 = 255;

/// Double-threshold parameters for [`canny`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyOptions {
    /// Lower hysteresis threshold; candidates must exceed it.
    pub low: f32,
    /// Upper hysteresis threshold; seeds must exceed it.
    pub high: f32,
    /// Use `sqrt(gx²+gy²)` instead of `|gx|+|gy|`.
    pub l2_gradient: bool,
}

impl Default for CannyOptions {
    fn default() -> Self {
        Self {
            low: 50.0,
            high: 150.0,
            l2_gradient: false,
        }
    }
}

impl CannyOptions {
    /// Thresholds given in either order are normalised to `low <= high`.
    pub fn normalized(self) -> Self {
        if self.low > self.high {
            Self {
                low: self.high,
                high: self.low,
                ..self
            }
        } else {
            self
        }
    }
}

/// Run Canny and return a binary edge map (`EDGE` for edges, 0 otherwise).
pub fn canny(l: &ImageF32, options: CannyOptions) -> GrayImageU8 {
    let options = options.normalized();
    let w = l.w;
    let h = l.h;
    let mut edges = GrayImageU8::zeros(w, h);
    if w < 3 || h < 3 {
        return edges;
    }

    let norm = if options.l2_gradient {
        GradientNorm::L2
    } else {
        GradientNorm::L1
    };
    let grad = sobel_gradients(l, norm);

    // 0 = suppressed, 1 = weak candidate, 2 = strong seed
    let mut class = vec![0u8; w * h];
    let mut stack = Vec::with_capacity((w * h) / 16 + 1);
    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag <= options.low {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();

            let is_max = if abs_gy <= abs_gx * TAN_22_5_DEG {
                mag > mag_row[x - 1] && mag >= mag_row[x + 1]
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                mag > mag_prev[x] && mag >= mag_next[x]
            } else if (gx >= 0.0) == (gy >= 0.0) {
                // Gradient points along the main diagonal (x and y grow together).
                mag > mag_prev[x - 1] && mag > mag_next[x + 1]
            } else {
                mag > mag_prev[x + 1] && mag > mag_next[x - 1]
            };
            if !is_max {
                continue;
            }

            let idx = y * w + x;
            if mag > options.high {
                class[idx] = 2;
                stack.push(idx);
            } else {
                class[idx] = 1;
            }
        }
    }

    while let Some(idx) = stack.pop() {
        let x = idx % w;
        let y = idx / w;
        edges.set(x, y, EDGE);
        for ny in y - 1..=y + 1 {
            for nx in x - 1..=x + 1 {
                let nidx = ny * w + nx;
                if class[nidx] == 1 {
                    class[nidx] = 2;
                    stack.push(nidx);
                }
            }
        }
    }

    edges
}

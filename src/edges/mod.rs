//! Edge processing: image gradients and Canny edge maps.
//!
//! - Sobel gradients returning `gx`, `gy` and an L1 or L2 magnitude.
//! - Canny detection: direction-aligned non-maximum suppression followed by
//!   a double threshold with hysteresis, producing a binary edge map.
//!
//! Borders are handled by clamping in the gradient pass; the outermost
//! 1-pixel frame never carries edges.

pub mod canny;
pub mod grad;

pub use canny::{canny, CannyOptions};
pub use grad::{sobel_gradients, Grad, GradientNorm};

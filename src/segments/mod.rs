//! Straight line segment extraction from a color region.
//!
//! [`LineExtractor`] chains the stages whose output constraints the next
//! stage relies on:
//!
//! - Grayscale conversion (`Y = 0.299 R + 0.587 G + 0.114 B`).
//! - 5×5 Gaussian smoothing; raw Canny on unsmoothed input fragments edges.
//! - Canny with hysteresis (`low`/`high`, default 50/150) producing a binary
//!   edge map one pixel thick.
//! - Progressive probabilistic Hough transform with a vote threshold, a
//!   minimum segment length and a maximum bridged gap (defaults 50/30/5).
//!
//! Segment order follows the seeded visiting order of the Hough stage: it has
//! no geometric meaning but is identical for identical input and options.
//! An empty vector is returned when nothing passes the thresholds.

mod extractor;
mod hough;
mod options;
mod segment;

pub use extractor::{LineExtraction, LineExtractor};
pub use options::HoughOptions;
pub use segment::LineSegment;

use crate::image::GrayImageU8;

/// Run only the Hough stage on an existing binary edge map.
pub fn hough_segments(edges: &GrayImageU8, options: HoughOptions) -> Vec<LineSegment> {
    hough::ProbabilisticHough::new(edges, options).run()
}

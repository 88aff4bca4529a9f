use super::hough::ProbabilisticHough;
use super::options::HoughOptions;
use super::segment::LineSegment;
use crate::diagnostics::{elapsed_ms, TimingBreakdown};
use crate::edges::{canny, CannyOptions};
use crate::filters::gaussian_blur_5x5;
use crate::image::{to_grayscale, ColorImage, GrayImageU8, ImageF32};
use log::debug;
use std::time::Instant;

/// Output of [`LineExtractor::extract`] with the intermediate edge map.
#[derive(Clone, Debug)]
pub struct LineExtraction {
    pub segments: Vec<LineSegment>,
    /// Binary Canny output the segments were traced on.
    pub edges: GrayImageU8,
    pub timing: TimingBreakdown,
}

/// Grayscale → 5×5 Gaussian → Canny → probabilistic Hough.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineExtractor {
    pub canny: CannyOptions,
    pub hough: HoughOptions,
}

impl LineExtractor {
    pub fn new(canny: CannyOptions, hough: HoughOptions) -> Self {
        Self { canny, hough }
    }

    /// Detected segments in region-local coordinates, possibly empty.
    pub fn extract_lines(&self, region: &ColorImage) -> Vec<LineSegment> {
        self.extract(region).segments
    }

    pub fn extract(&self, region: &ColorImage) -> LineExtraction {
        let total_start = Instant::now();
        let mut timing = TimingBreakdown::default();

        let smoothed = timing.measure("grayscale+blur", || {
            gaussian_blur_5x5(&ImageF32::from_gray(&to_grayscale(region)))
        });
        let edges = timing.measure("canny", || canny(&smoothed, self.canny));
        let segments = timing.measure("hough", || ProbabilisticHough::new(&edges, self.hough).run());

        timing.total_ms = elapsed_ms(total_start);
        debug!(
            "LineExtractor: {}x{} region, {} edge px, {} segment(s) in {:.3} ms",
            region.width(),
            region.height(),
            edges.count_nonzero(),
            segments.len(),
            timing.total_ms
        );

        LineExtraction {
            segments,
            edges,
            timing,
        }
    }
}

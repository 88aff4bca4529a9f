use serde::{Deserialize, Serialize};

/// Parameters of the progressive probabilistic Hough transform.
///
/// - `threshold`: accumulator votes a (ρ, θ) cell needs before a segment is
///   traced along it.
/// - `min_line_length`: shorter traced segments are discarded (their pixels
///   stay consumed).
/// - `max_line_gap`: number of consecutive non-edge pixels tolerated while
///   tracing, which bridges small breaks between collinear fragments.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughOptions {
    /// Distance resolution of the accumulator in pixels.
    pub rho: f32,
    /// Angular resolution of the accumulator in radians.
    pub theta: f32,
    pub threshold: u32,
    pub min_line_length: u32,
    pub max_line_gap: u32,
    /// Seed of the generator picking the point visiting order.
    pub seed: u64,
    /// Stop after this many segments (`None` = unlimited).
    pub max_lines: Option<usize>,
}

impl Default for HoughOptions {
    fn default() -> Self {
        Self {
            rho: 1.0,
            theta: std::f32::consts::PI / 180.0,
            threshold: 50,
            min_line_length: 30,
            max_line_gap: 5,
            seed: 0x5EED_1E55,
            max_lines: None,
        }
    }
}

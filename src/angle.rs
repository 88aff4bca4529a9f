//! Angle between two line segments.

use crate::error::{InspectError, Result};
use crate::segments::LineSegment;
use nalgebra::Vector2;

/// Unsigned angle between two non-zero vectors in degrees, in [0, 180].
///
/// The cosine is clamped before `acos` so rounding noise on (anti)parallel
/// vectors cannot produce NaN. The magnitude product is taken as
/// `sqrt(|a|²·|b|²)`, which keeps parallel integer vectors at exactly 0°.
#[inline]
pub fn vector_angle_deg(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    let denom = (a.norm_squared() * b.norm_squared()).sqrt();
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Angle between the direction vectors `p1 - p0` of two segments, in degrees.
///
/// Direction-agnostic in the sense that swapping the arguments gives the same
/// value. Fails with `DegenerateLineSegment` when either segment has
/// coincident endpoints.
pub fn angle_between(line1: &LineSegment, line2: &LineSegment) -> Result<f64> {
    let v1 = direction_of(line1)?;
    let v2 = direction_of(line2)?;
    Ok(vector_angle_deg(&v1, &v2))
}

/// [`angle_between`] over flat `[x1, y1, x2, y2]` coordinate slices.
pub fn angle_between_coords(line1: &[i32], line2: &[i32]) -> Result<f64> {
    angle_between(
        &LineSegment::from_coords(line1)?,
        &LineSegment::from_coords(line2)?,
    )
}

/// Round to `decimals` places (half away from zero).
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

fn direction_of(line: &LineSegment) -> Result<Vector2<f64>> {
    if line.is_degenerate() {
        return Err(InspectError::DegenerateLineSegment {
            x: line.p0[0],
            y: line.p0[1],
        });
    }
    Ok(line.direction())
}

use crate::error::{InspectError, Result};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Line segment with integer endpoints in region-local pixel coordinates.
///
/// Endpoints may coincide; consumers that need a direction must check
/// [`LineSegment::is_degenerate`] (the angle calculator does).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineSegment {
    pub p0: [i32; 2],
    pub p1: [i32; 2],
}

impl LineSegment {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            p0: [x1, y1],
            p1: [x2, y2],
        }
    }

    /// Build from a flat `[x1, y1, x2, y2]` slice.
    pub fn from_coords(coords: &[i32]) -> Result<Self> {
        match *coords {
            [x1, y1, x2, y2] => Ok(Self::new(x1, y1, x2, y2)),
            _ => Err(InspectError::MalformedLineSegment {
                coords: coords.len(),
            }),
        }
    }

    pub fn coords(&self) -> [i32; 4] {
        [self.p0[0], self.p0[1], self.p1[0], self.p1[1]]
    }

    /// Direction vector `p1 - p0`.
    pub fn direction(&self) -> Vector2<f64> {
        Vector2::new(
            (self.p1[0] - self.p0[0]) as f64,
            (self.p1[1] - self.p0[1]) as f64,
        )
    }

    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    pub fn is_degenerate(&self) -> bool {
        self.p0 == self.p1
    }

    /// Same segment shifted by `(dx, dy)`, e.g. from region to image coordinates.
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.p0[0] + dx, self.p0[1] + dy, self.p1[0] + dx, self.p1[1] + dy)
    }
}

impl TryFrom<&[i32]> for LineSegment {
    type Error = InspectError;

    fn try_from(coords: &[i32]) -> Result<Self> {
        Self::from_coords(coords)
    }
}

impl From<[i32; 4]> for LineSegment {
    fn from(c: [i32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

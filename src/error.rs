//! Error taxonomy for the inspection pipeline.
//!
//! Per-image failures (`ImageLoad`, `ImageSave`, `InsufficientLineData`,
//! `MalformedLineSegment`, `DegenerateLineSegment`, `Rejected`) are reported
//! for that image and never abort a batch. Configuration failures (`InvalidRegionSpec`,
//! `InvalidConfig`, `Json`) are fatal and surface before any image is
//! processed.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the inspection crate.
#[derive(Error, Debug)]
pub enum InspectError {
    /// The image file is missing or could not be decoded.
    #[error("failed to load image {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The annotated image could not be encoded or written.
    #[error("failed to save image {}: {source}", path.display())]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Filesystem failure outside the image codec (directories, reports, config).
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be parsed, or a report not serialized.
    #[error("JSON error for {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Region name other than `top` or `bottom`.
    #[error("invalid region {0:?}: expected \"top\" or \"bottom\"")]
    InvalidRegionSpec(String),

    /// Any other configuration value out of its accepted range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Fewer than two line segments were detected in the region.
    #[error("insufficient line data: {found} segment(s) detected, 2 required")]
    InsufficientLineData { found: usize },

    /// A line was not given as exactly two endpoints (four coordinates).
    #[error("malformed line segment: expected 4 coordinates, got {coords}")]
    MalformedLineSegment { coords: usize },

    /// Both endpoints of a line coincide, so it has no direction.
    #[error("degenerate line segment: both endpoints at ({x}, {y})")]
    DegenerateLineSegment { x: i32, y: i32 },

    /// A single image was abandoned for a reason not covered above.
    #[error("inspection rejected: {0}")]
    Rejected(String),
}

impl InspectError {
    /// `true` for errors that must stop the program before processing images.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InvalidRegionSpec(_) | Self::InvalidConfig(_) | Self::Json { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, InspectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_are_fatal() {
        assert!(InspectError::InvalidRegionSpec("left".into()).is_fatal());
        assert!(InspectError::InvalidConfig("ratio".into()).is_fatal());
        assert!(!InspectError::InsufficientLineData { found: 1 }.is_fatal());
        assert!(!InspectError::DegenerateLineSegment { x: 0, y: 0 }.is_fatal());
        assert!(!InspectError::Rejected("empty band".into()).is_fatal());
    }

    #[test]
    fn messages_name_the_offending_value() {
        let err = InspectError::InvalidRegionSpec("middle".into());
        assert!(err.to_string().contains("\"middle\""));
        let err = InspectError::MalformedLineSegment { coords: 3 };
        assert!(err.to_string().contains("got 3"));
    }
}

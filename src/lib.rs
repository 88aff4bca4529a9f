#![doc = include_str!("../README.md")]

// Pipeline building blocks, leaf first.
pub mod angle;
pub mod edges;
pub mod error;
pub mod filters;
pub mod image;
pub mod roi;
pub mod segments;
pub mod verdict;

// Orchestration and outer surfaces.
pub mod batch;
pub mod config;
pub mod diagnostics;
pub mod inspect;

// --- High-level re-exports -------------------------------------------------

pub use crate::angle::{angle_between, angle_between_coords};
pub use crate::batch::{BatchEntry, BatchOptions, BatchOutcome, BatchRunner, BatchSummary};
pub use crate::error::{InspectError, Result};
pub use crate::inspect::{
    AnnotationMode, InspectionParams, InspectionPipeline, InspectionResult, InspectionStage,
    InspectionStatus, Measurement,
};
pub use crate::roi::{crop, Region, RegionCrop, RowSpan};
pub use crate::segments::{LineExtractor, LineSegment};
pub use crate::verdict::{ToleranceClassifier, Verdict};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use angle_inspector::prelude::*;
/// use std::path::Path;
///
/// # fn main() -> angle_inspector::Result<()> {
/// let pipeline = InspectionPipeline::new(InspectionParams::default())?;
/// let result = pipeline.inspect_file(Path::new("part.png"))?;
/// match result.measurement() {
///     Ok(m) => println!("{:.2} deg -> {}", m.angle_deg, m.verdict),
///     Err(err) => println!("{err}"),
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ColorImage;
    pub use crate::{
        InspectionParams, InspectionPipeline, InspectionResult, LineSegment, Region, Verdict,
    };
}

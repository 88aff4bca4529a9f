//! Per-image inspection: the pipeline tying cropping, line extraction, angle
//! measurement, classification and annotation together.
//!
//! [`InspectionPipeline::inspect`] never fails: an image without two usable
//! lines produces an [`InspectionStatus::InsufficientLines`] result (and no
//! annotated image) rather than an error, so a batch can carry on.

mod annotate;
mod params;
mod pipeline;
mod result;

pub use annotate::draw_segments;
pub use params::{AnnotationMode, InspectionParams};
pub use pipeline::InspectionPipeline;
pub use result::{
    InspectionResult, InspectionStage, InspectionStatus, Measurement, RejectReason,
};

use super::annotate::draw_segments;
use super::params::{AnnotationMode, InspectionParams};
use super::result::{
    InspectionResult, InspectionStage, InspectionStatus, Measurement, RejectReason,
};
use crate::angle::{angle_between, round_to};
use crate::diagnostics::elapsed_ms;
use crate::error::Result;
use crate::image::io::load_color_image;
use crate::image::ColorImage;
use crate::roi;
use log::debug;
use std::path::Path;
use std::time::Instant;

/// Crop → extract lines → measure → classify → annotate, for one image.
///
/// Holds only configuration; one pipeline can inspect any number of images,
/// from any number of threads.
#[derive(Clone, Debug)]
pub struct InspectionPipeline {
    params: InspectionParams,
}

impl InspectionPipeline {
    /// Validates `params`; an invalid configuration never reaches an image.
    pub fn new(params: InspectionParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &InspectionParams {
        &self.params
    }

    /// Load `path` and inspect it. Only the load can fail.
    pub fn inspect_file(&self, path: &Path) -> Result<InspectionResult> {
        let load_start = Instant::now();
        let image = load_color_image(path)?;
        let load_ms = elapsed_ms(load_start);

        let mut result = self.inspect(&image);
        result.source = Some(path.to_path_buf());
        result.timing.prepend("load", load_ms);
        Ok(result)
    }

    /// Inspect an in-memory image. The caller's image is never modified.
    pub fn inspect(&self, image: &ColorImage) -> InspectionResult {
        let total_start = Instant::now();
        let mut result = InspectionResult::started(self.params.region);
        self.run_stages(image, &mut result);
        result.timing.total_ms = elapsed_ms(total_start);
        result
    }

    /// Advance `result` through the stages, stopping at the first terminal one.
    fn run_stages(&self, image: &ColorImage, result: &mut InspectionResult) {
        let p = &self.params;

        let crop = match result
            .timing
            .measure("crop", || roi::crop(image, p.region, p.crop_ratio))
        {
            Ok(crop) => crop,
            Err(err) => {
                result.status = InspectionStatus::Rejected {
                    reason: RejectReason::from_error(&err),
                };
                return;
            }
        };
        result.span = crop.span;
        result.stage = InspectionStage::Cropped;

        let extraction = p.extractor.extract(&crop.image);
        result.timing.extend(extraction.timing);
        result.segments = extraction.segments;
        result.edges = Some(extraction.edges);
        result.stage = InspectionStage::LinesExtracted;

        let (first, second) = match result.segments.as_slice() {
            [first, second, ..] => (*first, *second),
            found => {
                debug!(
                    "InspectionPipeline: only {} segment(s) in {} band",
                    found.len(),
                    p.region
                );
                result.status = InspectionStatus::InsufficientLines { found: found.len() };
                result.stage = InspectionStage::InsufficientLines;
                return;
            }
        };

        let raw_angle_deg = match result
            .timing
            .measure("angle", || angle_between(&first, &second))
        {
            Ok(angle) => angle,
            Err(err) => {
                debug!("InspectionPipeline: rejected {first:?} / {second:?}: {err}");
                result.status = InspectionStatus::Rejected {
                    reason: RejectReason::from_error(&err),
                };
                return;
            }
        };
        // Classification sees the rounded angle, as reported.
        let angle_deg = round_to(raw_angle_deg, p.angle_decimals);
        result.selected = Some([first, second]);
        result.stage = InspectionStage::AngleComputed;

        let verdict = p.classifier.classify(angle_deg);
        let measurement = Measurement {
            angle_deg,
            raw_angle_deg,
            deviation_deg: p.classifier.deviation(angle_deg),
            verdict,
        };
        result.stage = InspectionStage::Classified;

        let drawn = match p.annotation {
            AnnotationMode::SelectedPair => &result.segments[..2],
            AnnotationMode::AllSegments => &result.segments[..],
        };
        let mut annotated = crop.image;
        result.timing.measure("annotate", || {
            draw_segments(&mut annotated, drawn, verdict.color(), p.line_width)
        });
        result.status = InspectionStatus::Measured {
            measurement,
            annotated,
        };
        result.stage = InspectionStage::Annotated;

        debug!(
            "InspectionPipeline: {} band rows {}..{}, {} segment(s), angle {angle_deg:.2} -> {verdict}",
            p.region,
            result.span.row_start,
            result.span.row_end,
            result.segments.len()
        );
    }
}

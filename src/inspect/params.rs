//! Parameters configuring one inspection pipeline.
//!
//! Every threshold the pipeline uses lives here so several configurations can
//! coexist (e.g. top and bottom inspections, or non-90° targets) and tests can
//! override any of them.

use crate::edges::CannyOptions;
use crate::error::{InspectError, Result};
use crate::roi::{validate_ratio, Region};
use crate::segments::{HoughOptions, LineExtractor};
use crate::verdict::ToleranceClassifier;
use serde::{Deserialize, Serialize};

/// Which segments are drawn on the annotated region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationMode {
    /// Only the two segments the angle was measured on.
    #[default]
    SelectedPair,
    /// Every detected segment, in the verdict color.
    AllSegments,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InspectionParams {
    /// Band of the image to inspect.
    pub region: Region,
    /// Fraction of the image height covered by the band, in (0, 1].
    pub crop_ratio: f64,
    /// Target angle and tolerance.
    pub classifier: ToleranceClassifier,
    /// Canny + Hough settings.
    pub extractor: LineExtractor,
    pub annotation: AnnotationMode,
    /// Stroke width of annotation lines in pixels.
    pub line_width: u32,
    /// Decimal places the angle is rounded to before classification.
    pub angle_decimals: i32,
}

impl Default for InspectionParams {
    fn default() -> Self {
        Self {
            region: Region::Top,
            crop_ratio: 0.2,
            classifier: ToleranceClassifier::default(),
            extractor: LineExtractor::new(CannyOptions::default(), HoughOptions::default()),
            annotation: AnnotationMode::SelectedPair,
            line_width: 2,
            angle_decimals: 2,
        }
    }
}

impl InspectionParams {
    /// Check every value; failures here are configuration errors.
    pub fn validate(&self) -> Result<()> {
        validate_ratio(self.crop_ratio)?;
        let c = &self.classifier;
        if !c.target_deg.is_finite() || !(0.0..=180.0).contains(&c.target_deg) {
            return Err(invalid(format!(
                "target angle must be within [0, 180] degrees, got {}",
                c.target_deg
            )));
        }
        if !c.tolerance_deg.is_finite() || c.tolerance_deg < 0.0 {
            return Err(invalid(format!(
                "tolerance must be a non-negative number of degrees, got {}",
                c.tolerance_deg
            )));
        }
        let canny = &self.extractor.canny;
        if !(canny.low >= 0.0 && canny.high >= 0.0) {
            return Err(invalid(format!(
                "canny thresholds must be non-negative, got {}/{}",
                canny.low, canny.high
            )));
        }
        let hough = &self.extractor.hough;
        if !(hough.rho > 0.0) {
            return Err(invalid(format!("hough rho must be positive, got {}", hough.rho)));
        }
        if !(hough.theta > 0.0 && hough.theta <= std::f32::consts::PI) {
            return Err(invalid(format!(
                "hough theta must be in (0, pi] radians, got {}",
                hough.theta
            )));
        }
        if hough.threshold == 0 {
            return Err(invalid("hough vote threshold must be at least 1".to_string()));
        }
        if self.line_width == 0 {
            return Err(invalid("annotation line width must be at least 1".to_string()));
        }
        if !(0..=6).contains(&self.angle_decimals) {
            return Err(invalid(format!(
                "angle decimals must be within 0..=6, got {}",
                self.angle_decimals
            )));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> InspectError {
    InspectError::InvalidConfig(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_settings() {
        let p = InspectionParams::default();
        assert_eq!(p.region, Region::Top);
        assert_eq!(p.crop_ratio, 0.2);
        assert_eq!(p.classifier.target_deg, 90.0);
        assert_eq!(p.classifier.tolerance_deg, 0.132);
        assert_eq!((p.extractor.canny.low, p.extractor.canny.high), (50.0, 150.0));
        let h = p.extractor.hough;
        assert_eq!((h.threshold, h.min_line_length, h.max_line_gap), (50, 30, 5));
        assert_eq!(p.line_width, 2);
        p.validate().unwrap();
    }

    #[test]
    fn out_of_range_values_fail_validation() {
        let bad = [
            InspectionParams {
                crop_ratio: 0.0,
                ..Default::default()
            },
            InspectionParams {
                classifier: ToleranceClassifier::new(90.0, -1.0),
                ..Default::default()
            },
            InspectionParams {
                classifier: ToleranceClassifier::new(f64::NAN, 0.1),
                ..Default::default()
            },
            InspectionParams {
                line_width: 0,
                ..Default::default()
            },
        ];
        for p in bad {
            assert!(matches!(p.validate(), Err(InspectError::InvalidConfig(_))), "{p:?}");
        }
    }
}

use crate::batch::{BatchOptions, DEFAULT_OUTPUT_DIR};
use crate::edges::CannyOptions;
use crate::error::{InspectError, Result};
use crate::inspect::{AnnotationMode, InspectionParams};
use crate::roi::Region;
use crate::segments::{HoughOptions, LineExtractor};
use crate::verdict::ToleranceClassifier;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration file. Every field is optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    /// Images to inspect, in order.
    pub images: Vec<PathBuf>,
    pub output_dir: PathBuf,
    /// `"top"` or `"bottom"`, case-insensitive.
    pub region: String,
    pub crop_ratio: f64,
    pub target_angle: f64,
    pub tolerance: f64,
    pub canny: CannyConfig,
    pub hough: HoughConfig,
    pub annotation: AnnotationMode,
    pub line_width: u32,
    pub parallel: bool,
    /// Extension for annotated images, e.g. `"png"`.
    pub output_format: Option<String>,
    /// Write a JSON batch report here.
    pub report_json: Option<PathBuf>,
    /// Directory for per-image Canny edge maps.
    pub debug_dir: Option<PathBuf>,
}

impl Default for InspectConfig {
    fn default() -> Self {
        let params = InspectionParams::default();
        Self {
            images: Vec::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            region: params.region.to_string(),
            crop_ratio: params.crop_ratio,
            target_angle: params.classifier.target_deg,
            tolerance: params.classifier.tolerance_deg,
            canny: CannyConfig::default(),
            hough: HoughConfig::default(),
            annotation: params.annotation,
            line_width: params.line_width,
            parallel: false,
            output_format: None,
            report_json: None,
            debug_dir: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyConfig {
    pub low: f32,
    pub high: f32,
    pub l2_gradient: bool,
}

impl Default for CannyConfig {
    fn default() -> Self {
        let o = CannyOptions::default();
        Self {
            low: o.low,
            high: o.high,
            l2_gradient: o.l2_gradient,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughConfig {
    /// Accumulator votes needed before a line is traced.
    pub threshold: u32,
    pub min_length: u32,
    pub max_gap: u32,
    /// Seed of the point visiting order.
    pub seed: u64,
    pub max_lines: Option<usize>,
}

impl Default for HoughConfig {
    fn default() -> Self {
        let o = HoughOptions::default();
        Self {
            threshold: o.threshold,
            min_length: o.min_line_length,
            max_gap: o.max_line_gap,
            seed: o.seed,
            max_lines: o.max_lines,
        }
    }
}

impl InspectConfig {
    /// Build validated pipeline parameters.
    pub fn to_params(&self) -> Result<InspectionParams> {
        let region: Region = self.region.parse()?;
        let canny = CannyOptions {
            low: self.canny.low,
            high: self.canny.high,
            l2_gradient: self.canny.l2_gradient,
        };
        let hough = HoughOptions {
            threshold: self.hough.threshold,
            min_line_length: self.hough.min_length,
            max_line_gap: self.hough.max_gap,
            seed: self.hough.seed,
            max_lines: self.hough.max_lines,
            ..HoughOptions::default()
        };
        let params = InspectionParams {
            region,
            crop_ratio: self.crop_ratio,
            classifier: ToleranceClassifier::new(self.target_angle, self.tolerance),
            extractor: LineExtractor::new(canny, hough),
            annotation: self.annotation,
            line_width: self.line_width,
            ..InspectionParams::default()
        };
        params.validate()?;
        Ok(params)
    }

    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            output_dir: self.output_dir.clone(),
            parallel: self.parallel,
            output_format: self.output_format.clone(),
            debug_dir: self.debug_dir.clone(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<InspectConfig> {
    let data = fs::read_to_string(path).map_err(|source| InspectError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| InspectError::Json {
        path: path.to_path_buf(),
        source,
    })
}

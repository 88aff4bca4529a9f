use crate::diagnostics::TimingBreakdown;
use crate::error::{InspectError, Result};
use crate::image::{ColorImage, GrayImageU8};
use crate::roi::{Region, RowSpan};
use crate::segments::LineSegment;
use crate::verdict::Verdict;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Last state an inspection reached.
///
/// `Start → Cropped → LinesExtracted → {InsufficientLines | AngleComputed}
/// → Classified → Annotated`. A rejected inspection stops at `LinesExtracted`
/// (or `Start` if the crop itself failed).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionStage {
    #[default]
    Start,
    Cropped,
    LinesExtracted,
    InsufficientLines,
    AngleComputed,
    Classified,
    Annotated,
}

/// A classified angle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// Angle rounded to the configured decimals; this is what was classified.
    pub angle_deg: f64,
    pub raw_angle_deg: f64,
    /// Signed `angle_deg - target`.
    pub deviation_deg: f64,
    pub verdict: Verdict,
}

/// Why a measurement was abandoned after lines were found.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RejectReason {
    MalformedSegment { coords: usize },
    DegenerateSegment { x: i32, y: i32 },
    Other { message: String },
}

impl RejectReason {
    pub fn from_error(err: &InspectError) -> Self {
        match *err {
            InspectError::MalformedLineSegment { coords } => Self::MalformedSegment { coords },
            InspectError::DegenerateLineSegment { x, y } => Self::DegenerateSegment { x, y },
            InspectError::Rejected(ref message) => Self::Other {
                message: message.clone(),
            },
            ref other => Self::Other {
                message: other.to_string(),
            },
        }
    }

    pub fn to_error(&self) -> InspectError {
        match self {
            Self::MalformedSegment { coords } => InspectError::MalformedLineSegment { coords: *coords },
            Self::DegenerateSegment { x, y } => InspectError::DegenerateLineSegment { x: *x, y: *y },
            Self::Other { message } => InspectError::Rejected(message.clone()),
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_error())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum InspectionStatus {
    /// Classified angle and the annotated copy of the region.
    Measured {
        measurement: Measurement,
        annotated: ColorImage,
    },
    InsufficientLines { found: usize },
    Rejected { reason: RejectReason },
}

/// Everything one inspection produced.
#[derive(Clone, Debug)]
pub struct InspectionResult {
    /// File the image was read from, when inspected via `inspect_file`.
    pub source: Option<PathBuf>,
    pub region: Region,
    /// Rows of the source image that were inspected.
    pub span: RowSpan,
    pub status: InspectionStatus,
    /// Every detected segment, in region-local coordinates and detection order.
    pub segments: Vec<LineSegment>,
    /// Binary Canny map of the region the segments were traced on.
    pub edges: Option<GrayImageU8>,
    /// The two segments the angle was measured between.
    pub selected: Option<[LineSegment; 2]>,
    pub stage: InspectionStage,
    pub timing: TimingBreakdown,
}

impl InspectionResult {
    pub(crate) fn started(region: Region) -> Self {
        Self {
            source: None,
            region,
            span: RowSpan {
                row_start: 0,
                row_end: 0,
            },
            status: InspectionStatus::InsufficientLines { found: 0 },
            segments: Vec::new(),
            edges: None,
            selected: None,
            stage: InspectionStage::Start,
            timing: TimingBreakdown::default(),
        }
    }

    /// The classified angle, or the reason there is none.
    pub fn measurement(&self) -> Result<Measurement> {
        match &self.status {
            InspectionStatus::Measured { measurement, .. } => Ok(*measurement),
            InspectionStatus::InsufficientLines { found } => {
                Err(InspectError::InsufficientLineData { found: *found })
            }
            InspectionStatus::Rejected { reason } => Err(reason.to_error()),
        }
    }

    pub fn angle_deg(&self) -> Option<f64> {
        self.measurement().ok().map(|m| m.angle_deg)
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.measurement().ok().map(|m| m.verdict)
    }

    /// Annotated region; only measured results carry one.
    pub fn annotated(&self) -> Option<&ColorImage> {
        match &self.status {
            InspectionStatus::Measured { annotated, .. } => Some(annotated),
            _ => None,
        }
    }

    /// The selected pair shifted from region to source-image coordinates.
    pub fn selected_in_image(&self) -> Option<[LineSegment; 2]> {
        let dy = self.span.row_start as i32;
        self.selected.map(|pair| pair.map(|s| s.translated(0, dy)))
    }

    pub fn is_measured(&self) -> bool {
        matches!(self.status, InspectionStatus::Measured { .. })
    }
}

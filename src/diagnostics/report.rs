use super::TimingBreakdown;
use crate::batch::{BatchEntry, BatchOutcome, BatchSummary};
use crate::verdict::Verdict;
use serde::Serialize;
use std::path::PathBuf;

/// JSON-friendly summary of a batch run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub total_images: usize,
    pub measured: usize,
    pub passed: usize,
    pub failed: usize,
    pub unmeasured: usize,
    pub errors: usize,
    pub total_ms: f64,
    pub images: Vec<ImageReport>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageStatus {
    Measured,
    SaveFailed,
    InsufficientLines,
    Rejected,
    LoadFailed,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageReport {
    pub path: PathBuf,
    pub status: ImageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle_deg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deviation_deg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
    pub segments: usize,
    /// Measured pair as `[x1, y1, x2, y2]` in source-image pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<[[i32; 4]; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timing: TimingBreakdown,
}

impl BatchReport {
    pub fn from_summary(summary: &BatchSummary) -> Self {
        Self {
            total_images: summary.len(),
            measured: summary.measured(),
            passed: summary.passed(),
            failed: summary.failed(),
            unmeasured: summary.unmeasured(),
            errors: summary.errors(),
            total_ms: summary.total_ms,
            images: summary.entries.iter().map(ImageReport::from_entry).collect(),
        }
    }
}

impl ImageReport {
    pub fn from_entry(entry: &BatchEntry) -> Self {
        let (status, output, message) = match &entry.outcome {
            BatchOutcome::Measured { output, .. } => {
                (ImageStatus::Measured, Some(output.clone()), None)
            }
            BatchOutcome::SaveFailed { error, .. } => {
                (ImageStatus::SaveFailed, None, Some(error.to_string()))
            }
            BatchOutcome::InsufficientLines { found } => (
                ImageStatus::InsufficientLines,
                None,
                Some(format!("{found} segment(s) detected, 2 required")),
            ),
            BatchOutcome::Rejected { reason } => {
                (ImageStatus::Rejected, None, Some(reason.to_string()))
            }
            BatchOutcome::LoadFailed { error } => {
                (ImageStatus::LoadFailed, None, Some(error.to_string()))
            }
        };
        let measurement = entry.measurement();
        Self {
            path: entry.path.clone(),
            status,
            angle_deg: measurement.map(|m| m.angle_deg),
            deviation_deg: measurement.map(|m| m.deviation_deg),
            verdict: measurement.map(|m| m.verdict),
            segments: entry.segments,
            selected: entry.selected.map(|pair| pair.map(|s| s.coords())),
            output,
            message,
            timing: entry.timing.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InspectError;
    use crate::inspect::Measurement;
    use crate::segments::LineSegment;

    fn measured(verdict: Verdict) -> BatchEntry {
        BatchEntry {
            path: PathBuf::from("in/a.png"),
            outcome: BatchOutcome::Measured {
                measurement: Measurement {
                    angle_deg: 90.0,
                    raw_angle_deg: 90.0,
                    deviation_deg: 0.0,
                    verdict,
                },
                output: PathBuf::from("Processed/a.png"),
            },
            segments: 2,
            selected: Some([
                LineSegment::new(83, 29, 239, 29),
                LineSegment::new(79, 33, 79, 98),
            ]),
            timing: TimingBreakdown::with_total(1.5),
        }
    }

    #[test]
    fn report_counts_and_serializes_camel_case() {
        let summary = BatchSummary {
            entries: vec![
                measured(Verdict::Pass),
                measured(Verdict::Fail),
                BatchEntry {
                    path: PathBuf::from("in/blank.png"),
                    outcome: BatchOutcome::InsufficientLines { found: 0 },
                    segments: 0,
                    selected: None,
                    timing: TimingBreakdown::default(),
                },
                BatchEntry {
                    path: PathBuf::from("in/missing.png"),
                    outcome: BatchOutcome::LoadFailed {
                        error: InspectError::InvalidConfig("boom".into()),
                    },
                    segments: 0,
                    selected: None,
                    timing: TimingBreakdown::default(),
                },
            ],
            total_ms: 12.0,
        };
        let report = BatchReport::from_summary(&summary);
        assert_eq!(
            (report.total_images, report.measured, report.passed, report.failed),
            (4, 2, 1, 1)
        );
        assert_eq!((report.unmeasured, report.errors), (1, 1));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["totalImages"], 4);
        assert_eq!(json["images"][0]["status"], "measured");
        assert_eq!(json["images"][0]["verdict"], "PASS");
        assert_eq!(json["images"][0]["angleDeg"], 90.0);
        assert_eq!(json["images"][0]["selected"][1], serde_json::json!([79, 33, 79, 98]));
        assert_eq!(json["images"][2]["status"], "insufficient_lines");
        assert!(json["images"][2].get("angleDeg").is_none());
        assert_eq!(json["images"][3]["status"], "load_failed");
    }
}

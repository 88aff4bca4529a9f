//! Batch processing of image files with annotated output.
//!
//! Every input yields exactly one [`BatchEntry`], in input order. Load and
//! save failures are recorded on the entry and logged; they never stop the
//! batch. Measured images are written to `output_dir` under their original
//! file name (with the extension swapped when `output_format` is set).
//! Inputs that would share an output file get `_2`, `_3`, ... appended to the
//! later names, so no two entries write the same path.

use crate::diagnostics::{elapsed_ms, TimingBreakdown};
use crate::error::InspectError;
use crate::image::io::{save_color_image, save_grayscale_u8};
use crate::inspect::{InspectionPipeline, InspectionStatus, Measurement, RejectReason};
use crate::segments::LineSegment;
use log::{info, warn};
use rayon::prelude::*;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Default directory for annotated images.
pub const DEFAULT_OUTPUT_DIR: &str = "Processed";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchOptions {
    pub output_dir: PathBuf,
    /// Inspect images on the rayon pool instead of one after another.
    pub parallel: bool,
    /// Extension (and thus encoder) for annotated images; `None` keeps the input's.
    pub output_format: Option<String>,
    /// When set, each image's Canny edge map is written here as `<stem>_edges.png`.
    pub debug_dir: Option<PathBuf>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            parallel: false,
            output_format: None,
            debug_dir: None,
        }
    }
}

/// What happened to one input file.
#[derive(Debug)]
pub enum BatchOutcome {
    /// Measured; `output` is where the annotated region was written.
    Measured {
        measurement: Measurement,
        output: PathBuf,
    },
    /// Measured, but writing the annotated region failed.
    SaveFailed { measurement: Measurement, error: InspectError },
    InsufficientLines { found: usize },
    Rejected { reason: RejectReason },
    /// The file was missing or could not be decoded.
    LoadFailed { error: InspectError },
}

#[derive(Debug)]
pub struct BatchEntry {
    pub path: PathBuf,
    pub outcome: BatchOutcome,
    /// Number of detected segments (0 when the image never loaded).
    pub segments: usize,
    /// Measured pair in source-image coordinates.
    pub selected: Option<[LineSegment; 2]>,
    pub timing: TimingBreakdown,
}

impl BatchEntry {
    pub fn measurement(&self) -> Option<&Measurement> {
        match &self.outcome {
            BatchOutcome::Measured { measurement, .. }
            | BatchOutcome::SaveFailed { measurement, .. } => Some(measurement),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub entries: Vec<BatchEntry>,
    pub total_ms: f64,
}

impl BatchSummary {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn measured(&self) -> usize {
        self.entries.iter().filter(|e| e.measurement().is_some()).count()
    }

    pub fn passed(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.measurement().is_some_and(|m| m.verdict.is_pass()))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.measured() - self.passed()
    }

    /// Images with too few lines or a rejected line pair.
    pub fn unmeasured(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e.outcome,
                    BatchOutcome::InsufficientLines { .. } | BatchOutcome::Rejected { .. }
                )
            })
            .count()
    }

    /// Load and save failures.
    pub fn errors(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e.outcome,
                    BatchOutcome::LoadFailed { .. } | BatchOutcome::SaveFailed { .. }
                )
            })
            .count()
    }
}

/// Runs one [`InspectionPipeline`] over a list of image files.
#[derive(Clone, Debug)]
pub struct BatchRunner {
    pipeline: InspectionPipeline,
    options: BatchOptions,
}

impl BatchRunner {
    pub fn new(pipeline: InspectionPipeline, options: BatchOptions) -> Self {
        Self { pipeline, options }
    }

    pub fn pipeline(&self) -> &InspectionPipeline {
        &self.pipeline
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Where the annotated version of `input` is written.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let name = input.file_name().unwrap_or(OsStr::new("image.png"));
        let path = self.options.output_dir.join(name);
        match &self.options.output_format {
            Some(ext) => path.with_extension(ext.trim_start_matches('.')),
            None => path,
        }
    }

    /// Output path for every input, in order, with clashing names made unique.
    pub fn planned_outputs(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        let mut taken = HashSet::with_capacity(paths.len());
        paths
            .iter()
            .map(|input| {
                let base = self.output_path(input);
                let mut output = base.clone();
                let mut n = 1;
                while !taken.insert(output.clone()) {
                    n += 1;
                    output = numbered(&base, n);
                }
                if n > 1 {
                    warn!(
                        "{}: {} is already an output of this batch, writing {} instead",
                        input.display(),
                        base.display(),
                        output.display()
                    );
                }
                output
            })
            .collect()
    }

    /// Where the edge map of `input` is written, if edge maps are enabled.
    pub fn edge_map_path(&self, input: &Path) -> Option<PathBuf> {
        let dir = self.options.debug_dir.as_ref()?;
        let stem = input.file_stem().unwrap_or(OsStr::new("image"));
        Some(dir.join(format!("{}_edges.png", stem.to_string_lossy())))
    }

    pub fn run(&self, paths: &[PathBuf]) -> BatchSummary {
        let start = Instant::now();
        let outputs = self.planned_outputs(paths);
        let entries: Vec<BatchEntry> = if self.options.parallel {
            paths
                .par_iter()
                .zip(outputs.par_iter())
                .map(|(p, out)| self.process_to(p, out))
                .collect()
        } else {
            paths
                .iter()
                .zip(&outputs)
                .map(|(p, out)| self.process_to(p, out))
                .collect()
        };
        let summary = BatchSummary {
            entries,
            total_ms: elapsed_ms(start),
        };
        info!(
            "BatchRunner: {} image(s), {} pass, {} fail, {} unmeasured, {} error(s) in {:.1} ms",
            summary.len(),
            summary.passed(),
            summary.failed(),
            summary.unmeasured(),
            summary.errors(),
            summary.total_ms
        );
        summary
    }

    /// Inspect one file and write its annotation to [`Self::output_path`].
    pub fn process(&self, path: &Path) -> BatchEntry {
        self.process_to(path, &self.output_path(path))
    }

    fn process_to(&self, path: &Path, output: &Path) -> BatchEntry {
        let result = match self.pipeline.inspect_file(path) {
            Ok(result) => result,
            Err(error) => {
                warn!("{}: {error}", path.display());
                return BatchEntry {
                    path: path.to_path_buf(),
                    outcome: BatchOutcome::LoadFailed { error },
                    segments: 0,
                    selected: None,
                    timing: TimingBreakdown::default(),
                };
            }
        };

        if let (Some(edges), Some(edge_path)) = (&result.edges, self.edge_map_path(output)) {
            if let Err(err) = save_grayscale_u8(edges, &edge_path) {
                warn!("{}: edge map not written: {err}", path.display());
            }
        }

        let outcome = match &result.status {
            InspectionStatus::Measured {
                measurement,
                annotated,
            } => {
                let measurement = *measurement;
                info!(
                    "{}: angle {:.2} deg -> {}",
                    path.display(),
                    measurement.angle_deg,
                    measurement.verdict
                );
                match save_color_image(annotated, output) {
                    Ok(()) => BatchOutcome::Measured {
                        measurement,
                        output: output.to_path_buf(),
                    },
                    Err(error) => {
                        warn!("{}: {error}", path.display());
                        BatchOutcome::SaveFailed { measurement, error }
                    }
                }
            }
            InspectionStatus::InsufficientLines { found } => {
                info!("{}: insufficient lines ({found} found)", path.display());
                BatchOutcome::InsufficientLines { found: *found }
            }
            InspectionStatus::Rejected { reason } => {
                warn!("{}: rejected: {reason}", path.display());
                BatchOutcome::Rejected {
                    reason: reason.clone(),
                }
            }
        };

        BatchEntry {
            path: path.to_path_buf(),
            outcome,
            segments: result.segments.len(),
            selected: result.selected_in_image(),
            timing: result.timing,
        }
    }
}

/// `dir/part.png` with `n = 2` becomes `dir/part_2.png`.
fn numbered(path: &Path, n: usize) -> PathBuf {
    let stem = path.file_stem().unwrap_or(OsStr::new("image")).to_string_lossy();
    let name = match path.extension() {
        Some(ext) => format!("{stem}_{n}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{n}"),
    };
    path.with_file_name(name)
}

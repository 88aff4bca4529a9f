//! Wall-clock timings of the stages an inspection went through.
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

/// Ordered stage timings plus the end-to-end total.
///
/// `total_ms` covers the whole inspection, so it is at least the sum of the
/// stages.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn with_total(total_ms: f64) -> Self {
        Self {
            total_ms,
            stages: Vec::new(),
        }
    }

    /// Run `f` and record how long it took under `label`.
    pub fn measure<T>(&mut self, label: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.push(label, elapsed_ms(start));
        out
    }

    pub fn push(&mut self, label: &str, elapsed_ms: f64) {
        self.stages.push(StageTiming {
            label: label.to_string(),
            elapsed_ms,
        });
    }

    /// Record a stage that ran before everything already recorded; it is
    /// added to the total as well.
    pub fn prepend(&mut self, label: &str, elapsed_ms: f64) {
        self.stages.insert(
            0,
            StageTiming {
                label: label.to_string(),
                elapsed_ms,
            },
        );
        self.total_ms += elapsed_ms;
    }

    /// Append another breakdown's stages; the total is left untouched.
    pub fn extend(&mut self, other: TimingBreakdown) {
        self.stages.extend(other.stages);
    }

    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

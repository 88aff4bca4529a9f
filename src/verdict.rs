//! Tolerance classification of measured angles.
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Annotation color for a passing measurement (R, G, B).
pub const PASS_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
/// Annotation color for a failing measurement (R, G, B).
pub const FAIL_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

// Absorbs representation error of decimal inputs at the inclusive boundary
// (|89.868 - 90| is not exactly 0.132 in binary).
const BOUNDARY_EPS: f64 = 1e-9;

/// Outcome of comparing an angle to the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn is_pass(self) -> bool {
        self == Verdict::Pass
    }

    /// Annotation color in the crate's R, G, B channel order.
    pub fn color(self) -> Rgb<u8> {
        match self {
            Verdict::Pass => PASS_COLOR,
            Verdict::Fail => FAIL_COLOR,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => f.write_str("PASS"),
            Verdict::Fail => f.write_str("FAIL"),
        }
    }
}

/// Pass iff `|angle - target_deg| <= tolerance_deg`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToleranceClassifier {
    pub target_deg: f64,
    pub tolerance_deg: f64,
}

impl Default for ToleranceClassifier {
    fn default() -> Self {
        Self {
            target_deg: 90.0,
            tolerance_deg: 0.132,
        }
    }
}

impl ToleranceClassifier {
    pub fn new(target_deg: f64, tolerance_deg: f64) -> Self {
        Self {
            target_deg,
            tolerance_deg,
        }
    }

    /// Signed deviation from the target.
    pub fn deviation(&self, angle_deg: f64) -> f64 {
        angle_deg - self.target_deg
    }

    pub fn classify(&self, angle_deg: f64) -> Verdict {
        if self.deviation(angle_deg).abs() <= self.tolerance_deg + BOUNDARY_EPS {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_right_angle_policy() {
        let c = ToleranceClassifier::default();
        assert_eq!(c.classify(90.0), Verdict::Pass);
        assert_eq!(c.classify(90.2), Verdict::Fail);
        assert_eq!(c.classify(89.87), Verdict::Pass);
        assert_eq!(c.classify(90.13), Verdict::Pass);
        assert_eq!(c.classify(89.86), Verdict::Fail);
        assert_eq!(c.classify(0.0), Verdict::Fail);
    }

    #[test]
    fn boundary_is_inclusive() {
        let c = ToleranceClassifier::new(90.0, 0.132);
        assert_eq!(c.classify(89.868), Verdict::Pass);
        assert_eq!(c.classify(90.132), Verdict::Pass);
        assert_eq!(c.classify(90.133), Verdict::Fail);
    }

    #[test]
    fn target_is_configurable() {
        let c = ToleranceClassifier::new(45.0, 0.5);
        assert_eq!(c.classify(45.4), Verdict::Pass);
        assert_eq!(c.classify(90.0), Verdict::Fail);
        assert!((c.deviation(44.0) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn colors_are_green_and_red_in_rgb_order() {
        assert_eq!(Verdict::Pass.color(), Rgb([0, 255, 0]));
        assert_eq!(Verdict::Fail.color(), Rgb([255, 0, 0]));
        assert_eq!(Verdict::Fail.to_string(), "FAIL");
        assert!(Verdict::Pass.is_pass());
    }
}

//! Region-of-interest cropping: the top or bottom band of an image.

use crate::error::{InspectError, Result};
use crate::image::ColorImage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which end of the object is inspected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Top,
    Bottom,
}

impl FromStr for Region {
    type Err = InspectError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Region::Top),
            "bottom" => Ok(Region::Bottom),
            _ => Err(InspectError::InvalidRegionSpec(s.to_string())),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Top => f.write_str("top"),
            Region::Bottom => f.write_str("bottom"),
        }
    }
}

/// Row span `[row_start, row_end)` of a crop within its source image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowSpan {
    pub row_start: u32,
    pub row_end: u32,
}

impl RowSpan {
    pub fn height(&self) -> u32 {
        self.row_end - self.row_start
    }

    pub fn is_empty(&self) -> bool {
        self.row_end <= self.row_start
    }
}

/// An owned copy of the cropped band plus where it came from.
#[derive(Clone, Debug)]
pub struct RegionCrop {
    pub region: Region,
    pub span: RowSpan,
    pub image: ColorImage,
}

/// Reject ratios outside (0, 1] (NaN included).
pub fn validate_ratio(ratio: f64) -> Result<f64> {
    if ratio > 0.0 && ratio <= 1.0 {
        Ok(ratio)
    } else {
        Err(InspectError::InvalidConfig(format!(
            "crop ratio must be in (0, 1], got {ratio}"
        )))
    }
}

/// Rows covered by `region` at `ratio` for an image `height` rows tall.
///
/// Top: `[0, floor(H·r))`. Bottom: `[ceil(H·(1−r)), H)`, evaluated as
/// `H − floor(H·r)` so both bands have the same height.
pub fn row_span(height: u32, region: Region, ratio: f64) -> Result<RowSpan> {
    let ratio = validate_ratio(ratio)?;
    let band = ((height as f64) * ratio).floor().clamp(0.0, height as f64) as u32;
    Ok(match region {
        Region::Top => RowSpan {
            row_start: 0,
            row_end: band,
        },
        Region::Bottom => RowSpan {
            row_start: height - band,
            row_end: height,
        },
    })
}

/// Copy the `region` band covering `ratio` of the image height.
pub fn crop(image: &ColorImage, region: Region, ratio: f64) -> Result<RegionCrop> {
    let span = row_span(image.height(), region, ratio)?;
    let cropped =
        image::imageops::crop_imm(image, 0, span.row_start, image.width(), span.height())
            .to_image();
    Ok(RegionCrop {
        region,
        span,
        image: cropped,
    })
}

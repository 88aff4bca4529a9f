//! I/O helpers for color images and JSON.
//!
//! - `load_color_image`: read a PNG/JPEG/etc. into an RGB [`ColorImage`].
//! - `save_color_image`: encode a [`ColorImage`]; format follows the extension.
//! - `save_grayscale_u8`: write an owned 8-bit gray buffer (edge maps) to disk.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ColorImage, GrayImageU8};
use crate::error::{InspectError, Result};
use image::DynamicImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert it to 8-bit RGB.
pub fn load_color_image(path: &Path) -> Result<ColorImage> {
    let img = image::open(path).map_err(|source| InspectError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.into_rgb8())
}

/// Save a color image, creating parent directories as needed.
pub fn save_color_image(image: &ColorImage, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    image.save(path).map_err(|source| InspectError::ImageSave {
        path: path.to_path_buf(),
        source,
    })
}

/// Save an 8-bit grayscale buffer (e.g. a binary edge map).
pub fn save_grayscale_u8(buffer: &GrayImageU8, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let image = buffer.to_luma_image();
    DynamicImage::ImageLuma8(image)
        .save(path)
        .map_err(|source| InspectError::ImageSave {
            path: path.to_path_buf(),
            source,
        })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|source| InspectError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| InspectError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| InspectError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}

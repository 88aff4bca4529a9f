//! Image containers and conversions.
//!
//! Color images use [`ColorImage`], an alias of `image::RgbImage`. Channel
//! order is **R, G, B**; every color constant in this crate (annotation
//! colors included) is written in that order. Single-channel processing uses
//! the row-major buffers [`GrayImageU8`] and [`ImageF32`].
pub mod f32;
pub mod io;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::traits::{ImageView, ImageViewMut};
pub use self::u8::GrayImageU8;

/// Three-channel 8-bit image in R, G, B channel order.
pub type ColorImage = ::image::RgbImage;

/// Convert a color image to 8-bit luminance.
///
/// Uses `Y = 0.299 R + 0.587 G + 0.114 B`, rounded to the nearest integer.
pub fn to_grayscale(image: &ColorImage) -> GrayImageU8 {
    let (w, h) = (image.width() as usize, image.height() as usize);
    let data = image
        .pixels()
        .map(|px| {
            let [r, g, b] = px.0;
            let y = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
            y.round().clamp(0.0, 255.0) as u8
        })
        .collect();
    GrayImageU8::new(w, h, data)
}

use image::{Rgb, RgbImage};

pub const DARK: Rgb<u8> = Rgb([30, 30, 30]);
pub const BRIGHT: Rgb<u8> = Rgb([220, 220, 220]);

/// Dark background with a bright quadrant starting at `(corner_x, corner_y)`
/// and extending to the right and down.
pub fn corner_rgb(width: u32, height: u32, corner_x: u32, corner_y: u32) -> RgbImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    RgbImage::from_fn(width, height, |x, y| {
        if x >= corner_x && y >= corner_y {
            BRIGHT
        } else {
            DARK
        }
    })
}

/// Bright half-plane right of `split_x`: a single vertical edge.
pub fn vertical_edge_rgb(width: u32, height: u32, split_x: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, _| if x >= split_x { BRIGHT } else { DARK })
}

pub fn blank_rgb(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, DARK)
}

/// Bright angular sector with its apex at `apex`, covering directions from
/// `from_deg` to `to_deg` measured from the +x axis towards +y (image rows
/// grow downward). `0..=90` reproduces [`corner_rgb`].
pub fn wedge_rgb(
    width: u32,
    height: u32,
    apex: (u32, u32),
    from_deg: f64,
    to_deg: f64,
) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let dx = x as f64 - apex.0 as f64;
        let dy = y as f64 - apex.1 as f64;
        let dir = dy.atan2(dx).to_degrees();
        if dir >= from_deg && dir <= to_deg {
            BRIGHT
        } else {
            DARK
        }
    })
}

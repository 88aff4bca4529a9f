use crate::image::ColorImage;
use crate::segments::LineSegment;
use image::Rgb;
use imageproc::drawing::draw_line_segment_mut;

/// Draw `segments` onto `canvas` with a stroke `width` pixels wide.
///
/// Thickness is built from copies of the 1-px line offset along +x and +y.
pub fn draw_segments(canvas: &mut ColorImage, segments: &[LineSegment], color: Rgb<u8>, width: u32) {
    for seg in segments {
        let (x1, y1) = (seg.p0[0] as f32, seg.p0[1] as f32);
        let (x2, y2) = (seg.p1[0] as f32, seg.p1[1] as f32);
        for t in 0..width.max(1) {
            let offset = t as f32;
            draw_line_segment_mut(canvas, (x1 + offset, y1), (x2 + offset, y2), color);
            draw_line_segment_mut(canvas, (x1, y1 + offset), (x2, y2 + offset), color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_segment_is_two_pixels_thick() {
        let mut img = ColorImage::new(20, 10);
        let red = Rgb([255, 0, 0]);
        draw_segments(&mut img, &[LineSegment::new(2, 4, 15, 4)], red, 2);
        for x in 3..=14 {
            assert_eq!(img.get_pixel(x, 4), &red);
            assert_eq!(img.get_pixel(x, 5), &red);
        }
        assert_eq!(img.get_pixel(8, 3), &Rgb([0, 0, 0]));
        assert_eq!(img.get_pixel(8, 6), &Rgb([0, 0, 0]));
    }

    #[test]
    fn out_of_bounds_parts_are_clipped() {
        let mut img = ColorImage::new(5, 5);
        let green = Rgb([0, 255, 0]);
        draw_segments(&mut img, &[LineSegment::new(-10, 2, 40, 2)], green, 2);
        assert_eq!(img.get_pixel(0, 2), &green);
        assert_eq!(img.get_pixel(4, 3), &green);
    }
}

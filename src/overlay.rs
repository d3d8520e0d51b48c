//! Window outline drawing for annotated frame output

use formscan_core::WindowGeometry;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

pub const OUTLINE_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
const THICKNESS: i32 = 2;

/// Copy of `frame` with a 2 px outline around the window. Parts of the
/// outline that fall outside the frame are clipped.
pub fn draw_window(frame: &RgbImage, geometry: &WindowGeometry) -> RgbImage {
    let mut output = frame.clone();
    for inset in 0..THICKNESS {
        let x = geometry.x0 as i32 - inset;
        let y = geometry.y0 as i32 - inset;
        let width = geometry.width() + 2 * inset as u32;
        let height = geometry.height() + 2 * inset as u32;
        if width == 0 || height == 0 {
            continue;
        }
        draw_hollow_rect_mut(&mut output, Rect::at(x, y).of_size(width, height), OUTLINE_COLOR);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use formscan_core::WindowState;

    #[test]
    fn test_outline_surrounds_window() {
        let frame = RgbImage::from_pixel(40, 40, Rgb([255, 255, 255]));
        let geometry = WindowGeometry::compute(40, 40, &WindowState::new(10));
        let output = draw_window(&frame, &geometry);

        assert_eq!(*output.get_pixel(15, 15), OUTLINE_COLOR);
        assert_eq!(*output.get_pixel(14, 14), OUTLINE_COLOR);
        assert_eq!(*output.get_pixel(25, 20), OUTLINE_COLOR);
        assert_eq!(output.get_pixel(20, 20).0, [255, 255, 255]);
        assert_eq!(output.get_pixel(13, 13).0, [255, 255, 255]);
    }

    #[test]
    fn test_outline_clipped_outside_frame() {
        let frame = RgbImage::new(20, 20);
        let mut state = WindowState::new(10);
        state.pos_x = -2;
        let geometry = WindowGeometry::compute(20, 20, &state);
        assert!(geometry.x0 < 0);
        let output = draw_window(&frame, &geometry);
        assert_eq!(output.dimensions(), (20, 20));
    }
}

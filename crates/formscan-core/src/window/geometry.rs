use super::WindowState;
use serde::{Deserialize, Serialize};

/// Inclusive pixel corners of the sampling window.
///
/// Corners are placed around the frame center shifted by `step * pos`, then
/// floored. Because `x1 - x0` always equals `rect_size`, the window covers
/// exactly `rect_size + 1` pixels per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl WindowGeometry {
    pub fn compute(frame_width: u32, frame_height: u32, state: &WindowState) -> Self {
        let size = state.rect_size as i64;
        let step = state.step as i64;
        // Work in doubled units so the half sizes stay integral.
        let cx2 = frame_width as i64 + 2 * step * state.pos_x as i64;
        let cy2 = frame_height as i64 + 2 * step * state.pos_y as i64;

        Self {
            x0: (cx2 - size).div_euclid(2),
            y0: (cy2 - size).div_euclid(2),
            x1: (cx2 + size).div_euclid(2),
            y1: (cy2 + size).div_euclid(2),
        }
    }

    /// Whether every pixel of the window lies inside a `width x height` frame.
    pub fn fits(&self, frame_width: u32, frame_height: u32) -> bool {
        self.x0 >= 0
            && self.y0 >= 0
            && self.x1 < frame_width as i64
            && self.y1 < frame_height as i64
    }

    pub fn width(&self) -> u32 {
        (self.x1 - self.x0 + 1).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.y1 - self.y0 + 1).max(0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_window() {
        let state = WindowState::default();
        let geometry = WindowGeometry::compute(640, 480, &state);
        assert_eq!(geometry, WindowGeometry { x0: 270, y0: 190, x1: 370, y1: 290 });
        assert!(geometry.fits(640, 480));
        assert_eq!(geometry.width(), 101);
        assert_eq!(geometry.height(), 101);
    }

    #[test]
    fn test_odd_sizes_keep_side() {
        for (w, h, size) in [(641, 481, 101), (640, 481, 33), (639, 480, 20)] {
            let state = WindowState::new(size);
            let geometry = WindowGeometry::compute(w, h, &state);
            assert_eq!(geometry.width(), size + 1);
            assert_eq!(geometry.height(), size + 1);
        }
    }

    #[test]
    fn test_offsets_move_by_step() {
        let mut state = WindowState::default();
        state.pos_x = -3;
        state.pos_y = 2;
        let geometry = WindowGeometry::compute(640, 480, &state);
        assert_eq!(geometry.x0, 240);
        assert_eq!(geometry.y0, 210);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut state = WindowState::default();
        state.pos_x = -28;
        let geometry = WindowGeometry::compute(640, 480, &state);
        assert_eq!(geometry.x0, -10);
        assert!(!geometry.fits(640, 480));

        // Right edge is exclusive: x1 == width is already outside.
        let state = WindowState::new(100);
        let geometry = WindowGeometry::compute(100, 200, &state);
        assert_eq!(geometry.x1, 100);
        assert!(!geometry.fits(100, 200));
    }
}

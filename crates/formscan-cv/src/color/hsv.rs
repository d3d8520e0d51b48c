//! 8-bit RGB to HSV conversion
//!
//! Hue is halved to fit a byte (0..180), saturation and value span 0..=255.
//! Divisions go through 12-bit fixed-point reciprocal tables, built once.

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Image whose three channels hold H, S and V instead of R, G and B
pub type HsvImage = RgbImage;

const HSV_SHIFT: u32 = 12;
const HALF: i32 = 1 << (HSV_SHIFT - 1);

struct DivTables {
    saturation: [i32; 256],
    hue: [i32; 256],
}

static DIV_TABLES: OnceLock<DivTables> = OnceLock::new();

fn div_tables() -> &'static DivTables {
    DIV_TABLES.get_or_init(|| {
        let mut saturation = [0; 256];
        let mut hue = [0; 256];
        for i in 1..256 {
            saturation[i] = ((255 << HSV_SHIFT) as f64 / i as f64).round() as i32;
            hue[i] = ((180 << HSV_SHIFT) as f64 / (6.0 * i as f64)).round() as i32;
        }
        DivTables { saturation, hue }
    })
}

/// Convert one RGB pixel to `[h, s, v]`
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let tables = div_tables();
    let (r, g, b) = (r as i32, g as i32, b as i32);
    let v = r.max(g).max(b);
    let vmin = r.min(g).min(b);
    let diff = v - vmin;

    let s = (diff * tables.saturation[v as usize] + HALF) >> HSV_SHIFT;

    let sector = if v == r {
        g - b
    } else if v == g {
        b - r + 2 * diff
    } else {
        r - g + 4 * diff
    };
    let mut h = (sector * tables.hue[diff as usize] + HALF) >> HSV_SHIFT;
    if h < 0 {
        h += 180;
    }

    [h as u8, s as u8, v as u8]
}

/// Convert a whole RGB image
pub fn to_hsv(image: &RgbImage) -> HsvImage {
    let mut hsv = HsvImage::new(image.width(), image.height());
    for (src, dst) in image.pixels().zip(hsv.pixels_mut()) {
        let Rgb([r, g, b]) = *src;
        *dst = Rgb(rgb_to_hsv(r, g, b));
    }
    hsv
}

/// Inclusive per-channel HSV bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|c| self.lower[c] <= hsv[c] && hsv[c] <= self.upper[c])
    }
}

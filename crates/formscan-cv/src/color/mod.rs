//! Dominant color detection over a shape footprint

pub mod classifier;
pub mod hsv;

pub use classifier::{ColorClassifier, ColorCoverage, ColorDecision};
pub use hsv::{to_hsv, HsvImage, HsvRange};

use formscan_core::Color;
use serde::{Deserialize, Serialize};

/// Hue range endpoint for 8-bit HSV (hue spans 0..=180)
pub const HUE_MAX: u8 = 180;

/// Color range configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Half-width of every hue window
    pub hue_sensitivity: u8,
    /// Inclusive (low, high) saturation bounds
    pub saturation: (u8, u8),
    /// Inclusive (low, high) value bounds
    pub value: (u8, u8),
    pub green_hue: u8,
    pub blue_hue: u8,
    /// Scales the accepted shape score into the coverage threshold
    pub decision_multiplier: f64,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            hue_sensitivity: 10,
            saturation: (50, 255),
            value: (50, 255),
            green_hue: 60,
            blue_hue: 120,
            decision_multiplier: 0.9,
        }
    }
}

impl ColorConfig {
    /// HSV ranges whose union selects `color`. Red wraps around hue 0, so
    /// it is covered by two ranges.
    pub fn ranges(&self, color: Color) -> Vec<HsvRange> {
        let window = |low: u8, high: u8| HsvRange {
            lower: [low, self.saturation.0, self.value.0],
            upper: [high, self.saturation.1, self.value.1],
        };
        let around = |hue: u8| {
            window(
                hue.saturating_sub(self.hue_sensitivity),
                hue.saturating_add(self.hue_sensitivity),
            )
        };

        match color {
            Color::Green => vec![around(self.green_hue)],
            Color::Blue => vec![around(self.blue_hue)],
            Color::Red => vec![
                window(0, self.hue_sensitivity),
                window(HUE_MAX.saturating_sub(self.hue_sensitivity), HUE_MAX),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ranges() {
        let config = ColorConfig::default();
        assert_eq!(
            config.ranges(Color::Green),
            vec![HsvRange { lower: [50, 50, 50], upper: [70, 255, 255] }]
        );
        assert_eq!(
            config.ranges(Color::Blue),
            vec![HsvRange { lower: [110, 50, 50], upper: [130, 255, 255] }]
        );
        assert_eq!(
            config.ranges(Color::Red),
            vec![
                HsvRange { lower: [0, 50, 50], upper: [10, 255, 255] },
                HsvRange { lower: [170, 50, 50], upper: [180, 255, 255] },
            ]
        );
    }
}

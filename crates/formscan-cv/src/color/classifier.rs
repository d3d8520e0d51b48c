//! Color voting over the accepted template's footprint

use super::{ColorConfig, HsvImage};
use crate::error::CvError;
use crate::mask::BinaryMatrix;
use crate::Result;
use formscan_core::Color;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Share of the footprint covered by one color mask
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorCoverage {
    pub color: Color,
    pub coverage: f64,
}

/// Winning color (if any) along with every measured coverage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorDecision {
    pub color: Option<Color>,
    pub threshold: f64,
    pub coverages: Vec<ColorCoverage>,
}

pub struct ColorClassifier {
    config: ColorConfig,
}

impl ColorClassifier {
    pub fn new(config: ColorConfig) -> Self {
        Self { config }
    }

    /// Cells of a square HSV window that fall inside any range of `color`
    pub fn mask(&self, hsv: &HsvImage, color: Color) -> Result<BinaryMatrix> {
        let (width, height) = hsv.dimensions();
        if width != height {
            return Err(CvError::NotSquare { width, height }.into());
        }
        let ranges = self.config.ranges(color);
        Ok(BinaryMatrix::from_fn(width as usize, |row, col| {
            let pixel = hsv.get_pixel(col as u32, row as u32).0;
            ranges.iter().any(|range| range.contains(pixel))
        }))
    }

    /// Fraction of the footprint's 1-cells that are also set in `mask`
    pub fn coverage(mask: &BinaryMatrix, footprint: &BinaryMatrix) -> Result<f64> {
        let area = footprint.count_ones();
        if area == 0 {
            return Err(CvError::EmptyFootprint.into());
        }
        Ok(mask.and(footprint)?.count_ones() as f64 / area as f64)
    }

    /// Measure all colors, then pick the first (green, blue, red) whose
    /// coverage is strictly above `shape_confidence * decision_multiplier`.
    ///
    /// The footprint is the accepted template, not the measured silhouette.
    pub fn classify(
        &self,
        hsv: &HsvImage,
        footprint: &BinaryMatrix,
        shape_confidence: f64,
    ) -> Result<ColorDecision> {
        let threshold = shape_confidence * self.config.decision_multiplier;

        let mut coverages = Vec::with_capacity(Color::PRIORITY.len());
        for color in Color::PRIORITY {
            let mask = self.mask(hsv, color)?;
            let coverage = Self::coverage(&mask, footprint)?;
            debug!(%color, coverage, threshold, "color coverage");
            coverages.push(ColorCoverage { color, coverage });
        }

        let color = coverages
            .iter()
            .find(|c| c.coverage > threshold)
            .map(|c| c.color);

        Ok(ColorDecision {
            color,
            threshold,
            coverages,
        })
    }
}

impl Default for ColorClassifier {
    fn default() -> Self {
        Self::new(ColorConfig::default())
    }
}

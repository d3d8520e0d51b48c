//! Silhouette extraction and ordered template matching

use super::{ShapeConfig, TemplateSet};
use crate::mask::BinaryMatrix;
use crate::Result;
use formscan_core::Shape;
use image::GrayImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Accepted shape and the score that cleared the floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeMatch {
    pub shape: Shape,
    pub score: f64,
}

/// Matches grayscale windows against a template set
pub struct ShapeMatcher {
    config: ShapeConfig,
}

impl ShapeMatcher {
    /// Create new shape matcher
    pub fn new(config: ShapeConfig) -> Self {
        Self { config }
    }

    /// Binarize a grayscale window and invert it so that dark (object)
    /// pixels become 1-cells.
    pub fn silhouette(&self, gray: &GrayImage) -> Result<BinaryMatrix> {
        let threshold = self.config.gray_threshold;
        let background = BinaryMatrix::from_gray(gray, |p| p > threshold)?;
        Ok(background.invert())
    }

    /// Score the silhouette against each template in priority order and
    /// accept the first one strictly above the confidence floor.
    pub fn classify(
        &self,
        silhouette: &BinaryMatrix,
        templates: &TemplateSet,
    ) -> Result<Option<ShapeMatch>> {
        for (shape, template) in templates.iter() {
            let score = silhouette.match_score(template)?;
            debug!(%shape, score, "template score");
            if score > self.config.confidence_floor {
                return Ok(Some(ShapeMatch { shape, score }));
            }
        }
        Ok(None)
    }

    /// Scores against every template, in priority order, without deciding
    pub fn scores(
        &self,
        silhouette: &BinaryMatrix,
        templates: &TemplateSet,
    ) -> Result<Vec<ShapeMatch>> {
        templates
            .iter()
            .map(|(shape, template)| {
                Ok(ShapeMatch {
                    shape,
                    score: silhouette.match_score(template)?,
                })
            })
            .collect()
    }
}

impl Default for ShapeMatcher {
    fn default() -> Self {
        Self::new(ShapeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::generator;

    #[test]
    fn test_silhouette_inverts_threshold() -> Result<()> {
        let gray = GrayImage::from_raw(2, 2, vec![0, 127, 128, 255]).unwrap();
        let silhouette = ShapeMatcher::default().silhouette(&gray)?;
        // 127 is not above the threshold, so it still counts as object.
        assert_eq!(silhouette.to_string(), "11\n00\n");
        Ok(())
    }

    #[test]
    fn test_full_silhouette_is_square() -> Result<()> {
        let templates = TemplateSet::generate(20)?;
        let silhouette = BinaryMatrix::filled(21, true);
        let matched = ShapeMatcher::default().classify(&silhouette, &templates)?;
        assert_eq!(matched, Some(ShapeMatch { shape: Shape::Square, score: 1.0 }));
        Ok(())
    }

    #[test]
    fn test_band_silhouette_is_rectangle() -> Result<()> {
        let templates = TemplateSet::generate(100)?;
        let band = generator::rectangle(100);
        let matched = ShapeMatcher::default().classify(&band, &templates)?;
        assert_eq!(matched, Some(ShapeMatch { shape: Shape::Rectangle, score: 1.0 }));

        // Only the top half of the band: 25 of the 51 rows.
        let half_band = BinaryMatrix::from_fn(101, |row, _| (25..50).contains(&row));
        let score = half_band.match_score(templates.get(Shape::Rectangle))?;
        assert!(score < 0.85, "score {score}");
        Ok(())
    }

    #[test]
    fn test_triangle_silhouette() -> Result<()> {
        let templates = TemplateSet::generate(40)?;
        let wedge = generator::triangle(40);
        let matched = ShapeMatcher::default().classify(&wedge, &templates)?;
        assert_eq!(matched.map(|m| m.shape), Some(Shape::Triangle));
        Ok(())
    }

    #[test]
    fn test_floor_is_strict() -> Result<()> {
        // 20x20 cells; 60 background cells leave exactly 0.85 agreement with
        // the square and far less with the other templates.
        let templates = TemplateSet::generate(19)?;
        let silhouette = BinaryMatrix::from_fn(20, |row, _| row >= 3);
        assert_eq!(silhouette.match_score(templates.get(Shape::Square))?, 0.85);
        let matched = ShapeMatcher::default().classify(&silhouette, &templates)?;
        assert_eq!(matched, None);
        Ok(())
    }

    #[test]
    fn test_priority_beats_higher_score() -> Result<()> {
        // Lower the floor so both square and rectangle qualify; square must
        // win even though the rectangle scores higher.
        let templates = TemplateSet::generate(7)?;
        let silhouette = generator::rectangle(7);
        let matcher = ShapeMatcher::new(ShapeConfig {
            confidence_floor: 0.5,
            ..Default::default()
        });
        let scores = matcher.scores(&silhouette, &templates)?;
        assert!(scores[1].score > scores[0].score);
        let matched = matcher.classify(&silhouette, &templates)?;
        assert_eq!(matched.map(|m| m.shape), Some(Shape::Square));
        Ok(())
    }

    #[test]
    fn test_blank_window_not_recognized() -> Result<()> {
        let templates = TemplateSet::generate(30)?;
        let silhouette = BinaryMatrix::filled(31, false);
        assert_eq!(ShapeMatcher::default().classify(&silhouette, &templates)?, None);
        Ok(())
    }
}

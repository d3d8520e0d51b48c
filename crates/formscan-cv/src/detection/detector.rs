//! Frame classifier: bounds check, shape match, color match, label

use crate::color::{to_hsv, ColorClassifier, ColorDecision};
use crate::error::CvError;
use crate::template::{ShapeMatch, ShapeMatcher, TemplateSet};
use crate::utils::ImageUtils;
use crate::Result;
use super::config::ClassifierConfig;
use anyhow::Context;
use formscan_core::{ClassificationResult, WindowGeometry, WindowState};
use image::RgbImage;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, trace};

/// Last stage a frame went through before it was labeled. Frames that fail
/// the bounds check or the shape match skip the stages after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    BoundsCheck,
    ShapeMatch,
    ColorMatch,
}

/// Everything measured while classifying one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub label: String,
    pub result: ClassificationResult,
    pub geometry: WindowGeometry,
    pub decided_at: Stage,
    pub shape: Option<ShapeMatch>,
    pub color: Option<ColorDecision>,
    pub processing_time_us: u64,
}

/// Stateless per-frame classifier. Templates and window state are owned by
/// the caller and passed in on every call.
pub struct FrameClassifier {
    shape_matcher: ShapeMatcher,
    color_classifier: ColorClassifier,
}

impl FrameClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            shape_matcher: ShapeMatcher::new(config.shape),
            color_classifier: ColorClassifier::new(config.color),
        }
    }

    /// Classify the window of one frame. The frame is only borrowed for the
    /// duration of the call.
    pub fn classify(
        &self,
        frame: &RgbImage,
        templates: &TemplateSet,
        window: &WindowState,
    ) -> Result<FrameReport> {
        let start_time = Instant::now();

        if templates.rect_size() != window.rect_size {
            return Err(CvError::SideMismatch {
                left: templates.side(),
                right: window.side(),
            })
            .context("Templates were not regenerated after a size change");
        }

        let (width, height) = frame.dimensions();
        let geometry = WindowGeometry::compute(width, height, window);

        trace!(stage = ?Stage::BoundsCheck, ?geometry);
        if !geometry.fits(width, height) {
            return Ok(Self::report(
                start_time,
                geometry,
                Stage::BoundsCheck,
                ClassificationResult::OutOfBounds,
                None,
                None,
            ));
        }
        let pixels = ImageUtils::crop_window(frame, &geometry)?;

        trace!(stage = ?Stage::ShapeMatch);
        let gray = ImageUtils::to_grayscale(&pixels);
        let silhouette = self.shape_matcher.silhouette(&gray)?;
        let Some(matched) = self.shape_matcher.classify(&silhouette, templates)? else {
            return Ok(Self::report(
                start_time,
                geometry,
                Stage::ShapeMatch,
                ClassificationResult::NotRecognized,
                None,
                None,
            ));
        };

        trace!(stage = ?Stage::ColorMatch, shape = %matched.shape);
        let hsv = to_hsv(&pixels);
        let decision =
            self.color_classifier
                .classify(&hsv, templates.get(matched.shape), matched.score)?;

        let result = ClassificationResult::Recognized {
            shape: matched.shape,
            color: decision.color,
            confidence: matched.score,
        };
        Ok(Self::report(
            start_time,
            geometry,
            Stage::ColorMatch,
            result,
            Some(matched),
            Some(decision),
        ))
    }

    /// Classify several frames with the same templates and window
    pub fn classify_batch(
        &self,
        frames: &[RgbImage],
        templates: &TemplateSet,
        window: &WindowState,
    ) -> Result<Vec<FrameReport>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            frames
                .par_iter()
                .map(|frame| self.classify(frame, templates, window))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            frames
                .iter()
                .map(|frame| self.classify(frame, templates, window))
                .collect()
        }
    }

    /// Export reports in JSON format
    pub fn export_json<T: Serialize>(reports: &[T], output_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(reports)
            .context("Failed to serialize frame reports")?;

        std::fs::write(output_path, json)
            .with_context(|| format!("Failed to write JSON to: {:?}", output_path))?;

        Ok(())
    }

    fn report(
        start_time: Instant,
        geometry: WindowGeometry,
        decided_at: Stage,
        result: ClassificationResult,
        shape: Option<ShapeMatch>,
        color: Option<ColorDecision>,
    ) -> FrameReport {
        let label = result.label();
        debug!(%label, ?decided_at, "frame labeled");
        FrameReport {
            label,
            result,
            geometry,
            decided_at,
            shape,
            color,
            processing_time_us: start_time.elapsed().as_micros() as u64,
        }
    }
}

impl Default for FrameClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

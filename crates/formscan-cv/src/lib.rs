//! Formscan Computer Vision Library
//!
//! Classifies the shape and dominant color of whatever sits inside a square
//! sampling window of a color frame, using binary templates and HSV ranges.

pub mod color;
pub mod detection;
pub mod error;
pub mod mask;
pub mod template;
pub mod utils;

// Re-export commonly used types
pub use color::{ColorClassifier, ColorConfig};
pub use detection::{ClassifierConfig, FrameClassifier, FrameReport, Stage};
pub use error::CvError;
pub use mask::BinaryMatrix;
pub use template::{ShapeConfig, ShapeMatcher, TemplateSet};

pub use formscan_core::{ClassificationResult, Color, Shape, WindowGeometry, WindowState};

// Error handling
pub type Result<T> = anyhow::Result<T>;

/// Core traits for the CV system
pub mod traits {
    use super::*;
    use image::RgbImage;

    /// Anything that delivers color frames one at a time.
    pub trait FrameSource {
        /// Next frame, or `None` once the source is exhausted.
        fn next_frame(&mut self, window: &WindowState) -> Result<Option<RgbImage>>;

        fn name(&self) -> &str;
    }
}

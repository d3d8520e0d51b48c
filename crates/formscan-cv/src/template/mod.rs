//! Shape templates and template matching

pub mod generator;
pub mod matcher;

pub use generator::TemplateSet;
pub use matcher::{ShapeMatch, ShapeMatcher};

use serde::{Deserialize, Serialize};

/// Shape matching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    /// Gray levels strictly above this count as background
    pub gray_threshold: u8,
    /// A template is accepted only when its score is strictly above this
    pub confidence_floor: f64,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            gray_threshold: 127,
            confidence_floor: 0.85,
        }
    }
}

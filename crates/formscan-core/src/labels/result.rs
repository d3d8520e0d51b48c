use super::{Color, Shape};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of classifying one frame. Every failure mode of the engine ends
/// up here as a label rather than as an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClassificationResult {
    OutOfBounds,
    NotRecognized,
    Recognized {
        shape: Shape,
        /// `None` when no color clears the decision threshold.
        color: Option<Color>,
        confidence: f64,
    },
}

impl ClassificationResult {
    pub fn shape(&self) -> Option<Shape> {
        match self {
            ClassificationResult::Recognized { shape, .. } => Some(*shape),
            _ => None,
        }
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            ClassificationResult::Recognized { color, .. } => *color,
            _ => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, ClassificationResult::Recognized { .. })
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationResult::OutOfBounds => f.write_str("frame out of bounds"),
            ClassificationResult::NotRecognized => f.write_str("shape not recognized"),
            ClassificationResult::Recognized {
                shape,
                color: Some(color),
                ..
            } => write!(f, "{} {}", color, shape),
            ClassificationResult::Recognized {
                shape, color: None, ..
            } => write!(f, "{}, color not supported", shape),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(ClassificationResult::OutOfBounds.label(), "frame out of bounds");
        assert_eq!(ClassificationResult::NotRecognized.label(), "shape not recognized");

        let green_square = ClassificationResult::Recognized {
            shape: Shape::Square,
            color: Some(Color::Green),
            confidence: 1.0,
        };
        assert_eq!(green_square.label(), "green square");
        assert_eq!(green_square.color(), Some(Color::Green));

        let plain_triangle = ClassificationResult::Recognized {
            shape: Shape::Triangle,
            color: None,
            confidence: 0.9,
        };
        assert_eq!(plain_triangle.label(), "triangle, color not supported");
        assert_eq!(plain_triangle.shape(), Some(Shape::Triangle));
    }

    #[test]
    fn test_unrecognized_has_no_shape() {
        assert!(ClassificationResult::NotRecognized.shape().is_none());
        assert!(!ClassificationResult::OutOfBounds.is_recognized());
    }
}

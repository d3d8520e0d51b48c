//! Classification configuration

use crate::color::ColorConfig;
use crate::template::ShapeConfig;
use serde::{Deserialize, Serialize};

/// Main classification configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub shape: ShapeConfig,
    pub color: ColorConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_constants() {
        let config = ClassifierConfig::default();
        assert_eq!(config.shape.gray_threshold, 127);
        assert_eq!(config.shape.confidence_floor, 0.85);
        assert_eq!(config.color.decision_multiplier, 0.9);
        assert_eq!(config.color.hue_sensitivity, 10);
        assert_eq!(config.color.saturation, (50, 255));
        assert_eq!(config.color.value, (50, 255));
        assert_eq!((config.color.green_hue, config.color.blue_hue), (60, 120));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ClassifierConfig =
            serde_json::from_str(r#"{ "shape": { "confidence_floor": 0.8 } }"#).unwrap();
        assert_eq!(config.shape.confidence_floor, 0.8);
        assert_eq!(config.shape.gray_threshold, 127);
        assert_eq!(config.color.blue_hue, 120);
    }
}

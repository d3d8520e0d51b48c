use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Square,
    Rectangle,
    Triangle,
}

impl Shape {
    /// Check order used when several templates clear the confidence floor.
    pub const PRIORITY: [Shape; 3] = [Shape::Square, Shape::Rectangle, Shape::Triangle];

    pub fn name(&self) -> &'static str {
        match self {
            Shape::Square => "square",
            Shape::Rectangle => "rectangle",
            Shape::Triangle => "triangle",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

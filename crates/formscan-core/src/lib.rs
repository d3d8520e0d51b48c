//! Domain vocabulary shared by the formscan engine and its control loop.

pub mod labels;
pub mod window;

pub use labels::{ClassificationResult, Color, Shape};
pub use window::{Command, WindowGeometry, WindowState};

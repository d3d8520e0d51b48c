pub mod color;
pub mod result;
pub mod shape;

pub use color::Color;
pub use result::ClassificationResult;
pub use shape::Shape;

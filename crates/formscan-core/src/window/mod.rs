pub mod geometry;
pub mod state;

pub use geometry::WindowGeometry;
pub use state::{Command, WindowState};

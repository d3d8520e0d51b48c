use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CvError {
    #[error("template size must be at least 1")]
    ZeroSize,
    #[error("matrix side mismatch: {left} vs {right}")]
    SideMismatch { left: usize, right: usize },
    #[error("region {width}x{height} is not square")]
    NotSquare { width: u32, height: u32 },
    #[error("cannot score an empty matrix")]
    EmptyMatrix,
    #[error("template footprint has no cells set")]
    EmptyFootprint,
    #[error("window ({x0}, {y0})..=({x1}, {y1}) lies outside a {width}x{height} frame")]
    OutOfFrame {
        x0: i64,
        y0: i64,
        x1: i64,
        y1: i64,
        width: u32,
        height: u32,
    },
}

//! Per-frame classification pipeline

pub mod config;
pub mod detector;

pub use config::ClassifierConfig;
pub use detector::{FrameClassifier, FrameReport, Stage};

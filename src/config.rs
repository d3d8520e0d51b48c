use anyhow::{Context, Result};
use formscan_core::WindowState;
use formscan_cv::ClassifierConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Initial window placement and control step sizes
    pub window: WindowState,
    pub classifier: ClassifierConfig,
    pub source: SourceConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory of still frames, read in file name order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frames_dir: Option<PathBuf>,
    /// Mirror directory frames before classification, like a selfie camera
    pub flip_horizontal: bool,
    /// Number of generated frames when no directory is given
    pub synthetic_frames: usize,
    /// Width and height of generated frames
    pub synthetic_size: (u32, u32),
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where frames with the window outline drawn on them are written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotate_dir: Option<PathBuf>,
    /// Where the per-frame reports are exported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_path: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            frames_dir: None,
            flip_horizontal: true,
            synthetic_frames: 0,
            synthetic_size: (640, 480),
            seed: None,
        }
    }
}

impl AppConfig {
    /// Load from TOML, writing the defaults first if the file is missing
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            let default_config = Self::default();
            default_config.save(path)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {:?}", path))?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config: {:?}", path.as_ref()))?;
        Ok(())
    }
}

//! Frame sources feeding the control loop

use anyhow::{Context, Result};
use formscan_core::{Color, Shape, WindowGeometry, WindowState};
use formscan_cv::traits::FrameSource;
use formscan_cv::utils::ImageUtils;
use formscan_cv::TemplateSet;
use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Still images from a directory, in file name order
pub struct ImageDirSource {
    name: String,
    paths: Vec<PathBuf>,
    cursor: usize,
    flip_horizontal: bool,
}

impl ImageDirSource {
    pub fn open<P: AsRef<Path>>(dir: P, flip_horizontal: bool) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read frame directory: {:?}", dir))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let supported = path
                .extension()
                .map(|ext| ext.to_string_lossy().to_lowercase())
                .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()));
            if supported {
                paths.push(path);
            }
        }
        paths.sort();

        Ok(Self {
            name: dir.to_string_lossy().to_string(),
            paths,
            cursor: 0,
            flip_horizontal,
        })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FrameSource for ImageDirSource {
    fn next_frame(&mut self, _window: &WindowState) -> Result<Option<RgbImage>> {
        let Some(path) = self.paths.get(self.cursor) else {
            return Ok(None);
        };
        self.cursor += 1;

        debug!(?path, "loading frame");
        let frame = ImageUtils::load_color(path)?;
        Ok(Some(if self.flip_horizontal {
            ImageUtils::flip_horizontal(&frame)
        } else {
            frame
        }))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// What a synthetic frame shows inside the window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scene {
    pub shape: Shape,
    /// `None` renders the shape in dark gray
    pub color: Option<Color>,
}

impl Scene {
    fn fill(&self) -> Rgb<u8> {
        match self.color {
            Some(Color::Green) => Rgb([0, 200, 0]),
            Some(Color::Blue) => Rgb([0, 0, 200]),
            Some(Color::Red) => Rgb([200, 0, 0]),
            None => Rgb([60, 60, 60]),
        }
    }
}

/// Random shapes drawn into the current window on a white background
pub struct SyntheticSource {
    width: u32,
    height: u32,
    remaining: usize,
    rng: StdRng,
    last_scene: Option<Scene>,
}

impl SyntheticSource {
    pub fn new(width: u32, height: u32, frames: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            width,
            height,
            remaining: frames,
            rng,
            last_scene: None,
        }
    }

    /// Scene of the most recent frame, `None` if it was left blank
    #[allow(dead_code)]
    pub fn last_scene(&self) -> Option<Scene> {
        self.last_scene
    }

    fn random_scene(&mut self) -> Scene {
        let shape = Shape::PRIORITY[self.rng.gen_range(0..Shape::PRIORITY.len())];
        let pick = self.rng.gen_range(0..=Color::PRIORITY.len());
        Scene {
            shape,
            color: Color::PRIORITY.get(pick).copied(),
        }
    }

    /// Render `scene` into the window, cell for cell from the shape template
    pub fn render(&self, scene: Scene, window: &WindowState) -> Result<Option<RgbImage>> {
        let mut frame = RgbImage::from_pixel(self.width, self.height, Rgb([255, 255, 255]));
        let geometry = WindowGeometry::compute(self.width, self.height, window);
        if !geometry.fits(self.width, self.height) {
            return Ok(None);
        }

        let templates = TemplateSet::generate(window.rect_size)?;
        let template = templates.get(scene.shape);
        let fill = scene.fill();
        for row in 0..template.side() {
            for col in 0..template.side() {
                if template.get(row, col) {
                    let x = geometry.x0 as u32 + col as u32;
                    let y = geometry.y0 as u32 + row as u32;
                    frame.put_pixel(x, y, fill);
                }
            }
        }
        Ok(Some(frame))
    }
}

impl FrameSource for SyntheticSource {
    fn next_frame(&mut self, window: &WindowState) -> Result<Option<RgbImage>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;

        let scene = self.random_scene();
        debug!(?scene, "rendering synthetic frame");
        match self.render(scene, window)? {
            Some(frame) => {
                self.last_scene = Some(scene);
                Ok(Some(frame))
            }
            None => {
                self.last_scene = None;
                Ok(Some(RgbImage::from_pixel(
                    self.width,
                    self.height,
                    Rgb([255, 255, 255]),
                )))
            }
        }
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formscan_cv::FrameClassifier;

    #[test]
    fn test_synthetic_scenes_classify_as_drawn() -> Result<()> {
        let window = WindowState::new(48);
        let templates = TemplateSet::generate(48)?;
        let classifier = FrameClassifier::default();
        let mut source = SyntheticSource::new(160, 120, 30, Some(3));

        while let Some(frame) = source.next_frame(&window)? {
            let scene = source.last_scene().expect("window fits the frame");
            let report = classifier.classify(&frame, &templates, &window)?;
            assert_eq!(report.result.shape(), Some(scene.shape));
            assert_eq!(report.result.color(), scene.color);
        }
        Ok(())
    }

    #[test]
    fn test_synthetic_source_is_finite() -> Result<()> {
        let window = WindowState::new(10);
        let mut source = SyntheticSource::new(64, 64, 2, Some(1));
        assert!(source.next_frame(&window)?.is_some());
        assert!(source.next_frame(&window)?.is_some());
        assert!(source.next_frame(&window)?.is_none());
        Ok(())
    }

    #[test]
    fn test_image_dir_source() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut frame = RgbImage::from_pixel(4, 2, Rgb([255, 255, 255]));
        frame.put_pixel(0, 0, Rgb([10, 20, 30]));
        frame.save(dir.path().join("b.png"))?;
        RgbImage::new(4, 2).save(dir.path().join("a.png"))?;
        fs::write(dir.path().join("notes.txt"), "not a frame")?;

        let mut source = ImageDirSource::open(dir.path(), true)?;
        assert_eq!(source.len(), 2);

        let window = WindowState::default();
        let first = source.next_frame(&window)?.expect("a.png");
        assert_eq!(first.get_pixel(0, 0).0, [0, 0, 0]);
        let second = source.next_frame(&window)?.expect("b.png");
        // Mirrored: the marked pixel moves to the right edge.
        assert_eq!(second.get_pixel(3, 0).0, [10, 20, 30]);
        assert!(source.next_frame(&window)?.is_none());
        Ok(())
    }
}

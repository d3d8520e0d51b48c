//! Control loop: applies key commands, keeps templates in sync with the
//! window size and classifies frames one at a time.

use crate::config::OutputConfig;
use crate::overlay;
use anyhow::{Context, Result};
use formscan_core::{Command, WindowState};
use formscan_cv::traits::FrameSource;
use formscan_cv::utils::ImageUtils;
use formscan_cv::{ClassifierConfig, FrameClassifier, FrameReport, TemplateSet};
use serde::Serialize;
use std::fs;
use tracing::{info, warn};

/// One classified frame as exported to JSON
#[derive(Debug, Clone, Serialize)]
pub struct FrameRecord {
    pub frame: usize,
    pub source: String,
    pub rect_size: u32,
    pub pos_x: i32,
    pub pos_y: i32,
    #[serde(flatten)]
    pub report: FrameReport,
}

pub struct Session {
    classifier: FrameClassifier,
    window: WindowState,
    templates: TemplateSet,
    controls: Vec<Option<Command>>,
    output: OutputConfig,
}

impl Session {
    pub fn new(
        classifier_config: ClassifierConfig,
        window: WindowState,
        controls: Vec<Option<Command>>,
        output: OutputConfig,
    ) -> Result<Self> {
        let templates = TemplateSet::generate(window.rect_size)
            .context("Failed to build templates for the initial window size")?;
        Ok(Self {
            classifier: FrameClassifier::new(classifier_config),
            window,
            templates,
            controls,
            output,
        })
    }

    pub fn window(&self) -> &WindowState {
        &self.window
    }

    /// Apply one command; returns `false` on quit
    fn handle(&mut self, command: Command) -> Result<bool> {
        if command == Command::Quit {
            info!("Quit requested");
            return Ok(false);
        }
        if self.window.apply(command) {
            self.templates = TemplateSet::generate(self.window.rect_size)?;
        }
        Ok(true)
    }

    /// Pull frames until the source runs dry or a quit command is reached
    pub fn run(&mut self, source: &mut dyn FrameSource) -> Result<Vec<FrameRecord>> {
        if let Some(dir) = &self.output.annotate_dir {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create annotation directory: {:?}", dir))?;
        }

        let mut records = Vec::new();
        for index in 0.. {
            if let Some(Some(command)) = self.controls.get(index).copied() {
                if !self.handle(command)? {
                    break;
                }
            }

            let Some(frame) = source.next_frame(&self.window)? else {
                break;
            };

            let report = self.classifier.classify(&frame, &self.templates, &self.window)?;
            info!(
                frame = index,
                label = %report.label,
                time_us = report.processing_time_us,
                "classified"
            );

            if let Some(dir) = &self.output.annotate_dir {
                let annotated = overlay::draw_window(&frame, &report.geometry);
                let path = dir.join(format!("frame_{:05}.png", index));
                if let Err(e) = ImageUtils::save_image(&annotated, &path) {
                    warn!("Skipping annotation for frame {}: {:#}", index, e);
                }
            }

            records.push(FrameRecord {
                frame: index,
                source: source.name().to_string(),
                rect_size: self.window.rect_size,
                pos_x: self.window.pos_x,
                pos_y: self.window.pos_y,
                report,
            });
        }

        if let Some(path) = &self.output.json_path {
            FrameClassifier::export_json(&records, path)?;
            info!("Reports saved: {:?}", path);
        }

        Ok(records)
    }
}

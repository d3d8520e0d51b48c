//! Image processing utilities built on the `image` crate

use crate::error::CvError;
use crate::Result;
use anyhow::Context;
use formscan_core::WindowGeometry;
use image::{imageops, GrayImage, Luma, RgbImage};
use std::path::Path;

/// Image utility functions
pub struct ImageUtils;

impl ImageUtils {
    /// Load image as 8-bit RGB
    pub fn load_color<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
        let image = image::open(&path)
            .with_context(|| format!("Failed to open image: {:?}", path.as_ref()))?;
        Ok(image.to_rgb8())
    }

    /// Save RGB image, format chosen from the extension
    pub fn save_image<P: AsRef<Path>>(image: &RgbImage, path: P) -> Result<()> {
        image
            .save(&path)
            .with_context(|| format!("Failed to save image: {:?}", path.as_ref()))
    }

    /// BT.601 luma in 14-bit fixed point, rounded
    pub fn luma(r: u8, g: u8, b: u8) -> u8 {
        let y = 4899 * r as u32 + 9617 * g as u32 + 1868 * b as u32;
        ((y + (1 << 13)) >> 14) as u8
    }

    /// Convert RGB to grayscale with BT.601 weights
    pub fn to_grayscale(image: &RgbImage) -> GrayImage {
        let mut gray = GrayImage::new(image.width(), image.height());
        for (src, dst) in image.pixels().zip(gray.pixels_mut()) {
            let [r, g, b] = src.0;
            *dst = Luma([Self::luma(r, g, b)]);
        }
        gray
    }

    /// Copy out the window's pixels. Fails if any part of the window lies
    /// outside the frame; callers check bounds first.
    pub fn crop_window(frame: &RgbImage, geometry: &WindowGeometry) -> Result<RgbImage> {
        let (width, height) = frame.dimensions();
        if !geometry.fits(width, height) {
            return Err(CvError::OutOfFrame {
                x0: geometry.x0,
                y0: geometry.y0,
                x1: geometry.x1,
                y1: geometry.y1,
                width,
                height,
            }
            .into());
        }
        Ok(imageops::crop_imm(
            frame,
            geometry.x0 as u32,
            geometry.y0 as u32,
            geometry.width(),
            geometry.height(),
        )
        .to_image())
    }

    /// Mirror around the vertical axis
    pub fn flip_horizontal(frame: &RgbImage) -> RgbImage {
        imageops::flip_horizontal(frame)
    }
}

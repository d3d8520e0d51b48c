//! Binary matrices and the mask algebra used for matching
//!
//! Core abstraction for templates, silhouettes and color masks. Matrices are
//! square and never mutated once built; every operation derives a new one.

use crate::error::CvError;
use crate::Result;
use image::GrayImage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Square matrix of 0/1 cells stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BinaryMatrix {
    side: usize,
    cells: Vec<bool>,
}

impl BinaryMatrix {
    /// Build a matrix by evaluating `f(row, col)` for every cell
    pub fn from_fn<F: Fn(usize, usize) -> bool>(side: usize, f: F) -> Self {
        let mut cells = Vec::with_capacity(side * side);
        for row in 0..side {
            for col in 0..side {
                cells.push(f(row, col));
            }
        }
        Self { side, cells }
    }

    /// Matrix with every cell set to `value`
    pub fn filled(side: usize, value: bool) -> Self {
        Self {
            side,
            cells: vec![value; side * side],
        }
    }

    /// Build from rows of 0/1 values
    pub fn from_rows(rows: &[&[u8]]) -> Result<Self> {
        let side = rows.len();
        let mut cells = Vec::with_capacity(side * side);
        for row in rows {
            if row.len() != side {
                return Err(CvError::SideMismatch { left: side, right: row.len() }.into());
            }
            cells.extend(row.iter().map(|&v| v != 0));
        }
        Ok(Self { side, cells })
    }

    /// Cells set where the predicate holds for the matching pixel of a square
    /// grayscale image
    pub fn from_gray<F: Fn(u8) -> bool>(image: &GrayImage, predicate: F) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width != height {
            return Err(CvError::NotSquare { width, height }.into());
        }
        Ok(Self {
            side: width as usize,
            cells: image.as_raw().iter().map(|&p| predicate(p)).collect(),
        })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.side + col]
    }

    /// Number of cells set to 1
    pub fn count_ones(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Flip every cell
    pub fn invert(&self) -> Self {
        Self {
            side: self.side,
            cells: self.cells.iter().map(|&c| !c).collect(),
        }
    }

    /// Cell-wise AND
    pub fn and(&self, other: &BinaryMatrix) -> Result<Self> {
        self.zip_with(other, |a, b| a && b)
    }

    /// Cell-wise OR
    pub fn or(&self, other: &BinaryMatrix) -> Result<Self> {
        self.zip_with(other, |a, b| a || b)
    }

    /// Fraction of cells where both matrices agree, counting shared 1s and
    /// shared 0s alike. Returns a value in [0, 1].
    pub fn match_score(&self, template: &BinaryMatrix) -> Result<f64> {
        if self.is_empty() {
            return Err(CvError::EmptyMatrix.into());
        }
        let foreground = self.and(template)?;
        let background = self.invert().and(&template.invert())?;
        let agreement = foreground.or(&background)?;
        Ok(agreement.count_ones() as f64 / self.len() as f64)
    }

    fn zip_with<F: Fn(bool, bool) -> bool>(&self, other: &BinaryMatrix, f: F) -> Result<Self> {
        if self.side != other.side {
            return Err(CvError::SideMismatch {
                left: self.side,
                right: other.side,
            }
            .into());
        }
        Ok(Self {
            side: self.side,
            cells: self
                .cells
                .iter()
                .zip(&other.cells)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }
}

impl fmt::Display for BinaryMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.side {
            for col in 0..self.side {
                f.write_str(if self.get(row, col) { "1" } else { "0" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

//! Binary template generation

use crate::error::CvError;
use crate::mask::BinaryMatrix;
use crate::Result;
use formscan_core::Shape;
use tracing::info;

/// Filled square, every cell set
pub fn square(rect_size: u32) -> BinaryMatrix {
    BinaryMatrix::filled(rect_size as usize + 1, true)
}

/// Horizontal band spanning the full width over the middle half of the rows
pub fn rectangle(rect_size: u32) -> BinaryMatrix {
    let side = rect_size as usize + 1;
    let begin = side / 4;
    let end = begin * 3;
    BinaryMatrix::from_fn(side, |row, _| begin <= row && row <= end)
}

/// Stepped wedge with its apex on the top row: a single center column for
/// the first two rows, one cell wider on each side every two rows after.
pub fn triangle(rect_size: u32) -> BinaryMatrix {
    let side = rect_size as usize + 1;
    let center = (side / 2) as i64;
    BinaryMatrix::from_fn(side, |row, col| {
        let widen = (row / 2) as i64;
        let begin = center - 1 - widen;
        let end = center + widen;
        let col = col as i64;
        begin < col && col <= end
    })
}

/// The three templates for one window size. Always regenerated together so
/// they share a side length.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateSet {
    rect_size: u32,
    square: BinaryMatrix,
    rectangle: BinaryMatrix,
    triangle: BinaryMatrix,
}

impl TemplateSet {
    /// Generate all templates for `rect_size`
    pub fn generate(rect_size: u32) -> Result<Self> {
        if rect_size == 0 {
            return Err(CvError::ZeroSize.into());
        }
        info!(rect_size, "generating shape templates");
        Ok(Self {
            rect_size,
            square: square(rect_size),
            rectangle: rectangle(rect_size),
            triangle: triangle(rect_size),
        })
    }

    pub fn rect_size(&self) -> u32 {
        self.rect_size
    }

    pub fn side(&self) -> usize {
        self.rect_size as usize + 1
    }

    pub fn get(&self, shape: Shape) -> &BinaryMatrix {
        match shape {
            Shape::Square => &self.square,
            Shape::Rectangle => &self.rectangle,
            Shape::Triangle => &self.triangle,
        }
    }

    /// Templates in matching priority order
    pub fn iter(&self) -> impl Iterator<Item = (Shape, &BinaryMatrix)> + '_ {
        Shape::PRIORITY.into_iter().map(move |shape| (shape, self.get(shape)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_are_square() -> Result<()> {
        for rect_size in [1, 2, 3, 20, 99, 100] {
            let set = TemplateSet::generate(rect_size)?;
            for (_, template) in set.iter() {
                assert_eq!(template.side(), rect_size as usize + 1);
                assert_eq!(template.len(), (rect_size as usize + 1).pow(2));
                assert_eq!(&template.invert().invert(), template);
            }
        }
        Ok(())
    }

    #[test]
    fn test_zero_size_rejected() {
        let err = TemplateSet::generate(0).unwrap_err();
        assert_eq!(err.downcast_ref::<CvError>(), Some(&CvError::ZeroSize));
    }

    #[test]
    fn test_square_is_full() {
        let template = square(4);
        assert_eq!(template.count_ones(), 25);
    }

    #[test]
    fn test_rectangle_band() {
        assert_eq!(rectangle(4).to_string(), "00000\n11111\n11111\n11111\n00000\n");
        assert_eq!(rectangle(3).to_string(), "0000\n1111\n1111\n1111\n");

        let template = rectangle(100);
        for row in 0..101 {
            assert_eq!(template.get(row, 0), (25..=75).contains(&row), "row {row}");
            assert_eq!(template.get(row, 0), template.get(row, 100));
        }
    }

    #[test]
    fn test_triangle_wedge() {
        assert_eq!(
            triangle(4).to_string(),
            "00100\n00100\n01110\n01110\n11111\n"
        );
        assert_eq!(triangle(3).to_string(), "0010\n0010\n0111\n0111\n");
    }

    #[test]
    fn test_priority_order() -> Result<()> {
        let set = TemplateSet::generate(10)?;
        let order: Vec<Shape> = set.iter().map(|(shape, _)| shape).collect();
        assert_eq!(order, vec![Shape::Square, Shape::Rectangle, Shape::Triangle]);
        Ok(())
    }
}

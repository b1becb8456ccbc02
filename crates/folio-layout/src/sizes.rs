//! Solved track sizes and element placement.

use glam::DVec2;

use folio_core::{Axis, Element};

/// Rectangle of a placed element, in page coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_vecs(position: DVec2, size: DVec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Sizes of the caller's rows and columns, plus the space left over.
///
/// `padding.x` is unused width and `padding.y` unused height. Placement
/// centres the grid by starting each axis at half its padding.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSizes {
    pub row_sizes: Vec<f64>,
    pub column_sizes: Vec<f64>,
    pub padding: DVec2,
}

impl GridSizes {
    pub fn new(row_sizes: Vec<f64>, column_sizes: Vec<f64>, padding_x: f64, padding_y: f64) -> Self {
        Self {
            row_sizes,
            column_sizes,
            padding: DVec2::new(padding_x, padding_y),
        }
    }

    pub fn sizes(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::Row => &self.row_sizes,
            Axis::Column => &self.column_sizes,
        }
    }

    fn padding_along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Row => self.padding.y,
            Axis::Column => self.padding.x,
        }
    }

    /// Start of every track on an axis, then the end of the last one.
    pub fn track_offsets(&self, axis: Axis) -> Vec<f64> {
        let sizes = self.sizes(axis);
        let mut offsets = Vec::with_capacity(sizes.len() + 1);
        let mut at = self.padding_along(axis) / 2.0;
        offsets.push(at);
        for size in sizes {
            at += size;
            offsets.push(at);
        }
        offsets
    }

    /// Total size of the caller's tracks on an axis.
    pub fn extent(&self, axis: Axis) -> f64 {
        self.sizes(axis).iter().sum()
    }

    pub fn element_bounds(&self, element: &Element) -> Bounds {
        let place = |axis: Axis| {
            let sizes = self.sizes(axis);
            let span = element.span(axis);
            let start = self.padding_along(axis) / 2.0 + sizes[..span.start].iter().sum::<f64>();
            let length: f64 = sizes[span].iter().sum();
            (start, length)
        };
        let (x, width) = place(Axis::Column);
        let (y, height) = place(Axis::Row);
        Bounds::new(x, y, width, height)
    }
}

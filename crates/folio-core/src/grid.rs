//! The complete input of one layout computation.

use smallvec::SmallVec;

use crate::errors::LayoutError;
use crate::types::{Axis, Element, ExtraConstraint, Ratio, RowColSpec, TrackRef};

/// Row/column specs, elements and equality constraints of a page.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpec {
    pub rows: Vec<RowColSpec>,
    pub columns: Vec<RowColSpec>,
    pub elements: Vec<Element>,
    pub constraints: SmallVec<[ExtraConstraint; 2]>,
}

impl GridSpec {
    pub fn new(rows: Vec<RowColSpec>, columns: Vec<RowColSpec>) -> Self {
        Self {
            rows,
            columns,
            ..Default::default()
        }
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_constraint(mut self, a: TrackRef, b: TrackRef) -> Self {
        self.constraints.push(ExtraConstraint::new(a, b));
        self
    }

    /// Specs of one axis.
    pub fn tracks(&self, axis: Axis) -> &[RowColSpec] {
        match axis {
            Axis::Row => &self.rows,
            Axis::Column => &self.columns,
        }
    }

    /// Find the element filling a template slot.
    pub fn element(&self, slot: usize) -> Option<&Element> {
        self.elements.iter().find(|e| e.slot == slot)
    }

    /// Replace the desired ratio of a slot, typically with the measured ratio of
    /// the photo placed in it. The template's fallback ratio is kept.
    ///
    /// Returns `false` if no element uses the slot.
    pub fn set_aspect(&mut self, slot: usize, ratio: Ratio) -> bool {
        match self.elements.iter_mut().find(|e| e.slot == slot) {
            Some(element) => {
                element.aspect = Some(ratio);
                true
            }
            None => false,
        }
    }

    /// Builder form of [`GridSpec::set_aspect`].
    pub fn with_aspect(mut self, slot: usize, ratio: Ratio) -> Self {
        self.set_aspect(slot, ratio);
        self
    }

    /// Check that every span and constraint stays inside the grid.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.rows.is_empty() || self.columns.is_empty() {
            return Err(LayoutError::EmptyGrid);
        }

        for element in &self.elements {
            if element.row_span == 0 || element.column_span == 0 {
                return Err(LayoutError::ZeroSpan { slot: element.slot });
            }
            for axis in [Axis::Row, Axis::Column] {
                let end = element.span(axis).end;
                let count = self.tracks(axis).len();
                if end > count {
                    return Err(LayoutError::SpanOutOfBounds {
                        slot: element.slot,
                        axis,
                        end,
                        count,
                    });
                }
            }
        }

        for constraint in &self.constraints {
            for side in [constraint.a, constraint.b] {
                let count = self.tracks(side.axis).len();
                if side.index >= count {
                    return Err(LayoutError::ConstraintOutOfBounds {
                        axis: side.axis,
                        index: side.index,
                        count,
                    });
                }
            }
        }

        Ok(())
    }
}

//! Per-attempt row and column lists.
//!
//! A `TrackList` is never edited in place. Injecting a slack slot or pinning
//! negative tracks produces a new list, so every attempt sees exactly the
//! specs it was built from.

use folio_core::{Axis, GridSpec, RowColSpec};

/// Which axis receives an injected slack slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExtraSpace {
    /// Exact fit, no slack
    #[default]
    None,
    /// A slack column absorbs leftover width
    Width,
    /// A slack row absorbs leftover height
    Height,
}

impl ExtraSpace {
    /// The axis the slack slot is appended to.
    pub fn axis(&self) -> Option<Axis> {
        match self {
            ExtraSpace::None => None,
            ExtraSpace::Width => Some(Axis::Column),
            ExtraSpace::Height => Some(Axis::Row),
        }
    }
}

/// Row and column specs for one attempt, plus the counts the caller asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackList {
    rows: Vec<RowColSpec>,
    columns: Vec<RowColSpec>,
    original_rows: usize,
    original_columns: usize,
}

impl TrackList {
    pub fn new(rows: Vec<RowColSpec>, columns: Vec<RowColSpec>) -> Self {
        Self {
            original_rows: rows.len(),
            original_columns: columns.len(),
            rows,
            columns,
        }
    }

    pub fn from_grid(grid: &GridSpec) -> Self {
        Self::new(grid.rows.clone(), grid.columns.clone())
    }

    pub fn rows(&self) -> &[RowColSpec] {
        &self.rows
    }

    pub fn columns(&self) -> &[RowColSpec] {
        &self.columns
    }

    pub fn tracks(&self, axis: Axis) -> &[RowColSpec] {
        match axis {
            Axis::Row => &self.rows,
            Axis::Column => &self.columns,
        }
    }

    /// Number of tracks on an axis before any were injected.
    pub fn original_count(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.original_rows,
            Axis::Column => self.original_columns,
        }
    }

    /// Length of the unknown vector: rows first, then columns.
    pub fn unknowns(&self) -> usize {
        self.rows.len() + self.columns.len()
    }

    /// Position of a track in the unknown vector.
    pub fn unknown(&self, axis: Axis, index: usize) -> usize {
        match axis {
            Axis::Row => index,
            Axis::Column => self.rows.len() + index,
        }
    }

    /// Copy of this list with a slack slot appended on the `extra` axis.
    pub fn with_slack(&self, extra: ExtraSpace) -> Self {
        let mut next = self.clone();
        match extra.axis() {
            Some(Axis::Row) => next.rows.push(RowColSpec::StarSlack),
            Some(Axis::Column) => next.columns.push(RowColSpec::StarSlack),
            None => {}
        }
        next
    }

    /// Copy of this list with the given tracks fixed at zero. Each axis that
    /// lost a track gains one ordinary star track to take up the space.
    pub fn with_pinned_zero(&self, rows: &[usize], columns: &[usize]) -> Self {
        let mut next = self.clone();
        pin(&mut next.rows, rows);
        pin(&mut next.columns, columns);
        next
    }
}

fn pin(specs: &mut Vec<RowColSpec>, indices: &[usize]) {
    for &i in indices {
        specs[i] = RowColSpec::Fixed(0.0);
    }
    if !indices.is_empty() {
        specs.push(RowColSpec::Star(1.0));
    }
}

//! Error types for the Folio engine.

use std::fmt;

use thiserror::Error;

use crate::types::Axis;

/// Top-level error type for the Folio engine.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Errors while reading template text.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token at line {line}, column {column}: expected {expected}, found {found:?}")]
    UnexpectedToken {
        found: String,
        expected: String,
        line: usize,
        column: usize,
    },

    #[error("Unknown row/column size {token:?} at line {line}")]
    UnknownTrack { token: String, line: usize },

    #[error("Row at line {line} has {found} cells, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Cells of slot {slot} do not form a rectangle")]
    NonRectangularSpan { slot: usize },

    #[error("Slot {slot} mixes element kinds")]
    MixedKinds { slot: usize },

    #[error("Invalid constraint {value:?} at line {line}")]
    InvalidConstraint { value: String, line: usize },

    #[error("Constraint at line {line} references {axis}{index}, but there are only {count}")]
    ConstraintOutOfRange {
        axis: Axis,
        index: usize,
        count: usize,
        line: usize,
    },

    #[error("Invalid ratio: {value}")]
    InvalidRatio { value: String },

    #[error("Template {name:?} is defined more than once")]
    DuplicateTemplate { name: String },

    #[error("Template has no rows")]
    EmptyTemplate,

    #[error("Unexpected end of input")]
    UnexpectedEof,
}

/// Why a single solve attempt was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutFailure {
    /// The equations contradict each other
    Overconstrained,
    /// Some sizes are left free
    Underconstrained,
    /// A size that must be non-negative came out negative
    NegativeSizes,
}

impl fmt::Display for LayoutFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayoutFailure::Overconstrained => "overconstrained",
            LayoutFailure::Underconstrained => "underconstrained",
            LayoutFailure::NegativeSizes => "negative sizes",
        };
        f.write_str(name)
    }
}

/// Failure kinds of the three attempts of one layout round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundFailures {
    pub natural: LayoutFailure,
    pub width_slack: LayoutFailure,
    pub height_slack: LayoutFailure,
}

impl fmt::Display for RoundFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "natural: {}, extra width: {}, extra height: {}",
            self.natural, self.width_slack, self.height_slack
        )
    }
}

fn describe_fallback(fallback: &Option<RoundFailures>) -> String {
    match fallback {
        Some(round) => round.to_string(),
        None => "not attempted".to_string(),
    }
}

/// Errors during layout computation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid page size {width}x{height}")]
    InvalidPageSize { width: f64, height: f64 },

    #[error("Grid needs at least one row and one column")]
    EmptyGrid,

    #[error("Slot {slot} spans a zero-sized area")]
    ZeroSpan { slot: usize },

    #[error("Slot {slot} ends at {axis} {end}, but there are only {count}")]
    SpanOutOfBounds {
        slot: usize,
        axis: Axis,
        end: usize,
        count: usize,
    },

    #[error("Constraint references {axis}{index}, but there are only {count}")]
    ConstraintOutOfBounds {
        axis: Axis,
        index: usize,
        count: usize,
    },

    #[error("Can't solve layout ({primary}; fallback: {})", describe_fallback(.fallback))]
    Unsolvable {
        primary: RoundFailures,
        fallback: Option<RoundFailures>,
    },
}

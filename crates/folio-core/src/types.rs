//! Core value types for page templates.

use std::fmt;
use std::str::FromStr;

use crate::errors::ParseError;

/// A width:height aspect ratio, always stored in lowest terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ratio {
    numerator: u32,
    denominator: u32,
}

impl Ratio {
    /// Landscape 3:2, the default for landscape photo slots.
    pub const LANDSCAPE: Ratio = Ratio { numerator: 3, denominator: 2 };
    /// Portrait 2:3, the default for portrait photo slots.
    pub const PORTRAIT: Ratio = Ratio { numerator: 2, denominator: 3 };

    /// Create a simplified ratio. Returns `None` if either side is zero.
    pub fn new(numerator: u32, denominator: u32) -> Option<Self> {
        if numerator == 0 || denominator == 0 {
            return None;
        }
        let divisor = gcd(numerator, denominator);
        Some(Self {
            numerator: numerator / divisor,
            denominator: denominator / divisor,
        })
    }

    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    /// True when the ratio is taller than it is wide.
    pub fn is_portrait(&self) -> bool {
        self.numerator < self.denominator
    }

    /// Height divided by width, the coefficient used in aspect equations.
    pub fn height_per_width(&self) -> f64 {
        f64::from(self.denominator) / f64::from(self.numerator)
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl FromStr for Ratio {
    type Err = ParseError;

    /// Accepts `4:3`, `4/3` or a bare integer such as `4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidRatio { value: s.to_string() };
        let trimmed = s.trim();
        let (num, den) = match trimmed.split_once(|c: char| c == ':' || c == '/') {
            Some((num, den)) => (num.trim(), den.trim()),
            None => (trimmed, "1"),
        };
        let num = num.parse::<u32>().map_err(|_| invalid())?;
        let den = den.parse::<u32>().map_err(|_| invalid())?;
        Ratio::new(num, den).ok_or_else(invalid)
    }
}

/// One of the two grid axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    /// The keyword used for this axis in template constraint lines.
    pub fn keyword(&self) -> &'static str {
        match self {
            Axis::Row => "row",
            Axis::Column => "col",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Sizing rule for a single row or column.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowColSpec {
    /// Fixed size in pixels
    Fixed(f64),
    /// Sized by the aspect ratios of the elements spanning it
    Auto,
    /// Proportional space
    Star(f64),
    /// Proportional space that may legitimately come out negative
    StarCanBeNegative,
    /// Slack slot injected for a single solve attempt
    StarSlack,
}

impl RowColSpec {
    /// Any of the proportional variants.
    pub fn is_star(&self) -> bool {
        matches!(
            self,
            RowColSpec::Star(_) | RowColSpec::StarCanBeNegative | RowColSpec::StarSlack
        )
    }

    /// A plain `Star`, the only kind that joins an equal-size group.
    pub fn is_ordinary_star(&self) -> bool {
        matches!(self, RowColSpec::Star(_))
    }

    /// Exempt from the non-negativity check and from repair.
    pub fn can_be_negative(&self) -> bool {
        matches!(self, RowColSpec::StarCanBeNegative)
    }

    pub fn is_slack(&self) -> bool {
        matches!(self, RowColSpec::StarSlack)
    }

    pub fn fixed_size(&self) -> Option<f64> {
        match self {
            RowColSpec::Fixed(px) => Some(*px),
            _ => None,
        }
    }
}

/// What a template slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    Landscape,
    Portrait,
    Caption,
}

impl ElementKind {
    /// Template cell prefix for this kind.
    pub fn code(&self) -> char {
        match self {
            ElementKind::Landscape => 'L',
            ElementKind::Portrait => 'P',
            ElementKind::Caption => 'C',
        }
    }

    pub fn from_code(c: char) -> Option<Self> {
        match c {
            'L' => Some(ElementKind::Landscape),
            'P' => Some(ElementKind::Portrait),
            'C' => Some(ElementKind::Caption),
            _ => None,
        }
    }
}

/// A photo or caption occupying a rectangle of grid cells.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    /// Slot number from the template (`L0` is slot 0)
    pub slot: usize,
    pub kind: ElementKind,
    pub row: usize,
    pub row_span: usize,
    pub column: usize,
    pub column_span: usize,
    /// Desired width:height ratio
    pub aspect: Option<Ratio>,
    /// Ratio used when no layout satisfies the desired ones
    pub fallback_aspect: Option<Ratio>,
}

impl Element {
    /// Create an element without any aspect ratio.
    pub fn new(slot: usize, kind: ElementKind, row: usize, column: usize) -> Self {
        Self {
            slot,
            kind,
            row,
            row_span: 1,
            column,
            column_span: 1,
            aspect: None,
            fallback_aspect: None,
        }
    }

    pub fn with_span(mut self, row_span: usize, column_span: usize) -> Self {
        self.row_span = row_span;
        self.column_span = column_span;
        self
    }

    /// Set both the desired and the fallback ratio.
    pub fn with_aspect(mut self, ratio: Ratio) -> Self {
        self.aspect = Some(ratio);
        self.fallback_aspect = Some(ratio);
        self
    }

    pub fn rows(&self) -> std::ops::Range<usize> {
        self.row..self.row + self.row_span
    }

    pub fn columns(&self) -> std::ops::Range<usize> {
        self.column..self.column + self.column_span
    }

    /// Index range covered on the given axis.
    pub fn span(&self, axis: Axis) -> std::ops::Range<usize> {
        match axis {
            Axis::Row => self.rows(),
            Axis::Column => self.columns(),
        }
    }
}

/// A reference to one row or column by zero-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackRef {
    pub axis: Axis,
    pub index: usize,
}

impl TrackRef {
    pub fn row(index: usize) -> Self {
        Self { axis: Axis::Row, index }
    }

    pub fn column(index: usize) -> Self {
        Self { axis: Axis::Column, index }
    }
}

impl fmt::Display for TrackRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.axis, self.index)
    }
}

/// Equality between two tracks: `a = b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtraConstraint {
    pub a: TrackRef,
    pub b: TrackRef,
}

impl ExtraConstraint {
    pub fn new(a: TrackRef, b: TrackRef) -> Self {
        Self { a, b }
    }
}

impl fmt::Display for ExtraConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "and {}={}", self.a, self.b)
    }
}

/// Page dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Total available size along an axis.
    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Row => self.height,
            Axis::Column => self.width,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

//! Grammar for page templates.
//!
//! The first line lists column sizes. Every following line starts with a row
//! size and then holds one cell per column. `and` lines add equalities and
//! may appear anywhere in the block.
//!
//! ```text
//!              m      a      g      a      m
//!       m      -      -      -      -      -
//!       a      -     L0      -     P1      -
//!       m      -      -      -      -      -
//!     and col1=col3
//! ```

use std::collections::BTreeMap;

use nom::combinator::all_consuming;

use folio_core::{Axis, Element, ElementKind, GridSpec, ParseError, Ratio, RowColSpec};

use crate::lexer::*;

/// Sizes and ratios the template tokens stand for.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateOptions {
    /// Pixel size of `m`
    pub margin: f64,
    /// Pixel size of `g`
    pub gutter: f64,
    /// Default ratio for `L` slots
    pub landscape: Ratio,
    /// Default ratio for `P` slots
    pub portrait: Ratio,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            margin: 50.0,
            gutter: 20.0,
            landscape: Ratio::LANDSCAPE,
            portrait: Ratio::PORTRAIT,
        }
    }
}

impl TemplateOptions {
    fn spec(&self, token: TrackToken) -> RowColSpec {
        match token {
            TrackToken::Margin => RowColSpec::Fixed(self.margin),
            TrackToken::Gutter => RowColSpec::Fixed(self.gutter),
            TrackToken::Auto => RowColSpec::Auto,
            TrackToken::Star => RowColSpec::Star(1.0),
            TrackToken::CanBeNegative => RowColSpec::StarCanBeNegative,
            TrackToken::Fixed(px) => RowColSpec::Fixed(px),
        }
    }

    fn ratio(&self, kind: ElementKind) -> Option<Ratio> {
        match kind {
            ElementKind::Landscape => Some(self.landscape),
            ElementKind::Portrait => Some(self.portrait),
            ElementKind::Caption => None,
        }
    }
}

/// Parse a single template.
pub fn parse(input: &str, options: &TemplateOptions) -> Result<GridSpec, ParseError> {
    let lines = split_lines(input);
    TemplateParser::new(&lines, options).parse()
}

/// Cells collected for one slot.
struct SlotCells {
    kind: ElementKind,
    cells: Vec<(usize, usize)>,
}

/// Parses the lines of one template block.
pub(crate) struct TemplateParser<'a> {
    lines: &'a [Line<'a>],
    options: &'a TemplateOptions,
}

impl<'a> TemplateParser<'a> {
    pub(crate) fn new(lines: &'a [Line<'a>], options: &'a TemplateOptions) -> Self {
        Self { lines, options }
    }

    pub(crate) fn parse(&self) -> Result<GridSpec, ParseError> {
        let (constraint_lines, grid_lines): (Vec<&Line<'a>>, Vec<&Line<'a>>) = self
            .lines
            .iter()
            .partition(|line| line.content.starts_with("and"));

        let (header, body) = match grid_lines.split_first() {
            Some((header, body)) if !body.is_empty() => (header, body),
            _ => return Err(ParseError::EmptyTemplate),
        };

        let columns = words(header.raw)
            .iter()
            .map(|word| self.track(word, header.line_number))
            .collect::<Result<Vec<_>, _>>()?;

        let mut grid = GridSpec::new(Vec::with_capacity(body.len()), columns);
        let mut slots: BTreeMap<usize, SlotCells> = BTreeMap::new();

        for (row, line) in body.iter().enumerate() {
            let row_words = words(line.raw);
            let (row_word, cell_words) = row_words.split_first().ok_or(ParseError::UnexpectedEof)?;
            grid.rows.push(self.track(row_word, line.line_number)?);

            if cell_words.len() != grid.columns.len() {
                return Err(ParseError::RaggedRow {
                    line: line.line_number,
                    expected: grid.columns.len(),
                    found: cell_words.len(),
                });
            }

            for (column, word) in cell_words.iter().enumerate() {
                if let CellToken::Slot { kind, slot } = self.cell(word, line.line_number)? {
                    let entry = slots.entry(slot).or_insert_with(|| SlotCells {
                        kind,
                        cells: Vec::new(),
                    });
                    if entry.kind != kind {
                        return Err(ParseError::MixedKinds { slot });
                    }
                    entry.cells.push((row, column));
                }
            }
        }

        for (slot, cells) in &slots {
            grid.elements.push(self.element(*slot, cells)?);
        }

        for line in constraint_lines {
            let constraint = all_consuming(constraint_line)(line.content)
                .map(|(_, c)| c)
                .map_err(|_| ParseError::InvalidConstraint {
                    value: line.content.to_string(),
                    line: line.line_number,
                })?;
            for side in [constraint.a, constraint.b] {
                let count = grid.tracks(side.axis).len();
                if side.index >= count {
                    return Err(ParseError::ConstraintOutOfRange {
                        axis: side.axis,
                        index: side.index,
                        count,
                        line: line.line_number,
                    });
                }
            }
            grid.constraints.push(constraint);
        }

        Ok(grid)
    }

    fn track(&self, word: &Word<'_>, line: usize) -> Result<RowColSpec, ParseError> {
        all_consuming(track_token)(word.text)
            .map(|(_, token)| self.options.spec(token))
            .map_err(|_| ParseError::UnknownTrack {
                token: word.text.to_string(),
                line,
            })
    }

    fn cell(&self, word: &Word<'_>, line: usize) -> Result<CellToken, ParseError> {
        all_consuming(cell_token)(word.text)
            .map(|(_, cell)| cell)
            .map_err(|_| ParseError::UnexpectedToken {
                found: word.text.to_string(),
                expected: "'-' or a slot such as L0, P1, C2".to_string(),
                line,
                column: word.column,
            })
    }

    fn element(&self, slot: usize, cells: &SlotCells) -> Result<Element, ParseError> {
        let bounds = |axis: Axis| {
            let pick = |&(r, c): &(usize, usize)| if axis == Axis::Row { r } else { c };
            let min = cells.cells.iter().map(pick).min().unwrap_or(0);
            let max = cells.cells.iter().map(pick).max().unwrap_or(0);
            (min, max - min + 1)
        };
        let (row, row_span) = bounds(Axis::Row);
        let (column, column_span) = bounds(Axis::Column);

        if cells.cells.len() != row_span * column_span {
            return Err(ParseError::NonRectangularSpan { slot });
        }

        let mut element = Element::new(slot, cells.kind, row, column).with_span(row_span, column_span);
        element.aspect = self.options.ratio(cells.kind);
        element.fallback_aspect = element.aspect;
        Ok(element)
    }
}

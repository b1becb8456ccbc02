//! Token-level parsers for template text.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{anychar, char, digit1, space0, space1},
    combinator::{map, map_opt, map_res, opt, recognize, value},
    sequence::{delimited, pair, preceded, separated_pair, tuple},
    IResult,
};

use folio_core::{ElementKind, ExtraConstraint, TrackRef};

/// A row/column size token before margin and gutter sizes are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackToken {
    Margin,
    Gutter,
    Auto,
    Star,
    CanBeNegative,
    Fixed(f64),
}

/// One grid cell: empty, or part of a numbered slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellToken {
    Empty,
    Slot { kind: ElementKind, slot: usize },
}

/// Parse an unsigned decimal number.
pub fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(pair(digit1, opt(pair(char('.'), digit1)))),
        |s: &str| s.parse::<f64>(),
    )(input)
}

/// Parse a zero-based index.
pub fn index(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

/// Parse an explicit pixel size such as `(100)`.
pub fn fixed_size(input: &str) -> IResult<&str, f64> {
    delimited(char('('), number, char(')'))(input)
}

/// Parse a row/column size token.
pub fn track_token(input: &str) -> IResult<&str, TrackToken> {
    alt((
        value(TrackToken::CanBeNegative, tag("+-")),
        value(TrackToken::Margin, char('m')),
        value(TrackToken::Gutter, char('g')),
        value(TrackToken::Auto, char('a')),
        value(TrackToken::Star, char('*')),
        map(fixed_size, TrackToken::Fixed),
    ))(input)
}

fn element_kind(input: &str) -> IResult<&str, ElementKind> {
    map_opt(anychar, ElementKind::from_code)(input)
}

/// Parse a cell token: `-`, or a kind letter followed by a slot number.
pub fn cell_token(input: &str) -> IResult<&str, CellToken> {
    alt((
        value(CellToken::Empty, char('-')),
        map(pair(element_kind, index), |(kind, slot)| CellToken::Slot { kind, slot }),
    ))(input)
}

/// Parse `row3` or `col12`.
pub fn track_ref(input: &str) -> IResult<&str, TrackRef> {
    alt((
        map(preceded(tag("row"), index), TrackRef::row),
        map(preceded(tag("col"), index), TrackRef::column),
    ))(input)
}

/// Parse an equality line such as `and row0=row4`.
pub fn constraint_line(input: &str) -> IResult<&str, ExtraConstraint> {
    map(
        preceded(
            pair(tag("and"), space1),
            separated_pair(track_ref, tuple((space0, char('='), space0)), track_ref),
        ),
        |(a, b)| ExtraConstraint::new(a, b),
    )(input)
}

/// A whitespace-separated word and its 1-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
    pub text: &'a str,
    pub column: usize,
}

/// Split a line into words, remembering where each starts.
pub fn words(line: &str) -> Vec<Word<'_>> {
    let mut result = Vec::new();
    let mut start = None;

    for (i, c) in line.char_indices() {
        match (c.is_whitespace(), start) {
            (false, None) => start = Some(i),
            (true, Some(s)) => {
                result.push(Word { text: &line[s..i], column: s + 1 });
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        result.push(Word { text: &line[s..], column: s + 1 });
    }

    result
}

/// A non-blank, non-comment line of input.
#[derive(Debug, Clone)]
pub struct Line<'a> {
    /// Full line including leading whitespace
    pub raw: &'a str,
    pub content: &'a str,
    pub line_number: usize,
}

/// Split input into lines, skipping blank and `//` comment lines.
pub fn split_lines(input: &str) -> Vec<Line<'_>> {
    input
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("//") {
                None
            } else {
                Some(Line {
                    raw: line,
                    content: trimmed,
                    line_number: i + 1,
                })
            }
        })
        .collect()
}

//! Named collections of templates.

use indexmap::IndexMap;
use tracing::debug;

use folio_core::{GridSpec, ParseError};

use crate::grammar::{TemplateOptions, TemplateParser};
use crate::lexer::{split_lines, Line};

const BUILTIN: &str = include_str!("../templates/photo_pages.folio");

/// Templates keyed by name, in file order.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    templates: IndexMap<String, GridSpec>,
}

impl Catalog {
    /// The photo-page templates shipped with the engine, with default options.
    pub fn builtin() -> Result<Self, ParseError> {
        Self::parse(BUILTIN, &TemplateOptions::default())
    }

    /// Parse a catalog: a `name:` line followed by the template block, repeated.
    pub fn parse(input: &str, options: &TemplateOptions) -> Result<Self, ParseError> {
        let lines = split_lines(input);
        let mut templates = IndexMap::new();
        let mut pos = 0;

        while pos < lines.len() {
            let header = &lines[pos];
            let name = template_name(header).ok_or_else(|| ParseError::UnexpectedToken {
                found: header.content.to_string(),
                expected: "template name followed by ':'".to_string(),
                line: header.line_number,
                column: 1,
            })?;

            let start = pos + 1;
            let end = lines[start..]
                .iter()
                .position(|line| template_name(line).is_some())
                .map_or(lines.len(), |offset| start + offset);

            let grid = TemplateParser::new(&lines[start..end], options).parse()?;
            if templates.insert(name.to_string(), grid).is_some() {
                return Err(ParseError::DuplicateTemplate { name: name.to_string() });
            }
            pos = end;
        }

        debug!(templates = templates.len(), "parsed template catalog");
        Ok(Self { templates })
    }

    pub fn get(&self, name: &str) -> Option<&GridSpec> {
        self.templates.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GridSpec)> {
        self.templates.iter().map(|(name, grid)| (name.as_str(), grid))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn template_name<'a>(line: &Line<'a>) -> Option<&'a str> {
    let name = line.content.strip_suffix(':')?;
    (!name.is_empty() && !name.contains(char::is_whitespace)).then_some(name)
}

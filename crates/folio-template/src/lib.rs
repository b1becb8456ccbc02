//! Template text format for Folio page layouts.
//!
//! A template describes a page as a grid of row and column sizes with photo
//! and caption slots drawn into the cells. This crate parses that format into
//! a [`GridSpec`], ships the built-in photo page [`Catalog`], and renders
//! grids back to text for debugging.
//!
//! Built on `nom` for the token-level parsers.
//!
//! # Example
//!
//! ```
//! use folio_template::{parse_template, TemplateOptions};
//!
//! let grid = parse_template(
//!     r#"
//!          m      a      m
//!   m      -      -      -
//!   a      -     L0      -
//!   m      -      -      -
//! "#,
//!     &TemplateOptions::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(grid.elements.len(), 1);
//! ```

mod catalog;
mod grammar;
mod lexer;
mod render;

pub use catalog::Catalog;
pub use grammar::TemplateOptions;
pub use render::{render_sizes, render_template};

use folio_core::{GridSpec, ParseError};

/// Parse a single template block.
pub fn parse_template(source: &str, options: &TemplateOptions) -> Result<GridSpec, ParseError> {
    grammar::parse(source, options)
}

//! Aspect-preserving page layout for Folio.
//!
//! Given a [`GridSpec`] and a page size, this crate finds row heights and
//! column widths so that every photo keeps its aspect ratio and the grid fills
//! the page, leaving any space it can't use as padding.
//!
//! # Architecture
//!
//! 1. **Track lists**: each attempt works on its own copy of the row and column specs
//! 2. **Constraints**: sums, aspect ratios, fixed sizes and star rules become linear equations
//! 3. **Attempts**: solve, then pin negative tracks to zero and solve once more
//! 4. **Rounds**: natural fit, else slack width or slack height
//! 5. **Fallback**: a second round with the template ratios, flagged as degraded
//!
//! # Example
//!
//! ```
//! use folio_core::PageSize;
//! use folio_layout::LayoutEngine;
//! use folio_template::Catalog;
//!
//! let catalog = Catalog::builtin().unwrap();
//! let grid = catalog.get("875x1125_32_2p0h2v1t").unwrap();
//!
//! let layout = LayoutEngine::default()
//!     .compute_sizes(PageSize::new(1125.0, 875.0), grid)
//!     .unwrap();
//!
//! for element in &grid.elements {
//!     println!("{}: {:?}", element.slot, layout.sizes.element_bounds(element));
//! }
//! ```

mod attempt;
mod constraints;
mod engine;
mod sizes;
mod tracks;

pub use constraints::{AspectChoice, ConstraintSystem};
pub use engine::{compute_sizes, LayoutEngine, LayoutOptions, PageLayout};
pub use sizes::{Bounds, GridSizes};
pub use tracks::{ExtraSpace, TrackList};

pub use folio_core::{GridSpec, LayoutError, LayoutFailure, PageSize, RoundFailures};

//! Core data model for the Folio page layout engine.
//!
//! This crate provides the types shared by every other folio crate:
//! - Track specifications (`RowColSpec`) and aspect ratios (`Ratio`)
//! - Elements, equality constraints and the complete `GridSpec` input
//! - Error types

pub mod errors;
pub mod grid;
pub mod types;

pub use errors::*;
pub use grid::*;
pub use types::*;

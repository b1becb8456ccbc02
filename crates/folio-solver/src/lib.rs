//! Linear system solving for the Folio layout engine.
//!
//! This crate implements:
//! - A growable [`SystemBuilder`] of sparse equations
//! - Its dense, fixed-size form [`LinearSystem`]
//! - Gaussian elimination with partial pivoting for tall systems
//!
//! Unknowns that no equation pins down come back as `NaN` in the
//! [`Solution`] rather than as an error, so callers can tell "free" from
//! "contradictory".

mod gauss;
mod matrix;

pub use gauss::{solve, Solution, SolveError, EPSILON};
pub use matrix::{Equation, LinearSystem, SystemBuilder};

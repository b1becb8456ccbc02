//! Gaussian elimination with partial pivoting.
//!
//! Works on tall systems (`m >= n`). The pivot search walks forward through
//! the columns, so an all-zero column is skipped instead of stopping
//! elimination. Surplus rows must reduce to `0 = 0`; anything else means the
//! equations contradict each other.

use thiserror::Error;
use tracing::{trace, warn};

use crate::matrix::LinearSystem;

/// Tolerance for "effectively zero" throughout elimination.
pub const EPSILON: f64 = 1e-10;

fn near_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Why a system has no usable solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("{equations} equations cannot determine {unknowns} unknowns")]
    TooFewEquations { equations: usize, unknowns: usize },

    #[error("equation {row} contradicts the others")]
    Inconsistent { row: usize },

    #[error("equation {row} depends on unresolved unknown {unknown}")]
    DependsOnUnresolved { row: usize, unknown: usize },
}

/// Values of the unknowns. Unknowns left free are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    values: Vec<f64>,
}

impl Solution {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Value of one unknown, or `None` if it was left unresolved.
    pub fn get(&self, unknown: usize) -> Option<f64> {
        self.values.get(unknown).copied().filter(|v| !v.is_nan())
    }

    /// True when every unknown was resolved.
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(|v| !v.is_nan())
    }

    /// Indices of unresolved unknowns.
    pub fn unresolved(&self) -> impl Iterator<Item = usize> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_nan())
            .map(|(i, _)| i)
    }
}

/// Solve `A·x = b`.
pub fn solve(system: &LinearSystem) -> Result<Solution, SolveError> {
    let m = system.rows();
    let n = system.unknowns();
    if m < n {
        return Err(SolveError::TooFewEquations {
            equations: m,
            unknowns: n,
        });
    }

    let mut a = system.coefficients().to_vec();
    let mut b = system.rhs().to_vec();

    let rank = eliminate(&mut a, &mut b, m, n);
    trace!(equations = m, unknowns = n, rank, "elimination finished");

    let values = back_substitute(&a, &b, m, n)?;

    if cfg!(debug_assertions) {
        let residual = system.residual(&values);
        let scale = 1.0 + system.rhs().iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        if residual > 1e-6 * scale {
            warn!(residual, "solution does not satisfy the original system");
        }
    }

    Ok(Solution { values })
}

/// Reduce to row echelon form in place. Returns the number of pivots.
fn eliminate(a: &mut [f64], b: &mut [f64], m: usize, n: usize) -> usize {
    let mut next_column = 0;
    let mut rank = 0;

    for p in 0..m {
        let Some((pivot_row, column)) = find_pivot(a, m, n, p, next_column) else {
            break;
        };

        if pivot_row != p {
            for j in 0..n {
                a.swap(p * n + j, pivot_row * n + j);
            }
            b.swap(p, pivot_row);
        }

        let pivot = a[p * n + column];
        for i in p + 1..m {
            let factor = a[i * n + column] / pivot;
            if factor == 0.0 {
                continue;
            }
            for j in column + 1..n {
                a[i * n + j] -= factor * a[p * n + j];
            }
            a[i * n + column] = 0.0;
            b[i] -= factor * b[p];
        }

        next_column = column + 1;
        rank += 1;
    }

    rank
}

/// First column at or after `start` holding a usable entry in rows `p..m`,
/// paired with the row of its largest-magnitude entry.
fn find_pivot(a: &[f64], m: usize, n: usize, p: usize, start: usize) -> Option<(usize, usize)> {
    (start..n).find_map(|column| {
        let mut best = p;
        for i in p + 1..m {
            if a[i * n + column].abs() > a[best * n + column].abs() {
                best = i;
            }
        }
        (!near_zero(a[best * n + column])).then_some((best, column))
    })
}

fn back_substitute(a: &[f64], b: &[f64], m: usize, n: usize) -> Result<Vec<f64>, SolveError> {
    let mut x = vec![f64::NAN; n];

    for i in (0..m).rev() {
        let row = &a[i * n..(i + 1) * n];

        if i >= n {
            if row.iter().any(|&v| !near_zero(v)) || !near_zero(b[i]) {
                return Err(SolveError::Inconsistent { row: i });
            }
            continue;
        }

        let Some(column) = (i..n).find(|&j| !near_zero(row[j])) else {
            if !near_zero(b[i]) {
                return Err(SolveError::Inconsistent { row: i });
            }
            continue;
        };

        let mut sum = 0.0;
        for j in column + 1..n {
            if near_zero(row[j]) {
                continue;
            }
            if x[j].is_nan() {
                return Err(SolveError::DependsOnUnresolved { row: i, unknown: j });
            }
            sum += row[j] * x[j];
        }
        x[column] = (b[i] - sum) / row[column];
    }

    Ok(x)
}

//! Equation assembly and the dense matrix handed to elimination.

use std::fmt;

use smallvec::SmallVec;

/// A single linear equation: Σ(coefficient * unknown) = rhs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Equation {
    terms: SmallVec<[(usize, f64); 4]>,
    rhs: f64,
}

impl Equation {
    /// Create an equation with no terms.
    pub fn new(rhs: f64) -> Self {
        Self {
            terms: SmallVec::new(),
            rhs,
        }
    }

    /// Builder form of [`Equation::add_term`].
    pub fn term(mut self, unknown: usize, coefficient: f64) -> Self {
        self.add_term(unknown, coefficient);
        self
    }

    /// Add a term, merging it with an existing term for the same unknown.
    pub fn add_term(&mut self, unknown: usize, coefficient: f64) {
        match self.terms.iter_mut().find(|(u, _)| *u == unknown) {
            Some((_, existing)) => *existing += coefficient,
            None => self.terms.push((unknown, coefficient)),
        }
    }

    pub fn terms(&self) -> &[(usize, f64)] {
        &self.terms
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }
}

/// Growable collection of equations over a fixed number of unknowns.
#[derive(Debug, Clone, Default)]
pub struct SystemBuilder {
    unknowns: usize,
    equations: Vec<Equation>,
}

impl SystemBuilder {
    pub fn new(unknowns: usize) -> Self {
        Self {
            unknowns,
            equations: Vec::new(),
        }
    }

    pub fn push(&mut self, equation: Equation) {
        debug_assert!(
            equation.terms.iter().all(|(u, _)| *u < self.unknowns),
            "equation references an unknown outside 0..{}",
            self.unknowns
        );
        self.equations.push(equation);
    }

    pub fn unknowns(&self) -> usize {
        self.unknowns
    }

    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    pub fn len(&self) -> usize {
        self.equations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    /// Materialize the equations into a dense row-major matrix.
    pub fn build(&self) -> LinearSystem {
        let n = self.unknowns;
        let mut coefficients = vec![0.0; self.equations.len() * n];
        let mut rhs = Vec::with_capacity(self.equations.len());

        for (row, equation) in self.equations.iter().enumerate() {
            for &(unknown, coefficient) in &equation.terms {
                coefficients[row * n + unknown] += coefficient;
            }
            rhs.push(equation.rhs);
        }

        LinearSystem {
            rows: self.equations.len(),
            unknowns: n,
            coefficients,
            rhs,
        }
    }
}

/// Dense `A·x = b` with `A` stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    rows: usize,
    unknowns: usize,
    coefficients: Vec<f64>,
    rhs: Vec<f64>,
}

impl LinearSystem {
    /// Build a system from nested rows. Every row must have the same length.
    pub fn from_rows(a: &[Vec<f64>], b: &[f64]) -> Self {
        assert_eq!(a.len(), b.len(), "one right-hand side per row");
        let unknowns = a.first().map_or(0, Vec::len);
        assert!(a.iter().all(|row| row.len() == unknowns), "ragged matrix");

        Self {
            rows: a.len(),
            unknowns,
            coefficients: a.iter().flatten().copied().collect(),
            rhs: b.to_vec(),
        }
    }

    /// Number of equations.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn unknowns(&self) -> usize {
        self.unknowns
    }

    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.coefficients[row * self.unknowns + column]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.coefficients[row * self.unknowns..(row + 1) * self.unknowns]
    }

    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    pub(crate) fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Largest |Σ a·x − b| over rows whose unknowns are all resolved.
    pub fn residual(&self, x: &[f64]) -> f64 {
        (0..self.rows)
            .filter_map(|i| {
                let mut total = 0.0;
                for (j, &a) in self.row(i).iter().enumerate() {
                    if a == 0.0 {
                        continue;
                    }
                    if x[j].is_nan() {
                        return None;
                    }
                    total += a * x[j];
                }
                Some((total - self.rhs[i]).abs())
            })
            .fold(0.0, f64::max)
    }
}

impl fmt::Display for LinearSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            for a in self.row(i) {
                write!(f, "{:>9.3}", a)?;
            }
            writeln!(f, " | {:>9.3}", self.rhs[i])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equation_merges_terms() {
        let equation = Equation::new(0.0).term(1, 1.0).term(2, -0.5).term(1, 1.0);
        assert_eq!(equation.terms(), &[(1, 2.0), (2, -0.5)]);
    }

    #[test]
    fn test_build_dense_matrix() {
        let mut builder = SystemBuilder::new(3);
        builder.push(Equation::new(10.0).term(0, 1.0).term(2, 1.0));
        builder.push(Equation::new(4.0).term(1, 2.0));
        let system = builder.build();

        assert_eq!(system.rows(), 2);
        assert_eq!(system.unknowns(), 3);
        assert_eq!(system.row(0), &[1.0, 0.0, 1.0]);
        assert_eq!(system.row(1), &[0.0, 2.0, 0.0]);
        assert_eq!(system.rhs(), &[10.0, 4.0]);
    }

    #[test]
    fn test_from_rows_matches_builder() {
        let dense = LinearSystem::from_rows(&[vec![1.0, 0.0, 1.0], vec![0.0, 2.0, 0.0]], &[10.0, 4.0]);
        let mut builder = SystemBuilder::new(3);
        builder.push(Equation::new(10.0).term(0, 1.0).term(2, 1.0));
        builder.push(Equation::new(4.0).term(1, 2.0));
        assert_eq!(dense, builder.build());
    }

    #[test]
    fn test_residual_skips_unresolved_rows() {
        let system = LinearSystem::from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0]], &[3.0, 5.0]);
        assert!((system.residual(&[3.5, f64::NAN]) - 0.5).abs() < 1e-12);
    }
}

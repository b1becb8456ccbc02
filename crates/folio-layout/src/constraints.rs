//! Translation of a grid into linear equations.
//!
//! Unknowns are the row heights followed by the column widths, including any
//! slot injected for the attempt. Equations, in order:
//!
//! 1. Rows sum to the page height, columns to the page width.
//! 2. Every element with a ratio `W:H`: Σ rows − (H/W)·Σ columns = 0.
//! 3. Every fixed track equals its size.
//! 4. With slack on one axis, star tracks across the page are pinned to zero and
//!    ordinary star tracks along the slack axis are made equal.
//! 5. Every explicit equality.

use std::fmt;

use folio_core::{Axis, Element, GridSpec, PageSize, Ratio};
use folio_solver::{Equation, LinearSystem, SystemBuilder};

use crate::tracks::{ExtraSpace, TrackList};

/// Which ratio of each element the equations use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AspectChoice {
    Desired,
    Fallback,
}

impl AspectChoice {
    pub fn ratio(&self, element: &Element) -> Option<Ratio> {
        match self {
            AspectChoice::Desired => element.aspect,
            AspectChoice::Fallback => element.fallback_aspect,
        }
    }
}

/// Equations of a single attempt.
#[derive(Debug, Clone)]
pub struct ConstraintSystem<'a> {
    tracks: &'a TrackList,
    builder: SystemBuilder,
}

impl<'a> ConstraintSystem<'a> {
    /// Every constraint and span in `grid` must fit `tracks`; see [`GridSpec::validate`].
    pub fn build(
        page: PageSize,
        tracks: &'a TrackList,
        grid: &GridSpec,
        extra: ExtraSpace,
        aspect: AspectChoice,
    ) -> Self {
        let mut system = Self {
            tracks,
            builder: SystemBuilder::new(tracks.unknowns()),
        };
        system.add_sums(page);
        system.add_aspects(grid, aspect);
        system.add_fixed();
        system.add_star_rules(extra);
        system.add_explicit(grid);
        system
    }

    pub fn equations(&self) -> &[Equation] {
        self.builder.equations()
    }

    pub fn to_linear_system(&self) -> LinearSystem {
        self.builder.build()
    }

    fn add_sums(&mut self, page: PageSize) {
        for axis in [Axis::Row, Axis::Column] {
            let mut equation = Equation::new(page.extent(axis));
            for i in 0..self.tracks.tracks(axis).len() {
                equation.add_term(self.tracks.unknown(axis, i), 1.0);
            }
            self.builder.push(equation);
        }
    }

    fn add_aspects(&mut self, grid: &GridSpec, aspect: AspectChoice) {
        for element in &grid.elements {
            let Some(ratio) = aspect.ratio(element) else {
                continue;
            };
            let k = ratio.height_per_width();
            let mut equation = Equation::new(0.0);
            for row in element.rows() {
                equation.add_term(self.tracks.unknown(Axis::Row, row), 1.0);
            }
            for column in element.columns() {
                equation.add_term(self.tracks.unknown(Axis::Column, column), -k);
            }
            self.builder.push(equation);
        }
    }

    fn add_fixed(&mut self) {
        for axis in [Axis::Row, Axis::Column] {
            for (i, spec) in self.tracks.tracks(axis).iter().enumerate() {
                if let Some(px) = spec.fixed_size() {
                    self.builder
                        .push(Equation::new(px).term(self.tracks.unknown(axis, i), 1.0));
                }
            }
        }
    }

    fn add_star_rules(&mut self, extra: ExtraSpace) {
        let (pinned, equal) = match extra {
            ExtraSpace::None => return,
            ExtraSpace::Width => (Axis::Row, Axis::Column),
            ExtraSpace::Height => (Axis::Column, Axis::Row),
        };

        for (i, spec) in self.tracks.tracks(pinned).iter().enumerate() {
            if spec.is_star() && !spec.can_be_negative() && !spec.is_slack() {
                self.builder
                    .push(Equation::new(0.0).term(self.tracks.unknown(pinned, i), 1.0));
            }
        }

        let mut stars = self
            .tracks
            .tracks(equal)
            .iter()
            .enumerate()
            .filter(|(_, spec)| spec.is_ordinary_star())
            .map(|(i, _)| self.tracks.unknown(equal, i));
        if let Some(first) = stars.next() {
            let rest: Vec<usize> = stars.collect();
            for other in rest {
                self.builder
                    .push(Equation::new(0.0).term(first, 1.0).term(other, -1.0));
            }
        }
    }

    fn add_explicit(&mut self, grid: &GridSpec) {
        for constraint in &grid.constraints {
            let a = self.tracks.unknown(constraint.a.axis, constraint.a.index);
            let b = self.tracks.unknown(constraint.b.axis, constraint.b.index);
            self.builder
                .push(Equation::new(0.0).term(a, 1.0).term(b, -1.0));
        }
    }

    fn name(&self, unknown: usize) -> String {
        let rows = self.tracks.rows().len();
        if unknown < rows {
            format!("row{}", unknown)
        } else {
            format!("col{}", unknown - rows)
        }
    }
}

impl fmt::Display for ConstraintSystem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for equation in self.equations() {
            for (n, &(unknown, coefficient)) in equation.terms().iter().enumerate() {
                let name = self.name(unknown);
                let magnitude = coefficient.abs();
                let sign = match (n, coefficient < 0.0) {
                    (0, false) => "",
                    (0, true) => "-",
                    (_, false) => " + ",
                    (_, true) => " - ",
                };
                if (magnitude - 1.0).abs() < 1e-12 {
                    write!(f, "{}{}", sign, name)?;
                } else {
                    write!(f, "{}{:.4}*{}", sign, magnitude, name)?;
                }
            }
            writeln!(f, " = {}", equation.rhs())?;
        }
        Ok(())
    }
}

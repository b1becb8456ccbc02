//! A single solve attempt, including the one-shot negative size repair.

use tracing::debug;

use folio_core::{Axis, GridSpec, LayoutFailure, PageSize};
use folio_solver::{solve, SolveError};

use crate::constraints::{AspectChoice, ConstraintSystem};
use crate::engine::LayoutOptions;
use crate::sizes::GridSizes;
use crate::tracks::{ExtraSpace, TrackList};

/// Outcome of one attempt.
#[derive(Debug, Clone)]
pub(crate) struct Attempt {
    pub result: Result<GridSizes, LayoutFailure>,
    /// Tracks the attempt finished with, repaired if a repair ran. Never
    /// contains the slack slot.
    pub tracks: TrackList,
}

/// Solve once with `extra` slack. If tracks come out negative, pin them to
/// zero, add an absorbing star track per affected axis and solve again.
pub(crate) fn attempt_layout(
    page: PageSize,
    base: &TrackList,
    grid: &GridSpec,
    extra: ExtraSpace,
    aspect: AspectChoice,
    options: &LayoutOptions,
) -> Attempt {
    let tolerance = options.negative_tolerance;
    let solved = base.with_slack(extra);

    let values = match solve_tracks(page, &solved, grid, extra, aspect) {
        Ok(values) => values,
        Err(failure) => return Attempt::finish(extra, Err(failure), base.clone()),
    };

    if !has_negative(&solved, &values, tolerance) {
        return Attempt::finish(extra, Ok(extract(&solved, &values)), base.clone());
    }

    let rows = repairable_negatives(&solved, &values, Axis::Row, tolerance);
    let columns = repairable_negatives(&solved, &values, Axis::Column, tolerance);
    if rows.is_empty() && columns.is_empty() {
        return Attempt::finish(extra, Err(LayoutFailure::NegativeSizes), base.clone());
    }

    debug!(?extra, ?rows, ?columns, "pinning negative tracks to zero");
    let repaired = base.with_pinned_zero(&rows, &columns);
    let solved = repaired.with_slack(extra);
    let result = solve_tracks(page, &solved, grid, extra, aspect).and_then(|values| {
        if has_negative(&solved, &values, tolerance) {
            Err(LayoutFailure::NegativeSizes)
        } else {
            Ok(extract(&solved, &values))
        }
    });

    Attempt::finish(extra, result, repaired)
}

impl Attempt {
    fn finish(extra: ExtraSpace, result: Result<GridSizes, LayoutFailure>, tracks: TrackList) -> Self {
        match &result {
            Ok(sizes) => debug!(
                ?extra,
                padding_x = sizes.padding.x,
                padding_y = sizes.padding.y,
                "layout attempt succeeded"
            ),
            Err(failure) => debug!(?extra, %failure, "layout attempt failed"),
        }
        Self { result, tracks }
    }
}

fn solve_tracks(
    page: PageSize,
    tracks: &TrackList,
    grid: &GridSpec,
    extra: ExtraSpace,
    aspect: AspectChoice,
) -> Result<Vec<f64>, LayoutFailure> {
    let system = ConstraintSystem::build(page, tracks, grid, extra, aspect);
    let solution = solve(&system.to_linear_system()).map_err(classify)?;
    if !solution.is_complete() {
        return Err(LayoutFailure::Underconstrained);
    }
    Ok(solution.into_values())
}

fn classify(error: SolveError) -> LayoutFailure {
    match error {
        SolveError::Inconsistent { .. } => LayoutFailure::Overconstrained,
        SolveError::TooFewEquations { .. } | SolveError::DependsOnUnresolved { .. } => {
            LayoutFailure::Underconstrained
        }
    }
}

fn axis_values<'v>(tracks: &TrackList, values: &'v [f64], axis: Axis) -> &'v [f64] {
    let rows = tracks.rows().len();
    match axis {
        Axis::Row => &values[..rows],
        Axis::Column => &values[rows..],
    }
}

/// Any track other than a can-be-negative one below zero, the slack included.
fn has_negative(tracks: &TrackList, values: &[f64], tolerance: f64) -> bool {
    [Axis::Row, Axis::Column].into_iter().any(|axis| {
        tracks
            .tracks(axis)
            .iter()
            .zip(axis_values(tracks, values, axis))
            .any(|(spec, &v)| !spec.can_be_negative() && v < -tolerance)
    })
}

/// Negative tracks the repair may pin. Slack and can-be-negative tracks are left alone.
fn repairable_negatives(tracks: &TrackList, values: &[f64], axis: Axis, tolerance: f64) -> Vec<usize> {
    tracks
        .tracks(axis)
        .iter()
        .zip(axis_values(tracks, values, axis))
        .enumerate()
        .filter(|(_, (spec, &v))| !spec.can_be_negative() && !spec.is_slack() && v < -tolerance)
        .map(|(i, _)| i)
        .collect()
}

/// Slice off injected tracks, counting their space as padding.
fn extract(tracks: &TrackList, values: &[f64]) -> GridSizes {
    let mut sizes = [Vec::new(), Vec::new()];
    let mut padding = [0.0, 0.0];

    for (slot, axis) in [Axis::Row, Axis::Column].into_iter().enumerate() {
        let original = tracks.original_count(axis);
        let solved = axis_values(tracks, values, axis);
        sizes[slot] = solved[..original].to_vec();
        padding[slot] = tracks.tracks(axis)[original..]
            .iter()
            .zip(&solved[original..])
            .filter(|(spec, &v)| spec.is_slack() || v > 0.0)
            .map(|(_, &v)| v)
            .sum();
    }

    let [row_sizes, column_sizes] = sizes;
    GridSizes::new(row_sizes, column_sizes, padding[1], padding[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{Element, ElementKind, Ratio, RowColSpec, TrackRef};

    fn run(page: PageSize, grid: &GridSpec, extra: ExtraSpace) -> Attempt {
        attempt_layout(
            page,
            &TrackList::from_grid(grid),
            grid,
            extra,
            AspectChoice::Desired,
            &LayoutOptions::default(),
        )
    }

    fn auto_cell() -> GridSpec {
        GridSpec::new(vec![RowColSpec::Auto], vec![RowColSpec::Auto]).with_element(
            Element::new(0, ElementKind::Landscape, 0, 0).with_aspect(Ratio::new(4, 3).unwrap()),
        )
    }

    #[test]
    fn test_natural_single_star_row() {
        let grid = GridSpec::new(
            vec![RowColSpec::Fixed(50.0), RowColSpec::Star(1.0), RowColSpec::Fixed(50.0)],
            vec![RowColSpec::Star(1.0)],
        );
        let sizes = run(PageSize::new(800.0, 600.0), &grid, ExtraSpace::None)
            .result
            .unwrap();
        assert!((sizes.row_sizes[1] - 500.0).abs() < 1e-9);
        assert!((sizes.column_sizes[0] - 800.0).abs() < 1e-9);
        assert_eq!(sizes.padding.x, 0.0);
    }

    #[test]
    fn test_conflicting_fixed_rows_are_overconstrained() {
        let grid = GridSpec::new(
            vec![RowColSpec::Fixed(100.0), RowColSpec::Fixed(200.0)],
            vec![RowColSpec::Star(1.0)],
        )
        .with_constraint(TrackRef::row(0), TrackRef::row(1));
        let attempt = run(PageSize::new(400.0, 300.0), &grid, ExtraSpace::None);
        assert_eq!(attempt.result.unwrap_err(), LayoutFailure::Overconstrained);
    }

    #[test]
    fn test_free_tracks_are_underconstrained() {
        let grid = GridSpec::new(
            vec![RowColSpec::Auto, RowColSpec::Auto],
            vec![RowColSpec::Auto],
        );
        let attempt = run(PageSize::new(400.0, 300.0), &grid, ExtraSpace::None);
        assert_eq!(attempt.result.unwrap_err(), LayoutFailure::Underconstrained);
    }

    #[test]
    fn test_width_slack_becomes_padding() {
        let attempt = run(PageSize::new(1000.0, 600.0), &auto_cell(), ExtraSpace::Width);
        let sizes = attempt.result.unwrap();
        assert!((sizes.row_sizes[0] - 600.0).abs() < 1e-9);
        assert!((sizes.column_sizes[0] - 800.0).abs() < 1e-9);
        assert!((sizes.padding.x - 200.0).abs() < 1e-9);
        assert_eq!(sizes.padding.y, 0.0);
        assert_eq!(sizes.column_sizes.len(), 1);
    }

    #[test]
    fn test_negative_slack_is_not_repaired() {
        let attempt = run(PageSize::new(1000.0, 600.0), &auto_cell(), ExtraSpace::Height);
        assert_eq!(attempt.result.unwrap_err(), LayoutFailure::NegativeSizes);
        assert_eq!(attempt.tracks, TrackList::from_grid(&auto_cell()));
    }

    #[test]
    fn test_can_be_negative_track_is_accepted() {
        let grid = GridSpec::new(
            vec![RowColSpec::Fixed(400.0), RowColSpec::StarCanBeNegative],
            vec![RowColSpec::Star(1.0)],
        );
        let sizes = run(PageSize::new(300.0, 300.0), &grid, ExtraSpace::None)
            .result
            .unwrap();
        assert!((sizes.row_sizes[1] + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_repair_leaves_can_be_negative_track_alone() {
        // col1 = col2 and the columns must fit 300 px after a 500 px column,
        // so both solve to -100.
        let grid = GridSpec::new(
            vec![RowColSpec::Fixed(100.0)],
            vec![RowColSpec::Fixed(500.0), RowColSpec::StarCanBeNegative, RowColSpec::Auto],
        )
        .with_constraint(TrackRef::column(1), TrackRef::column(2));

        let attempt = run(PageSize::new(300.0, 100.0), &grid, ExtraSpace::None);

        assert_eq!(
            attempt.tracks.columns(),
            &[
                RowColSpec::Fixed(500.0),
                RowColSpec::StarCanBeNegative,
                RowColSpec::Fixed(0.0),
                RowColSpec::Star(1.0),
            ]
        );
        assert_eq!(attempt.tracks.rows(), grid.rows.as_slice());
        // The absorber can't make up the 200 px overrun, and there is no second repair.
        assert_eq!(attempt.result.unwrap_err(), LayoutFailure::NegativeSizes);
    }

    #[test]
    fn test_negative_track_is_pinned_and_absorbed() {
        //        a    g    a    g    a
        //   a   C3    -   L0   L0   L0
        //   g    -    -    -    -    -
        //   a   L2   L2   L2    -   L1
        let gutter = RowColSpec::Fixed(20.0);
        let auto = RowColSpec::Auto;
        let landscape = |slot, row, column, span| {
            Element::new(slot, ElementKind::Landscape, row, column)
                .with_span(1, span)
                .with_aspect(Ratio::LANDSCAPE)
        };
        let grid = GridSpec::new(vec![auto, gutter, auto], vec![auto, gutter, auto, gutter, auto])
            .with_element(landscape(0, 0, 2, 3))
            .with_element(landscape(1, 2, 4, 1))
            .with_element(landscape(2, 2, 0, 3))
            .with_element(Element::new(3, ElementKind::Caption, 0, 0));

        let attempt = run(PageSize::new(1200.0, 600.0), &grid, ExtraSpace::None);

        // Column 2 solved to -330 before the repair.
        assert_eq!(attempt.tracks.columns()[2], RowColSpec::Fixed(0.0));
        assert_eq!(attempt.tracks.columns().len(), 6);

        let sizes = attempt.result.unwrap();
        let expected_columns = [405.0, 20.0, 0.0, 20.0, 425.0];
        for (got, want) in sizes.column_sizes.iter().zip(expected_columns) {
            assert!((got - want).abs() < 1e-6, "{:?}", sizes.column_sizes);
        }
        assert!((sizes.padding.x - 330.0).abs() < 1e-6);
        assert!((sizes.row_sizes[0] - 890.0 / 3.0).abs() < 1e-6);
        assert!((sizes.row_sizes[2] - 850.0 / 3.0).abs() < 1e-6);
    }
}

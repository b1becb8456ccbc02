//! Small hand-written grids with known answers.

use folio_core::{GridSpec, LayoutError, LayoutFailure, PageSize, Ratio, RoundFailures};
use folio_layout::{compute_sizes, GridSizes, LayoutEngine, TrackList};
use folio_template::{parse_template, render_sizes, TemplateOptions};

fn template(source: &str) -> GridSpec {
    parse_template(source, &TemplateOptions::default()).unwrap()
}

fn assert_close(got: &[f64], want: &[f64]) {
    assert_eq!(got.len(), want.len(), "{got:?}");
    for (g, w) in got.iter().zip(want) {
        assert!((g - w).abs() < 0.001, "{got:?} != {want:?}");
    }
}

fn solve(grid: &GridSpec, width: f64, height: f64) -> GridSizes {
    let layout = compute_sizes(PageSize::new(width, height), grid).unwrap();
    assert!(!layout.degraded);
    layout.sizes
}

fn auto_cell() -> GridSpec {
    template(
        r#"
          a
    a    L0
"#,
    )
    .with_aspect(0, Ratio::new(4, 3).unwrap())
}

fn pinned_column() -> GridSpec {
    template(
        r#"
          a      g      a      g      a
    a    C3      -     L0     L0     L0
    g     -      -      -      -      -
    a    L2     L2     L2      -     L1
"#,
    )
}

#[test]
fn test_single_star_cell() {
    let grid = template(
        r#"
          *
    *    L0
"#,
    )
    .with_aspect(0, Ratio::new(4, 3).unwrap());
    let sizes = solve(&grid, 800.0, 600.0);
    assert_close(&sizes.row_sizes, &[600.0]);
    assert_close(&sizes.column_sizes, &[800.0]);
    assert_eq!(sizes.padding.x, 0.0);
    assert_eq!(sizes.padding.y, 0.0);
}

#[test]
fn test_wide_page_pads_horizontally() {
    let sizes = solve(&auto_cell(), 1000.0, 600.0);
    assert_close(&sizes.row_sizes, &[600.0]);
    assert_close(&sizes.column_sizes, &[800.0]);
    assert!((sizes.padding.x - 200.0).abs() < 0.001);
    assert!(sizes.padding.y.abs() < 0.001);
}

#[test]
fn test_tall_page_pads_vertically() {
    let sizes = solve(&auto_cell(), 800.0, 1000.0);
    assert_close(&sizes.row_sizes, &[600.0]);
    assert_close(&sizes.column_sizes, &[800.0]);
    assert!(sizes.padding.x.abs() < 0.001);
    assert!((sizes.padding.y - 400.0).abs() < 0.001);
}

#[test]
fn test_round_failures_name_every_attempt() {
    // Stars can't absorb slack, so only an exact fit works, and 4:3 in
    // 1000x600 isn't one.
    let grid = template(
        r#"
          *
    *    L0
"#,
    )
    .with_aspect(0, Ratio::new(4, 3).unwrap());
    let overconstrained = RoundFailures {
        natural: LayoutFailure::Overconstrained,
        width_slack: LayoutFailure::Overconstrained,
        height_slack: LayoutFailure::Overconstrained,
    };
    let err = LayoutEngine::default()
        .compute_sizes(PageSize::new(1000.0, 600.0), &grid)
        .unwrap_err();
    assert_eq!(
        err,
        LayoutError::Unsolvable {
            primary: overconstrained,
            fallback: Some(overconstrained),
        }
    );
}

#[test]
fn test_conflicting_constraint_is_unsolvable() {
    let grid = template(
        r#"
          *
  (100)   -
  (200)   -
  and row0=row1
"#,
    );
    let err = compute_sizes(PageSize::new(400.0, 300.0), &grid).unwrap_err();
    match err {
        LayoutError::Unsolvable { primary, .. } => {
            assert_eq!(primary.natural, LayoutFailure::Overconstrained);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_single_star_row_takes_remainder() {
    let grid = template(
        r#"
          *
    m     -
    *     -
    m     -
"#,
    );
    let sizes = solve(&grid, 800.0, 600.0);
    assert_close(&sizes.row_sizes, &[50.0, 500.0, 50.0]);
    assert_close(&sizes.column_sizes, &[800.0]);
}

#[test]
fn test_negative_column_is_pinned_and_padded() {
    let sizes = solve(&pinned_column(), 1200.0, 600.0);
    assert_close(&sizes.column_sizes, &[405.0, 20.0, 0.0, 20.0, 425.0]);
    assert_close(&sizes.row_sizes, &[890.0 / 3.0, 20.0, 850.0 / 3.0]);
    assert!((sizes.padding.x - 330.0).abs() < 0.001);
    assert!(sizes.padding.y.abs() < 0.001);

    let sizes = solve(&pinned_column(), 1000.0, 600.0);
    assert_close(&sizes.column_sizes, &[405.0, 20.0, 0.0, 20.0, 425.0]);
    assert!((sizes.padding.x - 130.0).abs() < 0.001);
}

#[test]
fn test_narrow_page_needs_no_repair() {
    let grid = pinned_column();
    let sizes = solve(&grid, 800.0, 600.0);
    assert_close(&sizes.column_sizes, &[300.0, 20.0, 70.0, 20.0, 390.0]);
    assert_close(&sizes.row_sizes, &[320.0, 20.0, 260.0]);
    assert_eq!(sizes.padding.x, 0.0);

    // The list the engine starts from still has every column as written.
    assert_eq!(TrackList::from_grid(&grid).columns(), grid.columns.as_slice());
}

#[test]
fn test_star_columns_share_width_slack() {
    let grid = template(
        r#"
          *      g      *
    a    L0     L0     L0
"#,
    );
    let sizes = solve(&grid, 1000.0, 300.0);
    assert_close(&sizes.row_sizes, &[300.0]);
    assert_close(&sizes.column_sizes, &[215.0, 20.0, 215.0]);
    assert!((sizes.padding.x - 550.0).abs() < 0.001);
}

#[test]
fn test_star_rows_share_height_slack() {
    let grid = template(
        r#"
          a
    *    P0
    g    P0
    *    P0
"#,
    );
    let sizes = solve(&grid, 300.0, 1000.0);
    assert_close(&sizes.column_sizes, &[300.0]);
    assert_close(&sizes.row_sizes, &[215.0, 20.0, 215.0]);
    assert!((sizes.padding.y - 550.0).abs() < 0.001);
}

#[test]
fn test_element_bounds_are_centred() {
    let grid = auto_cell();
    let sizes = solve(&grid, 1000.0, 600.0);
    let bounds = sizes.element_bounds(&grid.elements[0]);
    assert!((bounds.x - 100.0).abs() < 0.001);
    assert!(bounds.y.abs() < 0.001);
    assert!((bounds.right() - 900.0).abs() < 0.001);
    assert!((bounds.bottom() - 600.0).abs() < 0.001);
}

#[test]
fn test_render_sizes_shows_solution() {
    let grid = template(
        r#"
          *
    m     -
    *     -
    m     -
"#,
    );
    let sizes = solve(&grid, 800.0, 600.0);
    let text = render_sizes(&grid, &sizes.row_sizes, &sizes.column_sizes);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0].trim(), "800.0");
    assert!(lines[2].trim_start().starts_with("500.0"));
}

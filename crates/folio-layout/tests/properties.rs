//! Property tests over random page sizes.

use std::sync::OnceLock;

use proptest::prelude::*;

use folio_core::{Axis, LayoutError, PageSize};
use folio_layout::LayoutEngine;
use folio_template::Catalog;

fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(|| Catalog::builtin().unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn solved_grids_fill_the_page(
        index in 0usize..30,
        width in 400.0f64..2500.0,
        height in 400.0f64..2500.0,
    ) {
        let (name, grid) = catalog().iter().nth(index).unwrap();
        let page = PageSize::new(width, height);

        match LayoutEngine::default().compute_sizes(page, grid) {
            Ok(layout) => {
                let sizes = &layout.sizes;
                let rows = sizes.extent(Axis::Row) + sizes.padding.y;
                let columns = sizes.extent(Axis::Column) + sizes.padding.x;
                prop_assert!((rows - height).abs() < 1e-6, "{}: {} != {}", name, rows, height);
                prop_assert!((columns - width).abs() < 1e-6, "{}: {} != {}", name, columns, width);
                prop_assert!(sizes.padding.x > -1e-9 && sizes.padding.y > -1e-9);
            }
            Err(err) => {
                prop_assert!(matches!(err, LayoutError::Unsolvable { .. }), "{}: {}", name, err);
            }
        }
    }

    #[test]
    fn layout_is_deterministic(
        index in 0usize..30,
        width in 400.0f64..2500.0,
        height in 400.0f64..2500.0,
    ) {
        let (_, grid) = catalog().iter().nth(index).unwrap();
        let page = PageSize::new(width, height);
        let engine = LayoutEngine::default();
        prop_assert_eq!(engine.compute_sizes(page, grid), engine.compute_sizes(page, grid));
    }
}

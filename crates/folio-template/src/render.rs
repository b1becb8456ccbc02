//! Debug renderers that print a grid back in template form.

use folio_core::{GridSpec, RowColSpec};

use crate::grammar::TemplateOptions;

/// Cell labels (`L0`, `P1`, `C2`, `-`) laid out row by row.
fn cell_labels(grid: &GridSpec) -> Vec<Vec<String>> {
    let mut labels = vec![vec!["-".to_string(); grid.columns.len()]; grid.rows.len()];
    for element in &grid.elements {
        let label = format!("{}{}", element.kind.code(), element.slot);
        for row in element.rows() {
            for column in element.columns() {
                if let Some(cell) = labels.get_mut(row).and_then(|r| r.get_mut(column)) {
                    *cell = label.clone();
                }
            }
        }
    }
    labels
}

fn track_label(spec: &RowColSpec, options: &TemplateOptions) -> String {
    match *spec {
        RowColSpec::Fixed(px) if px == options.margin => "m".to_string(),
        RowColSpec::Fixed(px) if px == options.gutter => "g".to_string(),
        RowColSpec::Fixed(px) => format!("({})", px),
        RowColSpec::Auto => "a".to_string(),
        RowColSpec::Star(_) | RowColSpec::StarSlack => "*".to_string(),
        RowColSpec::StarCanBeNegative => "+-".to_string(),
    }
}

fn render_rows(out: &mut String, headers: &[String], labels: &[Vec<String>]) {
    for (header, cells) in headers.iter().zip(labels) {
        out.push_str(&format!("{:>7}", header));
        for cell in cells {
            out.push_str(&format!("{:>7}", cell));
        }
        out.push('\n');
    }
}

/// Render the specs and cells in the same format the parser reads.
pub fn render_template(grid: &GridSpec, options: &TemplateOptions) -> String {
    let mut out = format!("{:>7}", "");
    for spec in &grid.columns {
        out.push_str(&format!("{:>7}", track_label(spec, options)));
    }
    out.push('\n');

    let headers: Vec<String> = grid.rows.iter().map(|s| track_label(s, options)).collect();
    render_rows(&mut out, &headers, &cell_labels(grid));

    for constraint in &grid.constraints {
        out.push_str(&format!("    {}\n", constraint));
    }
    out
}

/// Render solved sizes in place of the specs, one decimal each.
pub fn render_sizes(grid: &GridSpec, row_sizes: &[f64], column_sizes: &[f64]) -> String {
    let mut out = format!("{:>7}", "");
    for size in column_sizes {
        out.push_str(&format!("{:>7.1}", size));
    }
    out.push('\n');

    let headers: Vec<String> = row_sizes.iter().map(|s| format!("{:.1}", s)).collect();
    render_rows(&mut out, &headers, &cell_labels(grid));
    out
}

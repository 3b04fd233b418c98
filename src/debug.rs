use crate::dense::Mat;
use pretty_dtoa::{dtoa, FmtFloatConfig};

const FLOAT_CONFIG: FmtFloatConfig = FmtFloatConfig::default()
    .add_point_zero(false)
    .max_significant_digits(9);

pub fn format_f64(f: f64) -> String {
    dtoa(f, FLOAT_CONFIG)
}

pub fn format_f64_vec(v: &[f64]) -> String {
    let a: Vec<String> = v.iter().map(|&f| format_f64(f)).collect();
    format!("[{}]", a.join(", "))
}

/// Renders the matrix one row per line with right-aligned columns.
/// An augmented matrix gets a `|` before its last column.
pub fn format_mat(mat: &Mat<f64>, augmented: bool) -> String {
    let cells: Vec<Vec<String>> = (0..mat.rows())
        .map(|i| mat.row(i).iter().map(|&f| format_f64(f)).collect())
        .collect();
    let width = cells
        .iter()
        .flatten()
        .map(|s| s.len())
        .max()
        .unwrap_or(0);

    let lines: Vec<String> = cells
        .iter()
        .map(|row| {
            let mut line = String::new();
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    line.push_str(if augmented && j + 1 == row.len() {
                        " | "
                    } else {
                        "  "
                    });
                }
                line.push_str(&format!("{:>width$}", cell, width = width));
            }
            line
        })
        .collect();
    lines.join("\n")
}

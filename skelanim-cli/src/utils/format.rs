//! Formatting utilities

use skelanim::Mat4;

/// Format a matrix as four rows of fixed-width numbers
pub fn format_matrix(matrix: &Mat4, indent: &str) -> String {
    (0..4)
        .map(|row| {
            let r = matrix.row(row);
            format!(
                "{indent}[{:>9.4} {:>9.4} {:>9.4} {:>9.4}]",
                r.x, r.y, r.z, r.w
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a duration given in seconds
pub fn format_seconds(seconds: f64) -> String {
    if seconds < 1.0 {
        format!("{:.0} ms", seconds * 1000.0)
    } else {
        format!("{seconds:.2} s")
    }
}

//! Plain-text aligned tables for terminal output.

/// Lays out a header and rows as space-separated columns.
///
/// The first column is left-aligned, every other column right-aligned.
/// Rows shorter than the header are padded with empty cells.
pub fn aligned(header: &[String], rows: &[Vec<String>]) -> String {
    let n_cols = header.len();
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for line in std::iter::once(header).chain(rows.iter().map(Vec::as_slice)) {
        let mut text = String::new();
        for (j, width) in widths.iter().enumerate().take(n_cols) {
            let cell = line.get(j).map_or("", String::as_str);
            if j == 0 {
                text.push_str(&format!("{cell:<width$}"));
            } else {
                text.push_str(&format!("  {cell:>width$}"));
            }
        }
        out.push_str(text.trim_end());
        out.push('\n');
    }
    out
}

//! Preview command: show the head of a share table.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::info_span;

use sojourn_io::{ReaderConfig, read_table};
use sojourn_tpm::ObservationTable;

use crate::cli::PreviewArgs;
use crate::convert;
use crate::render;

/// Print the header and first rows of the input table.
pub fn run(args: PreviewArgs) -> Result<()> {
    let _cmd = info_span!("preview").entered();
    let cfg = ReaderConfig::default().with_delimiter(convert::parse_delimiter(&args.delimiter)?);
    let table = read_table(&args.input, &cfg)
        .with_context(|| format!("failed to read table: {}", args.input.display()))?;

    std::io::stdout()
        .lock()
        .write_all(render_preview(&table, args.rows).as_bytes())
        .context("failed to write to stdout")
}

fn render_preview(table: &ObservationTable, n_rows: usize) -> String {
    let rows: Vec<Vec<String>> = table
        .periods()
        .iter()
        .zip(table.values())
        .take(n_rows)
        .map(|(period, values)| {
            std::iter::once(period.clone())
                .chain(values.iter().map(|v| v.to_string()))
                .collect()
        })
        .collect();

    let mut text = render::aligned(table.columns(), &rows);
    text.push_str(&format!(
        "\n{} of {} periods, {} columns\n",
        rows.len(),
        table.n_periods(),
        table.columns().len()
    ));
    text
}

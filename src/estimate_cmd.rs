//! Estimate command: share table -> transition probability matrix.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use sojourn_io::{OutputFormat, WriterConfig, read_table, write_matrix};
use sojourn_tpm::{LabeledMatrix, estimate_tpm};

use crate::cli::EstimateArgs;
use crate::config::SojournConfig;
use crate::convert;
use crate::render;

/// File stem used when `--output` names a directory.
const DEFAULT_OUTPUT_STEM: &str = "tpm_matrix";

/// Run the estimation pipeline.
pub fn run(args: EstimateArgs) -> Result<()> {
    let _cmd = info_span!("estimate").entered();
    // 1. Load config and merge CLI flags
    let mut config = SojournConfig::load(args.config.as_deref())?;
    apply_overrides(&mut config, args);

    let input = config
        .io
        .input
        .as_ref()
        .ok_or_else(|| anyhow!("no input path: set [io].input in config or use --input"))?;
    let reader_cfg = convert::build_reader_config(&config.io)?;
    let writer_cfg = convert::build_writer_config(&config.io)?;
    let estimator_cfg = convert::build_estimator_config(&config.estimate)?;

    // 2. Read the table
    let table = read_table(input, &reader_cfg)
        .with_context(|| format!("failed to read table: {}", input.display()))?;
    info!(
        n_periods = table.n_periods(),
        n_columns = table.columns().len(),
        "table loaded"
    );

    // 3. Estimate
    let tpm = estimate_tpm(&table, &estimator_cfg).context("estimation failed")?;

    // 4. Print, then optionally write
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(render_matrix(&tpm, &writer_cfg).as_bytes())
        .context("failed to write to stdout")?;

    if let Some(output) = config.io.output.as_deref() {
        let path = resolve_output_path(output, writer_cfg.format());
        write_matrix(&path, &tpm, &writer_cfg)
            .with_context(|| format!("failed to write matrix: {}", path.display()))?;
    }

    Ok(())
}

/// CLI flags take precedence over the config file.
fn apply_overrides(config: &mut SojournConfig, args: EstimateArgs) {
    if let Some(input) = args.input {
        config.io.input = Some(input);
    }
    if let Some(output) = args.output {
        config.io.output = Some(output);
    }
    if let Some(delimiter) = args.delimiter {
        config.io.delimiter = delimiter;
    }
    if let Some(format) = args.format {
        config.io.format = format;
    }
    if args.precision.is_some() {
        config.io.precision = args.precision;
    }
    if let Some(mode) = args.mode {
        config.estimate.mode = mode;
    }
    if args.trailing_total {
        config.estimate.has_trailing_total = true;
    }
}

/// A directory output resolves to `tpm_matrix.<ext>` inside it.
fn resolve_output_path(output: &Path, format: OutputFormat) -> PathBuf {
    if output.is_dir() {
        let ext = match format {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        };
        output.join(format!("{DEFAULT_OUTPUT_STEM}.{ext}"))
    } else {
        output.to_path_buf()
    }
}

/// Renders the matrix as an aligned text table, followed by a note on rows
/// with no observed outgoing transitions.
fn render_matrix(tpm: &LabeledMatrix, cfg: &WriterConfig) -> String {
    let mut header = Vec::with_capacity(tpm.n_states() + 1);
    header.push(cfg.corner_label().to_string());
    header.extend(tpm.labels().iter().cloned());

    let rows: Vec<Vec<String>> = tpm
        .rows()
        .map(|(label, row)| {
            std::iter::once(label.to_string())
                .chain(row.iter().map(|&p| cfg.format_value(p)))
                .collect()
        })
        .collect();

    let mut text = render::aligned(&header, &rows);
    let degenerate = tpm.degenerate_labels();
    if !degenerate.is_empty() {
        text.push_str(&format!(
            "\nno outgoing transitions observed from: {}\n",
            degenerate.join(", ")
        ));
    }
    text
}

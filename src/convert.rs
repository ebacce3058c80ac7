//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use crate::config::{EstimateToml, IoToml};

use sojourn_io::{OutputFormat, ReaderConfig, WriterConfig};
use sojourn_tpm::{AssignmentMode, EstimatorConfig};

/// Parses a state assignment mode name.
pub fn parse_mode(s: &str) -> Result<AssignmentMode> {
    match s.to_lowercase().as_str() {
        "dominant" | "argmax" => Ok(AssignmentMode::Dominant),
        "proportional" => Ok(AssignmentMode::Proportional),
        other => bail!("unknown assignment mode: {other:?}"),
    }
}

/// Parses an output format name.
pub fn parse_format(s: &str) -> Result<OutputFormat> {
    match s.to_lowercase().as_str() {
        "csv" => Ok(OutputFormat::Csv),
        "json" => Ok(OutputFormat::Json),
        other => bail!("unknown output format: {other:?}"),
    }
}

/// Parses a delimiter: a single ASCII character, or `tab` / `\t`.
pub fn parse_delimiter(s: &str) -> Result<u8> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        other => bail!("delimiter must be a single ASCII character or \"tab\", got {other:?}"),
    }
}

/// Builds an [`EstimatorConfig`] from the TOML estimate configuration.
pub fn build_estimator_config(estimate: &EstimateToml) -> Result<EstimatorConfig> {
    let mode = parse_mode(&estimate.mode)?;
    Ok(EstimatorConfig::new()
        .with_mode(mode)
        .with_trailing_total(estimate.has_trailing_total))
}

/// Builds a [`ReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoToml) -> Result<ReaderConfig> {
    let cfg = ReaderConfig::default().with_delimiter(parse_delimiter(&io.delimiter)?);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
pub fn build_writer_config(io: &IoToml) -> Result<WriterConfig> {
    let cfg = WriterConfig::default()
        .with_format(parse_format(&io.format)?)
        .with_delimiter(parse_delimiter(&io.delimiter)?)
        .with_precision(io.precision)
        .with_corner_label(io.corner_label.as_str());
    cfg.validate()?;
    Ok(cfg)
}

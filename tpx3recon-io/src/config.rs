//! Loads a [`PipelineConfig`] from a flat `key = value` text file, the same
//! format and key set as the original `configReader.cpp`: one setting per
//! line, `#`-prefixed or trailing `#` comments ignored, unknown keys skipped
//! with a diagnostic rather than treated as fatal.

use std::fs;
use std::path::Path;

use tpx3recon_core::PipelineConfig;

use crate::{Error, Result};

/// Reads `path` and applies each recognized `key = value` line onto a
/// [`PipelineConfig`] that starts from [`PipelineConfig::default`].
///
/// Only an unreadable file is fatal. A malformed line (bad key, value out of
/// its type's range) is reported to stderr and that field is left at its
/// previous value; the rest of the file still applies.
pub fn load<P: AsRef<Path>>(path: P) -> Result<PipelineConfig> {
    let text = fs::read_to_string(path.as_ref())
        .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.as_ref().display())))?;

    let mut config = PipelineConfig::default();
    let verbose_level = config.verbose_level;
    apply(&text, &mut config, verbose_level);
    Ok(config)
}

/// Applies the lines of `text` onto `config` in place.
fn apply(text: &str, config: &mut PipelineConfig, verbose_level: u8) {
    for raw_line in text.lines() {
        let line = match raw_line.split_once('#') {
            Some((before, _)) => before,
            None => raw_line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            report(verbose_level, &format!("malformed line, missing '=': {raw_line}"));
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        let outcome = match key {
            "rawTPX3Folder" => { config.raw_tpx3_folder = value.to_string(); Ok(()) }
            "rawTPX3File" => { config.raw_tpx3_file = value.to_string(); Ok(()) }
            "writeRawSignals" => parse_bool(value).map(|v| config.write_raw_signals = v),
            "writeOutPhotons" => parse_bool(value).map(|v| config.write_out_photons = v),
            "outputFolder" => { config.output_folder = value.to_string(); Ok(()) }
            "sortSignals" => parse_bool(value).map(|v| config.sort_signals = v),
            "clusterPixels" => parse_bool(value).map(|v| config.cluster_pixels = v),
            "epsSpatial" => parse_num(value).map(|v| config.eps_spatial = v),
            "epsTemporal" => parse_num(value).map(|v| config.eps_temporal = v),
            "minPts" => parse_num(value).map(|v| config.min_pts = v),
            "queryRegion" => parse_num(value).map(|v| config.query_region = v),
            "maxPacketsToRead" => parse_num(value).map(|v| config.max_packets_to_read = v),
            "verboseLevel" => parse_num(value).map(|v| config.verbose_level = v),
            _ => {
                report(verbose_level, &format!("unknown configuration key: {key}"));
                Ok(())
            }
        };

        if let Err(err) = outcome {
            report(verbose_level, &format!("config error for key '{key}' with value '{value}': {err}"));
        }
    }
}

fn parse_bool(value: &str) -> std::result::Result<bool, String> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(format!("invalid boolean value: {other}")),
    }
}

fn parse_num<T: std::str::FromStr>(value: &str) -> std::result::Result<T, String> {
    value.parse().map_err(|_| format!("invalid numeric value: {value}"))
}

fn report(verbose_level: u8, message: &str) {
    if verbose_level >= 2 {
        eprintln!("CONFIG: {message}");
    }
}

//! Argument parsing and the check command.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use sidguard_id::{EncodingScheme, IdValidator, SessionIdConfig, Validator};
use tracing::{debug, info};

/// Check session identifiers for the configured alphabet and length.
#[derive(Debug, Parser)]
#[command(name = "sid-check")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Identifiers to check. Read one per line from stdin when omitted.
    pub ids: Vec<String>,

    /// Bits per character (4, 5 or 6). Other values fall back to 5.
    #[arg(long)]
    pub bits: Option<String>,

    /// Exact identifier body length. Malformed values are treated as 0.
    #[arg(long)]
    pub length: Option<String>,

    /// Validate only the part after the last dash.
    #[arg(long, conflicts_with = "no_cluster")]
    pub cluster: bool,

    /// Disable cluster mode even if the environment enables it.
    #[arg(long)]
    pub no_cluster: bool,

    /// Emit one JSON object per identifier.
    #[arg(long)]
    pub json: bool,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Emit logs as JSON.
    #[arg(long)]
    pub log_json: bool,
}

/// Result line for a single identifier.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CheckReport {
    pub id: String,
    pub candidate: String,
    pub valid: bool,
    pub validator: &'static str,
}

impl CheckReport {
    fn from_validator(validator: &IdValidator) -> Self {
        Self {
            id: validator.data().to_string(),
            candidate: validator.candidate().to_string(),
            valid: validator.is_valid(),
            validator: validator.name(),
        }
    }
}

impl Cli {
    /// Merges flag overrides into `base`.
    pub fn config(&self, base: SessionIdConfig) -> SessionIdConfig {
        let mut config = base;
        if let Some(bits) = self.bits.as_deref() {
            config = config.with_encoding_scheme(EncodingScheme::from_setting(Some(bits)));
        }
        if let Some(length) = self.length.as_deref() {
            config = config.with_expected_length(SessionIdConfig::parse_length(length));
        }
        if self.cluster {
            config = config.with_cluster_mode(true);
        } else if self.no_cluster {
            config = config.with_cluster_mode(false);
        }
        config
    }

    /// Runs the command against `base` with flag overrides applied.
    ///
    /// Identifiers come from `input` when none were given on the command
    /// line. Returns true when every identifier was valid.
    pub fn run<R, W>(&self, base: SessionIdConfig, input: R, out: &mut W) -> Result<bool>
    where
        R: BufRead,
        W: Write,
    {
        let config = self.config(base);
        info!(
            bits = config.encoding_scheme.bits(),
            expected_length = config.expected_length,
            cluster_mode = config.cluster_mode,
            "Configuration loaded"
        );

        if self.print_config {
            let json = serde_json::to_string_pretty(&config)?;
            writeln!(out, "{json}")?;
            return Ok(true);
        }

        let ids = if self.ids.is_empty() {
            read_ids(input)?
        } else {
            self.ids.clone()
        };

        let reports = check_all(&ids, config);
        for report in &reports {
            write_report(&mut *out, report, self.json)?;
        }
        Ok(reports.iter().all(|r| r.valid))
    }
}

/// Reads non-empty, trimmed lines.
pub fn read_ids<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    for line in reader.lines() {
        let line = line.context("failed to read identifiers from stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            ids.push(line.to_string());
        }
    }
    Ok(ids)
}

/// Validates every identifier against `config`.
pub fn check_all(ids: &[String], config: SessionIdConfig) -> Vec<CheckReport> {
    ids.iter()
        .map(|id| {
            let validator = IdValidator::for_id(id.as_str(), config);
            let report = CheckReport::from_validator(&validator);
            debug!(id = %report.id, valid = report.valid, "checked session id");
            report
        })
        .collect()
}

fn write_report<W: Write>(out: &mut W, report: &CheckReport, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(report)?)?;
    } else {
        let status = if report.valid { "valid" } else { "invalid" };
        writeln!(out, "{status}\t{}\t{}", report.id, report.validator)?;
    }
    Ok(())
}

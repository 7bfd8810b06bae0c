//! Check command implementation.
//!
//! Compiles the configured `maps` and displays the resulting rules in
//! various formats (table, JSON, CSV, TSV), together with dropped entries
//! and targets that another rule would rewrite again.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::{Args, ValueEnum};
use local2cdn::rules::{compile_config, Compilation, RewritableTarget};
use std::io::Write;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 5] = ["index", "kind", "mode", "matcher", "target"];

/// Compile the maps and list the resulting rules.
#[derive(Args)]
pub struct CheckCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "LOCAL2CDN_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Exit with status 1 if any map entry was dropped
    #[arg(long)]
    pub strict: bool,
}

/// Output format for the check command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated values)
    Tsv,
}

impl CheckCommand {
    /// Execute the check command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration and compile
        let config = load_configuration(global)?;
        let compilation = compile_config(&config)?;
        let rewritable = compilation.rules.rewritable_targets();

        // 2. Report problems on stderr
        for dropped in &compilation.dropped {
            global.logger.warn(&dropped.to_string());
        }
        for pair in &rewritable {
            global.logger.warn(&describe_rewritable(&compilation, *pair));
        }

        // 3. Format and output to stdout
        match self.format {
            OutputFormat::Table => format_as_table(&compilation)?,
            OutputFormat::Json => format_as_json(&compilation, &rewritable)?,
            OutputFormat::Csv => format_as_delimited(&compilation, b',')?,
            OutputFormat::Tsv => format_as_delimited(&compilation, b'\t')?,
        }

        if self.strict && !compilation.is_clean() {
            return Err(CliError::SemanticFailure(format!(
                "{} map entr{} dropped",
                compilation.dropped.len(),
                if compilation.dropped.len() == 1 { "y" } else { "ies" }
            )));
        }

        Ok(())
    }
}

fn describe_rewritable(compilation: &Compilation, pair: RewritableTarget) -> String {
    let rules = compilation.rules.rules();
    format!(
        "target of rule #{} ('{}') is rewritten again by rule #{} to '{}'",
        pair.rule, rules[pair.rule].target, pair.matched_by, rules[pair.matched_by].target
    )
}

/// Format rules as a human-readable table.
fn format_as_table(compilation: &Compilation) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    // Print header (uppercase for table display)
    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for (index, rule) in compilation.rules.iter().enumerate() {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}",
            index,
            rule.kind,
            rule.matcher.mode(),
            rule.matcher.source(),
            rule.target,
        )?;
    }

    Ok(())
}

/// Format rules, dropped entries and rewritable targets as JSON.
fn format_as_json(
    compilation: &Compilation,
    rewritable: &[RewritableTarget],
) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let rules: Vec<serde_json::Value> = compilation
        .rules
        .iter()
        .enumerate()
        .map(|(index, rule)| {
            serde_json::json!({
                "index": index,
                "kind": rule.kind.token(),
                "mode": rule.matcher.mode().to_string(),
                "matcher": rule.matcher.source(),
                "pattern": rule.matcher.as_str(),
                "target": rule.target,
            })
        })
        .collect();

    let dropped: Vec<serde_json::Value> = compilation
        .dropped
        .iter()
        .map(|d| {
            serde_json::json!({
                "index": d.index,
                "local": d.local,
                "cdn": d.cdn,
                "reason": d.reason.to_string(),
            })
        })
        .collect();

    let rewritable: Vec<serde_json::Value> = rewritable
        .iter()
        .map(|pair| {
            serde_json::json!({
                "rule": pair.rule,
                "matched_by": pair.matched_by,
            })
        })
        .collect();

    let json_data = serde_json::json!({
        "rules": rules,
        "dropped": dropped,
        "rewritable": rewritable,
    });

    serde_json::to_writer_pretty(&mut handle, &json_data)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;

    writeln!(handle)?;

    Ok(())
}

/// Convert `csv::Error` to `CliError`.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Format rules as delimited output (CSV or TSV).
fn format_as_delimited(compilation: &Compilation, delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;

    for (index, rule) in compilation.rules.iter().enumerate() {
        writer
            .write_record(&[
                index.to_string(),
                rule.kind.token().to_string(),
                rule.matcher.mode().to_string(),
                rule.matcher.source().to_string(),
                rule.target.clone(),
            ])
            .map_err(csv_error)?;
    }

    writer.flush()?;
    Ok(())
}

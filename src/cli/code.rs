//! Code command implementation.

use super::output::CodeReport;
use super::{CliError, OutputFormat, RandomizationArg, to_json, write_output};
use evoscape::code::{GeneticCode, ostrov_code, parse_ostrov_blocks, randomize, robustness};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Execute the code command.
///
/// # Errors
///
/// Returns an error if `blocks` is malformed or used without the Ostrov
/// scheme, or if the code table or the report cannot be written.
pub(crate) fn execute(
    randomization: RandomizationArg,
    seed: u64,
    blocks: Option<&str>,
    table: &Path,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let standard = GeneticCode::standard();
    let (code, scheme) = match blocks {
        Some(text) if randomization == RandomizationArg::Ostrov => {
            let assignment = parse_ostrov_blocks(text).map_err(|e| CliError::new(e.to_string()))?;
            (ostrov_code(&standard, assignment), format!("ostrov {text}"))
        }
        Some(_) => {
            return Err(CliError::new("--blocks requires --randomization ostrov"));
        }
        None => (
            randomize(&standard, randomization.into(), seed),
            randomization.name().to_string(),
        ),
    };
    log::debug!("randomized code: {code:?}");

    let file = File::create(table)
        .map_err(|e| CliError::new(format!("Failed to create {}: {e}", table.display())))?;
    let mut writer = BufWriter::new(file);
    code.write_table(&mut writer)?;
    writer.flush()?;

    let report = CodeReport {
        seed,
        randomization: scheme,
        robustness: robustness(&code),
        table: table.display().to_string(),
    };

    let rendered = match format {
        OutputFormat::Text => report.to_text(),
        OutputFormat::Json => to_json(&report)?,
        OutputFormat::Tsv => report.to_tsv(),
    };
    write_output(output, &rendered)
}

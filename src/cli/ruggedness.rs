//! Ruggedness command implementation.

use super::output::RuggednessReport;
use super::{CliError, LandscapeArgs, OutputFormat, to_json, write_output};
use evoscape::landscape::EpistasisConfig;
use std::path::Path;

/// Execute the ruggedness command.
///
/// # Errors
///
/// Returns an error if the input tables cannot be loaded or the output
/// cannot be written.
pub(crate) fn execute(
    input: &LandscapeArgs,
    config: &EpistasisConfig,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let landscape = input.load_landscape()?;

    log::info!("counting peaks");
    let peaks = landscape.count_peaks();

    let counts = landscape.sample_epistasis(config);

    log::info!("counting accessible paths");
    let accessibility = landscape
        .accessibility()
        .mean_accessible_fraction(landscape.fitness());

    let report = RuggednessReport {
        peaks: peaks.count(),
        mean_peak_fitness: peaks.mean_fitness(),
        squares: counts.total(),
        epistasis: counts.fractions(),
        accessibility,
    };

    let rendered = match format {
        OutputFormat::Text => report.to_text(),
        OutputFormat::Json => to_json(&report)?,
        OutputFormat::Tsv => report.to_tsv(),
    };
    write_output(output, &rendered)
}

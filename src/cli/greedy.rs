//! Greedy command implementation.

use super::output::GreedyReport;
use super::{CliError, LandscapeArgs, OutputFormat, to_json, write_output};
use std::path::Path;

/// Execute the greedy command.
///
/// # Errors
///
/// Returns an error if the input tables cannot be loaded, the relaxation
/// breaks one of its invariants, or the output cannot be written.
pub(crate) fn execute(
    input: &LandscapeArgs,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let landscape = input.load_landscape()?;

    let ascent = landscape.greedy_ascent();
    let summary = ascent.summarize(landscape.fitness())?;

    let report = GreedyReport {
        genotypes: summary.genotypes,
        mean_fitness: summary.mean_fitness,
        mean_steps: summary.mean_steps,
        reach: summary.reach_by_label(|peak| landscape.label(peak)),
    };

    let rendered = match format {
        OutputFormat::Text => report.to_text(),
        OutputFormat::Json => to_json(&report)?,
        OutputFormat::Tsv => report.to_tsv(),
    };
    write_output(output, &rendered)
}

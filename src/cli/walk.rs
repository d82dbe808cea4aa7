//! Walk command implementation.

use super::output::WalkReport;
use super::{CliError, LandscapeArgs, OutputFormat, to_json, write_output};
use evoscape::walk::{WalkConfig, WalkLandscape, run_random_walks};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Instant;

/// Execute the walk command.
///
/// # Errors
///
/// Returns an error if the input tables cannot be loaded or the output
/// cannot be written.
pub(crate) fn execute(
    input: &LandscapeArgs,
    config: &WalkConfig,
    progress: bool,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), CliError> {
    if config.population_size < 1.0 {
        return Err(CliError::new("population size must be at least 1"));
    }
    let (code, phenotypes, space) = input.load_tables()?;
    let walker = WalkLandscape::new(space, code, &phenotypes);

    let pb = progress.then(|| {
        let pb = ProgressBar::new(config.starts as u64);
        let style = ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} walks ({per_sec})",
            )
            .map_or_else(|_| ProgressStyle::default_bar(), |s| s.progress_chars("=>-"));
        pb.set_style(style);
        pb
    });

    let start = Instant::now();
    let summary = run_random_walks(&walker, config, |done| {
        if let Some(pb) = &pb {
            pb.set_position(done as u64);
        }
    });
    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }
    log::info!("walks finished in {:.2}s", start.elapsed().as_secs_f64());

    let report = WalkReport {
        walks: summary.walks,
        sample_interval: config.sample_interval,
        mean_trajectory: summary.mean_trajectory,
        endpoints: summary.endpoints,
    };

    let rendered = match format {
        OutputFormat::Text => report.to_text(),
        OutputFormat::Json => to_json(&report)?,
        OutputFormat::Tsv => report.to_tsv(),
    };
    write_output(output, &rendered)
}

//! Evoscape CLI - Command-line interface for fitness landscape analyses.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use evoscape::landscape::EpistasisConfig;
use evoscape::walk::WalkConfig;
use std::path::PathBuf;
use std::process::ExitCode;

/// Evoscape - genotype-network analysis of fitness landscapes
#[derive(Parser, Debug)]
#[command(name = "evoscape")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Count peaks, classify epistasis and measure path accessibility
    Ruggedness {
        #[command(flatten)]
        input: cli::LandscapeArgs,

        /// Number of epistasis squares to sample (default: 1000000)
        #[arg(long, default_value = "1000000")]
        squares: usize,

        /// Random seed for square sampling (default: 1)
        #[arg(short, long, default_value = "1")]
        seed: u64,

        /// Output format: text, json, or tsv
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Find the peaks reached by greedy ascent from every genotype
    Greedy {
        #[command(flatten)]
        input: cli::LandscapeArgs,

        /// Output format: text, json, or tsv
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Simulate adaptive random walks under Moran fixation
    Walk {
        #[command(flatten)]
        input: cli::LandscapeArgs,

        /// Effective population size
        #[arg(short = 'n', long)]
        population: f64,

        /// Number of walks (default: 100000)
        #[arg(long, default_value = "100000")]
        starts: usize,

        /// Steps per walk (default: 1000)
        #[arg(long, default_value = "1000")]
        steps: usize,

        /// Steps between fitness samples (default: 10)
        #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
        interval: u64,

        /// Seed of the first walk; walk j uses seed + j (default: 0)
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Show progress bar
        #[arg(long)]
        progress: bool,

        /// Output format: text, json, or tsv
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a randomized genetic code and report its robustness
    Code {
        /// Randomization scheme
        #[arg(short, long, default_value = "aa-permutation")]
        randomization: cli::RandomizationArg,

        /// Random seed (0 keeps the standard code)
        #[arg(short, long)]
        seed: u64,

        /// Fixed Ostrov block assignment, e.g. `L*X-` (`-` keeps a block)
        #[arg(short, long)]
        blocks: Option<String>,

        /// Where to write the code table
        #[arg(short, long)]
        table: PathBuf,

        /// Output format: text, json, or tsv
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let result = match args.command {
        Commands::Ruggedness {
            input,
            squares,
            seed,
            format,
            output,
        } => {
            let config = EpistasisConfig { squares, seed };
            cli::ruggedness::execute(&input, &config, format, output.as_deref())
        }

        Commands::Greedy {
            input,
            format,
            output,
        } => cli::greedy::execute(&input, format, output.as_deref()),

        Commands::Walk {
            input,
            population,
            starts,
            steps,
            interval,
            seed,
            progress,
            format,
            output,
        } => match usize::try_from(interval) {
            Ok(sample_interval) => {
                let config = WalkConfig {
                    population_size: population,
                    starts,
                    steps,
                    sample_interval,
                    seed,
                };
                cli::walk::execute(&input, &config, progress, format, output.as_deref())
            }
            Err(_) => Err(cli::CliError::new("sample interval out of range")),
        },

        Commands::Code {
            randomization,
            seed,
            blocks,
            table,
            format,
            output,
        } => cli::code::execute(
            randomization,
            seed,
            blocks.as_deref(),
            &table,
            format,
            output.as_deref(),
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

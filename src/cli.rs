//! CLI command implementations for Evoscape.

pub(crate) mod code;
pub(crate) mod greedy;
pub(crate) mod ruggedness;
pub(crate) mod walk;

mod output;

use clap::ValueEnum;
use evoscape::code::{CodeRandomization, GeneticCode};
use evoscape::{
    GenotypeSpace, InvariantViolation, Landscape, LandscapeError, PhenotypeTable, infer_space,
};
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Output format for every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// Single tab-separated record.
    Tsv,
}

/// How the `code` command randomizes the standard code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum RandomizationArg {
    /// Permute amino acids between synonymous codon blocks.
    AaPermutation,
    /// Permute only amino acids with the same number of codons.
    AaPermutationRestricted,
    /// Assign codons to amino acids at random.
    Random,
    /// Reassign the four Ostrov codon blocks.
    Ostrov,
}

impl RandomizationArg {
    /// Name as accepted on the command line.
    pub(crate) const fn name(self) -> &'static str {
        match self {
            Self::AaPermutation => "aa-permutation",
            Self::AaPermutationRestricted => "aa-permutation-restricted",
            Self::Random => "random",
            Self::Ostrov => "ostrov",
        }
    }
}

impl From<RandomizationArg> for CodeRandomization {
    fn from(arg: RandomizationArg) -> Self {
        match arg {
            RandomizationArg::AaPermutation => Self::AminoAcidPermutation,
            RandomizationArg::AaPermutationRestricted => Self::RestrictedPermutation,
            RandomizationArg::Random => Self::RandomAssignment,
            RandomizationArg::Ostrov => Self::OstrovBlocks,
        }
    }
}

/// Input tables shared by the landscape commands.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct LandscapeArgs {
    /// Genotype-phenotype table (header line, then `sequence value` records)
    #[arg(short, long)]
    pub(crate) phenotypes: PathBuf,

    /// Genetic code table (header line, then 64 `aa codon` records)
    #[arg(short, long)]
    pub(crate) code: PathBuf,

    /// Codons per genotype (default: phenotype sequence length)
    #[arg(long)]
    pub(crate) codons: Option<usize>,
}

impl LandscapeArgs {
    /// Read both tables and determine the genotype space.
    pub(crate) fn load_tables(
        &self,
    ) -> Result<(GeneticCode, PhenotypeTable, GenotypeSpace), CliError> {
        let code = GeneticCode::from_file(&self.code)?;
        let phenotypes = PhenotypeTable::from_file(&self.phenotypes)?;
        let space = infer_space(&phenotypes, self.codons)?;
        log::info!(
            "{} phenotypes, {} codons per genotype, {} genotypes",
            phenotypes.len(),
            space.codons(),
            space.size()
        );
        Ok((code, phenotypes, space))
    }

    /// Read both tables and build the translated landscape.
    pub(crate) fn load_landscape(&self) -> Result<Landscape, CliError> {
        let (code, phenotypes, space) = self.load_tables()?;
        Ok(Landscape::build(code, &phenotypes, space)?)
    }
}

/// Write `content` to `path`, or to stdout if no path is given.
pub(crate) fn write_output(path: Option<&Path>, content: &str) -> Result<(), CliError> {
    match path {
        Some(path) => fs::write(path, content)
            .map_err(|e| CliError::new(format!("Failed to write {}: {e}", path.display()))),
        None => {
            print!("{content}");
            Ok(())
        }
    }
}

/// Serialize a report as pretty JSON with a trailing newline.
pub(crate) fn to_json<T: serde::Serialize>(report: &T) -> Result<String, CliError> {
    let mut json = serde_json::to_string_pretty(report)
        .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
    json.push('\n');
    Ok(json)
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<LandscapeError> for CliError {
    fn from(e: LandscapeError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<InvariantViolation> for CliError {
    fn from(e: InvariantViolation) -> Self {
        Self::new(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_randomization_names_match_command_line() {
        for arg in RandomizationArg::value_variants() {
            let possible = arg.to_possible_value().unwrap();
            assert_eq!(possible.get_name(), arg.name());
            assert_eq!(RandomizationArg::from_str(arg.name(), false), Ok(*arg));
        }
        assert_eq!(
            CodeRandomization::from(RandomizationArg::AaPermutationRestricted),
            CodeRandomization::RestrictedPermutation
        );
        assert_eq!(
            CodeRandomization::from(RandomizationArg::Ostrov),
            CodeRandomization::OstrovBlocks
        );
    }
}

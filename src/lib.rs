// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Evoscape: genotype-network analysis of fitness landscapes.
//!
//! Nucleotide genotypes are translated under a genetic code and scored from a
//! genotype-phenotype table. The resulting landscape is analysed for:
//! - Local peaks, including fitness plateaus
//! - Accessible mutational paths to the global optimum
//! - Peaks reached by greedy best-first ascent
//! - The prevalence of magnitude and sign epistasis
//!
//! Alternative genetic codes can be generated and scored for robustness, and
//! adaptive random walks simulated under Moran fixation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  Peaks │ Access │ Ascent │ Epistasis│
//! ├─────────────────────────────────────┤
//! │   Fitness table + genotype graph    │
//! ├─────────────────────────────────────┤
//! │  Genetic code │ Phenotype table     │
//! ├─────────────────────────────────────┤
//! │        Genotype encoding            │
//! └─────────────────────────────────────┘
//! ```

pub mod code;
pub mod error;
pub mod genotype;
pub mod landscape;
pub mod phenotype;
pub mod walk;

pub use code::GeneticCode;
pub use error::{CodeError, InvariantViolation, LandscapeError, LandscapeResult};
pub use genotype::{GenotypeId, GenotypeSpace, Nucleotide};
pub use landscape::{FitnessTable, GenotypeGraph, Landscape};
pub use phenotype::PhenotypeTable;
pub use walk::{WalkConfig, WalkLandscape, WalkSummary};

/// Infer the genotype space from a phenotype table's sequence length, or
/// use `codons` if given.
///
/// # Errors
///
/// Returns [`LandscapeError::InvalidLength`] if the codon count is out of
/// range.
pub fn infer_space(
    phenotypes: &PhenotypeTable,
    codons: Option<usize>,
) -> LandscapeResult<GenotypeSpace> {
    GenotypeSpace::new(codons.unwrap_or(phenotypes.sequence_len()))
}

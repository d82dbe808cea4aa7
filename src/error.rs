//! Error types for landscape construction and analysis.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors raised while building or validating a genetic code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    /// The table did not contain exactly one entry per codon.
    WrongEntryCount {
        /// Number of entries found.
        found: usize,
    },
    /// A codon string was not three nucleotides long or used an unknown symbol.
    InvalidCodon(String),
    /// An amino-acid field was not a single recognised symbol.
    InvalidAminoAcid(String),
    /// The same codon was assigned twice.
    DuplicateCodon(String),
    /// A block assignment was not four symbols or `-`.
    InvalidBlocks(String),
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongEntryCount { found } => {
                write!(f, "genetic code must have 64 entries, found {found}")
            }
            Self::InvalidCodon(codon) => write!(f, "invalid codon: {codon:?}"),
            Self::InvalidAminoAcid(aa) => write!(f, "invalid amino acid symbol: {aa:?}"),
            Self::DuplicateCodon(codon) => write!(f, "codon {codon} assigned more than once"),
            Self::InvalidBlocks(text) => {
                write!(f, "block assignment must be four symbols or '-', got {text:?}")
            }
        }
    }
}

impl std::error::Error for CodeError {}

/// Errors raised while reading input tables or building a landscape.
///
/// Every variant is fatal for a run: a partially built fitness table would
/// silently corrupt all downstream statistics.
#[derive(Debug)]
pub enum LandscapeError {
    /// Reading an input file failed.
    Io {
        /// File that could not be read or written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A table record could not be parsed.
    Parse {
        /// Name of the table being parsed.
        source_name: String,
        /// 1-based line number of the offending record.
        line: usize,
        /// What was wrong with the record.
        reason: String,
    },
    /// The genetic code is malformed.
    Code(CodeError),
    /// A stop-free translation has no entry in the phenotype table.
    MissingPhenotype {
        /// The translated amino-acid sequence.
        sequence: String,
    },
    /// The requested genotype length is not supported.
    InvalidLength {
        /// Number of codons requested.
        codons: usize,
    },
    /// A phenotype record has a different length from the first one.
    InconsistentLength {
        /// Length of the first record.
        expected: usize,
        /// Length of the offending record.
        found: usize,
        /// 1-based line number of the offending record.
        line: usize,
    },
    /// The phenotype table has no records.
    EmptyTable,
    /// A fitness array does not cover the genotype space exactly.
    TableSize {
        /// Number of genotypes in the space.
        expected: usize,
        /// Number of values supplied.
        found: usize,
    },
    /// A fitness value is NaN or positive infinity.
    NonFiniteFitness {
        /// Genotype carrying the value.
        genotype: u32,
    },
}

impl fmt::Display for LandscapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Parse {
                source_name,
                line,
                reason,
            } => write!(f, "{source_name}, line {line}: {reason}"),
            Self::Code(e) => write!(f, "genetic code: {e}"),
            Self::MissingPhenotype { sequence } => {
                write!(f, "no phenotype for translated sequence {sequence}")
            }
            Self::InvalidLength { codons } => {
                write!(f, "unsupported genotype length: {codons} codons (expected 1-4)")
            }
            Self::InconsistentLength {
                expected,
                found,
                line,
            } => write!(
                f,
                "line {line}: sequence length {found} differs from expected {expected}"
            ),
            Self::EmptyTable => write!(f, "phenotype table has no records"),
            Self::TableSize { expected, found } => {
                write!(f, "fitness table has {found} values, genotype space has {expected}")
            }
            Self::NonFiniteFitness { genotype } => {
                write!(f, "genotype {genotype} has a non-finite fitness")
            }
        }
    }
}

impl std::error::Error for LandscapeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Code(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CodeError> for LandscapeError {
    fn from(e: CodeError) -> Self {
        Self::Code(e)
    }
}

/// Result type for landscape construction.
pub type LandscapeResult<T> = Result<T, LandscapeError>;

/// Internal invariant violation detected after an analysis.
///
/// These indicate a bug in the propagation logic, never bad input.
#[derive(Debug, Clone, PartialEq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_error_display() {
        let err = CodeError::WrongEntryCount { found: 63 };
        assert!(err.to_string().contains("63"));
    }

    #[test]
    fn test_landscape_error_wraps_code_error() {
        let err: LandscapeError = CodeError::DuplicateCodon("AUG".to_string()).into();
        assert!(err.to_string().contains("AUG"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_parse_error_mentions_line() {
        let err = LandscapeError::Parse {
            source_name: "phenotypes.tsv".to_string(),
            line: 7,
            reason: "expected 2 fields".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("phenotypes.tsv"));
        assert!(msg.contains("line 7"));
    }
}

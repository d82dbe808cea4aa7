//! Genetic codes: codon tables, randomized alternatives and robustness.
//!
//! Besides shuffling amino acids between blocks, alternative codes can be
//! built by reassigning the four codon blocks freed in Ostrov et al. (2016),
//! see [`ostrov_code`].
//!
//! # Example
//!
//! ```
//! use evoscape::code::{CodeRandomization, GeneticCode, randomize, robustness};
//!
//! let standard = GeneticCode::standard();
//! let shuffled = randomize(&standard, CodeRandomization::AminoAcidPermutation, 7);
//! assert!(robustness(&shuffled) > 0.0);
//! ```

mod ostrov;
mod random;
mod robustness;
mod table;

pub use ostrov::{OSTROV_BLOCKS, OstrovAssignment, ostrov_code, parse_ostrov_blocks};
pub use random::{CodeRandomization, randomize};
pub use robustness::{PhysicochemicalGroup, physicochemical_group, robustness};
pub use table::{
    AMINO_ACIDS, AminoAcid, GeneticCode, NUM_CODONS, codon_index, codon_nucleotides,
    codon_string, parse_codon,
};

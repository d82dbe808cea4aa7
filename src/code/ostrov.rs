//! Codes built by reassigning the codon blocks freed in Ostrov et al. (2016).

use super::table::{AMINO_ACIDS, AminoAcid, GeneticCode, parse_codon};
use crate::error::CodeError;
use rand::Rng;

/// The four codon blocks that can be reassigned.
pub const OSTROV_BLOCKS: [&[&str]; 4] = [
    &["UUA", "UUG"],
    &["UAG"],
    &["AGU", "AGC"],
    &["AGG", "AGA"],
];

/// New amino acid per block; `None` keeps the block as in the base code.
pub type OstrovAssignment = [Option<AminoAcid>; 4];

/// Reassign the freed codon blocks of `base`.
#[must_use]
pub fn ostrov_code(base: &GeneticCode, blocks: OstrovAssignment) -> GeneticCode {
    let mut table = base.table();
    for (codons, aa) in OSTROV_BLOCKS.iter().zip(blocks) {
        let Some(aa) = aa else { continue };
        for codon in codons.iter().filter_map(|c| parse_codon(c).ok()) {
            table[codon] = aa;
        }
    }
    GeneticCode::from_table(table)
}

/// Parse a block assignment written as four symbols, `-` keeping a block.
///
/// `"L*X-"` sends `UUA`/`UUG` to leucine, keeps `UAG` a stop, marks
/// `AGU`/`AGC` as a split block and leaves `AGG`/`AGA` alone.
///
/// # Errors
///
/// Returns [`CodeError::InvalidBlocks`] unless `text` is four valid symbols.
pub fn parse_ostrov_blocks(text: &str) -> Result<OstrovAssignment, CodeError> {
    let invalid = || CodeError::InvalidBlocks(text.to_string());
    let symbols: Vec<char> = text.chars().collect();
    if symbols.len() != OSTROV_BLOCKS.len() {
        return Err(invalid());
    }
    let mut blocks = [None; 4];
    for (slot, &c) in blocks.iter_mut().zip(&symbols) {
        if c != '-' {
            *slot = Some(AminoAcid::from_symbol(c).ok_or_else(invalid)?);
        }
    }
    Ok(blocks)
}

/// Send every block to an amino acid or stop drawn uniformly.
pub(super) fn random_blocks<R: Rng>(rng: &mut R) -> OstrovAssignment {
    let mut blocks = [None; 4];
    for slot in &mut blocks {
        *slot = Some(AMINO_ACIDS[rng.gen_range(0..AMINO_ACIDS.len())]);
    }
    blocks
}

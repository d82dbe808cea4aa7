//! Genotype encoding.
//!
//! A genotype is a fixed-length nucleotide sequence packed into an integer,
//! two bits per position. Position 0 occupies the least significant bits, so
//! codon `k` of a genotype is simply `(id >> 6k) & 0x3f`.

use crate::error::{LandscapeError, LandscapeResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Integer identifier of a genotype, in `[0, 4^len)`.
pub type GenotypeId = u32;

/// Number of symbols in the nucleotide alphabet.
pub const ALPHABET_SIZE: usize = 4;

/// Nucleotides per codon.
pub const CODON_LENGTH: usize = 3;

/// Largest supported number of codons per genotype.
///
/// Four codons is already 4^12 genotypes, each with 36 neighbours.
pub const MAX_CODONS: usize = 4;

/// Bits used to store one nucleotide.
const BITS_PER_SYMBOL: usize = 2;

/// An RNA nucleotide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Nucleotide {
    /// Adenine.
    A = 0,
    /// Cytosine.
    C = 1,
    /// Guanine.
    G = 2,
    /// Uracil.
    U = 3,
}

impl Nucleotide {
    /// All nucleotides in encoding order.
    pub const ALL: [Self; ALPHABET_SIZE] = [Self::A, Self::C, Self::G, Self::U];

    /// Decode the two low bits of `bits`.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0 => Self::A,
            1 => Self::C,
            2 => Self::G,
            _ => Self::U,
        }
    }

    /// The two-bit code of this nucleotide.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Parse a nucleotide letter. `T` is read as `U`; case is ignored.
    #[must_use]
    pub const fn from_symbol(symbol: u8) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            b'A' => Some(Self::A),
            b'C' => Some(Self::C),
            b'G' => Some(Self::G),
            b'U' | b'T' => Some(Self::U),
            _ => None,
        }
    }

    /// The letter for this nucleotide.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::A => 'A',
            Self::C => 'C',
            Self::G => 'G',
            Self::U => 'U',
        }
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The set of all genotypes of a given codon count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenotypeSpace {
    codons: usize,
}

impl GenotypeSpace {
    /// Create the space of genotypes made of `codons` codons.
    ///
    /// # Errors
    ///
    /// Returns [`LandscapeError::InvalidLength`] unless `1 <= codons <= MAX_CODONS`.
    pub fn new(codons: usize) -> LandscapeResult<Self> {
        if codons == 0 || codons > MAX_CODONS {
            return Err(LandscapeError::InvalidLength { codons });
        }
        Ok(Self { codons })
    }

    /// Number of codons per genotype.
    #[must_use]
    pub const fn codons(self) -> usize {
        self.codons
    }

    /// Number of nucleotides per genotype.
    #[must_use]
    pub const fn sequence_len(self) -> usize {
        self.codons * CODON_LENGTH
    }

    /// Number of genotypes in the space (`4^sequence_len`).
    #[must_use]
    pub const fn size(self) -> usize {
        1 << (BITS_PER_SYMBOL * self.sequence_len())
    }

    /// Number of single-nucleotide neighbours of every genotype.
    #[must_use]
    pub const fn degree(self) -> usize {
        (ALPHABET_SIZE - 1) * self.sequence_len()
    }

    /// All genotype IDs in the space.
    #[must_use]
    pub fn ids(self) -> Range<GenotypeId> {
        // size() <= 4^12, always representable
        #[allow(clippy::cast_possible_truncation)]
        let end = self.size() as GenotypeId;
        0..end
    }

    /// Nucleotide at position `pos` of genotype `id`.
    #[must_use]
    pub const fn symbol_at(self, id: GenotypeId, pos: usize) -> Nucleotide {
        Nucleotide::from_bits(id >> (BITS_PER_SYMBOL * pos))
    }

    /// Genotype `id` with position `pos` replaced by `symbol`.
    #[must_use]
    pub const fn with_symbol(self, id: GenotypeId, pos: usize, symbol: Nucleotide) -> GenotypeId {
        let shift = BITS_PER_SYMBOL * pos;
        (id & !(0b11 << shift)) | (symbol.bits() << shift)
    }

    /// Codon index (six bits) of codon `k` of genotype `id`.
    #[must_use]
    pub const fn codon_at(self, id: GenotypeId, k: usize) -> usize {
        ((id >> (BITS_PER_SYMBOL * CODON_LENGTH * k)) & 0x3f) as usize
    }

    /// The nucleotide string of genotype `id`, position 0 first.
    #[must_use]
    pub fn decode(self, id: GenotypeId) -> String {
        (0..self.sequence_len())
            .map(|pos| self.symbol_at(id, pos).symbol())
            .collect()
    }

    /// Parse a nucleotide string of exactly `sequence_len` symbols.
    #[must_use]
    pub fn encode(self, sequence: &str) -> Option<GenotypeId> {
        if sequence.len() != self.sequence_len() {
            return None;
        }
        sequence
            .bytes()
            .enumerate()
            .try_fold(0, |id, (pos, b)| {
                Nucleotide::from_symbol(b).map(|n| id | (n.bits() << (BITS_PER_SYMBOL * pos)))
            })
    }

    /// Number of positions at which two genotypes differ.
    #[must_use]
    pub const fn hamming_distance(self, a: GenotypeId, b: GenotypeId) -> u32 {
        let diff = a ^ b;
        ((diff | (diff >> 1)) & 0x5555_5555).count_ones()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_rejects_bad_lengths() {
        assert!(GenotypeSpace::new(0).is_err());
        assert!(GenotypeSpace::new(MAX_CODONS + 1).is_err());
        assert!(GenotypeSpace::new(3).is_ok());
    }

    #[test]
    fn test_space_dimensions() {
        let space = GenotypeSpace::new(3).unwrap();
        assert_eq!(space.sequence_len(), 9);
        assert_eq!(space.size(), 1 << 18);
        assert_eq!(space.degree(), 27);
        assert_eq!(space.ids().len(), 1 << 18);
    }

    #[test]
    fn test_decode_low_bits_first() {
        let space = GenotypeSpace::new(1).unwrap();
        assert_eq!(space.decode(0), "AAA");
        assert_eq!(space.decode(0b11), "UAA");
        assert_eq!(space.decode(0b10_01_00), "ACG");
    }

    #[test]
    fn test_encode_inverts_decode() {
        let space = GenotypeSpace::new(2).unwrap();
        for id in [0, 1, 17, 1234, 4095] {
            assert_eq!(space.encode(&space.decode(id)), Some(id));
        }
        assert_eq!(space.encode("ACGTTT"), space.encode("ACGUUU"));
        assert_eq!(space.encode("ACG"), None);
        assert_eq!(space.encode("ACGNNN"), None);
    }

    #[test]
    fn test_with_symbol_replaces_one_position() {
        let space = GenotypeSpace::new(1).unwrap();
        let id = space.encode("ACG").unwrap();
        let mutated = space.with_symbol(id, 1, Nucleotide::U);
        assert_eq!(space.decode(mutated), "AUG");
        assert_eq!(space.hamming_distance(id, mutated), 1);
    }

    #[test]
    fn test_codon_at() {
        let space = GenotypeSpace::new(2).unwrap();
        let id = space.encode("CAAGAA").unwrap();
        assert_eq!(space.codon_at(id, 0), 1);
        assert_eq!(space.codon_at(id, 1), 2);
    }

    #[test]
    fn test_hamming_distance() {
        let space = GenotypeSpace::new(1).unwrap();
        let a = space.encode("AAA").unwrap();
        let b = space.encode("UCA").unwrap();
        assert_eq!(space.hamming_distance(a, b), 2);
        assert_eq!(space.hamming_distance(b, b), 0);
    }
}

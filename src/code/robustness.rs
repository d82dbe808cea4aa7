//! Mutational robustness of a genetic code.

// Substitution counts are small
#![allow(clippy::cast_precision_loss)]

use super::table::{AminoAcid, GeneticCode, NUM_CODONS, codon_index, codon_nucleotides};
use crate::genotype::Nucleotide;
use serde::{Deserialize, Serialize};

/// Physicochemical class of an amino acid (after Pines et al., 2017).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhysicochemicalGroup {
    /// K, H, R.
    Basic,
    /// P.
    Proline,
    /// F, W, Y.
    Aromatic,
    /// A, I, L, V.
    Aliphatic,
    /// C, M, N, Q, S, T, and any custom block symbol.
    Polar,
    /// G.
    Glycine,
    /// D, E.
    Acidic,
    /// Stop codons.
    Stop,
}

/// Group of an amino acid.
#[must_use]
pub const fn physicochemical_group(aa: AminoAcid) -> PhysicochemicalGroup {
    match aa.symbol() {
        'K' | 'H' | 'R' => PhysicochemicalGroup::Basic,
        'P' => PhysicochemicalGroup::Proline,
        'F' | 'W' | 'Y' => PhysicochemicalGroup::Aromatic,
        'A' | 'I' | 'L' | 'V' => PhysicochemicalGroup::Aliphatic,
        'G' => PhysicochemicalGroup::Glycine,
        'D' | 'E' => PhysicochemicalGroup::Acidic,
        '*' => PhysicochemicalGroup::Stop,
        _ => PhysicochemicalGroup::Polar,
    }
}

/// Fraction of single-nucleotide codon substitutions that stay within the
/// same physicochemical group.
#[must_use]
pub fn robustness(code: &GeneticCode) -> f64 {
    let mut substitutions = 0usize;
    let mut conservative = 0usize;

    for codon in 0..NUM_CODONS {
        let group = physicochemical_group(code.amino_acid(codon));
        let nucleotides = codon_nucleotides(codon);
        for (pos, &current) in nucleotides.iter().enumerate() {
            for n in Nucleotide::ALL {
                if n == current {
                    continue;
                }
                let mut mutant = nucleotides;
                mutant[pos] = n;
                substitutions += 1;
                if physicochemical_group(code.amino_acid(codon_index(mutant))) == group {
                    conservative += 1;
                }
            }
        }
    }

    conservative as f64 / substitutions as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{CodeRandomization, randomize};

    #[test]
    fn test_groups() {
        let group = |c| physicochemical_group(AminoAcid::from_symbol(c).unwrap());
        assert_eq!(group('K'), PhysicochemicalGroup::Basic);
        assert_eq!(group('S'), PhysicochemicalGroup::Polar);
        assert_eq!(group('*'), PhysicochemicalGroup::Stop);
        assert_eq!(group('W'), PhysicochemicalGroup::Aromatic);
    }

    #[test]
    fn test_robustness_in_unit_interval() {
        let r = robustness(&GeneticCode::standard());
        assert!(r > 0.0 && r < 1.0);
    }

    #[test]
    fn test_single_amino_acid_code_is_fully_robust() {
        let code = GeneticCode::from_table([AminoAcid::from_symbol('L').unwrap(); NUM_CODONS]);
        assert!((robustness(&code) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_standard_code_beats_random_assignment_on_average() {
        let standard = robustness(&GeneticCode::standard());
        let random_mean = (1..=20)
            .map(|seed| {
                robustness(&randomize(
                    &GeneticCode::standard(),
                    CodeRandomization::RandomAssignment,
                    seed,
                ))
            })
            .sum::<f64>()
            / 20.0;
        assert!(standard > random_mean, "{standard} <= {random_mean}");
    }
}

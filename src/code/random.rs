//! Randomized alternative genetic codes.

use super::ostrov::{ostrov_code, random_blocks};
use super::table::{AMINO_ACIDS, AminoAcid, GeneticCode, NUM_CODONS, parse_codon};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of sense amino acids.
const NUM_AMINO_ACIDS: usize = 20;

/// Stop codons kept in place by random codon assignment.
const FIXED_STOPS: [&str; 3] = ["UAA", "UAG", "UGA"];

/// How to derive an alternative code from a base code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CodeRandomization {
    /// Keep the codon blocks and shuffle which amino acid each block encodes.
    #[default]
    AminoAcidPermutation,
    /// Like [`CodeRandomization::AminoAcidPermutation`], but only swap amino
    /// acids encoded by the same number of codons.
    RestrictedPermutation,
    /// Assign sense codons to amino acids independently at random, keeping
    /// every amino acid encoded by at least one codon.
    RandomAssignment,
    /// Send each of the four Ostrov blocks to a random amino acid or stop.
    OstrovBlocks,
}

/// Generate a randomized code from `base`.
///
/// Seed 0 returns `base` unchanged. Permutations keep the stop codons and
/// custom symbols of `base`; random assignment puts the stops at `UAA`, `UAG`
/// and `UGA`.
#[must_use]
pub fn randomize(base: &GeneticCode, kind: CodeRandomization, seed: u64) -> GeneticCode {
    if seed == 0 {
        return *base;
    }
    let mut rng = SmallRng::seed_from_u64(seed);
    match kind {
        CodeRandomization::AminoAcidPermutation => permute_amino_acids(base, &mut rng),
        CodeRandomization::RestrictedPermutation => permute_within_degeneracy(base, &mut rng),
        CodeRandomization::RandomAssignment => assign_randomly(&mut rng),
        CodeRandomization::OstrovBlocks => ostrov_code(base, random_blocks(&mut rng)),
    }
}

fn permute_amino_acids<R: Rng>(base: &GeneticCode, rng: &mut R) -> GeneticCode {
    let mut shuffled: Vec<AminoAcid> = AMINO_ACIDS[..NUM_AMINO_ACIDS].to_vec();
    shuffled.shuffle(rng);
    relabel(base, &shuffled)
}

/// Shuffle amino acids only within classes of equal codon count in `base`.
fn permute_within_degeneracy<R: Rng>(base: &GeneticCode, rng: &mut R) -> GeneticCode {
    let mut degeneracy = [0usize; NUM_AMINO_ACIDS];
    for codon in 0..NUM_CODONS {
        if let Some(i) = base.amino_acid(codon).index().filter(|&i| i < NUM_AMINO_ACIDS) {
            degeneracy[i] += 1;
        }
    }
    let mut classes: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, &count) in degeneracy.iter().enumerate() {
        classes.entry(count).or_default().push(i);
    }

    let mut mapping: Vec<AminoAcid> = AMINO_ACIDS[..NUM_AMINO_ACIDS].to_vec();
    for members in classes.values() {
        let mut shuffled = members.clone();
        shuffled.shuffle(rng);
        for (&from, &to) in members.iter().zip(&shuffled) {
            mapping[from] = AMINO_ACIDS[to];
        }
    }
    relabel(base, &mapping)
}

/// Replace each sense amino acid `AMINO_ACIDS[i]` of `base` by `mapping[i]`.
fn relabel(base: &GeneticCode, mapping: &[AminoAcid]) -> GeneticCode {
    let mut table = base.table();
    for slot in &mut table {
        if let Some(&aa) = slot.index().and_then(|i| mapping.get(i)) {
            *slot = aa;
        }
    }
    GeneticCode::from_table(table)
}

fn assign_randomly<R: Rng>(rng: &mut R) -> GeneticCode {
    let stops: Vec<usize> = FIXED_STOPS
        .iter()
        .filter_map(|codon| parse_codon(codon).ok())
        .collect();
    let mut sense: Vec<usize> = (0..NUM_CODONS).filter(|c| !stops.contains(c)).collect();
    sense.shuffle(rng);

    let mut table = [AminoAcid::STOP; NUM_CODONS];
    for (i, &codon) in sense.iter().enumerate() {
        table[codon] = if i < NUM_AMINO_ACIDS {
            AMINO_ACIDS[i]
        } else {
            AMINO_ACIDS[rng.gen_range(0..NUM_AMINO_ACIDS)]
        };
    }
    GeneticCode::from_table(table)
}

//! Epistasis classification over random two-locus squares.

// Additivity is tested by exact equality; counts become fractions
#![allow(clippy::float_cmp, clippy::cast_precision_loss)]

use super::fitness::FitnessTable;
use crate::genotype::{GenotypeId, GenotypeSpace, Nucleotide};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Attempts allowed per requested square before sampling gives up.
const ATTEMPTS_PER_SQUARE: usize = 100;

/// Configuration for epistasis sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpistasisConfig {
    /// Number of squares to classify.
    pub squares: usize,
    /// Random seed.
    pub seed: u64,
}

impl Default for EpistasisConfig {
    fn default() -> Self {
        Self {
            squares: 1_000_000,
            seed: 1,
        }
    }
}

/// Kind of interaction between two mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EpistasisKind {
    /// Effects add up exactly.
    None,
    /// Non-additive, but each mutation keeps its sign in both backgrounds.
    Magnitude,
    /// One mutation changes sign depending on the background.
    SimpleSign,
    /// Both mutations change sign depending on the background.
    ReciprocalSign,
}

/// A wild type, its two single mutants and the double mutant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    /// The wild type (`AB`).
    pub wild_type: GenotypeId,
    /// Mutant at the first locus (`aB`).
    pub first: GenotypeId,
    /// Mutant at the second locus (`Ab`).
    pub second: GenotypeId,
    /// Double mutant (`ab`).
    pub double: GenotypeId,
}

impl Square {
    /// The four corners in the order wild type, first, second, double.
    #[must_use]
    pub const fn corners(&self) -> [GenotypeId; 4] {
        [self.wild_type, self.first, self.second, self.double]
    }
}

/// Classify a square from its four corner fitness values.
#[must_use]
pub fn classify(wild_type: f64, first: f64, second: f64, double: f64) -> EpistasisKind {
    if wild_type + double - second - first == 0.0 {
        return EpistasisKind::None;
    }
    // effect of each mutation in the other's background, and reverted
    let second_on_double = second - double;
    let first_on_double = first - double;
    let wild_over_second = wild_type - second;
    let wild_over_first = wild_type - first;

    let a = second_on_double * wild_over_first;
    let b = first_on_double * wild_over_second;
    if a >= 0.0 && b >= 0.0 {
        EpistasisKind::Magnitude
    } else if a < 0.0 && b < 0.0 {
        EpistasisKind::ReciprocalSign
    } else {
        EpistasisKind::SimpleSign
    }
}

/// Draw a uniformly random square: a random wild type and point mutations
/// at two distinct positions.
pub fn sample_square<R: Rng>(space: GenotypeSpace, rng: &mut R) -> Square {
    let len = space.sequence_len();
    let wild_type = rng.gen_range(space.ids());

    let pos1 = rng.gen_range(0..len);
    let mut pos2 = rng.gen_range(0..len - 1);
    if pos2 >= pos1 {
        pos2 += 1;
    }
    let sym1 = mutate(space.symbol_at(wild_type, pos1), rng);
    let sym2 = mutate(space.symbol_at(wild_type, pos2), rng);

    let first = space.with_symbol(wild_type, pos1, sym1);
    let second = space.with_symbol(wild_type, pos2, sym2);
    let double = space.with_symbol(first, pos2, sym2);
    Square {
        wild_type,
        first,
        second,
        double,
    }
}

/// A uniformly random nucleotide other than `current`.
fn mutate<R: Rng>(current: Nucleotide, rng: &mut R) -> Nucleotide {
    let shift: u32 = rng.gen_range(1..=3);
    Nucleotide::from_bits(current.bits() + shift)
}

/// Tally of classified squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EpistasisCounts {
    /// Additive squares.
    pub none: usize,
    /// Magnitude epistasis.
    pub magnitude: usize,
    /// Simple-sign epistasis.
    pub simple_sign: usize,
    /// Reciprocal-sign epistasis.
    pub reciprocal_sign: usize,
}

impl EpistasisCounts {
    /// Count one square.
    pub const fn record(&mut self, kind: EpistasisKind) {
        match kind {
            EpistasisKind::None => self.none += 1,
            EpistasisKind::Magnitude => self.magnitude += 1,
            EpistasisKind::SimpleSign => self.simple_sign += 1,
            EpistasisKind::ReciprocalSign => self.reciprocal_sign += 1,
        }
    }

    /// Number of squares counted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.none + self.magnitude + self.simple_sign + self.reciprocal_sign
    }

    /// Share of each kind; all zero if nothing was counted.
    #[must_use]
    pub fn fractions(&self) -> EpistasisFractions {
        let total = self.total();
        if total == 0 {
            return EpistasisFractions::default();
        }
        let total = total as f64;
        EpistasisFractions {
            none: self.none as f64 / total,
            magnitude: self.magnitude as f64 / total,
            simple_sign: self.simple_sign as f64 / total,
            reciprocal_sign: self.reciprocal_sign as f64 / total,
        }
    }
}

/// Share of sampled squares of each epistasis kind.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EpistasisFractions {
    /// Additive squares.
    pub none: f64,
    /// Magnitude epistasis.
    pub magnitude: f64,
    /// Simple-sign epistasis.
    pub simple_sign: f64,
    /// Reciprocal-sign epistasis.
    pub reciprocal_sign: f64,
}

/// Classify `config.squares` random squares whose corners are all valid.
///
/// Squares touching a stop-containing genotype are redrawn. If the valid
/// region is too sparse to fill the quota within a bounded number of draws,
/// the squares found so far are returned and a warning is logged.
#[must_use]
pub fn sample_epistasis(fitness: &FitnessTable, config: &EpistasisConfig) -> EpistasisCounts {
    let space = fitness.space();
    let mut counts = EpistasisCounts::default();
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let max_attempts = config.squares.saturating_mul(ATTEMPTS_PER_SQUARE);

    log::info!("sampling {} epistasis squares", config.squares);
    let mut attempts = 0;
    while counts.total() < config.squares && attempts < max_attempts {
        attempts += 1;
        let square = sample_square(space, &mut rng);
        let [wt, first, second, double] = square.corners().map(|id| fitness.get(id));
        if let (Some(wt), Some(first), Some(second), Some(double)) = (wt, first, second, double) {
            counts.record(classify(wt, first, second, double));
        }
    }

    if counts.total() < config.squares {
        log::warn!(
            "only {} of {} epistasis squares had four valid corners",
            counts.total(),
            config.squares
        );
    }
    log::debug!("{attempts} squares drawn");
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landscape::fitness::INVALID_FITNESS;

    #[test]
    fn test_classify_examples() {
        // additive
        assert_eq!(classify(3.0, 2.0, 2.0, 1.0), EpistasisKind::None);
        // both mutations deleterious in both backgrounds, non-additive
        assert_eq!(classify(4.0, 3.0, 3.0, 0.0), EpistasisKind::Magnitude);
        // the first mutation helps on one background and hurts on the other
        assert_eq!(classify(2.0, 1.0, 3.0, 4.0), EpistasisKind::SimpleSign);
        // both single mutants are worse than wild type and double mutant
        assert_eq!(classify(2.0, 0.0, 0.0, 2.0), EpistasisKind::ReciprocalSign);
    }

    #[test]
    fn test_sampled_square_shape() {
        let space = GenotypeSpace::new(1).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..500 {
            let sq = sample_square(space, &mut rng);
            assert_eq!(space.hamming_distance(sq.wild_type, sq.first), 1);
            assert_eq!(space.hamming_distance(sq.wild_type, sq.second), 1);
            assert_eq!(space.hamming_distance(sq.wild_type, sq.double), 2);
            assert_eq!(space.hamming_distance(sq.first, sq.double), 1);
            assert_eq!(space.hamming_distance(sq.second, sq.double), 1);
        }
    }

    #[test]
    fn test_additive_landscape_has_no_epistasis() {
        let space = GenotypeSpace::new(1).unwrap();
        // integer per-position contributions add exactly
        let values: Vec<f64> = space
            .ids()
            .map(|id| {
                (0..space.sequence_len())
                    .map(|pos| {
                        let weight = 2f64.powi(i32::try_from(pos).unwrap());
                        f64::from(space.symbol_at(id, pos).bits()) * weight
                    })
                    .sum::<f64>()
            })
            .collect();
        let fitness = FitnessTable::from_values(space, values).unwrap();
        let config = EpistasisConfig {
            squares: 2_000,
            seed: 3,
        };
        let counts = sample_epistasis(&fitness, &config);
        assert_eq!(counts.total(), 2_000);
        assert_eq!(counts.none, 2_000);
    }

    #[test]
    fn test_invalid_corners_are_skipped() {
        let space = GenotypeSpace::new(1).unwrap();
        let mut values: Vec<f64> = space.ids().map(|id| f64::from(id % 5)).collect();
        values[0] = INVALID_FITNESS;
        let fitness = FitnessTable::from_values(space, values).unwrap();
        let counts = sample_epistasis(
            &fitness,
            &EpistasisConfig {
                squares: 1_000,
                seed: 9,
            },
        );
        assert_eq!(counts.total(), 1_000);
        let f = counts.fractions();
        let sum = f.none + f.magnitude + f.simple_sign + f.reciprocal_sign;
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sampling_gives_up_when_nothing_is_valid() {
        let space = GenotypeSpace::new(1).unwrap();
        let fitness = FitnessTable::from_values(space, vec![INVALID_FITNESS; 64]).unwrap();
        let counts = sample_epistasis(
            &fitness,
            &EpistasisConfig {
                squares: 10,
                seed: 1,
            },
        );
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.fractions(), EpistasisFractions::default());
    }

    #[test]
    fn test_sampling_is_deterministic_per_seed() {
        let space = GenotypeSpace::new(1).unwrap();
        let values: Vec<f64> = space.ids().map(|id| f64::from((id * 7) % 13)).collect();
        let fitness = FitnessTable::from_values(space, values).unwrap();
        let config = EpistasisConfig {
            squares: 300,
            seed: 42,
        };
        assert_eq!(sample_epistasis(&fitness, &config), sample_epistasis(&fitness, &config));
    }
}

//! Dense per-genotype fitness values.

// Global maxima are defined by exact equality with the maximum
#![allow(clippy::float_cmp)]

use crate::code::GeneticCode;
use crate::error::{LandscapeError, LandscapeResult};
use crate::genotype::{GenotypeId, GenotypeSpace};
use crate::phenotype::PhenotypeTable;

/// Fitness of genotypes whose translation contains a stop codon.
///
/// Compares below every real fitness, so a stop-containing genotype is never
/// "at least as fit" as a valid one.
pub const INVALID_FITNESS: f64 = f64::NEG_INFINITY;

/// Fitness of every genotype in a space, indexed by genotype ID.
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessTable {
    space: GenotypeSpace,
    values: Vec<f64>,
    valid: usize,
}

impl FitnessTable {
    /// Translate every genotype and look up its phenotype.
    ///
    /// # Errors
    ///
    /// Returns [`LandscapeError::MissingPhenotype`] if a stop-free translation
    /// has no entry in `phenotypes`.
    pub fn build(
        space: GenotypeSpace,
        code: &GeneticCode,
        phenotypes: &PhenotypeTable,
    ) -> LandscapeResult<Self> {
        log::info!("translating {} genotypes", space.size());
        let mut values = Vec::with_capacity(space.size());
        let mut translation = String::with_capacity(space.codons());
        for id in space.ids() {
            if code.has_stop(space, id) {
                values.push(INVALID_FITNESS);
                continue;
            }
            code.translate_into(space, id, &mut translation);
            let value = phenotypes
                .get(&translation)
                .ok_or_else(|| LandscapeError::MissingPhenotype {
                    sequence: translation.clone(),
                })?;
            values.push(value);
        }
        let table = Self::from_values(space, values)?;
        log::debug!(
            "{} valid genotypes, {} with stop codons",
            table.valid_count(),
            space.size() - table.valid_count()
        );
        Ok(table)
    }

    /// Wrap precomputed values; [`INVALID_FITNESS`] marks invalid genotypes.
    ///
    /// # Errors
    ///
    /// Returns an error if `values` does not have one entry per genotype or
    /// contains NaN or positive infinity.
    pub fn from_values(space: GenotypeSpace, values: Vec<f64>) -> LandscapeResult<Self> {
        if values.len() != space.size() {
            return Err(LandscapeError::TableSize {
                expected: space.size(),
                found: values.len(),
            });
        }
        if let Some(id) = values.iter().position(|v| v.is_nan() || *v == f64::INFINITY) {
            #[allow(clippy::cast_possible_truncation)]
            let genotype = id as GenotypeId;
            return Err(LandscapeError::NonFiniteFitness { genotype });
        }
        let valid = values.iter().filter(|&&v| v != INVALID_FITNESS).count();
        Ok(Self {
            space,
            values,
            valid,
        })
    }

    /// The genotype space this table covers.
    #[must_use]
    pub const fn space(&self) -> GenotypeSpace {
        self.space
    }

    /// Raw value of genotype `id`, [`INVALID_FITNESS`] included.
    #[must_use]
    pub fn value(&self, id: GenotypeId) -> f64 {
        self.values[id as usize]
    }

    /// Fitness of genotype `id`, or `None` if it is invalid.
    #[must_use]
    pub fn get(&self, id: GenotypeId) -> Option<f64> {
        let value = self.value(id);
        (value != INVALID_FITNESS).then_some(value)
    }

    /// Whether genotype `id` has a real fitness.
    #[must_use]
    pub fn is_valid(&self, id: GenotypeId) -> bool {
        self.value(id) != INVALID_FITNESS
    }

    /// Number of valid genotypes.
    #[must_use]
    pub const fn valid_count(&self) -> usize {
        self.valid
    }

    /// Raw values indexed by genotype ID.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Valid genotypes with their fitness, in ID order.
    pub fn iter_valid(&self) -> impl Iterator<Item = (GenotypeId, f64)> + '_ {
        self.space
            .ids()
            .zip(self.values.iter().copied())
            .filter(|&(_, v)| v != INVALID_FITNESS)
    }

    /// Highest valid fitness.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.iter_valid().map(|(_, v)| v).reduce(f64::max)
    }

    /// All valid genotypes whose fitness equals the maximum.
    #[must_use]
    pub fn global_maxima(&self) -> Vec<GenotypeId> {
        let Some(max) = self.max() else {
            return Vec::new();
        };
        self.iter_valid()
            .filter(|&(_, v)| v == max)
            .map(|(id, _)| id)
            .collect()
    }
}

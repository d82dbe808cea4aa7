//! Genotype-network analysis of a fitness landscape.
//!
//! A [`Landscape`] bundles the genotype space, the genetic code used to
//! translate it, the dense fitness table and the mutation graph. All of it is
//! built once and read-only afterwards; every analysis borrows it.
//!
//! # Example
//!
//! ```
//! use evoscape::genotype::GenotypeSpace;
//! use evoscape::landscape::{FitnessTable, Landscape};
//!
//! let space = GenotypeSpace::new(1).unwrap();
//! let values = space.ids().map(f64::from).collect();
//! let landscape = Landscape::from_fitness(FitnessTable::from_values(space, values).unwrap());
//!
//! assert_eq!(landscape.count_peaks().count(), 1);
//! let summary = landscape.greedy_ascent().summarize(landscape.fitness()).unwrap();
//! assert_eq!(summary.reach.len(), 1);
//! ```

mod accessibility;
mod ascent;
mod epistasis;
mod fitness;
mod graph;
mod peaks;

pub use accessibility::{Accessibility, UNREACHED, propagate_accessibility};
pub use ascent::{AscentMap, AscentSummary, greedy_ascent};
pub use epistasis::{
    EpistasisConfig, EpistasisCounts, EpistasisFractions, EpistasisKind, Square, classify,
    sample_epistasis, sample_square,
};
pub use fitness::{FitnessTable, INVALID_FITNESS};
pub use graph::GenotypeGraph;
pub use peaks::{Peak, PeakSummary, find_peaks};

use crate::code::GeneticCode;
use crate::error::LandscapeResult;
use crate::genotype::{GenotypeId, GenotypeSpace};
use crate::phenotype::PhenotypeTable;

/// A translated fitness landscape and its mutation graph.
#[derive(Debug, Clone)]
pub struct Landscape {
    code: Option<GeneticCode>,
    fitness: FitnessTable,
    graph: GenotypeGraph,
}

impl Landscape {
    /// Translate every genotype of `space` under `code` and score it from
    /// `phenotypes`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::LandscapeError::MissingPhenotype`] if a
    /// stop-free translation is not in the phenotype table.
    pub fn build(
        code: GeneticCode,
        phenotypes: &PhenotypeTable,
        space: GenotypeSpace,
    ) -> LandscapeResult<Self> {
        let unencoded = code.unencoded();
        if !unencoded.is_empty() {
            let missing: String = unencoded.iter().map(|aa| aa.symbol()).collect();
            let unreachable = phenotypes
                .iter()
                .filter(|(seq, _)| seq.chars().any(|c| missing.contains(c)))
                .count();
            log::warn!(
                "code does not encode {missing}; {unreachable} phenotype entries are unreachable"
            );
        }
        let fitness = FitnessTable::build(space, &code, phenotypes)?;
        Ok(Self {
            code: Some(code),
            graph: GenotypeGraph::new(space),
            fitness,
        })
    }

    /// Wrap a precomputed fitness table, with no genetic code attached.
    #[must_use]
    pub fn from_fitness(fitness: FitnessTable) -> Self {
        Self {
            code: None,
            graph: GenotypeGraph::new(fitness.space()),
            fitness,
        }
    }

    /// The genotype space.
    #[must_use]
    pub const fn space(&self) -> GenotypeSpace {
        self.fitness.space()
    }

    /// The genetic code, if the landscape was built by translation.
    #[must_use]
    pub const fn code(&self) -> Option<&GeneticCode> {
        self.code.as_ref()
    }

    /// The fitness table.
    #[must_use]
    pub const fn fitness(&self) -> &FitnessTable {
        &self.fitness
    }

    /// The mutation graph.
    #[must_use]
    pub const fn graph(&self) -> &GenotypeGraph {
        &self.graph
    }

    /// Display name of a genotype: its translation, or its nucleotides when
    /// no code is attached.
    #[must_use]
    pub fn label(&self, id: GenotypeId) -> String {
        match &self.code {
            Some(code) => code.translate(self.space(), id),
            None => self.space().decode(id),
        }
    }

    /// Valid genotypes of maximal fitness.
    #[must_use]
    pub fn global_maxima(&self) -> Vec<GenotypeId> {
        self.fitness.global_maxima()
    }

    /// Local peak plateaus.
    #[must_use]
    pub fn count_peaks(&self) -> PeakSummary {
        find_peaks(&self.graph, &self.fitness)
    }

    /// Shortest and accessible path counts to the global maxima.
    #[must_use]
    pub fn accessibility(&self) -> Accessibility {
        propagate_accessibility(&self.graph, &self.fitness, &self.global_maxima())
    }

    /// Greedy best-first ascent of every valid genotype.
    #[must_use]
    pub fn greedy_ascent(&self) -> AscentMap {
        greedy_ascent(&self.graph, &self.fitness)
    }

    /// Classify random two-locus squares.
    #[must_use]
    pub fn sample_epistasis(&self, config: &EpistasisConfig) -> EpistasisCounts {
        sample_epistasis(&self.fitness, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::AMINO_ACIDS;

    fn single_residue_phenotypes() -> PhenotypeTable {
        PhenotypeTable::from_records(
            AMINO_ACIDS[..20]
                .iter()
                .zip(1u8..)
                .map(|(aa, i)| (aa.symbol().to_string(), f64::from(i))),
        )
        .unwrap()
    }

    #[test]
    fn test_build_labels_by_translation() {
        let space = GenotypeSpace::new(1).unwrap();
        let landscape =
            Landscape::build(GeneticCode::standard(), &single_residue_phenotypes(), space).unwrap();
        let aug = space.encode("AUG").unwrap();
        assert_eq!(landscape.label(aug), "M");
        assert_eq!(landscape.fitness().valid_count(), 61);
        assert!(landscape.code().is_some());
    }

    #[test]
    fn test_from_fitness_labels_by_nucleotides() {
        let space = GenotypeSpace::new(1).unwrap();
        let fitness = FitnessTable::from_values(space, vec![1.0; 64]).unwrap();
        let landscape = Landscape::from_fitness(fitness);
        assert_eq!(landscape.label(0), "AAA");
        assert_eq!(landscape.global_maxima().len(), 64);
    }

    #[test]
    fn test_analyses_agree_on_translated_landscape() {
        let space = GenotypeSpace::new(1).unwrap();
        let landscape =
            Landscape::build(GeneticCode::standard(), &single_residue_phenotypes(), space).unwrap();
        let peaks = landscape.count_peaks();
        let summary = landscape.greedy_ascent().summarize(landscape.fitness()).unwrap();
        // every greedy ascent ends on a local peak
        let peak_members: Vec<GenotypeId> =
            peaks.peaks.iter().flat_map(|p| p.genotypes.iter().copied()).collect();
        assert!(summary.reach.keys().all(|g| peak_members.contains(g)));
        let access = landscape.accessibility();
        for id in landscape.global_maxima() {
            assert_eq!(access.accessible_fraction(id), Some(1.0));
        }
    }
}

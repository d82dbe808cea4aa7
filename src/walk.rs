//! Adaptive random walks under Moran fixation.
//!
//! A walk starts at a uniformly random nucleotide sequence. Each step
//! proposes a random point mutation and accepts it with the probability that
//! a single mutant of that fitness fixes in a population of size `N`.

// Walk statistics are averages over counts
#![allow(clippy::cast_precision_loss)]

use crate::code::GeneticCode;
use crate::genotype::{GenotypeId, GenotypeSpace, Nucleotide};
use crate::phenotype::PhenotypeTable;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for a batch of random walks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkConfig {
    /// Effective population size `N`.
    pub population_size: f64,
    /// Number of independent walks.
    pub starts: usize,
    /// Proposed mutations per walk.
    pub steps: usize,
    /// Steps between recorded fitness samples.
    pub sample_interval: usize,
    /// Seed of the first walk; walk `j` uses `seed + j`.
    pub seed: u64,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            population_size: 1_000.0,
            starts: 100_000,
            steps: 1_000,
            sample_interval: 10,
            seed: 0,
        }
    }
}

impl WalkConfig {
    /// Number of fitness samples recorded per walk.
    #[must_use]
    pub const fn samples(&self) -> usize {
        self.steps / self.interval()
    }

    const fn interval(&self) -> usize {
        if self.sample_interval == 0 {
            1
        } else {
            self.sample_interval
        }
    }
}

/// Probability that a mutant of fitness `mutant` replaces a resident of
/// fitness `resident` in a population of size `population_size`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn fixation_probability(resident: f64, mutant: f64, population_size: f64) -> f64 {
    if resident == mutant {
        return 1.0 / population_size;
    }
    let delta = resident - mutant;
    (1.0 - delta.exp()) / (1.0 - (population_size * delta).exp())
}

/// Fitness and translation of every genotype as seen by a walker.
///
/// Sequences with a stop codon, or absent from the phenotype table, score
/// the table minimum.
#[derive(Debug, Clone)]
pub struct WalkLandscape {
    space: GenotypeSpace,
    code: GeneticCode,
    fitness: Vec<f64>,
}

impl WalkLandscape {
    /// Score every genotype of `space`.
    #[must_use]
    pub fn new(space: GenotypeSpace, code: GeneticCode, phenotypes: &PhenotypeTable) -> Self {
        let floor = phenotypes.min_fitness();
        let mut translation = String::with_capacity(space.codons());
        let mut unscored = 0usize;
        let fitness: Vec<f64> = space
            .ids()
            .map(|id| {
                code.translate_into(space, id, &mut translation);
                phenotypes.get(&translation).unwrap_or_else(|| {
                    unscored += 1;
                    floor
                })
            })
            .collect();
        log::debug!("{unscored} genotypes score the table minimum {floor}");
        Self {
            space,
            code,
            fitness,
        }
    }

    /// The genotype space.
    #[must_use]
    pub const fn space(&self) -> GenotypeSpace {
        self.space
    }

    /// Walk fitness of genotype `id`.
    #[must_use]
    pub fn fitness(&self, id: GenotypeId) -> f64 {
        self.fitness[id as usize]
    }

    /// Translation of genotype `id`.
    #[must_use]
    pub fn translate(&self, id: GenotypeId) -> String {
        self.code.translate(self.space, id)
    }
}

/// Trace of one walk.
#[derive(Debug, Clone, PartialEq)]
pub struct Walk {
    /// Fitness before the first step and after every step.
    pub trajectory: Vec<f64>,
    /// Genotype the walk ended on.
    pub end: GenotypeId,
}

/// Run a single walk of `config.steps` steps.
pub fn random_walk<R: Rng>(landscape: &WalkLandscape, config: &WalkConfig, rng: &mut R) -> Walk {
    let space = landscape.space();
    let len = space.sequence_len();
    let mut current = rng.gen_range(space.ids());
    let mut fitness = landscape.fitness(current);

    let mut trajectory = Vec::with_capacity(config.steps + 1);
    trajectory.push(fitness);
    for _ in 0..config.steps {
        let pos = rng.gen_range(0..len);
        let shift: u32 = rng.gen_range(1..=3);
        let symbol = Nucleotide::from_bits(space.symbol_at(current, pos).bits() + shift);
        let candidate = space.with_symbol(current, pos, symbol);

        let candidate_fitness = landscape.fitness(candidate);
        let p = fixation_probability(fitness, candidate_fitness, config.population_size);
        if rng.gen_range(0.0..1.0) <= p {
            current = candidate;
            fitness = candidate_fitness;
        }
        trajectory.push(fitness);
    }

    Walk {
        trajectory,
        end: current,
    }
}

/// Aggregate of a batch of walks.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WalkSummary {
    /// Number of walks.
    pub walks: usize,
    /// Mean fitness at steps `0, interval, 2·interval, …`.
    pub mean_trajectory: Vec<f64>,
    /// Number of walks ending at each translated sequence.
    pub endpoints: BTreeMap<String, usize>,
}

/// Run `config.starts` independent walks, calling `on_walk` after each.
#[must_use]
pub fn run_random_walks<F>(
    landscape: &WalkLandscape,
    config: &WalkConfig,
    mut on_walk: F,
) -> WalkSummary
where
    F: FnMut(usize),
{
    let samples = config.samples();
    let interval = config.interval();
    let mut sums = vec![0.0; samples];
    let mut endpoints: BTreeMap<String, usize> = BTreeMap::new();

    log::info!("running {} random walks of {} steps", config.starts, config.steps);
    for j in 0..config.starts {
        let mut rng = SmallRng::seed_from_u64(config.seed.wrapping_add(j as u64));
        let walk = random_walk(landscape, config, &mut rng);
        for (i, sum) in sums.iter_mut().enumerate() {
            *sum += walk.trajectory[i * interval];
        }
        *endpoints.entry(landscape.translate(walk.end)).or_insert(0) += 1;
        on_walk(j + 1);
    }

    let walks = config.starts;
    let denom = walks.max(1) as f64;
    WalkSummary {
        walks,
        mean_trajectory: sums.into_iter().map(|s| s / denom).collect(),
        endpoints,
    }
}

//! Property-based tests over random single-codon landscapes.
//!
//! Fitness values are drawn from a small range so that plateaus and exact
//! ties are common; some genotypes are marked invalid.
//! Run with: cargo test --release prop_landscape

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::cast_precision_loss)]

use proptest::prelude::*;

use evoscape::landscape::{EpistasisConfig, FitnessTable, INVALID_FITNESS, Landscape};
use evoscape::{GenotypeGraph, GenotypeSpace};

/// 64 fitness values in `0..5`, roughly one in ten invalid.
fn fitness_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(prop::option::weighted(0.9, 0u8..5), 64).prop_map(|cells| {
        cells
            .into_iter()
            .map(|cell| cell.map_or(INVALID_FITNESS, f64::from))
            .collect()
    })
}

fn landscape(values: Vec<f64>) -> Landscape {
    let space = GenotypeSpace::new(1).unwrap();
    Landscape::from_fitness(FitnessTable::from_values(space, values).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Every neighbour list has 3·len distinct entries at Hamming distance
    /// one, and the relation is symmetric.
    #[test]
    fn prop_graph_degree_and_symmetry(codons in 1usize..=2, id in 0u32..4096) {
        let space = GenotypeSpace::new(codons).unwrap();
        let id = id % u32::try_from(space.size()).unwrap();
        let graph = GenotypeGraph::new(space);
        let neighbors = graph.neighbors(id);
        prop_assert_eq!(neighbors.len(), 3 * space.sequence_len());
        let mut sorted = neighbors.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), neighbors.len());
        for &v in neighbors {
            prop_assert_eq!(space.hamming_distance(id, v), 1);
            prop_assert!(graph.neighbors(v).contains(&id));
        }
    }

    /// Peak plateaus are valid and have no strictly fitter neighbour.
    #[test]
    fn prop_peaks_have_no_fitter_neighbor(values in fitness_values()) {
        let landscape = landscape(values);
        let fitness = landscape.fitness();
        for peak in landscape.count_peaks().peaks {
            for &g in &peak.genotypes {
                prop_assert!(fitness.is_valid(g));
                for &v in landscape.graph().neighbors(g) {
                    prop_assert!(fitness.value(v) <= peak.fitness);
                }
            }
        }
    }

    /// Accessible path counts never exceed path counts; global maxima
    /// have exactly one of each.
    #[test]
    fn prop_accessibility_bounds(values in fitness_values()) {
        let landscape = landscape(values);
        let access = landscape.accessibility();
        for id in landscape.space().ids() {
            let i = id as usize;
            prop_assert!(access.accessible[i] <= access.paths[i]);
        }
        for id in landscape.global_maxima() {
            prop_assert_eq!(access.paths[id as usize], 1);
            prop_assert_eq!(access.accessible[id as usize], 1);
        }
        let mean = access.mean_accessible_fraction(landscape.fitness());
        prop_assert!((0.0..=1.0).contains(&mean));
    }

    /// Every valid genotype ascends to at least one peak of the same
    /// fitness as the end of its path, and the reach weights add up to the
    /// number of valid genotypes.
    #[test]
    fn prop_ascent_terminal_consistency(values in fitness_values()) {
        let landscape = landscape(values);
        let fitness = landscape.fitness();
        let ascent = landscape.greedy_ascent();
        prop_assert!(ascent.check_invariants(fitness).is_empty());

        for id in landscape.space().ids() {
            if fitness.is_valid(id) {
                let path = ascent.path(id).unwrap();
                prop_assert!((path[0] - fitness.value(id)).abs() < 1e-12);
                prop_assert!(path.windows(2).all(|w| w[0] <= w[1]));
                prop_assert!(!ascent.peaks(id).is_empty());
            } else {
                prop_assert!(ascent.path(id).is_none());
            }
        }

        let summary = ascent.summarize(fitness).unwrap();
        let total: f64 = summary.reach.values().sum();
        prop_assert!((total - fitness.valid_count() as f64).abs() < 1e-9);
    }

    /// Ascents end on genotypes the peak detector also reports.
    #[test]
    fn prop_ascent_ends_on_detected_peaks(values in fitness_values()) {
        let landscape = landscape(values);
        let members: Vec<u32> = landscape
            .count_peaks()
            .peaks
            .iter()
            .flat_map(|p| p.genotypes.iter().copied())
            .collect();
        let summary = landscape.greedy_ascent().summarize(landscape.fitness()).unwrap();
        for peak in summary.reach.keys() {
            prop_assert!(members.contains(peak));
        }
    }

    /// A genotype whose best ascent runs through a fitter neighbour inherits
    /// all of that neighbour's peaks.
    #[test]
    fn prop_tied_ascents_union_peak_sets(values in fitness_values()) {
        let landscape = landscape(values);
        let fitness = landscape.fitness();
        let ascent = landscape.greedy_ascent();
        for (w, w_fitness) in fitness.iter_valid() {
            let w_path = ascent.path(w).unwrap();
            for &u in landscape.graph().neighbors(w) {
                let Some(u_fitness) = fitness.get(u) else { continue };
                if u_fitness <= w_fitness {
                    continue;
                }
                if ascent.path(u).as_deref() == Some(&w_path[1..]) {
                    for peak in ascent.peaks(u) {
                        prop_assert!(ascent.peaks(w).contains(peak));
                    }
                }
            }
        }
    }

    /// Epistasis fractions sum to one whenever any square was classified.
    #[test]
    fn prop_epistasis_fractions_sum_to_one(values in fitness_values(), seed in any::<u64>()) {
        let landscape = landscape(values);
        let counts = landscape.sample_epistasis(&EpistasisConfig { squares: 200, seed });
        let f = counts.fractions();
        let sum = f.none + f.magnitude + f.simple_sign + f.reciprocal_sign;
        if counts.total() > 0 {
            prop_assert!((sum - 1.0).abs() < 1e-9);
        } else {
            prop_assert!(sum.abs() < f64::EPSILON);
        }
    }
}

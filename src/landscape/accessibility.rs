//! Shortest and accessible mutational paths to the global peak.

// Path counts are converted to fractions
#![allow(clippy::cast_precision_loss)]

use super::fitness::FitnessTable;
use super::graph::GenotypeGraph;
use crate::genotype::GenotypeId;
use std::collections::VecDeque;

/// Distance of a genotype no source can reach.
pub const UNREACHED: u32 = u32::MAX;

/// Per-genotype path statistics towards a set of source genotypes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessibility {
    /// Hop distance to the nearest source, or [`UNREACHED`].
    pub distance: Vec<u32>,
    /// Number of shortest paths to any source.
    pub paths: Vec<u128>,
    /// Number of those paths along which fitness never decreases on the way
    /// to the source.
    pub accessible: Vec<u128>,
}

impl Accessibility {
    /// Fraction of shortest paths from `id` that are accessible.
    ///
    /// `None` if `id` is not reachable from any source.
    #[must_use]
    pub fn accessible_fraction(&self, id: GenotypeId) -> Option<f64> {
        let paths = self.paths[id as usize];
        (paths > 0).then(|| self.accessible[id as usize] as f64 / paths as f64)
    }

    /// Mean accessible fraction over all valid genotypes.
    ///
    /// Unreachable genotypes count as having no accessible path.
    #[must_use]
    pub fn mean_accessible_fraction(&self, fitness: &FitnessTable) -> f64 {
        let valid = fitness.valid_count();
        if valid == 0 {
            return 0.0;
        }
        let total: f64 = fitness
            .iter_valid()
            .map(|(id, _)| self.accessible_fraction(id).unwrap_or(0.0))
            .sum();
        total / valid as f64
    }
}

/// Multi-source breadth-first search from `sources`.
///
/// Every source starts at distance 0 with one path, which is also
/// accessible. When `u` at distance `d` reaches `v` at distance `d + 1`,
/// all of `u`'s paths extend to `v`; its accessible paths extend only if
/// `fitness(v) <= fitness(u)`, i.e. the step from `v` towards the source
/// does not lose fitness.
///
/// Invalid genotypes are traversed like any other, but their fitness sits
/// below every valid value, so no accessible path passes through one.
#[must_use]
pub fn propagate_accessibility(
    graph: &GenotypeGraph,
    fitness: &FitnessTable,
    sources: &[GenotypeId],
) -> Accessibility {
    let n = graph.node_count();
    let mut distance = vec![UNREACHED; n];
    let mut paths = vec![0u128; n];
    let mut accessible = vec![0u128; n];
    let mut queue = VecDeque::with_capacity(n);

    for &s in sources {
        let s_idx = s as usize;
        if distance[s_idx] == 0 {
            continue;
        }
        distance[s_idx] = 0;
        paths[s_idx] = 1;
        accessible[s_idx] = 1;
        queue.push_back(s);
    }

    while let Some(u) = queue.pop_front() {
        let u_idx = u as usize;
        let next = distance[u_idx] + 1;
        let u_fitness = fitness.value(u);
        for &v in graph.neighbors(u) {
            let v_idx = v as usize;
            if distance[v_idx] == UNREACHED {
                distance[v_idx] = next;
                queue.push_back(v);
            }
            if distance[v_idx] == next {
                paths[v_idx] += paths[u_idx];
                if fitness.value(v) <= u_fitness {
                    accessible[v_idx] += accessible[u_idx];
                }
            }
        }
    }

    Accessibility {
        distance,
        paths,
        accessible,
    }
}

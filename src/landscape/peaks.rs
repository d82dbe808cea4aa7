//! Local peak detection with plateau handling.

// Plateaus are sets of genotypes with exactly equal fitness
#![allow(clippy::float_cmp, clippy::cast_precision_loss)]

use super::fitness::FitnessTable;
use super::graph::GenotypeGraph;
use crate::genotype::GenotypeId;
use serde::Serialize;
use std::cmp::Ordering;

/// Tag of a genotype not yet touched by any iteration.
const UNVISITED: usize = usize::MAX;

/// A fitness plateau with no fitter neighbour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Peak {
    /// Common fitness of the plateau.
    pub fitness: f64,
    /// Genotypes of the plateau, in ID order.
    pub genotypes: Vec<GenotypeId>,
}

/// All local peaks of a landscape.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PeakSummary {
    /// Peaks in order of discovery (descending fitness).
    pub peaks: Vec<Peak>,
}

impl PeakSummary {
    /// Number of peaks.
    #[must_use]
    pub fn count(&self) -> usize {
        self.peaks.len()
    }

    /// Mean fitness over peaks, or 0 when there are none.
    #[must_use]
    pub fn mean_fitness(&self) -> f64 {
        if self.peaks.is_empty() {
            return 0.0;
        }
        self.peaks.iter().map(|p| p.fitness).sum::<f64>() / self.peaks.len() as f64
    }
}

/// Find every local peak plateau.
///
/// Genotypes are visited in descending fitness order. Each unvisited genotype
/// starts a flood fill of its equal-fitness plateau; every genotype the fill
/// touches is tagged with the current iteration. A plateau is a peak unless
/// the fill meets an equal-fitness genotype tagged by an earlier iteration,
/// which means a fitter or already processed region borders it. Genotypes
/// already tagged when their turn comes only tag their neighbours, which
/// keeps the total work linear in the number of edges.
///
/// Invalid genotypes never take part.
#[must_use]
pub fn find_peaks(graph: &GenotypeGraph, fitness: &FitnessTable) -> PeakSummary {
    let mut order: Vec<(GenotypeId, f64)> = fitness.iter_valid().collect();
    order.sort_unstable_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.0.cmp(&a.0))
    });

    let mut tag = vec![UNVISITED; graph.node_count()];
    let mut stack = Vec::new();
    let mut peaks = Vec::new();

    for (iteration, &(start, plateau_fitness)) in order.iter().enumerate() {
        if tag[start as usize] != UNVISITED {
            for &v in graph.neighbors(start) {
                tag[v as usize] = iteration;
            }
            continue;
        }

        let mut is_peak = true;
        let mut members = Vec::new();
        stack.push(start);
        while let Some(u) = stack.pop() {
            tag[u as usize] = iteration;
            members.push(u);
            for &v in graph.neighbors(u) {
                if fitness.value(v) == plateau_fitness {
                    match tag[v as usize] {
                        UNVISITED => stack.push(v),
                        t if t != iteration => is_peak = false,
                        _ => {}
                    }
                }
                tag[v as usize] = iteration;
            }
        }

        if is_peak {
            members.sort_unstable();
            peaks.push(Peak {
                fitness: plateau_fitness,
                genotypes: members,
            });
        }
    }

    log::debug!("{} peaks", peaks.len());
    PeakSummary { peaks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genotype::GenotypeSpace;
    use crate::landscape::fitness::INVALID_FITNESS;

    fn landscape(values: Vec<f64>) -> (GenotypeGraph, FitnessTable) {
        let space = GenotypeSpace::new(1).unwrap();
        (GenotypeGraph::new(space), FitnessTable::from_values(space, values).unwrap())
    }

    #[test]
    fn test_monotone_landscape_has_one_peak() {
        let (graph, fitness) = landscape((0..64).map(f64::from).collect());
        let summary = find_peaks(&graph, &fitness);
        assert_eq!(summary.count(), 1);
        assert_eq!(summary.peaks[0].genotypes, vec![63]);
        assert!((summary.mean_fitness() - 63.0).abs() < 1e-12);
    }

    #[test]
    fn test_adjacent_plateau_is_one_peak() {
        let mut values = vec![0.0; 64];
        values[0] = 5.0;
        values[1] = 5.0; // neighbour of 0 (first position A -> C)
        let (graph, fitness) = landscape(values);
        let summary = find_peaks(&graph, &fitness);
        let top: Vec<_> = summary.peaks.iter().filter(|p| p.fitness == 5.0).collect();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].genotypes, vec![0, 1]);
    }

    #[test]
    fn test_disconnected_equal_peaks_counted_separately() {
        let mut values = vec![0.0; 64];
        // AAA and UUU differ at every position
        values[0] = 3.0;
        values[63] = 3.0;
        let (graph, fitness) = landscape(values);
        let summary = find_peaks(&graph, &fitness);
        assert_eq!(summary.peaks.iter().filter(|p| p.fitness == 3.0).count(), 2);
    }

    #[test]
    fn test_invalid_genotypes_are_ignored() {
        let mut values: Vec<f64> = (0..64).map(f64::from).collect();
        values[63] = INVALID_FITNESS;
        let (graph, fitness) = landscape(values);
        let summary = find_peaks(&graph, &fitness);
        assert!(summary.peaks.iter().all(|p| p.genotypes.iter().all(|&g| fitness.is_valid(g))));
        assert!(summary.peaks.iter().all(|p| p.fitness.is_finite()));
    }

    #[test]
    fn test_peaks_have_no_fitter_neighbor() {
        let values: Vec<f64> = (0..64u32).map(|i| f64::from((i * 37) % 11)).collect();
        let (graph, fitness) = landscape(values);
        for peak in find_peaks(&graph, &fitness).peaks {
            for &g in &peak.genotypes {
                for &v in graph.neighbors(g) {
                    assert!(fitness.value(v) <= peak.fitness);
                }
            }
        }
    }
}

//! Greedy best-first ascent to local peaks.
//!
//! Every valid genotype is seeded as a candidate peak with the one-element
//! path `[fitness]`. Relaxation then runs downhill from the peaks: settling
//! `u` proposes, for each neighbour `v`, the path `[fitness(v)] ++ path(u)`.
//! A max-priority queue always settles the lexicographically greatest
//! proposed path first, which is the ascent from `v` whose first steps gain
//! the most. When a later proposal for a settled genotype carries exactly the
//! same path, the proposer's peaks are merged in; a smaller path is dropped.
//!
//! Paths share their tails: the path of `v` is a single cell pointing at the
//! settled path of the genotype it was relaxed from.
//!
//! Every proposal pushed on the queue allocates its own `Rc` cell, and a
//! dropped proposal frees it only when popped. Peak memory is one cell per
//! settled genotype plus one per pending proposal, bounded by the number of
//! graph edges. Flat per-genotype records (successor and length, compared by
//! walking successors) would avoid the per-proposal allocations at the cost
//! of indirect comparisons through the record table.

// Ties between ascent paths are exact fitness equalities
#![allow(clippy::float_cmp, clippy::cast_precision_loss)]

use super::fitness::FitnessTable;
use super::graph::GenotypeGraph;
use crate::error::InvariantViolation;
use crate::genotype::GenotypeId;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};
use std::rc::Rc;

/// One cell of a shared fitness path.
#[derive(Debug)]
struct PathCell {
    fitness: f64,
    len: usize,
    terminal: f64,
    rest: Option<Rc<PathCell>>,
}

impl Drop for PathCell {
    // Unlink iteratively so long chains do not recurse on drop.
    fn drop(&mut self) {
        let mut next = self.rest.take();
        while let Some(cell) = next {
            match Rc::try_unwrap(cell) {
                Ok(mut cell) => next = cell.rest.take(),
                Err(_) => break,
            }
        }
    }
}

/// Fitness values from a genotype up to the peak its ascent ends on.
#[derive(Debug, Clone)]
struct AscentPath(Rc<PathCell>);

impl AscentPath {
    fn source(fitness: f64) -> Self {
        Self(Rc::new(PathCell {
            fitness,
            len: 1,
            terminal: fitness,
            rest: None,
        }))
    }

    fn prepend(fitness: f64, rest: &Self) -> Self {
        Self(Rc::new(PathCell {
            fitness,
            len: rest.0.len + 1,
            terminal: rest.0.terminal,
            rest: Some(Rc::clone(&rest.0)),
        }))
    }

    fn head(&self) -> f64 {
        self.0.fitness
    }

    fn len(&self) -> usize {
        self.0.len
    }

    fn terminal(&self) -> f64 {
        self.0.terminal
    }

    fn values(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.len());
        let mut cell = Some(&self.0);
        while let Some(c) = cell {
            out.push(c.fitness);
            cell = c.rest.as_ref();
        }
        out
    }

    /// Lexicographic order on the fitness sequences; a proper prefix is smaller.
    fn lex_cmp(&self, other: &Self) -> Ordering {
        let mut a = Some(&self.0);
        let mut b = Some(&other.0);
        loop {
            match (a, b) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some(x), Some(y)) => {
                    if Rc::ptr_eq(x, y) {
                        return Ordering::Equal;
                    }
                    if x.fitness < y.fitness {
                        return Ordering::Less;
                    }
                    if x.fitness > y.fitness {
                        return Ordering::Greater;
                    }
                    a = x.rest.as_ref();
                    b = y.rest.as_ref();
                }
            }
        }
    }

    /// Exact, element-wise equality of the fitness sequences.
    fn same_as(&self, other: &Self) -> bool {
        self.len() == other.len() && self.lex_cmp(other) == Ordering::Equal
    }
}

/// A pending proposal to settle `node` with `path`.
#[derive(Debug)]
struct Event {
    path: AscentPath,
    node: GenotypeId,
    parent: Option<GenotypeId>,
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path
            .lex_cmp(&other.path)
            .then_with(|| other.node.cmp(&self.node))
            .then_with(|| other.parent.cmp(&self.parent))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

/// Settled ascent of every genotype.
#[derive(Debug, Clone)]
pub struct AscentMap {
    paths: Vec<Option<AscentPath>>,
    peaks: Vec<Vec<GenotypeId>>,
}

impl AscentMap {
    /// Fitness values along the best ascent from `id`, starting with its own.
    ///
    /// `None` for invalid genotypes.
    #[must_use]
    pub fn path(&self, id: GenotypeId) -> Option<Vec<f64>> {
        self.paths[id as usize].as_ref().map(AscentPath::values)
    }

    /// Number of mutations on the best ascent from `id`.
    #[must_use]
    pub fn steps(&self, id: GenotypeId) -> Option<usize> {
        self.paths[id as usize].as_ref().map(|p| p.len() - 1)
    }

    /// Fitness at the end of the best ascent from `id`.
    #[must_use]
    pub fn terminal_fitness(&self, id: GenotypeId) -> Option<f64> {
        self.paths[id as usize].as_ref().map(AscentPath::terminal)
    }

    /// Peaks reachable from `id` by a best ascent, in ID order.
    #[must_use]
    pub fn peaks(&self, id: GenotypeId) -> &[GenotypeId] {
        &self.peaks[id as usize]
    }

    /// Check that every valid genotype was settled and that its ascent ends
    /// at the fitness of each of its peaks.
    #[must_use]
    pub fn check_invariants(&self, fitness: &FitnessTable) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();
        for (id, _) in fitness.iter_valid() {
            let Some(path) = &self.paths[id as usize] else {
                violations.push(InvariantViolation {
                    message: format!("genotype {id} was never settled"),
                });
                continue;
            };
            let peaks = self.peaks(id);
            if peaks.is_empty() {
                violations.push(InvariantViolation {
                    message: format!("genotype {id} reaches no peak"),
                });
            }
            for &peak in peaks {
                if fitness.value(peak) != path.terminal() {
                    violations.push(InvariantViolation {
                        message: format!(
                            "genotype {id} ascends to fitness {} but peak {peak} has fitness {}",
                            path.terminal(),
                            fitness.value(peak)
                        ),
                    });
                }
            }
        }
        violations
    }

    /// Aggregate the ascents of all valid genotypes.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found; the statistics would
    /// be meaningless.
    pub fn summarize(&self, fitness: &FitnessTable) -> Result<AscentSummary, InvariantViolation> {
        if let Some(violation) = self.check_invariants(fitness).into_iter().next() {
            return Err(violation);
        }

        let mut fitness_sum = 0.0;
        let mut steps_sum = 0.0;
        let mut reach: BTreeMap<GenotypeId, f64> = BTreeMap::new();
        for (id, _) in fitness.iter_valid() {
            let Some(path) = &self.paths[id as usize] else {
                continue;
            };
            fitness_sum += path.terminal();
            steps_sum += (path.len() - 1) as f64;
            let peaks = self.peaks(id);
            let weight = 1.0 / peaks.len() as f64;
            for &peak in peaks {
                *reach.entry(peak).or_insert(0.0) += weight;
            }
        }

        let genotypes = fitness.valid_count();
        let denom = genotypes.max(1) as f64;
        Ok(AscentSummary {
            genotypes,
            mean_fitness: fitness_sum / denom,
            mean_steps: steps_sum / denom,
            reach,
        })
    }
}

/// Landscape-wide greedy-ascent statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AscentSummary {
    /// Number of valid genotypes averaged over.
    pub genotypes: usize,
    /// Mean fitness at the end of the ascent.
    pub mean_fitness: f64,
    /// Mean number of mutations to reach a peak.
    pub mean_steps: f64,
    /// Peak genotype to number of genotypes ascending to it; a genotype
    /// reaching `k` peaks adds `1/k` to each.
    pub reach: BTreeMap<GenotypeId, f64>,
}

impl AscentSummary {
    /// Group reach weights by a label such as the peak's translation.
    #[must_use]
    pub fn reach_by_label<F>(&self, mut label: F) -> BTreeMap<String, f64>
    where
        F: FnMut(GenotypeId) -> String,
    {
        let mut out = BTreeMap::new();
        for (&peak, &weight) in &self.reach {
            *out.entry(label(peak)).or_insert(0.0) += weight;
        }
        out
    }
}

/// Run the greedy-ascent relaxation over all valid genotypes.
#[must_use]
pub fn greedy_ascent(graph: &GenotypeGraph, fitness: &FitnessTable) -> AscentMap {
    let n = graph.node_count();
    let mut paths: Vec<Option<AscentPath>> = vec![None; n];
    let mut peaks: Vec<Vec<GenotypeId>> = vec![Vec::new(); n];
    // Best parent fitness proposed so far; a neighbour only proposes if it
    // is at least this fit.
    let mut parent_bound: Vec<f64> = fitness.as_slice().to_vec();

    let mut queue: BinaryHeap<Event> = fitness
        .iter_valid()
        .map(|(id, f)| Event {
            path: AscentPath::source(f),
            node: id,
            parent: None,
        })
        .collect();

    log::info!("relaxing {} candidate peaks", queue.len());

    while let Some(event) = queue.pop() {
        let u = event.node;
        let u_idx = u as usize;

        if let Some(settled) = &paths[u_idx] {
            if let Some(parent) = event.parent {
                if settled.same_as(&event.path) {
                    let inherited = peaks[parent as usize].clone();
                    merge_peaks(&mut peaks[u_idx], &inherited);
                }
            }
            continue;
        }

        peaks[u_idx] = match event.parent {
            None => vec![u],
            Some(parent) => peaks[parent as usize].clone(),
        };
        let path = event.path;
        paths[u_idx] = Some(path.clone());

        let u_fitness = fitness.value(u);
        for &v in graph.neighbors(u) {
            if !fitness.is_valid(v) {
                continue;
            }
            let v_idx = v as usize;
            let v_fitness = fitness.value(v);
            let lateral = path.len() == 1 && v_fitness == path.head();
            if lateral || parent_bound[v_idx] > u_fitness {
                continue;
            }
            let candidate = AscentPath::prepend(v_fitness, &path);
            let admissible = match &paths[v_idx] {
                None => true,
                Some(existing) => existing.same_as(&candidate),
            };
            if admissible {
                queue.push(Event {
                    path: candidate,
                    node: v,
                    parent: Some(u),
                });
                parent_bound[v_idx] = u_fitness;
            }
        }
    }

    AscentMap { paths, peaks }
}

/// Union `extra` into the sorted, deduplicated `peaks`.
fn merge_peaks(peaks: &mut Vec<GenotypeId>, extra: &[GenotypeId]) {
    peaks.extend_from_slice(extra);
    peaks.sort_unstable();
    peaks.dedup();
}

//! Single-nucleotide mutation graph over a genotype space.

use crate::genotype::{GenotypeId, GenotypeSpace, Nucleotide};

/// Adjacency of every genotype to its single-mutation neighbours.
///
/// The graph is a generalized hypercube: each of the `len` positions can
/// change to any of the three other nucleotides. Neighbour lists are stored
/// back to back in one flat array, `degree` entries per genotype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenotypeGraph {
    space: GenotypeSpace,
    neighbors: Vec<GenotypeId>,
}

impl GenotypeGraph {
    /// Enumerate the neighbours of every genotype in `space`.
    #[must_use]
    pub fn new(space: GenotypeSpace) -> Self {
        log::info!("building genotype graph");
        let mut neighbors = Vec::with_capacity(space.size() * space.degree());
        for id in space.ids() {
            push_neighbors(space, id, &mut neighbors);
        }
        log::debug!("{} edges", neighbors.len());
        Self { space, neighbors }
    }

    /// The genotype space.
    #[must_use]
    pub const fn space(&self) -> GenotypeSpace {
        self.space
    }

    /// Number of neighbours of every genotype.
    #[must_use]
    pub const fn degree(&self) -> usize {
        self.space.degree()
    }

    /// Number of genotypes.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.space.size()
    }

    /// Neighbours of `id`, ordered by position, then by nucleotide.
    #[must_use]
    pub fn neighbors(&self, id: GenotypeId) -> &[GenotypeId] {
        let degree = self.degree();
        let start = id as usize * degree;
        &self.neighbors[start..start + degree]
    }
}

/// Append the single-mutation neighbours of `id` to `out`.
fn push_neighbors(space: GenotypeSpace, id: GenotypeId, out: &mut Vec<GenotypeId>) {
    for pos in 0..space.sequence_len() {
        let current = space.symbol_at(id, pos);
        for n in Nucleotide::ALL {
            if n != current {
                out.push(space.with_symbol(id, pos, n));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_degree_and_distinct_neighbors() {
        let space = GenotypeSpace::new(1).unwrap();
        let graph = GenotypeGraph::new(space);
        for id in space.ids() {
            let neighbors = graph.neighbors(id);
            assert_eq!(neighbors.len(), 9);
            let distinct: HashSet<_> = neighbors.iter().collect();
            assert_eq!(distinct.len(), 9);
            assert!(!neighbors.contains(&id));
            for &v in neighbors {
                assert_eq!(space.hamming_distance(id, v), 1);
            }
        }
    }

    #[test]
    fn test_neighbor_relation_is_symmetric() {
        let space = GenotypeSpace::new(2).unwrap();
        let graph = GenotypeGraph::new(space);
        for id in space.ids().step_by(37) {
            for &v in graph.neighbors(id) {
                assert!(graph.neighbors(v).contains(&id));
            }
        }
    }

    #[test]
    fn test_neighbor_order() {
        let space = GenotypeSpace::new(1).unwrap();
        let graph = GenotypeGraph::new(space);
        let neighbors: Vec<String> = graph.neighbors(0).iter().map(|&v| space.decode(v)).collect();
        assert_eq!(&neighbors[..3], ["CAA", "GAA", "UAA"]);
        assert_eq!(&neighbors[6..], ["AAC", "AAG", "AAU"]);
    }
}

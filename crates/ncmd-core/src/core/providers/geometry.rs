use crate::core::models::configuration::Configuration;
use crate::core::models::partition::{ComponentPartition, Dimensionality};
use crate::core::utils::geometry::distance_matrix;
use itertools::Itertools;
use nalgebra::DMatrix;
use tracing::{instrument, trace};

/// Geometric queries the analysis pipeline needs from the simulation engine.
pub trait GeometryProvider {
    /// Returns the full `n x n` pairwise distance matrix of a configuration.
    fn pairwise_distances(&self, configuration: &Configuration) -> DMatrix<f64>;

    /// Splits a configuration into its maximal connected components under `cutoff`,
    /// grouped by dimensionality.
    fn isolate_components(&self, configuration: &Configuration, cutoff: f64)
    -> ComponentPartition;
}

/// Distance-cutoff connectivity for non-periodic configurations.
///
/// Two atoms are bonded when their separation is at most the cutoff; components are the
/// connected subgraphs of that bond graph. Without a periodic cell every component is
/// finite, so all of them are reported as [`Dimensionality::Isolated`]. Components are
/// ordered by their lowest atom index and keep the original relative atom order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CutoffConnectivity;

impl CutoffConnectivity {
    pub fn new() -> Self {
        Self
    }
}

impl GeometryProvider for CutoffConnectivity {
    fn pairwise_distances(&self, configuration: &Configuration) -> DMatrix<f64> {
        distance_matrix(&configuration.positions())
    }

    #[instrument(level = "debug", skip_all, fields(atoms = configuration.len(), cutoff = cutoff))]
    fn isolate_components(
        &self,
        configuration: &Configuration,
        cutoff: f64,
    ) -> ComponentPartition {
        let positions = configuration.positions();
        let mut sets = DisjointSets::new(positions.len());

        for (i, j) in (0..positions.len()).tuple_combinations() {
            if nalgebra::distance(&positions[i], &positions[j]) <= cutoff {
                sets.union(i, j);
            }
        }

        let mut partition = ComponentPartition::new();
        for members in sets.groups() {
            trace!(size = members.len(), "Isolated component.");
            partition.insert(Dimensionality::Isolated, configuration.subset(&members));
        }
        partition
    }
}

/// Union-find over atom indices with path halving and union by size.
struct DisjointSets {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        let (large, small) = if self.size[ra] >= self.size[rb] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[small] = large;
        self.size[large] += self.size[small];
    }

    /// Member lists ordered by their lowest index; members ascend within each list.
    fn groups(&mut self) -> Vec<Vec<usize>> {
        let n = self.parent.len();
        let mut slot_of_root = vec![usize::MAX; n];
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for i in 0..n {
            let root = self.find(i);
            if slot_of_root[root] == usize::MAX {
                slot_of_root[root] = groups.len();
                groups.push(Vec::new());
            }
            groups[slot_of_root[root]].push(i);
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use nalgebra::Point3;

    fn config(points: &[(f64, f64, f64)]) -> Configuration {
        points
            .iter()
            .map(|&(x, y, z)| Atom::new("Ar", Point3::new(x, y, z)))
            .collect()
    }

    #[test]
    fn pairwise_distances_match_positions() {
        let c = config(&[(0.0, 0.0, 0.0), (0.0, 0.0, 2.0)]);
        let m = CutoffConnectivity.pairwise_distances(&c);
        assert_eq!(m.shape(), (2, 2));
        assert!((m[(0, 1)] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn separates_distant_clusters() {
        let c = config(&[
            (0.0, 0.0, 0.0),
            (20.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (21.0, 0.0, 0.0),
            (50.0, 0.0, 0.0),
        ]);
        let partition = CutoffConnectivity.isolate_components(&c, 1.5);

        assert_eq!(partition.len(), 3);
        let sizes: Vec<_> = partition.components().map(|(_, c)| c.len()).collect();
        assert_eq!(sizes, vec![2, 2, 1]);

        let first = &partition.get(Dimensionality::Isolated)[0];
        assert_eq!(first.positions()[1], Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn connectivity_is_transitive() {
        let c = config(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (2.0, 0.0, 0.0), (3.0, 0.0, 0.0)]);
        let partition = CutoffConnectivity.isolate_components(&c, 1.0);
        assert_eq!(partition.len(), 1);
        assert_eq!(partition.get(Dimensionality::Isolated)[0].len(), 4);
    }

    #[test]
    fn empty_configuration_yields_empty_partition() {
        let partition = CutoffConnectivity.isolate_components(&Configuration::new(), 2.0);
        assert!(partition.is_empty());
    }

    #[test]
    fn every_component_is_reported_as_isolated() {
        let c = config(&[(0.0, 0.0, 0.0), (10.0, 0.0, 0.0)]);
        let partition = CutoffConnectivity.isolate_components(&c, 1.0);
        assert!(partition.components().all(|(d, _)| d == Dimensionality::Isolated));
    }
}

use super::configuration::Configuration;
use std::collections::BTreeMap;
use std::fmt;

/// Classifies the geometric extent of a connected component.
///
/// The discriminant is the conventional integer key (0 for finite clusters up to 3 for
/// bulk), and the derived ordering follows it, which fixes the iteration order of a
/// [`ComponentPartition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimensionality {
    /// A finite, isolated cluster (0D).
    Isolated = 0,
    /// A component extended along one direction (1D).
    Chain = 1,
    /// A component extended along two directions (2D).
    Sheet = 2,
    /// A component extended along all three directions (3D).
    Bulk = 3,
}

impl Dimensionality {
    /// Returns the integer dimensionality key.
    pub fn key(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Dimensionality {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Dimensionality::Isolated),
            1 => Ok(Dimensionality::Chain),
            2 => Ok(Dimensionality::Sheet),
            3 => Ok(Dimensionality::Bulk),
            other => Err(other),
        }
    }
}

impl fmt::Display for Dimensionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.key())
    }
}

/// The connected components of a configuration, grouped by dimensionality.
///
/// Iteration order is part of the contract: ascending dimensionality key, then the
/// order in which components were inserted under that key. Cluster-size reports and
/// any consumer that zips results back onto components rely on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentPartition {
    groups: BTreeMap<Dimensionality, Vec<Configuration>>,
}

impl ComponentPartition {
    /// Creates an empty partition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a component under the given dimensionality key.
    pub fn insert(&mut self, dimensionality: Dimensionality, component: Configuration) {
        self.groups.entry(dimensionality).or_default().push(component);
    }

    /// Returns the components stored under one dimensionality key, in insertion order.
    pub fn get(&self, dimensionality: Dimensionality) -> &[Configuration] {
        self.groups
            .get(&dimensionality)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterates over the non-empty groups in ascending key order.
    pub fn groups(&self) -> impl Iterator<Item = (Dimensionality, &[Configuration])> {
        self.groups
            .iter()
            .filter(|(_, components)| !components.is_empty())
            .map(|(&dim, components)| (dim, components.as_slice()))
    }

    /// Iterates over every component in partition order.
    pub fn components(&self) -> impl Iterator<Item = (Dimensionality, &Configuration)> {
        self.groups
            .iter()
            .flat_map(|(&dim, components)| components.iter().map(move |c| (dim, c)))
    }

    /// Returns the total number of components across all keys.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Returns `true` if the partition holds no components.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of components per dimensionality key, in key order.
    pub fn counts(&self) -> Vec<(Dimensionality, usize)> {
        self.groups()
            .map(|(dim, components)| (dim, components.len()))
            .collect()
    }
}

impl FromIterator<(Dimensionality, Configuration)> for ComponentPartition {
    fn from_iter<I: IntoIterator<Item = (Dimensionality, Configuration)>>(iter: I) -> Self {
        let mut partition = Self::new();
        for (dim, component) in iter {
            partition.insert(dim, component);
        }
        partition
    }
}

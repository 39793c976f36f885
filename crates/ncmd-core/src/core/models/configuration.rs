use super::atom::Atom;
use nalgebra::{Point3, Rotation3, Vector3};

/// An ordered collection of atoms, the subject of every analysis in NCMD.
///
/// Configurations are plain value types: analysis routines borrow them immutably and
/// never reorder or mutate their atoms. Geometric transformations used by scene assembly
/// (`translate`, `rotate_about`, `extend`) operate on owned copies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Configuration {
    atoms: Vec<Atom>,
}

impl Configuration {
    /// Creates a new, empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration from an existing list of atoms, preserving their order.
    pub fn from_atoms(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    /// Appends an atom to the end of the configuration.
    pub fn push(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    /// Returns the number of atoms.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Returns `true` if the configuration holds no atoms.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Returns the atoms as a slice, in stored order.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Returns an iterator over the atoms in stored order.
    pub fn iter(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }

    /// Returns the atom at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Collects the atomic positions in stored order.
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.atoms.iter().map(|a| a.position).collect()
    }

    /// Returns an iterator over the species labels in stored order.
    pub fn species(&self) -> impl Iterator<Item = &str> {
        self.atoms.iter().map(|a| a.species.as_str())
    }

    /// Builds a new configuration from the atoms at the given indices, in the given order.
    ///
    /// Indices that are out of bounds are ignored.
    pub fn subset(&self, indices: &[usize]) -> Self {
        indices
            .iter()
            .filter_map(|&i| self.atoms.get(i).cloned())
            .collect()
    }

    /// Appends all atoms of `other` after the atoms of `self`.
    pub fn extend(&mut self, other: &Configuration) {
        self.atoms.extend(other.atoms.iter().cloned());
    }

    /// Translates every atom by `offset`.
    pub fn translate(&mut self, offset: &Vector3<f64>) {
        for atom in &mut self.atoms {
            atom.position += *offset;
        }
    }

    /// Rotates every atom by `rotation` around `center`.
    pub fn rotate_about(&mut self, rotation: &Rotation3<f64>, center: &Point3<f64>) {
        for atom in &mut self.atoms {
            atom.position = center + rotation * (atom.position - center);
        }
    }

    /// Returns the geometric centre of the atoms, or `None` for an empty configuration.
    pub fn centroid(&self) -> Option<Point3<f64>> {
        if self.atoms.is_empty() {
            return None;
        }
        let sum = self
            .atoms
            .iter()
            .fold(Vector3::zeros(), |acc, a| acc + a.position.coords);
        Some(Point3::from(sum / self.atoms.len() as f64))
    }

    /// Returns the mass-weighted centre of the atoms.
    ///
    /// Returns `None` for an empty configuration or when any species has no known
    /// atomic mass; use [`Configuration::unknown_species`] to tell the two apart.
    pub fn center_of_mass(&self) -> Option<Point3<f64>> {
        if self.atoms.is_empty() {
            return None;
        }
        let mut total_mass = 0.0;
        let mut weighted = Vector3::zeros();
        for atom in &self.atoms {
            let mass = atom.mass()?;
            total_mass += mass;
            weighted += atom.position.coords * mass;
        }
        Some(Point3::from(weighted / total_mass))
    }

    /// Returns the first species label without a known atomic mass, if any.
    pub fn unknown_species(&self) -> Option<&str> {
        self.atoms
            .iter()
            .find(|a| a.mass().is_none())
            .map(|a| a.species.as_str())
    }
}

impl FromIterator<Atom> for Configuration {
    fn from_iter<I: IntoIterator<Item = Atom>>(iter: I) -> Self {
        Self {
            atoms: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Configuration {
    type Item = &'a Atom;
    type IntoIter = std::slice::Iter<'a, Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}

impl IntoIterator for Configuration {
    type Item = Atom;
    type IntoIter = std::vec::IntoIter<Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.into_iter()
    }
}

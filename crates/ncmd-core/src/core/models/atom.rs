use super::element;
use nalgebra::Point3;

/// Represents a single point particle in an atomic configuration.
///
/// An atom carries only what the analysis and I/O layers need: a species label
/// (normally an element symbol such as `"Ar"` or `"Au"`) and a Cartesian position.
/// Velocities, forces and charges are owned by the dynamics engine, not by this model.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The species label (e.g., "Ar", "Cu").
    pub species: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom` from a species label and a position.
    ///
    /// # Arguments
    ///
    /// * `species` - The species label of the atom.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(species: &str, position: Point3<f64>) -> Self {
        Self {
            species: species.to_string(),
            position,
        }
    }

    /// Returns the atomic mass of this atom's species in unified atomic mass units,
    /// or `None` when the species is not a known element symbol.
    pub fn mass(&self) -> Option<f64> {
        element::atomic_mass(&self.species)
    }
}

use crate::core::models::configuration::Configuration;
use crate::core::utils::geometry::{nearest_pair, random_rotation, random_unit_vector};
use nalgebra::{Point3, Unit, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, instrument, trace};

const MAX_ITERATIONS: usize = 50;
const ACCURACY: f64 = 1e-5;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    #[error("Cannot attach to or from an empty configuration")]
    EmptyConfiguration,
    #[error("Attachment distance must be a positive, finite number (got {0})")]
    InvalidDistance(f64),
    #[error("Unknown species '{0}': no atomic mass available for centre-of-mass placement")]
    UnknownSpecies(String),
    #[error("Attachment did not reach the target distance within {iterations} iterations")]
    NoConvergence { iterations: usize },
}

/// Assembles a multi-object scene by attaching one configuration to another.
pub trait SceneBuilder {
    /// Returns `scene` followed by a placed copy of `guest`, positioned so that the
    /// closest inter-object atom pair lies exactly `min_distance` apart.
    fn attach(
        &mut self,
        scene: &Configuration,
        guest: &Configuration,
        min_distance: f64,
    ) -> Result<Configuration, SceneError>;
}

/// Random-orientation attachment along a random direction.
///
/// The guest is rotated by a uniform random rotation about its centre of mass, its
/// centre of mass is placed on the scene's, and it is then pushed along a uniform
/// random direction until the nearest inter-object distance equals the target.
#[derive(Debug, Clone)]
pub struct RandomAttachment<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomAttachment<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomAttachment<StdRng> {
    /// Builds an attachment whose sequence of rotations and directions is reproducible.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> SceneBuilder for RandomAttachment<R> {
    #[instrument(level = "debug", skip_all, fields(scene = scene.len(), guest = guest.len(), min_distance = min_distance))]
    fn attach(
        &mut self,
        scene: &Configuration,
        guest: &Configuration,
        min_distance: f64,
    ) -> Result<Configuration, SceneError> {
        if !min_distance.is_finite() || min_distance <= 0.0 {
            return Err(SceneError::InvalidDistance(min_distance));
        }
        let scene_com = mass_center(scene)?;
        let guest_com = mass_center(guest)?;

        let mut placed = guest.clone();
        placed.rotate_about(&random_rotation(&mut self.rng), &guest_com);
        placed.translate(&(scene_com - guest_com));

        let direction = random_unit_vector(&mut self.rng);
        push_to_distance(scene, &mut placed, &direction, min_distance)?;

        let mut result = scene.clone();
        result.extend(&placed);
        Ok(result)
    }
}

fn mass_center(configuration: &Configuration) -> Result<Point3<f64>, SceneError> {
    if configuration.is_empty() {
        return Err(SceneError::EmptyConfiguration);
    }
    if let Some(species) = configuration.unknown_species() {
        return Err(SceneError::UnknownSpecies(species.to_string()));
    }
    configuration
        .center_of_mass()
        .ok_or(SceneError::EmptyConfiguration)
}

/// Translates `guest` along `direction` until its nearest atom to `scene` sits at
/// `target` distance.
///
/// Each iteration solves `|s + t d| = target` for the current nearest pair separation
/// `s`, taking the outward root. When the pair cannot reach the target along `d`, the
/// guest moves to the pair's point of closest approach instead.
fn push_to_distance(
    scene: &Configuration,
    guest: &mut Configuration,
    direction: &Unit<Vector3<f64>>,
    target: f64,
) -> Result<(), SceneError> {
    let scene_positions = scene.positions();
    let unit = direction.into_inner();

    for iteration in 0..=MAX_ITERATIONS {
        let pair = nearest_pair(&scene_positions, &guest.positions())
            .ok_or(SceneError::EmptyConfiguration)?;
        let distance = pair.distance();
        trace!(iteration, distance, "Nearest inter-object pair.");

        if (distance - target).abs() < ACCURACY {
            debug!(iterations = iteration, "Attachment converged.");
            return Ok(());
        }
        if iteration == MAX_ITERATIONS {
            break;
        }

        let along = pair.separation.dot(&unit);
        let discriminant = along * along - distance * distance + target * target;
        let step = if discriminant >= 0.0 {
            -along + discriminant.sqrt()
        } else {
            -along
        };
        guest.translate(&(unit * step));
    }

    Err(SceneError::NoConvergence {
        iterations: MAX_ITERATIONS,
    })
}

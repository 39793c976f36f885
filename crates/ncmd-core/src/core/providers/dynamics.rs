use crate::core::io::traits::TrajectoryError;
use crate::core::models::configuration::Configuration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DynamicsError {
    #[error("Dynamics engine failed: {0}")]
    Runner(String),
    #[error("Failed to record trajectory frame: {0}")]
    Sink(#[from] TrajectoryError),
    #[error("Invalid dynamics parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Parameters of a Langevin run started from Maxwell-Boltzmann velocities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicsParams {
    /// Thermostat and initial-velocity temperature in kelvin.
    pub temperature_k: f64,
    /// Integration timestep in femtoseconds.
    pub timestep_fs: f64,
    pub steps: usize,
    /// Langevin friction coefficient, in inverse femtoseconds.
    pub friction: f64,
}

impl DynamicsParams {
    pub fn validate(&self) -> Result<(), DynamicsError> {
        fn invalid(name: &'static str, reason: &str) -> DynamicsError {
            DynamicsError::InvalidParameter {
                name,
                reason: reason.to_string(),
            }
        }

        if !self.temperature_k.is_finite() || self.temperature_k < 0.0 {
            return Err(invalid("temperature_k", "must be finite and non-negative"));
        }
        if !self.timestep_fs.is_finite() || self.timestep_fs <= 0.0 {
            return Err(invalid("timestep_fs", "must be finite and positive"));
        }
        if !self.friction.is_finite() || self.friction < 0.0 {
            return Err(invalid("friction", "must be finite and non-negative"));
        }
        Ok(())
    }
}

/// Callback invoked by a [`DynamicsRunner`] after every integration step.
///
/// Any `FnMut(usize, &Configuration) -> Result<(), DynamicsError>` closure qualifies.
pub trait StepObserver {
    /// Receives the one-based index of the completed step and the current state.
    fn observe(&mut self, step: usize, configuration: &Configuration) -> Result<(), DynamicsError>;
}

impl<F> StepObserver for F
where
    F: FnMut(usize, &Configuration) -> Result<(), DynamicsError>,
{
    fn observe(&mut self, step: usize, configuration: &Configuration) -> Result<(), DynamicsError> {
        self(step, configuration)
    }
}

/// External molecular-dynamics engine.
///
/// Implementations initialize velocities from a Maxwell-Boltzmann distribution at
/// `params.temperature_k`, then integrate `params.steps` Langevin steps, calling the
/// observer after each one. An observer error aborts the run and is returned as is.
pub trait DynamicsRunner {
    fn run(
        &mut self,
        configuration: Configuration,
        params: &DynamicsParams,
        observer: &mut dyn StepObserver,
    ) -> Result<Configuration, DynamicsError>;
}

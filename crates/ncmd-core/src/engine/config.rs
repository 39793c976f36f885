use crate::core::analysis::histogram::Bins;
use crate::core::providers::dynamics::DynamicsParams;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Bonding cutoff for component isolation, in angstroms.
    pub cutoff: f64,
    pub bins: Bins,
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    cutoff: Option<f64>,
    bins: Option<Bins>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }
    pub fn bins(mut self, bins: Bins) -> Self {
        self.bins = Some(bins);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let cutoff = self.cutoff.ok_or(ConfigError::MissingParameter("cutoff"))?;
        if !cutoff.is_finite() || cutoff <= 0.0 {
            return Err(invalid("cutoff", format!("must be positive, got {cutoff}")));
        }
        let bins = self.bins.ok_or(ConfigError::MissingParameter("bins"))?;
        if let Bins::Count(0) = bins {
            return Err(invalid("bins", "bin count must be at least 1"));
        }
        Ok(AnalysisConfig { cutoff, bins })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DynamicsConfig {
    pub params: DynamicsParams,
    /// Record a trajectory frame every `writeout` steps; `None` records nothing.
    pub writeout: Option<usize>,
}

#[derive(Default)]
pub struct DynamicsConfigBuilder {
    temperature_k: Option<f64>,
    timestep_fs: Option<f64>,
    steps: Option<usize>,
    friction: Option<f64>,
    writeout: Option<usize>,
}

impl DynamicsConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature_k(mut self, temperature: f64) -> Self {
        self.temperature_k = Some(temperature);
        self
    }
    pub fn timestep_fs(mut self, timestep: f64) -> Self {
        self.timestep_fs = Some(timestep);
        self
    }
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = Some(steps);
        self
    }
    pub fn friction(mut self, friction: f64) -> Self {
        self.friction = Some(friction);
        self
    }
    pub fn writeout(mut self, interval: usize) -> Self {
        self.writeout = Some(interval);
        self
    }

    pub fn build(self) -> Result<DynamicsConfig, ConfigError> {
        let params = DynamicsParams {
            temperature_k: self
                .temperature_k
                .ok_or(ConfigError::MissingParameter("temperature_k"))?,
            timestep_fs: self
                .timestep_fs
                .ok_or(ConfigError::MissingParameter("timestep_fs"))?,
            steps: self.steps.ok_or(ConfigError::MissingParameter("steps"))?,
            friction: self
                .friction
                .ok_or(ConfigError::MissingParameter("friction"))?,
        };
        if self.writeout == Some(0) {
            return Err(invalid("writeout", "interval must be at least 1 step"));
        }
        Ok(DynamicsConfig {
            params,
            writeout: self.writeout,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    /// Closest allowed distance between an attached guest and the scene, in angstroms.
    pub min_distance: f64,
    /// Number of guest copies to attach.
    pub iterations: usize,
}

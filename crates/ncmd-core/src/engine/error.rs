use thiserror::Error;

use super::config::ConfigError;
use crate::core::analysis::error::AnalysisError;
use crate::core::io::traits::TrajectoryError;
use crate::core::providers::dynamics::DynamicsError;
use crate::core::providers::scene::SceneError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Analysis failed: {source}")]
    Analysis {
        #[from]
        source: AnalysisError,
    },

    #[error("Trajectory I/O failed: {source}")]
    Trajectory {
        #[from]
        source: TrajectoryError,
    },

    #[error("Scene assembly failed: {source}")]
    Scene {
        #[from]
        source: SceneError,
    },

    #[error("Dynamics failed: {source}")]
    Dynamics {
        #[from]
        source: DynamicsError,
    },

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

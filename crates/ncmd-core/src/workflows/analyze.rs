use crate::core::analysis::aggregate::{NormalizedDistribution, aggregate};
use crate::core::analysis::clusters::cluster_sizes;
use crate::core::analysis::error::AnalysisError;
use crate::core::analysis::isolation::isolate;
use crate::core::models::configuration::Configuration;
use crate::core::models::partition::{ComponentPartition, Dimensionality};
use crate::core::providers::geometry::GeometryProvider;
use crate::engine::config::AnalysisConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct ClusterAnalysis {
    pub partition: ComponentPartition,
    pub component_counts: Vec<(Dimensionality, usize)>,
    pub cluster_sizes: Vec<usize>,
    /// Normalized aggregate radial distribution; `None` when every bin summed to zero.
    pub distribution: Option<NormalizedDistribution>,
}

#[instrument(skip_all, name = "analysis_workflow")]
pub fn run<P>(
    configuration: &Configuration,
    config: &AnalysisConfig,
    provider: &P,
    reporter: &ProgressReporter,
) -> Result<ClusterAnalysis, EngineError>
where
    P: GeometryProvider + Sync,
{
    let partition = reporter.phase("Isolating components", || {
        isolate(configuration, config.cutoff, provider)
    })?;
    let component_counts = partition.counts();
    let sizes = cluster_sizes(&partition);

    reporter.report(Progress::PhaseStart {
        name: "Radial distribution",
    });
    let distribution = match aggregate(&partition, &config.bins, provider) {
        Ok(distribution) => Some(distribution),
        Err(AnalysisError::DivideByZero) => {
            warn!("Every radial distribution bin is empty; no distribution will be reported.");
            reporter.message("Radial distribution is empty");
            None
        }
        Err(e) => return Err(e.into()),
    };
    reporter.report(Progress::PhaseFinish);

    info!(
        components = partition.len(),
        largest = sizes.iter().max().copied().unwrap_or(0),
        "Cluster analysis complete."
    );
    Ok(ClusterAnalysis {
        partition,
        component_counts,
        cluster_sizes: sizes,
        distribution,
    })
}

use crate::core::analysis::aggregate::NormalizedDistribution;
use crate::core::models::partition::ComponentPartition;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV writing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("CSV writing error: {0}")]
    Stream(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct ClusterSizeRow {
    component: usize,
    dimensionality: u8,
    size: usize,
}

#[derive(Debug, Serialize)]
struct DistributionRow {
    distance: f64,
    normalized_count: f64,
}

/// Writes one `component,dimensionality,size` row per component, in partition order.
pub fn write_cluster_sizes<W: Write>(
    writer: W,
    partition: &ComponentPartition,
) -> Result<(), ReportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for (index, (dimensionality, component)) in partition.components().enumerate() {
        csv.serialize(ClusterSizeRow {
            component: index,
            dimensionality: dimensionality.key(),
            size: component.len(),
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes one `distance,normalized_count` row per bin.
pub fn write_distribution<W: Write>(
    writer: W,
    distribution: &NormalizedDistribution,
) -> Result<(), ReportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for (distance, normalized_count) in distribution.points() {
        csv.serialize(DistributionRow {
            distance,
            normalized_count,
        })?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_cluster_sizes_to_path<P: AsRef<Path>>(
    path: P,
    partition: &ComponentPartition,
) -> Result<(), ReportError> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_cluster_sizes(file, partition).map_err(|e| with_path(e, path))
}

pub fn write_distribution_to_path<P: AsRef<Path>>(
    path: P,
    distribution: &NormalizedDistribution,
) -> Result<(), ReportError> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_distribution(file, distribution).map_err(|e| with_path(e, path))
}

fn with_path(error: ReportError, path: &Path) -> ReportError {
    match error {
        ReportError::Stream(source) => ReportError::Csv {
            path: path.to_string_lossy().to_string(),
            source,
        },
        other => other,
    }
}

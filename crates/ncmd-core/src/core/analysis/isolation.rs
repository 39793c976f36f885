use super::error::AnalysisError;
use crate::core::models::configuration::Configuration;
use crate::core::models::partition::ComponentPartition;
use crate::core::providers::geometry::GeometryProvider;
use tracing::{info, instrument};

/// Splits a configuration into connected components through the geometry provider.
///
/// The per-dimensionality component counts are logged at `info` level.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidInput`] if `cutoff` is not a finite positive number.
#[instrument(level = "debug", skip_all, fields(atoms = configuration.len(), cutoff = cutoff))]
pub fn isolate(
    configuration: &Configuration,
    cutoff: f64,
    provider: &impl GeometryProvider,
) -> Result<ComponentPartition, AnalysisError> {
    if !cutoff.is_finite() || cutoff <= 0.0 {
        return Err(AnalysisError::invalid(format!(
            "cutoff must be a positive, finite distance (got {cutoff})"
        )));
    }

    let partition = provider.isolate_components(configuration, cutoff);
    let counts = partition
        .counts()
        .iter()
        .map(|(dim, n)| format!("{dim}: {n}"))
        .collect::<Vec<_>>()
        .join(", ");
    info!(total = partition.len(), "Component counts: [{}]", counts);
    Ok(partition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::partition::Dimensionality;
    use nalgebra::{DMatrix, Point3};
    use std::cell::Cell;

    struct RecordingProvider {
        seen_cutoff: Cell<Option<f64>>,
    }

    impl GeometryProvider for RecordingProvider {
        fn pairwise_distances(&self, configuration: &Configuration) -> DMatrix<f64> {
            DMatrix::zeros(configuration.len(), configuration.len())
        }

        fn isolate_components(
            &self,
            configuration: &Configuration,
            cutoff: f64,
        ) -> ComponentPartition {
            self.seen_cutoff.set(Some(cutoff));
            let mut partition = ComponentPartition::new();
            partition.insert(Dimensionality::Sheet, configuration.clone());
            partition
        }
    }

    fn provider() -> RecordingProvider {
        RecordingProvider {
            seen_cutoff: Cell::new(None),
        }
    }

    fn pair() -> Configuration {
        Configuration::from_atoms(vec![
            Atom::new("Ar", Point3::new(0.0, 0.0, 0.0)),
            Atom::new("Ar", Point3::new(1.0, 0.0, 0.0)),
        ])
    }

    #[test]
    fn delegates_to_provider_with_given_cutoff() {
        let provider = provider();
        let partition = isolate(&pair(), 2.5, &provider).unwrap();

        assert_eq!(provider.seen_cutoff.get(), Some(2.5));
        assert_eq!(partition.get(Dimensionality::Sheet).len(), 1);
    }

    #[test]
    fn rejects_non_positive_or_non_finite_cutoff() {
        for cutoff in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let provider = provider();
            let err = isolate(&pair(), cutoff, &provider).unwrap_err();
            assert!(matches!(err, AnalysisError::InvalidInput(_)));
            assert!(provider.seen_cutoff.get().is_none());
        }
    }
}

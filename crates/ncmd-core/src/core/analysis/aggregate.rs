use super::error::AnalysisError;
use super::histogram::{Bins, Histogram, RadialDistribution, radial_distribution};
use crate::core::models::configuration::Configuration;
use crate::core::models::partition::ComponentPartition;
use crate::core::providers::geometry::GeometryProvider;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A summed distance histogram scaled so that its largest bin equals exactly 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDistribution {
    pub values: Vec<f64>,
    pub bin_centers: Vec<f64>,
}

impl NormalizedDistribution {
    /// Returns `(bin_center, value)` pairs in bin order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.bin_centers
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Running element-wise sum of aligned distance histograms.
///
/// The first histogram fixes the bin edges; every later one must carry identical edges.
#[derive(Debug, Clone, Default)]
pub struct DistributionAccumulator {
    total: Option<RadialDistribution>,
    components: usize,
}

impl DistributionAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one component's histogram to the running total.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidInput`] if the histogram's edges differ in length
    /// or in value from the edges of the first histogram added.
    pub fn add(&mut self, distribution: RadialDistribution) -> Result<(), AnalysisError> {
        let Some(total) = self.total.as_mut() else {
            self.total = Some(distribution);
            self.components = 1;
            return Ok(());
        };

        let expected = total.edges();
        let found = distribution.edges();
        if expected.len() != found.len() {
            return Err(AnalysisError::invalid(format!(
                "bin edges differ in length across components ({} vs {})",
                expected.len(),
                found.len()
            )));
        }
        if expected != found {
            return Err(AnalysisError::invalid(
                "bin edges differ across components; pass explicit edges instead of a bin count",
            ));
        }

        for (sum, count) in total
            .histogram
            .counts
            .iter_mut()
            .zip(distribution.counts())
        {
            *sum += count;
        }
        self.components += 1;
        Ok(())
    }

    /// Returns the number of histograms accumulated so far.
    pub fn components(&self) -> usize {
        self.components
    }

    /// Returns the summed histogram, if anything has been added.
    pub fn summed(&self) -> Option<&Histogram> {
        self.total.as_ref().map(|t| &t.histogram)
    }

    /// Divides the summed counts by their maximum.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidInput`] if nothing was accumulated and
    /// [`AnalysisError::DivideByZero`] if every summed count is zero.
    pub fn finish(self) -> Result<NormalizedDistribution, AnalysisError> {
        let total = self
            .total
            .ok_or_else(|| AnalysisError::invalid("no components to aggregate"))?;

        let max = total.counts().iter().copied().max().unwrap_or(0);
        if max == 0 {
            return Err(AnalysisError::DivideByZero);
        }
        let max = max as f64;

        Ok(NormalizedDistribution {
            values: total.counts().iter().map(|&c| c as f64 / max).collect(),
            bin_centers: total.bin_centers,
        })
    }
}

/// Sums the radial distributions of every component and normalizes by the maximum.
///
/// Components are visited in partition order. Components with fewer than two particles
/// have no pair distances and are skipped. Histograms are computed in parallel when the
/// `parallel` feature is enabled and always reduced in partition order.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidInput`] if the partition has no component with pair
/// distances, if a component's histogram cannot be built, or if component histograms are
/// not aligned (which happens with [`Bins::Count`] whenever component ranges differ).
/// Returns [`AnalysisError::DivideByZero`] if all summed counts are zero.
#[instrument(level = "debug", skip_all, fields(components = partition.len()))]
pub fn aggregate<P>(
    partition: &ComponentPartition,
    bins: &Bins,
    provider: &P,
) -> Result<NormalizedDistribution, AnalysisError>
where
    P: GeometryProvider + Sync,
{
    if partition.is_empty() {
        return Err(AnalysisError::invalid("partition contains no components"));
    }

    let eligible: Vec<&Configuration> = partition
        .components()
        .filter_map(|(dim, component)| {
            if component.len() < 2 {
                debug!(%dim, atoms = component.len(), "Skipping component without pair distances.");
                None
            } else {
                Some(component)
            }
        })
        .collect();

    #[cfg(not(feature = "parallel"))]
    let iterator = eligible.iter();

    #[cfg(feature = "parallel")]
    let iterator = eligible.par_iter();

    let distributions: Vec<Result<RadialDistribution, AnalysisError>> = iterator
        .map(|component| radial_distribution(component, bins, provider))
        .collect();

    let mut accumulator = DistributionAccumulator::new();
    for distribution in distributions {
        accumulator.add(distribution?)?;
    }

    info!(
        components = accumulator.components(),
        skipped = partition.len() - accumulator.components(),
        "Aggregated component radial distributions."
    );
    accumulator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analysis::histogram::histogram;
    use crate::core::models::atom::Atom;
    use crate::core::models::partition::Dimensionality;
    use crate::core::providers::geometry::CutoffConnectivity;
    use nalgebra::Point3;

    fn line(n: usize, spacing: f64, offset: f64) -> Configuration {
        (0..n)
            .map(|i| Atom::new("Ar", Point3::new(offset + i as f64 * spacing, 0.0, 0.0)))
            .collect()
    }

    fn edges() -> Bins {
        Bins::uniform(0.0, 8.0, 16).unwrap()
    }

    fn example_partition() -> ComponentPartition {
        let mut partition = ComponentPartition::new();
        partition.insert(Dimensionality::Isolated, line(5, 1.0, 0.0));
        partition.insert(Dimensionality::Chain, line(3, 1.5, 100.0));
        partition.insert(Dimensionality::Chain, line(2, 2.0, 200.0));
        partition
    }

    #[test]
    fn aggregate_sums_component_histograms_before_normalizing() {
        let partition = example_partition();
        let bins = edges();

        let mut expected = vec![0u64; 16];
        for (_, component) in partition.components() {
            let rdf = radial_distribution(component, &bins, &CutoffConnectivity).unwrap();
            for (e, c) in expected.iter_mut().zip(rdf.counts()) {
                *e += c;
            }
        }
        let max = *expected.iter().max().unwrap() as f64;

        let result = aggregate(&partition, &bins, &CutoffConnectivity).unwrap();
        assert_eq!(result.len(), 16);
        for (value, count) in result.values.iter().zip(&expected) {
            assert_eq!(*value, *count as f64 / max);
        }
    }

    #[test]
    fn normalized_maximum_is_exactly_one() {
        let result = aggregate(&example_partition(), &edges(), &CutoffConnectivity).unwrap();
        let max = result.values.iter().cloned().fold(f64::MIN, f64::max);
        assert_eq!(max, 1.0);
    }

    #[test]
    fn aggregation_is_order_independent() {
        let forward = example_partition();
        let components: Vec<_> = forward.components().map(|(_, c)| c.clone()).collect();
        let reversed: ComponentPartition = components
            .into_iter()
            .rev()
            .map(|c| (Dimensionality::Bulk, c))
            .collect();

        let a = aggregate(&forward, &edges(), &CutoffConnectivity).unwrap();
        let b = aggregate(&reversed, &edges(), &CutoffConnectivity).unwrap();
        for (x, y) in a.values.iter().zip(&b.values) {
            assert!((x - y).abs() < 1e-12);
        }
        assert_eq!(a.bin_centers, b.bin_centers);
    }

    #[test]
    fn empty_partition_is_invalid_input() {
        let err = aggregate(&ComponentPartition::new(), &edges(), &CutoffConnectivity)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));
    }

    #[test]
    fn partition_of_single_atoms_is_invalid_input() {
        let partition: ComponentPartition = (0..3)
            .map(|i| (Dimensionality::Isolated, line(1, 1.0, i as f64 * 10.0)))
            .collect();
        let err = aggregate(&partition, &edges(), &CutoffConnectivity).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));
    }

    #[test]
    fn singletons_are_skipped_alongside_larger_components() {
        let mut partition = example_partition();
        partition.insert(Dimensionality::Isolated, line(1, 1.0, 500.0));

        let with_singleton = aggregate(&partition, &edges(), &CutoffConnectivity).unwrap();
        let without = aggregate(&example_partition(), &edges(), &CutoffConnectivity).unwrap();
        assert_eq!(with_singleton, without);
    }

    #[test]
    fn all_zero_counts_fail_with_divide_by_zero() {
        let mut partition = ComponentPartition::new();
        partition.insert(Dimensionality::Isolated, line(2, 1.0, 0.0));
        let bins = Bins::Edges(vec![0.0, 5.0]);

        let err = aggregate(&partition, &bins, &CutoffConnectivity).unwrap_err();
        assert_eq!(err, AnalysisError::DivideByZero);
    }

    #[test]
    fn integer_bins_with_heterogeneous_ranges_are_rejected() {
        let mut partition = ComponentPartition::new();
        partition.insert(Dimensionality::Isolated, line(3, 1.0, 0.0));
        partition.insert(Dimensionality::Isolated, line(3, 2.0, 50.0));

        let err = aggregate(&partition, &Bins::Count(8), &CutoffConnectivity).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));
    }

    #[test]
    fn accumulator_rejects_edges_of_different_length() {
        let mut accumulator = DistributionAccumulator::new();
        let sample = [0.5, 1.0, 1.5, 2.5];
        accumulator
            .add(histogram(&sample, &Bins::Edges(vec![0.0, 1.0, 2.0])).unwrap())
            .unwrap();

        let err = accumulator
            .add(histogram(&sample, &Bins::Edges(vec![0.0, 1.0, 2.0, 3.0])).unwrap())
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));
        assert_eq!(accumulator.components(), 1);
    }

    #[test]
    fn accumulator_without_input_is_invalid() {
        let err = DistributionAccumulator::new().finish().unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));
    }

    #[test]
    fn accumulator_sums_element_wise() {
        let bins = Bins::Edges(vec![1.0, 2.0, 3.0]);
        let mut accumulator = DistributionAccumulator::new();
        accumulator.add(histogram(&[1.0, 1.5, 2.5], &bins).unwrap()).unwrap();
        accumulator.add(histogram(&[2.0, 2.9], &bins).unwrap()).unwrap();

        assert_eq!(accumulator.summed().unwrap().counts, vec![2, 3]);
        let normalized = accumulator.finish().unwrap();
        assert_eq!(normalized.values, vec![2.0 / 3.0, 1.0]);
        assert_eq!(normalized.points().count(), 2);
    }
}

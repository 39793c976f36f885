use super::error::AnalysisError;
use crate::core::models::configuration::Configuration;
use crate::core::providers::geometry::GeometryProvider;
use tracing::{instrument, trace};

/// How distance samples are binned.
#[derive(Debug, Clone, PartialEq)]
pub enum Bins {
    /// A number of equal-width bins spanning the observed `[min, max]` of each sample.
    ///
    /// Because the range follows the sample, histograms of different samples are not
    /// aligned and the zero-distance correction never applies.
    Count(usize),
    /// Explicit, strictly increasing bin edges shared by every sample.
    Edges(Vec<f64>),
}

impl Bins {
    /// Builds `n_bins + 1` evenly spaced explicit edges from `start` to `stop`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidInput`] if `n_bins` is zero, a bound is not finite,
    /// or `stop <= start`.
    pub fn uniform(start: f64, stop: f64, n_bins: usize) -> Result<Self, AnalysisError> {
        if n_bins == 0 {
            return Err(AnalysisError::invalid("bin count must be at least 1"));
        }
        if !start.is_finite() || !stop.is_finite() || stop <= start {
            return Err(AnalysisError::invalid(format!(
                "bin range [{start}, {stop}] is empty or not finite"
            )));
        }
        Ok(Bins::Edges(linspace(start, stop, n_bins)))
    }

    /// Returns `true` for the explicit-edges convention.
    pub fn is_explicit(&self) -> bool {
        matches!(self, Bins::Edges(_))
    }
}

/// Bin edges and the counts that fell between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `n + 1` bin edges.
    pub edges: Vec<f64>,
    /// `n` counts; `counts[i]` covers `[edges[i], edges[i + 1])`, the last bin is closed.
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Returns the number of bins.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the sum of all bin counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// A distance histogram together with the centre of each bin.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialDistribution {
    pub histogram: Histogram,
    /// `edges[i]` plus half the width of the first bin.
    pub bin_centers: Vec<f64>,
}

impl RadialDistribution {
    pub fn counts(&self) -> &[u64] {
        &self.histogram.counts
    }

    pub fn edges(&self) -> &[f64] {
        &self.histogram.edges
    }
}

/// Bins a sample of non-negative distances.
///
/// With [`Bins::Count`] the range is the observed `[min, max]` of the sample. With
/// [`Bins::Edges`] samples outside `[edges[0], edges[n]]` are not counted, and when the
/// first edge is exactly `0.0` the first bin is zeroed so the self-distances of a full
/// distance matrix do not swamp the lowest bin.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidInput`] for an empty sample, a negative or non-finite
/// sample value, a single-valued sample (`min == max`), a zero bin count, or edges that
/// are fewer than two, non-finite or not strictly increasing.
#[instrument(level = "trace", skip_all, fields(samples = distances.len()))]
pub fn histogram(distances: &[f64], bins: &Bins) -> Result<RadialDistribution, AnalysisError> {
    if distances.is_empty() {
        return Err(AnalysisError::invalid("distance sample is empty"));
    }
    if let Some(bad) = distances.iter().find(|d| !d.is_finite() || **d < 0.0) {
        return Err(AnalysisError::invalid(format!(
            "distance sample contains an invalid value: {bad}"
        )));
    }

    let (min, max) = distances
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &d| {
            (lo.min(d), hi.max(d))
        });
    if min == max {
        return Err(AnalysisError::invalid(format!(
            "distance sample has a degenerate range (min == max == {min})"
        )));
    }

    let edges = match bins {
        Bins::Count(0) => return Err(AnalysisError::invalid("bin count must be at least 1")),
        Bins::Count(n) => linspace(min, max, *n),
        Bins::Edges(edges) => {
            validate_edges(edges)?;
            edges.clone()
        }
    };

    let mut counts = vec![0u64; edges.len() - 1];
    for &d in distances {
        if let Some(bin) = locate_bin(&edges, d) {
            counts[bin] += 1;
        }
    }

    if bins.is_explicit() && edges[0] == 0.0 {
        trace!(zeroed = counts[0], "Suppressing self-distances in the first bin.");
        counts[0] = 0;
    }

    let half_width = (edges[1] - edges[0]) / 2.0;
    let bin_centers = edges[..edges.len() - 1]
        .iter()
        .map(|e| e + half_width)
        .collect();

    Ok(RadialDistribution {
        histogram: Histogram { edges, counts },
        bin_centers,
    })
}

/// Histograms every entry of a configuration's full distance matrix.
///
/// The sample includes both triangles and the zero diagonal, matching the all-distances
/// call of the geometry provider.
pub fn radial_distribution(
    configuration: &Configuration,
    bins: &Bins,
    provider: &impl GeometryProvider,
) -> Result<RadialDistribution, AnalysisError> {
    let distances = provider.pairwise_distances(configuration);
    histogram(distances.as_slice(), bins)
}

fn validate_edges(edges: &[f64]) -> Result<(), AnalysisError> {
    if edges.len() < 2 {
        return Err(AnalysisError::invalid(format!(
            "at least two bin edges are required, got {}",
            edges.len()
        )));
    }
    if edges.iter().any(|e| !e.is_finite()) {
        return Err(AnalysisError::invalid("bin edges must be finite"));
    }
    if edges.windows(2).any(|w| w[1] <= w[0]) {
        return Err(AnalysisError::invalid("bin edges must be strictly increasing"));
    }
    Ok(())
}

fn linspace(start: f64, stop: f64, n_bins: usize) -> Vec<f64> {
    let step = (stop - start) / n_bins as f64;
    let mut edges: Vec<f64> = (0..n_bins).map(|i| start + step * i as f64).collect();
    edges.push(stop);
    edges
}

fn locate_bin(edges: &[f64], value: f64) -> Option<usize> {
    let last = edges.len() - 1;
    if value < edges[0] || value > edges[last] {
        return None;
    }
    if value == edges[last] {
        return Some(last - 1);
    }
    Some(edges.partition_point(|&e| e <= value) - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::providers::geometry::CutoffConnectivity;
    use nalgebra::Point3;

    fn sample() -> Vec<f64> {
        vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.5, 2.5, 3.9, 4.0]
    }

    #[test]
    fn counts_sum_to_sample_size_for_integer_bins() {
        let rdf = histogram(&sample(), &Bins::Count(4)).unwrap();
        assert_eq!(rdf.histogram.len(), 4);
        assert_eq!(rdf.histogram.total(), sample().len() as u64);
    }

    #[test]
    fn integer_bins_span_observed_range() {
        let rdf = histogram(&[2.0, 3.0, 6.0], &Bins::Count(4)).unwrap();
        assert_eq!(rdf.edges(), &[2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(rdf.counts(), &[1, 1, 0, 1]);
        assert_eq!(rdf.bin_centers, vec![2.5, 3.5, 4.5, 5.5]);
    }

    #[test]
    fn integer_bins_never_zero_the_first_bin() {
        let rdf = histogram(&sample(), &Bins::Count(4)).unwrap();
        assert_eq!(rdf.edges()[0], 0.0);
        assert_eq!(rdf.counts()[0], 3);
    }

    #[test]
    fn explicit_edges_starting_at_zero_zero_only_the_first_bin() {
        let bins = Bins::Edges(vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        let rdf = histogram(&sample(), &bins).unwrap();

        assert_eq!(rdf.counts(), &[0, 3, 1, 2]);
        let zeroed = 3;
        assert_eq!(rdf.histogram.total(), sample().len() as u64 - zeroed);
    }

    #[test]
    fn explicit_edges_not_starting_at_zero_leave_first_bin_untouched() {
        let bins = Bins::Edges(vec![-1.0, 1.0, 3.0, 5.0]);
        let rdf = histogram(&sample(), &bins).unwrap();
        assert_eq!(rdf.counts(), &[3, 4, 2]);
        assert_eq!(rdf.histogram.total(), sample().len() as u64);
    }

    #[test]
    fn values_outside_explicit_edges_are_dropped_and_last_edge_is_inclusive() {
        let bins = Bins::Edges(vec![1.0, 2.0, 3.0]);
        let rdf = histogram(&[0.5, 1.0, 2.0, 3.0, 3.5], &bins).unwrap();
        assert_eq!(rdf.counts(), &[1, 2]);
    }

    #[test]
    fn bin_centers_use_first_bin_width() {
        let bins = Bins::uniform(0.0, 3.0, 3).unwrap();
        let rdf = histogram(&[0.0, 2.2], &bins).unwrap();
        assert_eq!(rdf.bin_centers, vec![0.5, 1.5, 2.5]);
    }

    #[test]
    fn histogram_is_idempotent() {
        let bins = Bins::uniform(0.0, 5.0, 10).unwrap();
        let a = histogram(&sample(), &bins).unwrap();
        let b = histogram(&sample(), &bins).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_sample_is_invalid() {
        let err = histogram(&[], &Bins::Count(10)).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));
    }

    #[test]
    fn single_valued_sample_is_invalid() {
        for bins in [Bins::Count(5), Bins::Edges(vec![0.0, 1.0, 2.0])] {
            let err = histogram(&[1.2, 1.2, 1.2], &bins).unwrap_err();
            assert!(matches!(err, AnalysisError::InvalidInput(_)));
        }
    }

    #[test]
    fn negative_or_nan_samples_are_invalid() {
        assert!(histogram(&[0.0, -1.0], &Bins::Count(2)).is_err());
        assert!(histogram(&[0.0, f64::NAN], &Bins::Count(2)).is_err());
    }

    #[test]
    fn malformed_bins_are_invalid() {
        let s = sample();
        assert!(histogram(&s, &Bins::Count(0)).is_err());
        assert!(histogram(&s, &Bins::Edges(vec![1.0])).is_err());
        assert!(histogram(&s, &Bins::Edges(vec![0.0, 2.0, 1.0])).is_err());
        assert!(histogram(&s, &Bins::Edges(vec![0.0, 0.0, 1.0])).is_err());
        assert!(histogram(&s, &Bins::Edges(vec![0.0, f64::INFINITY])).is_err());
    }

    #[test]
    fn uniform_rejects_bad_ranges() {
        assert!(Bins::uniform(0.0, 1.0, 0).is_err());
        assert!(Bins::uniform(1.0, 1.0, 4).is_err());
        assert!(Bins::uniform(2.0, 1.0, 4).is_err());
        assert_eq!(
            Bins::uniform(0.0, 2.0, 4).unwrap(),
            Bins::Edges(vec![0.0, 0.5, 1.0, 1.5, 2.0])
        );
    }

    #[test]
    fn radial_distribution_uses_full_distance_matrix() {
        let c: Configuration = [(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (3.0, 0.0, 0.0)]
            .iter()
            .map(|&(x, y, z)| Atom::new("Ar", Point3::new(x, y, z)))
            .collect();
        let bins = Bins::Edges(vec![0.0, 0.5, 1.5, 2.5, 3.5]);
        let rdf = radial_distribution(&c, &bins, &CutoffConnectivity).unwrap();

        // 9 entries: three zero self-distances (zeroed), pairs 1.0, 2.0, 3.0 twice each.
        assert_eq!(rdf.counts(), &[0, 2, 2, 2]);
    }
}

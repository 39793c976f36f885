use crate::error::{CliError, Result};
use ncmd::core::analysis::aggregate::NormalizedDistribution;
use plotters::prelude::*;
use std::path::Path;
use tracing::debug;

const CANVAS_SIZE: (u32, u32) = (1000, 700);
const TITLE: &str = "Radial Distribution Function - Clusters";
/// Headroom above the normalized maximum of 1.0.
const Y_MAX: f64 = 1.05;

fn plot_error(e: impl std::fmt::Display) -> CliError {
    CliError::Plot(e.to_string())
}

/// Renders a normalized distribution as an SVG line chart over `[0, x_max]`.
pub fn render_distribution(
    distribution: &NormalizedDistribution,
    x_max: f64,
    output_path: &Path,
) -> Result<()> {
    if distribution.is_empty() {
        return Err(CliError::Plot("distribution has no bins".to_string()));
    }
    if !x_max.is_finite() || x_max <= 0.0 {
        return Err(CliError::Plot(format!(
            "plot x-limit must be positive, got {x_max}"
        )));
    }

    debug!(path = %output_path.display(), bins = distribution.len(), "Rendering RDF plot.");

    let root = SVGBackend::new(output_path, CANVAS_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(TITLE, ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..x_max, 0.0..Y_MAX)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("Distance (Angstroms)")
        .y_desc("Normalized counts")
        .label_style(("sans-serif", 16))
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(LineSeries::new(
            distribution.points().filter(|(x, _)| *x <= x_max),
            &BLUE,
        ))
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn distribution() -> NormalizedDistribution {
        NormalizedDistribution {
            values: vec![0.0, 0.25, 1.0, 0.5],
            bin_centers: vec![0.5, 1.5, 2.5, 3.5],
        }
    }

    #[test]
    fn writes_svg_with_title_and_axes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rdf.svg");

        render_distribution(&distribution(), 5.0, &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains(TITLE));
        assert!(svg.contains("Distance (Angstroms)"));
        assert!(svg.contains("Normalized counts"));
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn empty_distribution_is_rejected() {
        let dir = tempdir().unwrap();
        let empty = NormalizedDistribution {
            values: vec![],
            bin_centers: vec![],
        };
        let result = render_distribution(&empty, 5.0, &dir.path().join("rdf.svg"));
        assert!(matches!(result, Err(CliError::Plot(_))));
    }

    #[test]
    fn non_positive_x_limit_is_rejected() {
        let dir = tempdir().unwrap();
        let result = render_distribution(&distribution(), 0.0, &dir.path().join("rdf.svg"));
        assert!(matches!(result, Err(CliError::Plot(_))));
    }
}

use crate::cli::AnalyzeArgs;
use crate::config::builder::build_config;
use crate::error::{CliError, Result};
use crate::plot;
use crate::utils::progress::CliProgressHandler;
use ncmd::core::io::{read_frame_at, report};
use ncmd::core::providers::geometry::CutoffConnectivity;
use ncmd::workflows;
use tracing::{info, warn};

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let config = build_config(&args)?;

    info!("Loading frame {} from {:?}", config.frame, &config.input_path);
    let configuration = read_frame_at(&config.input_path, config.input_format, config.frame)
        .map_err(|e| CliError::FileParsing {
            path: config.input_path.clone(),
            source: e.into(),
        })?;
    println!(
        "Loaded {} atoms from {}",
        configuration.len(),
        config.input_path.display()
    );

    let progress_handler = CliProgressHandler::new("components");
    let reporter = progress_handler.reporter();
    let provider = CutoffConnectivity::new();

    let analysis =
        workflows::analyze::run(&configuration, &config.core_config, &provider, &reporter)?;

    for (dimensionality, count) in &analysis.component_counts {
        println!("  {} components: {}", dimensionality, count);
    }
    println!(
        "Cluster sizes: [{}]",
        analysis
            .cluster_sizes
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    if let Some(path) = &args.sizes_out {
        report::write_cluster_sizes_to_path(path, &analysis.partition)?;
        println!("✓ Cluster sizes written to: {}", path.display());
    }

    let wants_distribution = args.rdf_out.is_some() || args.plot.is_some();
    match (&analysis.distribution, wants_distribution) {
        (Some(distribution), _) => {
            if let Some(path) = &args.rdf_out {
                report::write_distribution_to_path(path, distribution)?;
                println!("✓ Radial distribution written to: {}", path.display());
            }
            if let Some(path) = &args.plot {
                plot::render_distribution(distribution, config.plot_x_max, path)?;
                println!("✓ Radial distribution plot written to: {}", path.display());
            }
        }
        (None, true) => {
            warn!("Radial distribution is empty; skipping RDF report and plot.");
            println!("Warning: radial distribution is empty; no RDF output was written.");
        }
        (None, false) => {}
    }

    Ok(())
}

use super::defaults::DefaultsConfig;
use super::file::{FileBins, FileConfig, FileRdfConfig};
use super::models::AppConfig;
use crate::cli::{AnalyzeArgs, BinningArgs};
use crate::error::{CliError, Result};
use crate::utils::parser;
use ncmd::core::analysis::histogram::Bins;
use ncmd::engine::config as core_config;

pub fn build_config(args: &AnalyzeArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let isolation_file = file_config.isolation.take().unwrap_or_default();
    let cutoff = args
        .cutoff
        .or(isolation_file.cutoff)
        .unwrap_or(defaults.cutoff);

    let rdf_file = file_config.rdf.take().unwrap_or_default();
    let bins = merge_bins(&args.binning, rdf_file, &defaults)?;

    let plot_x_max = file_config
        .plot
        .take()
        .and_then(|p| p.x_max)
        .unwrap_or(defaults.plot_x_max);

    let core_config = core_config::AnalysisConfigBuilder::new()
        .cutoff(cutoff)
        .bins(bins)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input_path: args.input.clone(),
        input_format: args.format.map(Into::into),
        frame: args.frame,
        core_config,
        plot_x_max,
    })
}

fn uniform(start: f64, stop: f64, count: usize) -> Result<Bins> {
    Bins::uniform(start, stop, count).map_err(|e| CliError::Config(e.to_string()))
}

fn merge_bins(cli: &BinningArgs, file: FileRdfConfig, defaults: &DefaultsConfig) -> Result<Bins> {
    if let Some(count) = cli.bins {
        return Ok(Bins::Count(count));
    }
    if let Some(range_text) = &cli.edges {
        let range =
            parser::parse_bin_range(range_text).map_err(|e| CliError::Argument(e.to_string()))?;
        return uniform(range.start, range.stop, range.count);
    }

    match (file.bins, file.edges) {
        (Some(_), Some(_)) => Err(CliError::Config(
            "`rdf.bins` and `rdf.edges` are mutually exclusive".to_string(),
        )),
        (Some(FileBins::Count(count)), None) => Ok(Bins::Count(count)),
        (Some(FileBins::Range { start, stop, count }), None) => uniform(start, stop, count),
        (None, Some(edges)) => Ok(Bins::Edges(edges)),
        (None, None) => uniform(defaults.bin_start, defaults.bin_stop, defaults.bin_count),
    }
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "isolation.cutoff" => {
                config
                    .isolation
                    .get_or_insert_with(Default::default)
                    .cutoff = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                })?);
            }
            "rdf.bins" => {
                let rdf = config.rdf.get_or_insert_with(Default::default);
                rdf.bins = Some(match parser::parse_bin_range(value_str) {
                    Ok(range) => FileBins::Range {
                        start: range.start,
                        stop: range.stop,
                        count: range.count,
                    },
                    Err(_) => FileBins::Count(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid value for {}: {} (expected COUNT or START:STOP:COUNT)",
                            key, value_str
                        ))
                    })?),
                });
                rdf.edges = None;
            }
            "rdf.edges" => {
                let rdf = config.rdf.get_or_insert_with(Default::default);
                rdf.edges = Some(
                    parser::parse_edge_list(value_str)
                        .map_err(|e| CliError::Config(format!("Invalid value for {}: {}", key, e)))?,
                );
                rdf.bins = None;
            }
            "plot.x-max" => {
                config.plot.get_or_insert_with(Default::default).x_max =
                    Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                    })?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

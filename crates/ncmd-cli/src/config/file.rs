use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileIsolationConfig {
    pub cutoff: Option<f64>,
}

/// `bins = 64` or `bins = { start = 0.0, stop = 30.0, count = 100 }`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum FileBins {
    Count(usize),
    Range { start: f64, stop: f64, count: usize },
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileRdfConfig {
    pub bins: Option<FileBins>,
    pub edges: Option<Vec<f64>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FilePlotConfig {
    #[serde(rename = "x-max")]
    pub x_max: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub isolation: Option<FileIsolationConfig>,
    pub rdf: Option<FileRdfConfig>,
    pub plot: Option<FilePlotConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

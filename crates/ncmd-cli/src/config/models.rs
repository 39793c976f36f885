use ncmd::core::io::TrajectoryFormat;
use ncmd::engine::config as core_config;
use std::path::PathBuf;

pub struct AppConfig {
    pub input_path: PathBuf,
    pub input_format: Option<TrajectoryFormat>,
    pub frame: usize,
    pub core_config: core_config::AnalysisConfig,
    pub plot_x_max: f64,
}

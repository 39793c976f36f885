use clap::{Args, Parser, Subcommand, ValueEnum};
use ncmd::core::io::TrajectoryFormat;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "NCMD Developers",
    version,
    about = "NCMD CLI - Nanocluster molecular dynamics toolkit: cluster statistics, trajectory conversion and scene assembly.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Isolate clusters in a structure and report their sizes and radial distribution.
    Analyze(AnalyzeArgs),
    /// Convert a trajectory (XYZ or BGF) to extended XYZ, appending to the output.
    Convert(ConvertArgs),
    /// Build a scene by attaching copies of a guest structure to a host.
    Scene(SceneArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Xyz,
    Bgf,
}

impl From<FormatArg> for TrajectoryFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Xyz => TrajectoryFormat::Xyz,
            FormatArg::Bgf => TrajectoryFormat::Bgf,
        }
    }
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    // --- Core Arguments ---
    /// Path to the input structure or trajectory (e.g., cluster.xyz).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Input format; detected from the file extension when omitted.
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<FormatArg>,

    /// Zero-based index of the trajectory frame to analyze.
    #[arg(long, default_value_t = 0, value_name = "INT")]
    pub frame: usize,

    /// Path to an analysis configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Analysis Overrides ---
    /// Bonding cutoff for cluster isolation, in angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,

    #[command(flatten)]
    pub binning: BinningArgs,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S isolation.cutoff=2.8
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,

    // --- Outputs ---
    /// Write cluster sizes as CSV.
    #[arg(long, value_name = "PATH")]
    pub sizes_out: Option<PathBuf>,

    /// Write the normalized radial distribution as CSV.
    #[arg(long, value_name = "PATH")]
    pub rdf_out: Option<PathBuf>,

    /// Render the normalized radial distribution as an SVG plot.
    #[arg(long, value_name = "PATH")]
    pub plot: Option<PathBuf>,
}

/// Mutually exclusive ways of choosing histogram bins.
#[derive(Args, Debug, Clone, Default)]
#[group(required = false, multiple = false)]
pub struct BinningArgs {
    /// Number of equal-width bins spanning each component's own distance range.
    #[arg(long, value_name = "INT")]
    pub bins: Option<usize>,

    /// Explicit uniform edges shared by every component, as START:STOP:COUNT.
    #[arg(long, value_name = "START:STOP:COUNT")]
    pub edges: Option<String>,
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the input trajectory.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the XYZ output; frames are appended if the file exists.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Input format; detected from the file extension when omitted.
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<FormatArg>,
}

/// Arguments for the `scene` subcommand.
#[derive(Args, Debug)]
pub struct SceneArgs {
    /// Structure the guests are attached to.
    #[arg(long, required = true, value_name = "PATH")]
    pub host: PathBuf,

    /// Structure to attach.
    #[arg(long, required = true, value_name = "PATH")]
    pub guest: PathBuf,

    /// Minimum distance between each attached guest and the scene, in angstroms.
    #[arg(short, long, required = true, value_name = "FLOAT")]
    pub distance: f64,

    /// Number of guest copies to attach.
    #[arg(short = 'n', long, default_value_t = 1, value_name = "INT")]
    pub iterations: usize,

    /// Path for the assembled scene (XYZ).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Random seed for reproducible orientations and directions.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_analyze_with_edges() {
        let cli = Cli::parse_from([
            "ncmd", "analyze", "-i", "c.xyz", "--edges", "0:30:100", "-S", "isolation.cutoff=2.5",
            "--plot", "rdf.svg",
        ]);
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.binning.edges.as_deref(), Some("0:30:100"));
                assert_eq!(args.binning.bins, None);
                assert_eq!(args.set_values, vec!["isolation.cutoff=2.5"]);
                assert_eq!(args.frame, 0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn bins_and_edges_conflict() {
        let result = Cli::try_parse_from([
            "ncmd", "analyze", "-i", "c.xyz", "--bins", "10", "--edges", "0:30:100",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_scene_with_defaults() {
        let cli = Cli::parse_from([
            "ncmd", "-v", "scene", "--host", "a.xyz", "--guest", "b.xyz", "-d", "2.5", "-o",
            "s.xyz",
        ]);
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Scene(args) => {
                assert_eq!(args.iterations, 1);
                assert_eq!(args.distance, 2.5);
                assert!(args.seed.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_convert_format() {
        let cli = Cli::parse_from([
            "ncmd", "convert", "-i", "t.dat", "-o", "t.xyz", "--format", "bgf",
        ]);
        match cli.command {
            Commands::Convert(args) => assert_eq!(args.format, Some(FormatArg::Bgf)),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

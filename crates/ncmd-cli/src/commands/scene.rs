use crate::cli::SceneArgs;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use ncmd::core::io::read_frame_at;
use ncmd::core::io::traits::FrameWriter;
use ncmd::core::io::xyz::XyzWriter;
use ncmd::core::models::configuration::Configuration;
use ncmd::core::providers::scene::RandomAttachment;
use ncmd::engine::config::SceneConfig;
use ncmd::engine::error::EngineError;
use ncmd::workflows;
use std::path::Path;
use tracing::info;

fn load_structure(path: &Path) -> Result<Configuration> {
    read_frame_at(path, None, 0).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

pub fn run(args: SceneArgs) -> Result<()> {
    let host = load_structure(&args.host)?;
    let guest = load_structure(&args.guest)?;
    info!(
        host_atoms = host.len(),
        guest_atoms = guest.len(),
        "Loaded scene inputs."
    );

    let config = SceneConfig {
        min_distance: args.distance,
        iterations: args.iterations,
    };

    let mut builder = match args.seed {
        Some(seed) => {
            info!("Using random seed {}", seed);
            RandomAttachment::seeded(seed)
        }
        None => RandomAttachment::from_entropy(),
    };

    let progress_handler = CliProgressHandler::new("guests");
    let reporter = progress_handler.reporter();

    let scene = workflows::scene::create_scene(&host, &guest, &config, &mut builder, &reporter)?;

    let mut writer = XyzWriter::create(&args.output).map_err(EngineError::from)?;
    writer.write_frame(&scene).map_err(EngineError::from)?;
    writer.flush().map_err(EngineError::from)?;

    println!(
        "✓ Scene with {} atoms written to: {}",
        scene.len(),
        args.output.display()
    );
    Ok(())
}

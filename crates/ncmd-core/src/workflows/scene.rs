use crate::core::models::configuration::Configuration;
use crate::core::providers::scene::SceneBuilder;
use crate::engine::config::SceneConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{debug, info, instrument};

/// Grows a scene by attaching `guest` to it `config.iterations` times.
///
/// Every attachment treats the result of the previous one as the scene, so later
/// copies keep their minimum distance to the host and to all earlier copies.
#[instrument(skip_all, name = "scene_workflow", fields(iterations = config.iterations))]
pub fn create_scene(
    host: &Configuration,
    guest: &Configuration,
    config: &SceneConfig,
    builder: &mut impl SceneBuilder,
    reporter: &ProgressReporter,
) -> Result<Configuration, EngineError> {
    if config.iterations == 0 {
        return Err(EngineError::InvalidParameter {
            name: "iterations",
            reason: "at least one guest must be attached".to_string(),
        });
    }

    reporter.report(Progress::PhaseStart {
        name: "Attaching guests",
    });
    reporter.report(Progress::TaskStart {
        total_steps: config.iterations as u64,
    });

    let mut scene = host.clone();
    for i in 0..config.iterations {
        scene = builder.attach(&scene, guest, config.min_distance)?;
        debug!(copy = i + 1, atoms = scene.len(), "Guest attached.");
        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    info!(atoms = scene.len(), "Scene assembled.");
    Ok(scene)
}

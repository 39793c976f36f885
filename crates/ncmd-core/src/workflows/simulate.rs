use crate::core::io::traits::FrameWriter;
use crate::core::models::configuration::Configuration;
use crate::core::providers::dynamics::{DynamicsError, DynamicsRunner};
use crate::engine::config::DynamicsConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument, trace};

/// Runs Langevin dynamics on `configuration` and returns the final state.
///
/// When both a `sink` and `config.writeout` are given, every `writeout`-th step is
/// written to the sink. The dynamics run either way.
#[instrument(skip_all, name = "dynamics_workflow", fields(steps = config.params.steps))]
pub fn run(
    runner: &mut impl DynamicsRunner,
    configuration: Configuration,
    config: &DynamicsConfig,
    mut sink: Option<&mut dyn FrameWriter>,
    reporter: &ProgressReporter,
) -> Result<Configuration, EngineError> {
    config.params.validate()?;
    let writeout = match (&sink, config.writeout) {
        (_, Some(0)) => {
            return Err(EngineError::InvalidParameter {
                name: "writeout",
                reason: "interval must be at least 1 step".to_string(),
            });
        }
        (Some(_), Some(interval)) => Some(interval),
        (None, Some(_)) => {
            info!("No trajectory sink given; frames will not be recorded.");
            None
        }
        _ => None,
    };

    reporter.report(Progress::PhaseStart { name: "Dynamics" });
    reporter.report(Progress::TaskStart {
        total_steps: config.params.steps as u64,
    });

    let mut frames = 0usize;
    let mut observer = |step: usize, current: &Configuration| -> Result<(), DynamicsError> {
        if let (Some(interval), Some(writer)) = (writeout, sink.as_deref_mut()) {
            if step % interval == 0 {
                writer.write_frame(current)?;
                frames += 1;
                trace!(step, "Trajectory frame written.");
            }
        }
        reporter.report(Progress::TaskIncrement);
        Ok(())
    };

    let final_state = runner.run(configuration, &config.params, &mut observer)?;
    if let Some(writer) = sink {
        writer.flush().map_err(DynamicsError::from)?;
    }

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    info!(frames, "Dynamics finished.");
    Ok(final_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::traits::{FrameReader, TrajectoryError};
    use crate::core::io::xyz::{XyzReader, XyzWriter};
    use crate::core::models::atom::Atom;
    use crate::core::providers::dynamics::{DynamicsParams, StepObserver};
    use crate::engine::config::DynamicsConfigBuilder;
    use nalgebra::{Point3, Vector3};
    use std::io::Cursor;

    /// Moves every atom by a fixed drift per step.
    struct Drift {
        calls: usize,
    }

    impl DynamicsRunner for Drift {
        fn run(
            &mut self,
            mut configuration: Configuration,
            params: &DynamicsParams,
            observer: &mut dyn StepObserver,
        ) -> Result<Configuration, DynamicsError> {
            self.calls += 1;
            for step in 1..=params.steps {
                configuration.translate(&Vector3::new(params.timestep_fs, 0.0, 0.0));
                observer.observe(step, &configuration)?;
            }
            Ok(configuration)
        }
    }

    #[derive(Default)]
    struct Recorder {
        frames: Vec<Configuration>,
        flushed: bool,
    }

    impl FrameWriter for Recorder {
        fn write_frame(&mut self, configuration: &Configuration) -> Result<(), TrajectoryError> {
            self.frames.push(configuration.clone());
            Ok(())
        }

        fn flush(&mut self) -> Result<(), TrajectoryError> {
            self.flushed = true;
            Ok(())
        }
    }

    fn atom() -> Configuration {
        Configuration::from_atoms(vec![Atom::new("Ag", Point3::origin())])
    }

    fn config(steps: usize, writeout: Option<usize>) -> DynamicsConfig {
        let builder = DynamicsConfigBuilder::new()
            .temperature_k(300.0)
            .timestep_fs(0.5)
            .steps(steps)
            .friction(0.002);
        let builder = match writeout {
            Some(n) => builder.writeout(n),
            None => builder,
        };
        builder.build().unwrap()
    }

    #[test]
    fn writes_every_writeout_steps() {
        let mut runner = Drift { calls: 0 };
        let mut recorder = Recorder::default();
        let result = run(
            &mut runner,
            atom(),
            &config(10, Some(3)),
            Some(&mut recorder),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(result.atoms()[0].position.x, 5.0);
        let xs: Vec<f64> = recorder.frames.iter().map(|f| f.atoms()[0].position.x).collect();
        assert_eq!(xs, vec![1.5, 3.0, 4.5]);
        assert!(recorder.flushed);
    }

    #[test]
    fn dynamics_run_without_a_sink() {
        let mut runner = Drift { calls: 0 };
        let result = run(
            &mut runner,
            atom(),
            &config(4, Some(2)),
            None,
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(runner.calls, 1);
        assert_eq!(result.atoms()[0].position.x, 2.0);
    }

    #[test]
    fn sink_without_interval_records_nothing() {
        let mut runner = Drift { calls: 0 };
        let mut recorder = Recorder::default();
        run(
            &mut runner,
            atom(),
            &config(4, None),
            Some(&mut recorder),
            &ProgressReporter::new(),
        )
        .unwrap();
        assert!(recorder.frames.is_empty());
    }

    #[test]
    fn invalid_parameters_stop_before_running() {
        let mut runner = Drift { calls: 0 };
        let mut bad = config(4, None);
        bad.params.timestep_fs = -1.0;
        let err = run(&mut runner, atom(), &bad, None, &ProgressReporter::new()).unwrap_err();

        assert!(matches!(
            err,
            EngineError::Dynamics {
                source: DynamicsError::InvalidParameter { .. }
            }
        ));
        assert_eq!(runner.calls, 0);
    }

    #[test]
    fn trajectory_is_written_as_xyz() {
        let mut runner = Drift { calls: 0 };
        let mut writer = XyzWriter::new(Vec::new());
        run(
            &mut runner,
            atom(),
            &config(2, Some(1)),
            Some(&mut writer),
            &ProgressReporter::new(),
        )
        .unwrap();

        let mut reader = XyzReader::new(Cursor::new(writer.into_inner()));
        let frames: Vec<_> = reader.frames().collect::<Result<_, _>>().unwrap();
        assert_eq!(frames.len(), 2);
    }
}

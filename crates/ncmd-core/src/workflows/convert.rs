use crate::core::io::traits::{FrameReader, FrameWriter};
use crate::core::io::xyz::XyzWriter;
use crate::core::io::{TrajectoryFormat, open_trajectory};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::Path;
use tracing::{info, instrument};

/// Copies every frame from `reader` to `writer`, returning the number of frames.
pub fn run(
    reader: &mut dyn FrameReader,
    writer: &mut dyn FrameWriter,
    reporter: &ProgressReporter,
) -> Result<usize, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Converting frames",
    });
    let mut count = 0;
    while let Some(frame) = reader.read_frame()? {
        writer.write_frame(&frame)?;
        count += 1;
        reporter.report(Progress::TaskIncrement);
    }
    writer.flush()?;
    reporter.report(Progress::PhaseFinish);
    Ok(count)
}

/// Converts a trajectory file to XYZ, appending to `output`.
///
/// Repeated conversions into the same output concatenate their frames. The input
/// format comes from `format` or, when absent, from the input file extension.
#[instrument(skip_all, name = "convert_workflow", fields(input = %input.as_ref().display()))]
pub fn convert_file(
    input: impl AsRef<Path>,
    format: Option<TrajectoryFormat>,
    output: impl AsRef<Path>,
    reporter: &ProgressReporter,
) -> Result<usize, EngineError> {
    let mut reader = open_trajectory(input.as_ref(), format)?;
    let mut writer = XyzWriter::append(output.as_ref())?;
    let frames = run(reader.as_mut(), &mut writer, reporter)?;
    info!(frames, output = %output.as_ref().display(), "Trajectory converted.");
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::traits::TrajectoryError;
    use crate::core::io::xyz::XyzReader;
    use std::fs;
    use tempfile::tempdir;

    const BGF_TRAJECTORY: &str = "\
BIOGRF 200
HETATM     1 C1    RES A     1   0.00000   0.00000   0.00000 C_3    4 0  0.00000
HETATM     2 O1    RES A     1   1.20000   0.00000   0.00000 O_2    1 0  0.00000
END
BIOGRF 200
HETATM     1 C1    RES A     1   0.10000   0.00000   0.00000 C_3    4 0  0.00000
HETATM     2 O1    RES A     1   1.30000   0.00000   0.00000 O_2    1 0  0.00000
END
";

    #[test]
    fn converts_bgf_trajectory_to_xyz() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("md.bgf");
        let output = dir.path().join("md.xyz");
        fs::write(&input, BGF_TRAJECTORY).unwrap();

        let frames = convert_file(&input, None, &output, &ProgressReporter::new()).unwrap();
        assert_eq!(frames, 2);

        let mut reader = XyzReader::from_path(&output).unwrap();
        let converted: Vec<_> = reader.frames().collect::<Result<_, _>>().unwrap();
        assert_eq!(converted.len(), 2);
        assert_eq!(converted[1].atoms()[1].species, "O");
        assert!((converted[1].atoms()[1].position.x - 1.3).abs() < 1e-8);
    }

    #[test]
    fn repeated_conversion_appends() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("md.bgf");
        let output = dir.path().join("all.xyz");
        fs::write(&input, BGF_TRAJECTORY).unwrap();

        convert_file(&input, None, &output, &ProgressReporter::new()).unwrap();
        convert_file(&input, None, &output, &ProgressReporter::new()).unwrap();

        let mut reader = XyzReader::from_path(&output).unwrap();
        assert_eq!(reader.frames().count(), 4);
    }

    #[test]
    fn unknown_extension_without_format_fails() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("md.traj");
        fs::write(&input, BGF_TRAJECTORY).unwrap();

        let err = convert_file(&input, None, dir.path().join("out.xyz"), &ProgressReporter::new())
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Trajectory {
                source: TrajectoryError::UnknownFormat(_)
            }
        ));

        let frames = convert_file(
            &input,
            Some(TrajectoryFormat::Bgf),
            dir.path().join("out.xyz"),
            &ProgressReporter::new(),
        )
        .unwrap();
        assert_eq!(frames, 2);
    }
}

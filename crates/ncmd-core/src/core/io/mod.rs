//! Reading and writing configurations, trajectories and analysis reports.
//!
//! Trajectory formats implement the frame-oriented [`traits::FrameReader`] and
//! [`traits::FrameWriter`] interfaces; a single-structure file is simply a one-frame
//! trajectory. Reports are plain CSV tables.

pub mod bgf;
pub mod report;
pub mod traits;
pub mod xyz;

use crate::core::models::configuration::Configuration;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use traits::{FrameReader, TrajectoryError};

/// Trajectory formats understood by the reader factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrajectoryFormat {
    Xyz,
    Bgf,
}

impl TrajectoryFormat {
    /// Detects the format from a file extension, case-insensitively.
    ///
    /// `.xyz` and `.extxyz` map to [`TrajectoryFormat::Xyz`]; `.bgf` to
    /// [`TrajectoryFormat::Bgf`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TrajectoryError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| TrajectoryError::UnknownFormat(path.display().to_string()))?;
        extension.parse()
    }

    /// Opens `path` with the reader for this format.
    pub fn open<P: AsRef<Path>>(self, path: P) -> Result<Box<dyn FrameReader>, TrajectoryError> {
        Ok(match self {
            Self::Xyz => Box::new(xyz::XyzReader::from_path(path)?),
            Self::Bgf => Box::new(bgf::BgfReader::from_path(path)?),
        })
    }
}

impl FromStr for TrajectoryFormat {
    type Err = TrajectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xyz" | "extxyz" => Ok(Self::Xyz),
            "bgf" => Ok(Self::Bgf),
            _ => Err(TrajectoryError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for TrajectoryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Xyz => "xyz",
            Self::Bgf => "bgf",
        })
    }
}

/// Opens a trajectory, taking the format from `format` or else from the extension.
pub fn open_trajectory<P: AsRef<Path>>(
    path: P,
    format: Option<TrajectoryFormat>,
) -> Result<Box<dyn FrameReader>, TrajectoryError> {
    let format = match format {
        Some(format) => format,
        None => TrajectoryFormat::from_path(&path)?,
    };
    format.open(path)
}

/// Reads the frame at zero-based `index`.
///
/// # Errors
///
/// Returns [`TrajectoryError::MissingRecord`] if the trajectory has `index` frames or
/// fewer.
pub fn read_frame_at<P: AsRef<Path>>(
    path: P,
    format: Option<TrajectoryFormat>,
    index: usize,
) -> Result<Configuration, TrajectoryError> {
    let mut reader = open_trajectory(&path, format)?;
    let mut seen = 0;
    while let Some(frame) = reader.read_frame()? {
        if seen == index {
            return Ok(frame);
        }
        seen += 1;
    }
    Err(TrajectoryError::MissingRecord(format!(
        "frame {index} (trajectory '{}' has {seen} frames)",
        path.as_ref().display()
    )))
}

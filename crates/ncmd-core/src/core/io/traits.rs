use crate::core::models::configuration::Configuration;
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
    #[error("Unknown trajectory format: '{0}'")]
    UnknownFormat(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseErrorKind {
    #[error("Invalid integer in {field} (value: '{value}')")]
    InvalidInt { field: String, value: String },
    #[error("Invalid float in {field} (value: '{value}')")]
    InvalidFloat { field: String, value: String },
    #[error("Required field {field} is empty")]
    MissingRequiredField { field: String },
    #[error("Line is too short for an atom record (must be at least {min} chars)")]
    LineTooShort { min: usize },
}

/// Sequential access to the frames of a trajectory.
///
/// A single-structure file is a trajectory with one frame.
pub trait FrameReader {
    /// Reads the next frame, or returns `Ok(None)` once the input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns a [`TrajectoryError`] if the underlying read fails or the frame is
    /// malformed. The reader should not be used after an error.
    fn read_frame(&mut self) -> Result<Option<Configuration>, TrajectoryError>;

    /// Returns an iterator over the remaining frames.
    ///
    /// Iteration stops after the first error.
    fn frames(&mut self) -> Frames<'_, Self>
    where
        Self: Sized,
    {
        Frames {
            reader: self,
            failed: false,
        }
    }
}

impl<T: FrameReader + ?Sized> FrameReader for Box<T> {
    fn read_frame(&mut self) -> Result<Option<Configuration>, TrajectoryError> {
        (**self).read_frame()
    }
}

pub struct Frames<'a, R: ?Sized> {
    reader: &'a mut R,
    failed: bool,
}

impl<R: FrameReader + ?Sized> Iterator for Frames<'_, R> {
    type Item = Result<Configuration, TrajectoryError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.reader.read_frame() {
            Ok(frame) => frame.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Sequential sink for trajectory frames.
pub trait FrameWriter {
    /// Appends one frame to the output.
    ///
    /// # Errors
    ///
    /// Returns a [`TrajectoryError`] if serialization or the underlying write fails.
    fn write_frame(&mut self, configuration: &Configuration) -> Result<(), TrajectoryError>;

    /// Flushes any buffered output.
    fn flush(&mut self) -> Result<(), TrajectoryError>;
}

impl<T: FrameWriter + ?Sized> FrameWriter for Box<T> {
    fn write_frame(&mut self, configuration: &Configuration) -> Result<(), TrajectoryError> {
        (**self).write_frame(configuration)
    }

    fn flush(&mut self) -> Result<(), TrajectoryError> {
        (**self).flush()
    }
}

pub(crate) fn open_buffered<P: AsRef<Path>>(path: P) -> Result<BufReader<File>, TrajectoryError> {
    Ok(BufReader::new(File::open(path)?))
}

/// Opens `path` for writing; `append` keeps existing content and adds to its end.
pub(crate) fn create_buffered<P: AsRef<Path>>(
    path: P,
    append: bool,
) -> Result<BufWriter<File>, TrajectoryError> {
    let file = if append {
        OpenOptions::new().create(true).append(true).open(path)?
    } else {
        File::create(path)?
    };
    Ok(BufWriter::new(file))
}

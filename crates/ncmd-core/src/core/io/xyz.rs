use super::traits::{
    FrameReader, FrameWriter, ParseErrorKind, TrajectoryError, create_buffered, open_buffered,
};
use crate::core::models::atom::Atom;
use crate::core::models::configuration::Configuration;
use nalgebra::Point3;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

const COMMENT: &str = r#"Properties=species:S:1:pos:R:3 pbc="F F F""#;

/// Reads consecutive XYZ frames: an atom count, a comment line, then one
/// `species x y z` line per atom. Columns after the coordinates are ignored.
pub struct XyzReader<R> {
    reader: R,
    line: usize,
    buffer: String,
}

impl<R: BufRead> XyzReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buffer: String::new(),
        }
    }

    fn next_line(&mut self) -> Result<Option<&str>, TrajectoryError> {
        self.buffer.clear();
        if self.reader.read_line(&mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        Ok(Some(self.buffer.trim_end_matches(['\n', '\r'])))
    }

    fn expect_line(&mut self, what: &str) -> Result<&str, TrajectoryError> {
        let line = self.line;
        self.next_line()?.ok_or_else(|| {
            TrajectoryError::MissingRecord(format!("{what} (frame truncated after line {line})"))
        })
    }
}

impl XyzReader<BufReader<File>> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TrajectoryError> {
        Ok(Self::new(open_buffered(path)?))
    }
}

impl<R: BufRead> FrameReader for XyzReader<R> {
    fn read_frame(&mut self) -> Result<Option<Configuration>, TrajectoryError> {
        let count = loop {
            match self.next_line()? {
                None => return Ok(None),
                Some(l) if l.trim().is_empty() => continue,
                Some(l) => break l.trim().to_string(),
            }
        };
        let count: usize = count.parse().map_err(|_| TrajectoryError::Parse {
            line: self.line,
            kind: ParseErrorKind::InvalidInt {
                field: "atom count".into(),
                value: count.clone(),
            },
        })?;

        self.expect_line("comment line")?;

        let mut atoms = Vec::with_capacity(count);
        for _ in 0..count {
            let text = self.expect_line("atom line")?.to_string();
            atoms.push(parse_atom(&text, self.line)?);
        }
        Ok(Some(Configuration::from_atoms(atoms)))
    }
}

fn parse_atom(text: &str, line: usize) -> Result<Atom, TrajectoryError> {
    let mut fields = text.split_whitespace();
    let species = fields.next().ok_or_else(|| TrajectoryError::Parse {
        line,
        kind: ParseErrorKind::MissingRequiredField {
            field: "species".into(),
        },
    })?;

    let mut coords = [0.0; 3];
    for (axis, slot) in ["x", "y", "z"].iter().zip(coords.iter_mut()) {
        let raw = fields.next().ok_or_else(|| TrajectoryError::Parse {
            line,
            kind: ParseErrorKind::MissingRequiredField {
                field: (*axis).into(),
            },
        })?;
        *slot = raw.parse().map_err(|_| TrajectoryError::Parse {
            line,
            kind: ParseErrorKind::InvalidFloat {
                field: (*axis).into(),
                value: raw.into(),
            },
        })?;
    }
    Ok(Atom::new(species, Point3::from(coords)))
}

/// Writes frames in extended-XYZ layout with fixed eight-decimal coordinates.
pub struct XyzWriter<W: Write> {
    writer: W,
}

impl<W: Write> XyzWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl XyzWriter<BufWriter<File>> {
    /// Creates (or truncates) the file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, TrajectoryError> {
        Ok(Self::new(create_buffered(path, false)?))
    }

    /// Opens the file at `path` for appending, creating it if missing.
    pub fn append<P: AsRef<Path>>(path: P) -> Result<Self, TrajectoryError> {
        Ok(Self::new(create_buffered(path, true)?))
    }
}

impl<W: Write> FrameWriter for XyzWriter<W> {
    fn write_frame(&mut self, configuration: &Configuration) -> Result<(), TrajectoryError> {
        writeln!(self.writer, "{}", configuration.len())?;
        writeln!(self.writer, "{COMMENT}")?;
        for atom in configuration {
            let p = &atom.position;
            writeln!(
                self.writer,
                "{:<2} {:>15.8} {:>15.8} {:>15.8}",
                atom.species, p.x, p.y, p.z
            )?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TrajectoryError> {
        self.writer.flush()?;
        Ok(())
    }
}

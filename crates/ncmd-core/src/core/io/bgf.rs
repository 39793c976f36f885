use super::traits::{FrameReader, ParseErrorKind, TrajectoryError, open_buffered};
use crate::core::models::atom::Atom;
use crate::core::models::configuration::Configuration;
use nalgebra::Point3;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::trace;

/// Shortest atom record that still reaches the end of the force-field type column.
const MIN_ATOM_RECORD_LEN: usize = 66;

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

/// Species label carried by a force-field type: everything before the first `_`.
///
/// `C_3` becomes `C`, `H_` becomes `H`, and a bare `Cu` stays `Cu`.
fn species_from_ff_type(ff_type: &str) -> &str {
    ff_type.split('_').next().unwrap_or(ff_type)
}

/// Reads BGF trajectories: consecutive BGF blocks, each terminated by an `END` record.
///
/// Only the fixed-column `ATOM`/`HETATM` records contribute to a frame; header,
/// `FORMAT`, `CONECT` and `ORDER` records are skipped.
pub struct BgfReader<R> {
    reader: R,
    line: usize,
}

impl<R: BufRead> BgfReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line: 0 }
    }
}

impl BgfReader<BufReader<File>> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TrajectoryError> {
        Ok(Self::new(open_buffered(path)?))
    }
}

impl<R: BufRead> FrameReader for BgfReader<R> {
    fn read_frame(&mut self) -> Result<Option<Configuration>, TrajectoryError> {
        let mut atoms = Vec::new();
        let mut seen_records = false;
        let mut line = String::new();

        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                if seen_records {
                    return Err(TrajectoryError::MissingRecord(format!(
                        "END (block starting before line {} is not terminated)",
                        self.line
                    )));
                }
                return Ok(None);
            }
            self.line += 1;
            let text = line.trim_end_matches(['\n', '\r']);

            let record_type = slice_and_trim(text, 0, 6);
            if record_type.is_empty() {
                continue;
            }
            seen_records = true;

            match record_type {
                "ATOM" | "HETATM" => atoms.push(parse_atom_record(text, self.line)?),
                "END" => break,
                other => trace!(line = self.line, record = other, "Skipping BGF record."),
            }
        }

        Ok(Some(Configuration::from_atoms(atoms)))
    }
}

fn parse_atom_record(line: &str, line_num: usize) -> Result<Atom, TrajectoryError> {
    if line.len() < MIN_ATOM_RECORD_LEN {
        return Err(TrajectoryError::Parse {
            line: line_num,
            kind: ParseErrorKind::LineTooShort {
                min: MIN_ATOM_RECORD_LEN,
            },
        });
    }

    let parse_coord = |start: usize, end: usize| -> Result<f64, TrajectoryError> {
        let raw = slice_and_trim(line, start, end);
        raw.parse().map_err(|_| TrajectoryError::Parse {
            line: line_num,
            kind: ParseErrorKind::InvalidFloat {
                field: format!("columns {}-{}", start + 1, end),
                value: raw.into(),
            },
        })
    };
    let x = parse_coord(30, 40)?;
    let y = parse_coord(40, 50)?;
    let z = parse_coord(50, 60)?;

    let ff_type = slice_and_trim(line, 61, 66);
    if ff_type.is_empty() {
        return Err(TrajectoryError::Parse {
            line: line_num,
            kind: ParseErrorKind::MissingRequiredField {
                field: "columns 62-66".into(),
            },
        });
    }

    Ok(Atom::new(species_from_ff_type(ff_type), Point3::new(x, y, z)))
}

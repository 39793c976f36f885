use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid bin range '{0}'. Expected 'START:STOP:COUNT' (e.g., '0:30:100').")]
    InvalidBinRange(String),

    #[error("Invalid number '{value}' in '{input}'.")]
    InvalidNumber { value: String, input: String },

    #[error("Bin range '{0}' must have START < STOP and COUNT >= 1.")]
    EmptyBinRange(String),
}

/// A uniform binning given as `START:STOP:COUNT`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinRange {
    pub start: f64,
    pub stop: f64,
    pub count: usize,
}

pub fn parse_bin_range(input: &str) -> Result<BinRange, ParseError> {
    let parts: Vec<&str> = input.split(':').map(str::trim).collect();
    let [start, stop, count] = parts.as_slice() else {
        return Err(ParseError::InvalidBinRange(input.to_string()));
    };

    let number_error = |value: &str| ParseError::InvalidNumber {
        value: value.to_string(),
        input: input.to_string(),
    };
    let start: f64 = start.parse().map_err(|_| number_error(start))?;
    let stop: f64 = stop.parse().map_err(|_| number_error(stop))?;
    let count: usize = count.parse().map_err(|_| number_error(count))?;

    if !start.is_finite() || !stop.is_finite() || start >= stop || count == 0 {
        return Err(ParseError::EmptyBinRange(input.to_string()));
    }
    Ok(BinRange { start, stop, count })
}

/// Parses a comma-separated list of bin edges such as `0,0.5,1.5,3`.
pub fn parse_edge_list(input: &str) -> Result<Vec<f64>, ParseError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse().map_err(|_| ParseError::InvalidNumber {
                value: s.to_string(),
                input: input.to_string(),
            })
        })
        .collect()
}

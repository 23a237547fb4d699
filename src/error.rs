use thiserror::Error;

// ---------------------------------------------------------------------------
// Error kinds
// ---------------------------------------------------------------------------

/// Everything the reduction pipeline can fail with.
///
/// Errors are surfaced on first occurrence; a series never skips a bad
/// replicate or concentration row.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or truncated instrument export.
    #[error("format error at line {line}: {message}")]
    Format { line: usize, message: String },

    /// A baseline anchor wavenumber is missing or appears more than once.
    #[error("baseline anchor {wavenumber} matched {matches} samples, expected exactly one")]
    Lookup { wavenumber: i64, matches: usize },

    /// Both anchors sit on the same wavenumber.
    #[error("baseline anchors coincide at {0}")]
    DegenerateBaseline(i64),

    /// No sample falls inside the requested band.
    #[error("no samples inside band ({lower}, {upper})")]
    EmptyBand { lower: f64, upper: f64 },

    /// Corrected bands do not share one wavenumber grid.
    #[error("wavenumber grid mismatch: {0}")]
    GridMismatch(String),

    /// Concentration label is not a decimal number.
    #[error("invalid concentration label '{0}'")]
    Label(String),

    /// Aggregation over zero replicates, or a config asking for none.
    #[error("replicate count must be at least one")]
    ReplicateCount,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// Creates a format error for the given 1-based line number.
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Error::Format {
            line,
            message: message.into(),
        }
    }

    /// Creates a grid mismatch error.
    pub fn grid_mismatch(message: impl Into<String>) -> Self {
        Error::GridMismatch(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = Error::Lookup {
            wavenumber: 1690,
            matches: 0,
        };
        assert_eq!(
            err.to_string(),
            "baseline anchor 1690 matched 0 samples, expected exactly one"
        );

        let err = Error::format(57, "missing absorbance field");
        assert_eq!(err.to_string(), "format error at line 57: missing absorbance field");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}

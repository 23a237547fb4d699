use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};

use super::model::{Sample, Spectrum};

// ---------------------------------------------------------------------------
// Instrument export layout
// ---------------------------------------------------------------------------

/// Metadata lines at the top of every export.
pub const HEADER_LINES: usize = 56;
/// Metadata lines at the bottom of every export.
pub const FOOTER_LINES: usize = 2;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Parse the text of an instrument ASCII export.
///
/// Layout:
/// ```text
/// lines 1..=56     header metadata      (skipped)
/// data lines       <wavenumber>\t<absorbance>[\t...]
/// last 2 lines     footer metadata      (skipped)
/// ```
///
/// The header/footer sizes are fixed by the instrument and are never
/// inferred from content.
pub fn parse_str(content: &str) -> Result<Spectrum> {
    let lines: Vec<&str> = content.lines().collect();
    parse_lines(&lines)
}

/// Parse an export from any buffered reader.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Spectrum> {
    let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
    parse_lines(&lines)
}

/// Read and parse an export file from disk.
pub fn load_file(path: &Path) -> Result<Spectrum> {
    let file = File::open(path)?;
    let spectrum = parse_reader(BufReader::new(file))?;
    log::debug!("parsed {} samples from {}", spectrum.len(), path.display());
    Ok(spectrum)
}

// ---------------------------------------------------------------------------
// Line parsing
// ---------------------------------------------------------------------------

fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Result<Spectrum> {
    if lines.len() < HEADER_LINES + FOOTER_LINES {
        return Err(Error::format(
            lines.len().max(1),
            format!(
                "export has {} lines, expected at least {}",
                lines.len(),
                HEADER_LINES + FOOTER_LINES
            ),
        ));
    }

    let data = &lines[HEADER_LINES..lines.len() - FOOTER_LINES];
    let samples = data
        .iter()
        .enumerate()
        .map(|(i, line)| parse_data_line(line.as_ref(), HEADER_LINES + i + 1))
        .collect::<Result<Vec<Sample>>>()?;

    Ok(Spectrum::from_samples(samples))
}

/// `line_no` is 1-based and only used for error reporting.
fn parse_data_line(line: &str, line_no: usize) -> Result<Sample> {
    let mut fields = line.split('\t');
    let (Some(wn_field), Some(abs_field)) = (fields.next(), fields.next()) else {
        return Err(Error::format(line_no, "expected two tab-separated fields"));
    };

    let wavenumber: f64 = wn_field.trim().parse().map_err(|_| {
        Error::format(line_no, format!("'{}' is not a wavenumber", wn_field.trim()))
    })?;
    if !wavenumber.is_finite() {
        return Err(Error::format(line_no, "wavenumber is not finite"));
    }
    let absorbance: f64 = abs_field.trim().parse().map_err(|_| {
        Error::format(line_no, format!("'{}' is not an absorbance", abs_field.trim()))
    })?;

    // Truncation toward zero, matching the instrument's integer wavenumber grid.
    Ok(Sample::new(wavenumber.trunc() as i64, absorbance))
}

// ---------------------------------------------------------------------------
// Replicate loading seam
// ---------------------------------------------------------------------------

/// Identity of one replicate measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplicateKey<'a> {
    pub alcohol: &'a str,
    /// Concentration label as it appears to the caller, e.g. `"0250"`.
    pub label: &'a str,
    /// Replicate index, `0..replicates`.
    pub index: usize,
}

/// Supplies the parsed spectrum for a replicate. Locating the right file
/// (or any other source) is entirely up to the implementor.
pub trait ReplicateLoader {
    fn load(&mut self, key: &ReplicateKey<'_>) -> Result<Spectrum>;
}

impl<F> ReplicateLoader for F
where
    F: FnMut(&ReplicateKey<'_>) -> Result<Spectrum>,
{
    fn load(&mut self, key: &ReplicateKey<'_>) -> Result<Spectrum> {
        self(key)
    }
}

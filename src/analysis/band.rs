use crate::config::BaselineWindow;
use crate::data::filter::{samples_in, Band};
use crate::data::model::{CorrectedSample, Spectrum};
use crate::error::{Error, Result};

use super::baseline::BaselineModel;

// ---------------------------------------------------------------------------
// Peak mode
// ---------------------------------------------------------------------------

/// Baseline-corrected maximum inside a band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakReading {
    /// Wavenumber of the maximum; the mean wavenumber when several samples
    /// share the maximum.
    pub wavenumber: f64,
    pub absorbance: f64,
}

/// Largest raw absorbance strictly between the window anchors, corrected by
/// `baseline` at its wavenumber.
///
/// Ties are resolved by averaging the tied wavenumbers rather than picking
/// one of them, and the baseline is evaluated at that average.
pub fn peak_corrected(
    spectrum: &Spectrum,
    baseline: &BaselineModel,
    window: BaselineWindow,
) -> Result<PeakReading> {
    let band = Band::peak(window);
    let max = samples_in(spectrum, &band)
        .map(|s| s.absorbance)
        .reduce(f64::max)
        .ok_or(Error::EmptyBand {
            lower: band.lower,
            upper: band.upper,
        })?;

    let (sum, count) = samples_in(spectrum, &band)
        .filter(|s| s.absorbance == max)
        .fold((0.0, 0usize), |(sum, count), s| {
            (sum + s.wavenumber as f64, count + 1)
        });
    let wavenumber = sum / count as f64;

    Ok(PeakReading {
        wavenumber,
        absorbance: baseline.correct(wavenumber, max),
    })
}

// ---------------------------------------------------------------------------
// Full-band mode
// ---------------------------------------------------------------------------

/// Every sample in the widened window (`x1 * 0.99 < w < x2 * 1.01`),
/// corrected pointwise, in spectrum order.
pub fn corrected_band(
    spectrum: &Spectrum,
    baseline: &BaselineModel,
    window: BaselineWindow,
) -> Result<Vec<CorrectedSample>> {
    let band = Band::full(window);
    let corrected: Vec<CorrectedSample> = samples_in(spectrum, &band)
        .map(|s| CorrectedSample {
            wavenumber: s.wavenumber,
            absorbance: baseline.correct(s.wavenumber as f64, s.absorbance),
        })
        .collect();

    if corrected.is_empty() {
        return Err(Error::EmptyBand {
            lower: band.lower,
            upper: band.upper,
        });
    }
    Ok(corrected)
}

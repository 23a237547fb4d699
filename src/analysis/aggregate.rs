use crate::data::model::CorrectedSample;
use crate::error::{Error, Result};

use super::band::PeakReading;

// ---------------------------------------------------------------------------
// Summary types
// ---------------------------------------------------------------------------

/// Peak readings of one replicate set.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakSummary {
    /// Mean of the replicate peak wavenumbers.
    pub wavenumber: f64,
    /// Corrected peak absorbance per replicate, in replicate order.
    pub absorbances: Vec<f64>,
    pub mean: f64,
    /// Population standard deviation (divides by N, not N - 1).
    pub std_dev: f64,
}

/// Pointwise mean of the corrected bands of one replicate set.
#[derive(Debug, Clone, PartialEq)]
pub struct BandSummary {
    pub wavenumbers: Vec<i64>,
    pub absorbance: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

pub fn aggregate_peaks(readings: &[PeakReading]) -> Result<PeakSummary> {
    if readings.is_empty() {
        return Err(Error::ReplicateCount);
    }

    let wavenumbers: Vec<f64> = readings.iter().map(|r| r.wavenumber).collect();
    let absorbances: Vec<f64> = readings.iter().map(|r| r.absorbance).collect();
    let absorbance_mean = mean(&absorbances);

    Ok(PeakSummary {
        wavenumber: mean(&wavenumbers),
        std_dev: population_std_dev(&absorbances, absorbance_mean),
        absorbances,
        mean: absorbance_mean,
    })
}

/// Average replicate bands index by index.
///
/// All bands must have the same length and the same wavenumber at every
/// index; nothing is truncated or interpolated.
pub fn aggregate_bands(bands: &[Vec<CorrectedSample>]) -> Result<BandSummary> {
    let Some((first, rest)) = bands.split_first() else {
        return Err(Error::ReplicateCount);
    };

    for (replicate, band) in rest.iter().enumerate() {
        let replicate = replicate + 1;
        if band.len() != first.len() {
            return Err(Error::grid_mismatch(format!(
                "replicate {replicate} has {} samples, replicate 0 has {}",
                band.len(),
                first.len()
            )));
        }
        if let Some(i) = band
            .iter()
            .zip(first)
            .position(|(a, b)| a.wavenumber != b.wavenumber)
        {
            return Err(Error::grid_mismatch(format!(
                "replicate {replicate} has wavenumber {} at index {i}, replicate 0 has {}",
                band[i].wavenumber, first[i].wavenumber
            )));
        }
    }

    let n = bands.len() as f64;
    let absorbance = (0..first.len())
        .map(|i| bands.iter().map(|band| band[i].absorbance).sum::<f64>() / n)
        .collect();

    Ok(BandSummary {
        wavenumbers: first.iter().map(|s| s.wavenumber).collect(),
        absorbance,
    })
}

// ---------------------------------------------------------------------------
// Statistics helpers
// ---------------------------------------------------------------------------

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    use super::*;

    fn band(points: &[(i64, f64)]) -> Vec<CorrectedSample> {
        points
            .iter()
            .map(|&(wavenumber, absorbance)| CorrectedSample {
                wavenumber,
                absorbance,
            })
            .collect()
    }

    #[test]
    fn peak_statistics_use_population_std_dev() {
        let readings = [
            PeakReading { wavenumber: 1740.0, absorbance: 0.2 },
            PeakReading { wavenumber: 1742.0, absorbance: 0.4 },
            PeakReading { wavenumber: 1744.5, absorbance: 0.6 },
        ];
        let summary = aggregate_peaks(&readings).unwrap();

        assert_relative_eq!(summary.wavenumber, 1742.1666666666667, max_relative = 1e-12);
        assert_eq!(summary.absorbances, vec![0.2, 0.4, 0.6]);
        assert_relative_eq!(summary.mean, 0.4, max_relative = 1e-12);
        // sqrt(((0.2)^2 + 0 + (0.2)^2) / 3)
        assert_relative_eq!(summary.std_dev, (0.08f64 / 3.0).sqrt(), max_relative = 1e-9);
    }

    #[test]
    fn empty_replicate_sets_are_rejected() {
        assert!(matches!(aggregate_peaks(&[]), Err(Error::ReplicateCount)));
        assert!(matches!(aggregate_bands(&[]), Err(Error::ReplicateCount)));
    }

    #[test]
    fn bands_average_pointwise() {
        let bands = vec![
            band(&[(1700, 0.1), (1698, 0.3)]),
            band(&[(1700, 0.3), (1698, 0.5)]),
        ];
        let summary = aggregate_bands(&bands).unwrap();
        assert_eq!(summary.wavenumbers, vec![1700, 1698]);
        assert_abs_diff_eq!(summary.absorbance[0], 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(summary.absorbance[1], 0.4, epsilon = 1e-12);
    }

    #[test]
    fn mismatched_lengths_are_not_truncated() {
        let bands = vec![
            band(&[(1700, 0.1), (1698, 0.3)]),
            band(&[(1700, 0.3)]),
        ];
        assert!(matches!(aggregate_bands(&bands), Err(Error::GridMismatch(_))));
    }

    #[test]
    fn shifted_grids_are_rejected() {
        let bands = vec![
            band(&[(1700, 0.1), (1698, 0.3)]),
            band(&[(1700, 0.1), (1698, 0.3)]),
            band(&[(1700, 0.1), (1697, 0.3)]),
        ];
        let err = aggregate_bands(&bands).unwrap_err();
        assert!(err.to_string().contains("replicate 2"), "{err}");
    }

    proptest! {
        #[test]
        fn identical_replicates_have_zero_spread(
            wavenumber in 1690.0f64..1780.0,
            absorbance in -1.0f64..3.0,
            n in 1usize..8,
        ) {
            let readings = vec![PeakReading { wavenumber, absorbance }; n];
            let summary = aggregate_peaks(&readings).unwrap();
            prop_assert!((summary.mean - absorbance).abs() < 1e-12);
            prop_assert!((summary.wavenumber - wavenumber).abs() < 1e-9);
            prop_assert!(summary.std_dev.abs() < 1e-12);
        }
    }
}

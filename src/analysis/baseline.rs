use crate::config::BaselineWindow;
use crate::data::model::Spectrum;
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// BaselineModel – straight line through the two anchors
// ---------------------------------------------------------------------------

/// `baseline(w) = slope * w + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineModel {
    pub slope: f64,
    pub intercept: f64,
}

impl BaselineModel {
    /// The zero line; correcting against it leaves absorbance untouched.
    pub const ZERO: BaselineModel = BaselineModel {
        slope: 0.0,
        intercept: 0.0,
    };

    pub fn eval(&self, wavenumber: f64) -> f64 {
        self.slope * wavenumber + self.intercept
    }

    pub fn correct(&self, wavenumber: f64, absorbance: f64) -> f64 {
        absorbance - self.eval(wavenumber)
    }
}

// ---------------------------------------------------------------------------
// Fitting
// ---------------------------------------------------------------------------

/// Fit the line through the absorbance readings at the two anchors.
///
/// Each anchor must appear exactly once in `spectrum`; a missing or
/// duplicated anchor fails with [`Error::Lookup`].
pub fn fit(spectrum: &Spectrum, window: BaselineWindow) -> Result<BaselineModel> {
    let BaselineWindow { x1, x2 } = window;
    if x1 == x2 {
        return Err(Error::DegenerateBaseline(x1));
    }

    let y1 = anchor_absorbance(spectrum, x1)?;
    let y2 = anchor_absorbance(spectrum, x2)?;

    let slope = (y2 - y1) / (x2 - x1) as f64;
    let intercept = y1 - slope * x1 as f64;
    log::trace!("baseline over {x1}..{x2}: slope={slope:e} intercept={intercept:e}");

    Ok(BaselineModel { slope, intercept })
}

fn anchor_absorbance(spectrum: &Spectrum, wavenumber: i64) -> Result<f64> {
    let mut matches = spectrum.at(wavenumber);
    match (matches.next(), matches.next()) {
        (Some(sample), None) => Ok(sample.absorbance),
        (None, _) => Err(Error::Lookup {
            wavenumber,
            matches: 0,
        }),
        (Some(_), Some(_)) => Err(Error::Lookup {
            wavenumber,
            matches: 2 + matches.count(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    use super::*;

    fn scenario() -> Spectrum {
        [(1690, 0.10), (1700, 0.50), (1780, 0.20)].into_iter().collect()
    }

    #[test]
    fn two_point_fit() {
        let model = fit(&scenario(), BaselineWindow::default()).unwrap();
        assert_abs_diff_eq!(model.slope, 0.1 / 90.0, epsilon = 1e-12);
        assert_abs_diff_eq!(model.intercept, 0.10 - 0.1 / 90.0 * 1690.0, epsilon = 1e-12);
        assert_abs_diff_eq!(model.intercept, -1.7778, epsilon = 1e-4);
    }

    #[test]
    fn missing_anchor() {
        let err = fit(&scenario(), BaselineWindow::new(1690, 1790)).unwrap_err();
        assert!(matches!(
            err,
            Error::Lookup {
                wavenumber: 1790,
                matches: 0
            }
        ));
    }

    #[test]
    fn duplicated_anchor() {
        let spectrum: Spectrum = [(1690, 0.10), (1690, 0.11), (1690, 0.12), (1780, 0.20)]
            .into_iter()
            .collect();
        let err = fit(&spectrum, BaselineWindow::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Lookup {
                wavenumber: 1690,
                matches: 3
            }
        ));
    }

    #[test]
    fn coinciding_anchors() {
        let err = fit(&scenario(), BaselineWindow::new(1700, 1700)).unwrap_err();
        assert!(matches!(err, Error::DegenerateBaseline(1700)));
    }

    proptest! {
        #[test]
        fn baseline_passes_through_anchors(
            x1 in 400i64..3000,
            gap in 1i64..1000,
            y1 in -2.0f64..4.0,
            y2 in -2.0f64..4.0,
            filler in prop::collection::vec((0i64..5000, -2.0f64..4.0), 0..20),
        ) {
            let x2 = x1 + gap;
            let mut samples: Vec<(i64, f64)> = filler
                .into_iter()
                .filter(|(w, _)| *w != x1 && *w != x2)
                .collect();
            samples.push((x1, y1));
            samples.push((x2, y2));
            let spectrum: Spectrum = samples.into_iter().collect();

            let model = fit(&spectrum, BaselineWindow::new(x1, x2)).unwrap();
            prop_assert!((model.eval(x1 as f64) - y1).abs() < 1e-9);
            prop_assert!((model.eval(x2 as f64) - y2).abs() < 1e-9);
        }
    }
}

use crate::config::BaselineWindow;

use super::model::{Sample, Spectrum};

// ---------------------------------------------------------------------------
// Band bounds
// ---------------------------------------------------------------------------

/// Relative margin added on each side of the window in full-band mode.
pub const FULL_BAND_MARGIN: f64 = 0.01;

/// Open interval of wavenumbers a band extraction looks inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub lower: f64,
    pub upper: f64,
}

impl Band {
    /// Strictly between the anchors; the anchors themselves are excluded.
    pub fn peak(window: BaselineWindow) -> Self {
        Band {
            lower: window.x1 as f64,
            upper: window.x2 as f64,
        }
    }

    /// The window widened by [`FULL_BAND_MARGIN`]: `x1 * 0.99 < w < x2 * 1.01`.
    pub fn full(window: BaselineWindow) -> Self {
        Band {
            lower: window.x1 as f64 * (1.0 - FULL_BAND_MARGIN),
            upper: window.x2 as f64 * (1.0 + FULL_BAND_MARGIN),
        }
    }

    pub fn contains(&self, wavenumber: i64) -> bool {
        let w = wavenumber as f64;
        self.lower < w && w < self.upper
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Samples inside `band`, in spectrum order.
pub fn samples_in<'a>(spectrum: &'a Spectrum, band: &Band) -> impl Iterator<Item = &'a Sample> {
    let band = *band;
    spectrum.iter().filter(move |s| band.contains(s.wavenumber))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_band_excludes_anchors() {
        let band = Band::peak(BaselineWindow::new(1690, 1780));
        assert!(!band.contains(1690));
        assert!(band.contains(1691));
        assert!(band.contains(1779));
        assert!(!band.contains(1780));
    }

    #[test]
    fn full_band_widens_by_one_percent() {
        let band = Band::full(BaselineWindow::new(1690, 1780));
        // 1690 * 0.99 = 1673.1, 1780 * 1.01 = 1797.8
        assert!(!band.contains(1673));
        assert!(band.contains(1674));
        assert!(band.contains(1690));
        assert!(band.contains(1780));
        assert!(band.contains(1797));
        assert!(!band.contains(1798));
    }

    #[test]
    fn filtering_keeps_spectrum_order() {
        let spectrum: Spectrum = [(1800, 0.0), (1750, 0.3), (1700, 0.4), (1650, 0.0)]
            .into_iter()
            .collect();
        let band = Band::peak(BaselineWindow::default());
        let kept: Vec<i64> = samples_in(&spectrum, &band).map(|s| s.wavenumber).collect();
        assert_eq!(kept, vec![1750, 1700]);
    }
}

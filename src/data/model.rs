// ---------------------------------------------------------------------------
// Sample – one line of an instrument export
// ---------------------------------------------------------------------------

/// A single raw reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Wavenumber in cm⁻¹, truncated to an integer by the parser.
    pub wavenumber: i64,
    pub absorbance: f64,
}

impl Sample {
    pub const fn new(wavenumber: i64, absorbance: f64) -> Self {
        Sample {
            wavenumber,
            absorbance,
        }
    }
}

impl From<(i64, f64)> for Sample {
    fn from((wavenumber, absorbance): (i64, f64)) -> Self {
        Sample::new(wavenumber, absorbance)
    }
}

// ---------------------------------------------------------------------------
// CorrectedSample – raw absorbance minus baseline
// ---------------------------------------------------------------------------

/// A reading with the baseline subtracted. Only meaningful together with
/// the band it was computed for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectedSample {
    pub wavenumber: i64,
    pub absorbance: f64,
}

// ---------------------------------------------------------------------------
// Spectrum – one parsed export
// ---------------------------------------------------------------------------

/// A parsed spectrum in file order.
///
/// The parser neither sorts nor deduplicates; consumers that need a unique
/// wavenumber (baseline anchors) check it themselves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spectrum {
    samples: Vec<Sample>,
}

impl Spectrum {
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Spectrum { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// All samples recorded at exactly `wavenumber`.
    pub fn at(&self, wavenumber: i64) -> impl Iterator<Item = &Sample> + '_ {
        self.samples
            .iter()
            .filter(move |s| s.wavenumber == wavenumber)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the spectrum holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl FromIterator<(i64, f64)> for Spectrum {
    fn from_iter<I: IntoIterator<Item = (i64, f64)>>(iter: I) -> Self {
        Spectrum::from_samples(iter.into_iter().map(Sample::from).collect())
    }
}

impl<'a> IntoIterator for &'a Spectrum {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

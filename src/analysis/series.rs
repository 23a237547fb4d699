use crate::config::ReductionConfig;
use crate::data::loader::{ReplicateKey, ReplicateLoader};
use crate::data::model::Spectrum;
use crate::error::{Error, Result};

use super::aggregate::{aggregate_bands, aggregate_peaks, BandSummary, PeakSummary};
use super::band::{corrected_band, peak_corrected};
use super::baseline::fit;

// ---------------------------------------------------------------------------
// Result tables – one typed schema per mode
// ---------------------------------------------------------------------------

/// One concentration of a peak-mode series.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakRow {
    pub alcohol: String,
    pub label: String,
    /// Fraction derived from the label, see [`concentration_from_label`].
    pub concentration: f64,
    /// Mean peak wavenumber across replicates.
    pub wavenumber: f64,
    pub absorbances: Vec<f64>,
    pub mean: f64,
    pub std_dev: f64,
}

/// Mean corrected band of one concentration.
#[derive(Debug, Clone, PartialEq)]
pub struct BandColumn {
    pub label: String,
    pub concentration: f64,
    pub wavenumbers: Vec<i64>,
    pub absorbance: Vec<f64>,
}

impl BandColumn {
    /// Discrete sum over the grid with unit spacing; no trapezoid weights.
    pub fn area(&self) -> f64 {
        self.absorbance.iter().sum()
    }
}

/// Integrated mean corrected band of one concentration.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaRow {
    pub alcohol: String,
    pub label: String,
    pub concentration: f64,
    pub area: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeakTable {
    pub alcohol: String,
    pub rows: Vec<PeakRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BandTable {
    pub alcohol: String,
    pub columns: Vec<BandColumn>,
}

impl BandTable {
    /// The wavenumber grid every column shares.
    ///
    /// Columns come from different concentrations, so nothing guarantees
    /// their grids agree; a disagreement is a [`Error::GridMismatch`]. So is
    /// a column whose absorbance does not cover its own grid.
    pub fn shared_grid(&self) -> Result<&[i64]> {
        let Some((first, rest)) = self.columns.split_first() else {
            return Ok(&[]);
        };
        if let Some(other) = rest.iter().find(|c| c.wavenumbers != first.wavenumbers) {
            return Err(Error::grid_mismatch(format!(
                "concentration '{}' and '{}' have different wavenumber grids",
                first.label, other.label
            )));
        }
        if let Some(ragged) = self
            .columns
            .iter()
            .find(|c| c.absorbance.len() != c.wavenumbers.len())
        {
            return Err(Error::grid_mismatch(format!(
                "concentration '{}' has {} absorbance values for {} wavenumbers",
                ragged.label,
                ragged.absorbance.len(),
                ragged.wavenumbers.len()
            )));
        }
        Ok(&first.wavenumbers)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AreaTable {
    pub alcohol: String,
    pub rows: Vec<AreaRow>,
}

/// Which table [`build_series`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesMode {
    Peak,
    Band,
    Integrate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeriesTable {
    Peak(PeakTable),
    Band(BandTable),
    Area(AreaTable),
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// `"0250"` → `2.5`: the label read as a decimal number, divided by 100.
pub fn concentration_from_label(label: &str) -> Result<f64> {
    let value: f64 = label
        .trim()
        .parse()
        .map_err(|_| Error::Label(label.to_string()))?;
    if !value.is_finite() {
        return Err(Error::Label(label.to_string()));
    }
    Ok(value / 100.0)
}

// ---------------------------------------------------------------------------
// Series drivers
// ---------------------------------------------------------------------------

/// Reduce a concentration sweep of one alcohol into the table for `mode`.
///
/// Rows follow the order of `labels`, not concentration order. Every
/// replicate gets its own baseline fit. The first failure of any replicate
/// aborts the whole series.
pub fn build_series<S, L>(
    alcohol: &str,
    labels: &[S],
    loader: &mut L,
    mode: SeriesMode,
    config: &ReductionConfig,
) -> Result<SeriesTable>
where
    S: AsRef<str>,
    L: ReplicateLoader + ?Sized,
{
    Ok(match mode {
        SeriesMode::Peak => SeriesTable::Peak(peak_series(alcohol, labels, loader, config)?),
        SeriesMode::Band => SeriesTable::Band(band_series(alcohol, labels, loader, config)?),
        SeriesMode::Integrate => {
            SeriesTable::Area(area_series(alcohol, labels, loader, config)?)
        }
    })
}

pub fn peak_series<S, L>(
    alcohol: &str,
    labels: &[S],
    loader: &mut L,
    config: &ReductionConfig,
) -> Result<PeakTable>
where
    S: AsRef<str>,
    L: ReplicateLoader + ?Sized,
{
    config.validate()?;
    let mut rows = Vec::with_capacity(labels.len());

    for label in labels {
        let label = label.as_ref();
        let concentration = concentration_from_label(label)?;

        let readings = load_replicates(alcohol, label, loader, config)?
            .iter()
            .map(|spectrum| {
                let baseline = fit(spectrum, config.window)?;
                peak_corrected(spectrum, &baseline, config.window)
            })
            .collect::<Result<Vec<_>>>()?;

        let PeakSummary {
            wavenumber,
            absorbances,
            mean,
            std_dev,
        } = aggregate_peaks(&readings)?;
        log::debug!("{alcohol} {label}: peak {mean:.4} ± {std_dev:.4} at {wavenumber:.1}");

        rows.push(PeakRow {
            alcohol: alcohol.to_string(),
            label: label.to_string(),
            concentration,
            wavenumber,
            absorbances,
            mean,
            std_dev,
        });
    }

    Ok(PeakTable {
        alcohol: alcohol.to_string(),
        rows,
    })
}

pub fn band_series<S, L>(
    alcohol: &str,
    labels: &[S],
    loader: &mut L,
    config: &ReductionConfig,
) -> Result<BandTable>
where
    S: AsRef<str>,
    L: ReplicateLoader + ?Sized,
{
    config.validate()?;
    let mut columns = Vec::with_capacity(labels.len());

    for label in labels {
        let label = label.as_ref();
        let concentration = concentration_from_label(label)?;

        let bands = load_replicates(alcohol, label, loader, config)?
            .iter()
            .map(|spectrum| {
                let baseline = fit(spectrum, config.window)?;
                corrected_band(spectrum, &baseline, config.window)
            })
            .collect::<Result<Vec<_>>>()?;

        let BandSummary {
            wavenumbers,
            absorbance,
        } = aggregate_bands(&bands)?;
        log::debug!("{alcohol} {label}: mean band over {} wavenumbers", wavenumbers.len());

        columns.push(BandColumn {
            label: label.to_string(),
            concentration,
            wavenumbers,
            absorbance,
        });
    }

    Ok(BandTable {
        alcohol: alcohol.to_string(),
        columns,
    })
}

/// Band series collapsed to one [`BandColumn::area`] per concentration.
pub fn area_series<S, L>(
    alcohol: &str,
    labels: &[S],
    loader: &mut L,
    config: &ReductionConfig,
) -> Result<AreaTable>
where
    S: AsRef<str>,
    L: ReplicateLoader + ?Sized,
{
    let bands = band_series(alcohol, labels, loader, config)?;
    let rows = bands
        .columns
        .into_iter()
        .map(|column| AreaRow {
            alcohol: alcohol.to_string(),
            area: column.area(),
            label: column.label,
            concentration: column.concentration,
        })
        .collect();

    Ok(AreaTable {
        alcohol: bands.alcohol,
        rows,
    })
}

fn load_replicates<L>(
    alcohol: &str,
    label: &str,
    loader: &mut L,
    config: &ReductionConfig,
) -> Result<Vec<Spectrum>>
where
    L: ReplicateLoader + ?Sized,
{
    (0..config.replicates)
        .map(|index| {
            loader.load(&ReplicateKey {
                alcohol,
                label,
                index,
            })
        })
        .collect()
}

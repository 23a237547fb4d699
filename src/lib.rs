//! Baseline correction and replicate aggregation for FTIR calibration series.
//!
//! Parses instrument ASCII exports, fits a two-point linear baseline per
//! spectrum, extracts the corrected signal inside a wavenumber band and
//! averages it over replicates and a concentration sweep.
//!
//! ```no_run
//! use std::path::PathBuf;
//!
//! use ftir_baseline::{build_series, load_file, ReductionConfig, ReplicateKey, SeriesMode};
//!
//! let mut loader = |key: &ReplicateKey<'_>| {
//!     let path = PathBuf::from(format!("data/{}-{}-{}.asc", key.alcohol, key.label, key.index));
//!     load_file(&path)
//! };
//! let table = build_series(
//!     "EtOH",
//!     &["0250", "0500", "1000"],
//!     &mut loader,
//!     SeriesMode::Peak,
//!     &ReductionConfig::default(),
//! )?;
//! # Ok::<(), ftir_baseline::Error>(())
//! ```

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod export;

pub use analysis::aggregate::{aggregate_bands, aggregate_peaks, BandSummary, PeakSummary};
pub use analysis::band::{corrected_band, peak_corrected, PeakReading};
pub use analysis::baseline::{fit, BaselineModel};
pub use analysis::series::{
    area_series, band_series, build_series, concentration_from_label, peak_series, AreaRow,
    AreaTable, BandColumn, BandTable, PeakRow, PeakTable, SeriesMode, SeriesTable,
};
pub use config::{BaselineWindow, ReductionConfig};
pub use data::loader::{load_file, parse_reader, parse_str, ReplicateKey, ReplicateLoader};
pub use data::model::{CorrectedSample, Sample, Spectrum};
pub use error::{Error, Result};

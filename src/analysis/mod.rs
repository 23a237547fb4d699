//! Baseline correction and aggregation.
//!
//! ```text
//!  Spectrum ──► baseline::fit ──► band::{peak_corrected, corrected_band}
//!                                          │ per replicate
//!                                          ▼
//!                          aggregate::{aggregate_peaks, aggregate_bands}
//!                                          │ per concentration
//!                                          ▼
//!                           series::{PeakTable, BandTable, AreaTable}
//! ```

pub mod aggregate;
pub mod band;
pub mod baseline;
pub mod series;

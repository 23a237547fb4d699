use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Baseline window
// ---------------------------------------------------------------------------

/// The two anchor wavenumbers of the linear baseline. The same pair also
/// bounds the band that peak and full-band extraction look inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineWindow {
    pub x1: i64,
    pub x2: i64,
}

impl BaselineWindow {
    pub const fn new(x1: i64, x2: i64) -> Self {
        BaselineWindow { x1, x2 }
    }
}

/// Carbonyl-free shoulder around the biodiesel ester band.
impl Default for BaselineWindow {
    fn default() -> Self {
        BaselineWindow::new(1690, 1780)
    }
}

// ---------------------------------------------------------------------------
// Reduction config
// ---------------------------------------------------------------------------

/// Settings for one reduction run.
///
/// ```json
/// { "window": { "x1": 1690, "x2": 1780 }, "replicates": 3 }
/// ```
///
/// Missing keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReductionConfig {
    pub window: BaselineWindow,
    /// Replicate spectra measured per concentration.
    pub replicates: usize,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        ReductionConfig {
            window: BaselineWindow::default(),
            replicates: 3,
        }
    }
}

impl ReductionConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: ReductionConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window.x1 == self.window.x2 {
            return Err(Error::DegenerateBaseline(self.window.x1));
        }
        if self.replicates == 0 {
            return Err(Error::ReplicateCount);
        }
        Ok(())
    }
}

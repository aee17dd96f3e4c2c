use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{QeError, Result};

// ---------------------------------------------------------------------------
// Configuration file
// ---------------------------------------------------------------------------

/// Importer settings. Every field has a default, so a config file only
/// needs the keys it overrides:
///
/// ```json
/// { "grid": { "start_nm": 350, "end_nm": 1000 }, "output_dir": "out" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid: GridConfig,
    /// Channels that must be present after header reconstruction.
    pub required_channels: Vec<String>,
    /// Decimal places kept in the output.
    pub decimals: u32,
    /// Where the TSV is written; the working directory when unset.
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            required_channels: vec!["Red".into(), "Green".into(), "Blue".into()],
            decimals: 3,
            output_dir: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub start_nm: u32,
    pub end_nm: u32,
    pub step_nm: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start_nm: 300,
            end_nm: 1100,
            step_nm: 5,
        }
    }
}

impl Config {
    /// Read a JSON config file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| QeError::io(path, e))?;
        let config: Config = serde_json::from_str(&text).map_err(|e| QeError::InvalidConfig {
            reason: format!("{}: {e}", path.display()),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| {
            Err(QeError::InvalidConfig {
                reason: reason.to_string(),
            })
        };
        if self.grid.step_nm == 0 {
            return invalid("grid.step_nm must be positive");
        }
        if self.grid.end_nm < self.grid.start_nm {
            return invalid("grid.end_nm must not be below grid.start_nm");
        }
        if self.decimals > 10 {
            return invalid("decimals must be at most 10");
        }
        if self.required_channels.is_empty() {
            return invalid("required_channels must name at least one channel");
        }
        Ok(())
    }

    /// Output directory, defaulting to the current working directory.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

// ---------------------------------------------------------------------------
// WavelengthGrid – the common output domain
// ---------------------------------------------------------------------------

/// Evenly spaced wavelengths in nm every channel is resampled onto.
/// Built once and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavelengthGrid {
    points: Vec<u32>,
}

impl WavelengthGrid {
    /// `start..=end` in steps of `step`. `step` must be non-zero.
    pub fn new(grid: &GridConfig) -> Self {
        let points = (grid.start_nm..=grid.end_nm)
            .step_by(grid.step_nm.max(1) as usize)
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[u32] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn iter_f64(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|&p| f64::from(p))
    }
}

impl Default for WavelengthGrid {
    fn default() -> Self {
        Self::new(&GridConfig::default())
    }
}

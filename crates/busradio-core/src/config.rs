//! JSON run configuration.

use crate::program::{Playlist, ProgramError};
use crate::util::{CALIBRATION_BATCH, DEFAULT_SPAN, DEFAULT_STRIDE, SWEEP_HZ, Size, TUNE_SECONDS};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when loading a [`RadioConfig`].
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    #[error("tune_seconds must be a finite non-negative number, got {0}")]
    InvalidTuneTime(f64),
}

/// Tunables for calibration, the access buffer and sweep mode.
///
/// Every field has a default, so a config file only needs the values it changes:
///
/// ```json
/// { "tune_seconds": 0.5, "sweep_hz": [1000.0, 1500.0] }
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RadioConfig {
    /// Wall-clock budget for calibration in seconds
    pub tune_seconds: f64,
    /// Accesses per calibration batch
    pub batch_size: u64,
    /// Cursor stride in bytes
    pub stride: usize,
    /// Span of the access window in MB, must be a power of two
    pub span_mb: usize,
    /// Carrier frequencies of the sweep playlist in Hz
    pub sweep_hz: Vec<f64>,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            tune_seconds: TUNE_SECONDS,
            batch_size: CALIBRATION_BATCH,
            stride: DEFAULT_STRIDE,
            span_mb: DEFAULT_SPAN.bytes() >> 20,
            sweep_hz: SWEEP_HZ.to_vec(),
        }
    }
}

impl RadioConfig {
    /// Loads configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn from_jsonfile(filepath: impl AsRef<Path>) -> Result<RadioConfig, ConfigError> {
        let mut file = File::open(filepath.as_ref())?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let config: RadioConfig = serde_json::from_str(&contents)?;
        config.tune_time()?;
        Ok(config)
    }

    /// Calibration budget as a [`Duration`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTuneTime`] for negative or non-finite values.
    pub fn tune_time(&self) -> Result<Duration, ConfigError> {
        Duration::try_from_secs_f64(self.tune_seconds)
            .map_err(|_| ConfigError::InvalidTuneTime(self.tune_seconds))
    }

    /// Access window span.
    pub fn span(&self) -> Size {
        Size::MB(self.span_mb)
    }

    /// Sweep playlist.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::InvalidPlaylist`] for an empty or invalid list.
    pub fn playlist(&self) -> Result<Playlist, ProgramError> {
        Playlist::new(self.sweep_hz.clone())
    }
}

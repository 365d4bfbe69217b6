use bounds::{Mode, DEFAULT_MIN_AREA, DEFAULT_THRESHOLD};
use playback::{DriverSettings, PlaybackState, DEFAULT_THRESHOLD_STEP};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// Session configuration, loadable from a TOML or JSON file.
/// Missing keys take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Brightness threshold, clamped to 0-255 when used
    pub threshold: i64,
    pub min_contour_area: f64,
    pub mode: Mode,
    pub threshold_step: u8,
    pub poll_interval_ms: u64,
    /// Log progress every this many frames, 0 disables
    pub progress_interval: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD as i64,
            min_contour_area: DEFAULT_MIN_AREA,
            mode: Mode::default(),
            threshold_step: DEFAULT_THRESHOLD_STEP,
            poll_interval_ms: 30,
            progress_interval: 100,
        }
    }
}

impl Settings {
    /// Load Settings from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Load Settings from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(SettingsError::UnsupportedFileFormat),
        }
    }

    /// Command-line values win over whatever the file said.
    pub fn with_overrides(mut self, threshold: Option<i64>, min_area: Option<f64>, mode: Option<Mode>) -> Self {
        if let Some(threshold) = threshold {
            self.threshold = threshold;
        }
        if let Some(min_area) = min_area {
            self.min_contour_area = min_area;
        }
        if let Some(mode) = mode {
            self.mode = mode;
        }
        self
    }

    pub fn clamped_threshold(&self) -> u8 {
        self.threshold.clamp(0, 255) as u8
    }

    pub fn playback_state(&self) -> PlaybackState {
        PlaybackState::new(self.clamped_threshold(), self.mode)
    }

    pub fn driver_settings(&self) -> DriverSettings {
        DriverSettings {
            min_area: self.min_contour_area,
            threshold_step: self.threshold_step,
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            progress_interval: self.progress_interval,
        }
    }
}

//! Session settings
//!
//! Persisted as JSON next to the binary (or wherever `LASER_GRID_SETTINGS`
//! points). Missing fields fall back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MAX_STEPS_PER_PASS, PASSES_PER_ACTIVATION};

/// Errors reading or writing the settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not serialize settings for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Tunables for a puzzle session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Beam ===
    /// Photon passes OR'd into the pattern on each activation
    pub passes_per_activation: u32,
    /// Steps before a single pass is abandoned as looping
    pub max_steps_per_pass: u32,
    /// RNG seed for splitter coin flips (random when absent)
    pub seed: Option<u64>,

    // === Session ===
    /// Level loaded on start (1-based)
    pub start_level: usize,

    // === Display ===
    /// Print row/column numbers around the board
    pub show_coordinates: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            passes_per_activation: PASSES_PER_ACTIVATION,
            max_steps_per_pass: MAX_STEPS_PER_PASS,
            seed: None,
            start_level: 1,
            show_coordinates: true,
        }
    }
}

impl Settings {
    /// Environment variable naming an alternate settings file
    pub const PATH_ENV: &'static str = "LASER_GRID_SETTINGS";
    /// Default file name, relative to the working directory
    pub const DEFAULT_FILE: &'static str = "laser_grid_settings.json";

    /// Where settings are read from and written to
    pub fn default_path() -> PathBuf {
        std::env::var_os(Self::PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_FILE))
    }

    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Read settings from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let settings = Self::from_json(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from the default location, falling back to defaults on any error
    pub fn load() -> Self {
        let path = Self::default_path();
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        let json = self.to_json().map_err(|source| SettingsError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_err)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Clamp values into usable ranges for a catalog of `level_count` levels
    pub fn sanitized(mut self, level_count: usize) -> Self {
        self.passes_per_activation = self.passes_per_activation.max(1);
        self.max_steps_per_pass = self.max_steps_per_pass.max(1);
        self.start_level = self.start_level.clamp(1, level_count.max(1));
        self
    }
}

//! # Settings Module
//!
//! Startup configuration for the simulator: the initial form values and the
//! size of the sample grid. Settings are read once from a JSON file; every
//! field is optional and falls back to its default.

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::custom::Piece;
use crate::grid::SAMPLE_COUNT;
use crate::waves::WaveKind;

/// File looked up in the working directory when no override is given.
pub const SETTINGS_FILE: &str = "fourier_settings.json";
/// Environment variable naming an alternative settings file.
pub const SETTINGS_ENV: &str = "FOURIER_SETTINGS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorSettings {
    pub wave: WaveKind,
    pub terms: u32,
    pub amplitude: f64,
    pub custom_formula: String,
    /// Period of the custom formula, in units of π.
    pub custom_period: f64,
    /// Period of the piecewise function, in units of π.
    pub piecewise_period: f64,
    pub pieces: Vec<Piece>,
    pub sample_count: usize,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            wave: WaveKind::Square,
            terms: 5,
            amplitude: 1.0,
            custom_formula: "np.sin(2*x)".to_string(),
            custom_period: 2.0,
            piecewise_period: 2.0,
            pieces: vec![default_piece(1)],
            sample_count: SAMPLE_COUNT,
        }
    }
}

/// The entry offered when a piece is added at 1-based position `index`.
pub fn default_piece(index: usize) -> Piece {
    Piece::new("x", format!("x < {}*np.pi", index))
}

impl SimulatorSettings {
    /// Parses and validates settings from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let mut settings: SimulatorSettings =
            serde_json::from_str(text).context("settings are not valid JSON")?;
        ensure!(
            settings.sample_count >= 2,
            "sample_count must be at least 2, got {}",
            settings.sample_count
        );
        ensure!(
            settings.amplitude.is_finite(),
            "amplitude must be a finite number"
        );
        ensure!(
            settings.custom_period > 0.0 && settings.piecewise_period > 0.0,
            "periods must be positive"
        );
        if settings.pieces.is_empty() {
            settings.pieces.push(default_piece(1));
        }
        Ok(settings)
    }

    /// Reads settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid settings in {}", path.display()))
    }

    /// The settings path: `$FOURIER_SETTINGS` if set, else `fourier_settings.json`.
    pub fn default_path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
    }

    /// Loads settings from `path`, falling back to defaults.
    ///
    /// A missing file is normal and silently yields the defaults; an
    /// unreadable or malformed file is logged and also yields the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("[SETTINGS] No settings file at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => {
                log::info!("[SETTINGS] Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("[SETTINGS] {:#}; using defaults", e);
                Self::default()
            }
        }
    }
}

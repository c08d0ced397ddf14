//! Game settings and preferences
//!
//! Loaded once at startup from an optional JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::TICK_PERIOD_MS;
use crate::error::StartupError;

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence everything
    pub muted: bool,

    // === Simulation ===
    /// RNG seed; a fresh one is picked at startup when absent
    pub seed: Option<u64>,
    /// Period of the slow-logic ticker (ms)
    pub tick_period_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            seed: None,
            tick_period_ms: TICK_PERIOD_MS,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, StartupError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Load settings from disk, falling back to defaults if the file is absent
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&content)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Effective volume for sound effects
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective volume for music
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    fn sanitize(&mut self) {
        self.set_master_volume(self.master_volume);
        self.set_sfx_volume(self.sfx_volume);
        self.set_music_volume(self.music_volume);
        if self.tick_period_ms == 0 {
            log::warn!("tick_period_ms must be positive, using {}", TICK_PERIOD_MS);
            self.tick_period_ms = TICK_PERIOD_MS;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "muted": true }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert!(settings.muted);
        assert_eq!(settings.tick_period_ms, TICK_PERIOD_MS);
        assert_eq!(settings.effective_sfx_volume(), 0.0);
    }

    #[test]
    fn test_volumes_clamped() {
        let settings = Settings::from_json(r#"{ "master_volume": 3.0, "sfx_volume": -1.0 }"#).unwrap();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
    }

    #[test]
    fn test_zero_period_replaced() {
        let settings = Settings::from_json(r#"{ "tick_period_ms": 0 }"#).unwrap();
        assert_eq!(settings.tick_period_ms, TICK_PERIOD_MS);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(
            Settings::from_json("[1, 2"),
            Err(StartupError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_default() {
        let settings = Settings::load(Path::new("/definitely/not/here/settings.json")).unwrap();
        assert_eq!(settings.master_volume, 0.8);
    }

    #[test]
    fn test_effective_volumes() {
        let settings = Settings::default();
        assert!((settings.effective_sfx_volume() - 0.8).abs() < 1e-6);
        assert!((settings.effective_music_volume() - 0.56).abs() < 1e-6);
    }
}

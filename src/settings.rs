//! Tunable lap configuration
//!
//! Persisted as JSON in LocalStorage (web) or read from the file named by
//! `CURVE_KICK_SETTINGS` (native). Invalid values never abort the run: the
//! loader logs a warning and falls back to defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clamp_speed;
use crate::consts::*;

/// Configuration rejected at startup
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("lap period must be positive, got {0} ms")]
    NonPositivePeriod(f64),
    #[error("capture radius must be positive, got {0}")]
    NonPositiveCaptureRadius(f32),
    #[error("completion threshold must lie in (0, 1), got {0}")]
    InvalidThreshold(f32),
    #[error("card spawn range [{min}, {max}) must be a non-empty sub-range of [0, 1]")]
    InvalidSpawnRange { min: f32, max: f32 },
    #[error("a curve set needs at least one route")]
    NoCurves,
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("settings file: {0}")]
    Io(#[from] std::io::Error),
}

/// Lap settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Milliseconds per lap at speed 1.0
    pub lap_period_ms: f64,
    /// Ball-to-card capture distance
    pub capture_radius: f32,
    /// Progress at which the lap completes
    pub completion_threshold: f32,
    /// Cards per route per lap
    pub cards_per_route: usize,
    /// Card spawn range along a route
    pub spawn_t_min: f32,
    pub spawn_t_max: f32,
    /// Initial speed multiplier
    pub speed: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lap_period_ms: LAP_PERIOD_MS,
            capture_radius: CAPTURE_RADIUS,
            completion_threshold: COMPLETION_THRESHOLD,
            cards_per_route: CARDS_PER_ROUTE,
            spawn_t_min: SPAWN_T_MIN,
            spawn_t_max: SPAWN_T_MAX,
            speed: 1.0,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "curve_kick_settings";

    /// Environment variable naming a JSON settings file (native)
    pub const ENV_VAR: &'static str = "CURVE_KICK_SETTINGS";

    /// Check every value that would break the simulation
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.lap_period_ms > 0.0) || !self.lap_period_ms.is_finite() {
            return Err(SettingsError::NonPositivePeriod(self.lap_period_ms));
        }
        if !(self.capture_radius > 0.0) || !self.capture_radius.is_finite() {
            return Err(SettingsError::NonPositiveCaptureRadius(self.capture_radius));
        }
        if !(self.completion_threshold > 0.0 && self.completion_threshold < 1.0) {
            return Err(SettingsError::InvalidThreshold(self.completion_threshold));
        }
        let (min, max) = (self.spawn_t_min, self.spawn_t_max);
        if !(min >= 0.0 && max <= 1.0 && min < max) {
            return Err(SettingsError::InvalidSpawnRange { min, max });
        }
        Ok(())
    }

    /// Parse and validate a JSON document (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Speed multiplier clamped to the supported range
    pub fn clamped_speed(&self) -> f32 {
        clamp_speed(self.speed)
    }

    fn or_default(parsed: Result<Self, SettingsError>) -> Self {
        match parsed {
            Ok(settings) => {
                log::info!("Loaded settings: {:?}", settings);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                return Self::or_default(Self::from_json(&json));
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from the file named by `CURVE_KICK_SETTINGS` (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };
        Self::or_default(Self::load_from(std::path::Path::new(&path)))
    }

    /// Save settings to the file named by `CURVE_KICK_SETTINGS` (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            return;
        };
        match self.save_to(std::path::Path::new(&path)) {
            Ok(()) => log::info!("Settings saved to {}", path),
            Err(e) => log::warn!("Cannot save settings to {}: {}", path, e),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_values() {
        let settings = Settings {
            lap_period_ms: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NonPositivePeriod(_))
        ));

        let settings = Settings {
            capture_radius: -3.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NonPositiveCaptureRadius(_))
        ));

        let settings = Settings {
            capture_radius: f32::NAN,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_ranges() {
        let settings = Settings {
            completion_threshold: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidThreshold(_))
        ));

        let settings = Settings {
            spawn_t_min: 0.9,
            spawn_t_max: 0.5,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidSpawnRange { .. })
        ));
    }

    #[test]
    fn test_from_json_partial() {
        // Periods and radii differ between scene revisions; both are just knobs
        let settings =
            Settings::from_json(r#"{"lap_period_ms": 4000, "capture_radius": 3}"#).unwrap();
        assert_eq!(settings.lap_period_ms, 4000.0);
        assert_eq!(settings.capture_radius, 3.0);
        assert_eq!(settings.cards_per_route, CARDS_PER_ROUTE);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Parse(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"lap_period_ms": -1}"#),
            Err(SettingsError::NonPositivePeriod(_))
        ));
    }

    #[test]
    fn test_invalid_falls_back_to_default() {
        let settings = Settings::or_default(Settings::from_json(r#"{"capture_radius": 0}"#));
        assert_eq!(settings, Settings::default());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_saved_speed_survives_reload() {
        let path = std::env::temp_dir().join(format!(
            "curve_kick_settings_{}.json",
            std::process::id()
        ));
        let settings = Settings {
            speed: 1.21,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("curve_kick_settings_missing/none.json");
        assert!(matches!(
            Settings::load_from(&path),
            Err(SettingsError::Io(_))
        ));
    }

    #[test]
    fn test_clamped_speed() {
        let settings = Settings {
            speed: 50.0,
            ..Default::default()
        };
        assert_eq!(settings.clamped_speed(), MAX_SPEED);
        let settings = Settings {
            speed: f32::NAN,
            ..Default::default()
        };
        assert_eq!(settings.clamped_speed(), 1.0);
    }
}

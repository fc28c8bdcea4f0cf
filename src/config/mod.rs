//! Persistent configuration.
//!
//! Loads settings from price_helper_config.json next to the executable.
//! The config holds the calibrated price regions, the capture-box size and
//! the undercut rule. It is loaded once at startup, passed explicitly to
//! the handlers, and saved whenever calibration changes it.

pub mod regions;

pub use regions::{LotTier, Region, RegionStore};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How the undercut is computed from the observed price.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UndercutMode {
    /// Subtract a fixed amount of kamas.
    Fixed,
    /// Subtract a percentage of the observed price.
    Percent,
}

/// Rounding applied after the undercut.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rounding {
    #[serde(rename = "none")]
    None,
    /// Round down to the nearest 10 kamas.
    #[serde(rename = "down_10")]
    Down10,
    /// Round down to the nearest 100 kamas.
    #[serde(rename = "down_100")]
    Down100,
    /// Force a price ending in 9 (e.g. 1243 -> 1249).
    #[serde(rename = "end_9")]
    End9,
}

/// The undercut rule: mode, value, rounding and price floor.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct UndercutSettings {
    #[serde(default = "default_mode")]
    pub mode: UndercutMode,
    /// Kamas for `Fixed`, percentage points for `Percent`.
    #[serde(default = "default_value")]
    pub value: f64,
    #[serde(default = "default_rounding")]
    pub rounding: Rounding,
    /// Lowest price ever produced. Anything below is clamped up.
    #[serde(default = "default_min_price")]
    pub min_price: i64,
}

fn default_mode() -> UndercutMode {
    UndercutMode::Fixed
}

fn default_value() -> f64 {
    1.0
}

fn default_rounding() -> Rounding {
    Rounding::None
}

fn default_min_price() -> i64 {
    1
}

impl Default for UndercutSettings {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            value: default_value(),
            rounding: default_rounding(),
            min_price: default_min_price(),
        }
    }
}

/// Complete helper configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HelperConfig {
    /// Calibrated price regions per lot tier.
    #[serde(default)]
    pub regions: RegionStore,
    /// Width of the capture box placed around the pointer at calibration.
    #[serde(default = "default_price_w")]
    pub price_w: u32,
    /// Height of the capture box.
    #[serde(default = "default_row_h")]
    pub row_h: u32,
    #[serde(default)]
    pub undercut: UndercutSettings,
    /// When false, the adjusted price is computed and logged but no
    /// keystrokes are sent.
    #[serde(default = "default_auto_paste")]
    pub auto_paste: bool,
    /// When true, every captured crop is saved under captures/ for
    /// troubleshooting OCR misreads.
    #[serde(default)]
    pub debug_captures: bool,
}

fn default_price_w() -> u32 {
    150
}

fn default_row_h() -> u32 {
    40
}

fn default_auto_paste() -> bool {
    true
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            regions: RegionStore::default(),
            price_w: default_price_w(),
            row_h: default_row_h(),
            undercut: UndercutSettings::default(),
            auto_paste: default_auto_paste(),
            debug_captures: false,
        }
    }
}

impl HelperConfig {
    /// Loads the configuration, falling back to defaults.
    ///
    /// A missing file is the normal first-run case and is not an error.
    /// An unparseable file logs a warning and starts from defaults rather
    /// than aborting startup.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            crate::log(&format!(
                "No config at {} (first run). Using defaults.",
                path.display()
            ));
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    crate::log(&format!("Config loaded from {}", path.display()));
                    config
                }
                Err(e) => {
                    crate::log(&format!("Failed to parse config: {}. Using defaults.", e));
                    Self::default()
                }
            },
            Err(e) => {
                crate::log(&format!("Failed to read config: {}. Using defaults.", e));
                Self::default()
            }
        }
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HelperConfig::default();
        assert_eq!(config.price_w, 150);
        assert_eq!(config.row_h, 40);
        assert_eq!(config.undercut.mode, UndercutMode::Fixed);
        assert_eq!(config.undercut.value, 1.0);
        assert_eq!(config.undercut.min_price, 1);
        assert!(config.auto_paste);
        assert!(!config.debug_captures);
        assert!(config.regions.calibrated_tiers().is_empty());
    }

    #[test]
    fn test_save_load_roundtrip_keeps_regions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = HelperConfig::default();
        config
            .regions
            .set(LotTier::Ten, Region { x: 360, y: 290, width: 80, height: 20 });
        config.undercut.mode = UndercutMode::Percent;
        config.undercut.value = 2.5;
        config.save(&path).unwrap();

        let loaded = HelperConfig::load(&path);
        assert_eq!(
            loaded.regions.get(LotTier::Ten),
            Some(Region { x: 360, y: 290, width: 80, height: 20 })
        );
        assert_eq!(loaded.undercut.mode, UndercutMode::Percent);
        assert_eq!(loaded.undercut.value, 2.5);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{ "undercut": { "mode": "percent" } }"#;
        let config: HelperConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.undercut.mode, UndercutMode::Percent);
        assert_eq!(config.undercut.value, 1.0);
        assert_eq!(config.price_w, 150);
        assert!(config.regions.get(LotTier::One).is_none());
    }

    #[test]
    fn test_rounding_json_vocabulary() {
        let json = r#"{ "undercut": { "rounding": "down_10" } }"#;
        let config: HelperConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.undercut.rounding, Rounding::Down10);

        let out = serde_json::to_string(&UndercutSettings {
            rounding: Rounding::End9,
            ..UndercutSettings::default()
        })
        .unwrap();
        assert!(out.contains("\"end_9\""));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = HelperConfig::load(&dir.path().join("absent.json"));
        assert_eq!(config.price_w, 150);
    }

    #[test]
    fn test_load_garbage_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json at all").unwrap();

        let config = HelperConfig::load(&path);
        assert_eq!(config.undercut.min_price, 1);
    }
}

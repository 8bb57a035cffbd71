//! Configuration Management

use crate::gesture::GestureParams;
use crate::tracking::types::ScreenSize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Gesture thresholds
    pub gesture: GestureParams,
    /// Screen mapping settings
    pub screen: ScreenConfig,
    /// Detector sidecar settings
    pub detector: DetectorConfig,
}

/// Screen mapping configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Detect the display size at startup
    pub auto_detect: bool,
    /// Width in pixels, used when auto_detect is off or fails
    pub width: u32,
    /// Height in pixels, used when auto_detect is off or fails
    pub height: u32,
}

impl ScreenConfig {
    /// The configured fallback resolution
    pub fn fallback_size(&self) -> ScreenSize {
        ScreenSize::new(self.width, self.height)
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            auto_detect: true,
            width: 1920,
            height: 1080,
        }
    }
}

/// Detector sidecar configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Full argv of the sidecar process
    pub command: Vec<String>,
    /// Hands scoring below this are ignored
    pub min_confidence: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            command: vec!["python3".to_string(), "scripts/hand_stream.py".to_string()],
            min_confidence: 0.7,
        }
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        let g = &self.gesture;
        if !(0.0..1.0).contains(&g.pinch_threshold) || g.pinch_threshold <= 0.0 {
            return Err(crate::Error::Config(format!(
                "pinch_threshold must be in (0, 1), got {}",
                g.pinch_threshold
            )));
        }
        if !(0.0..1.0).contains(&g.scroll_threshold) || g.scroll_threshold <= 0.0 {
            return Err(crate::Error::Config(format!(
                "scroll_threshold must be in (0, 1), got {}",
                g.scroll_threshold
            )));
        }
        if g.scroll_sensitivity <= 0.0 {
            return Err(crate::Error::Config(format!(
                "scroll_sensitivity must be > 0, got {}",
                g.scroll_sensitivity
            )));
        }
        if !(0.0..1.0).contains(&g.movement_epsilon) {
            return Err(crate::Error::Config(format!(
                "movement_epsilon must be in [0, 1), got {}",
                g.movement_epsilon
            )));
        }
        if self.screen.width == 0 || self.screen.height == 0 {
            return Err(crate::Error::Config(format!(
                "screen size must be non-zero, got {}x{}",
                self.screen.width, self.screen.height
            )));
        }
        if self.detector.command.is_empty() {
            return Err(crate::Error::Config(
                "detector command must not be empty".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.detector.min_confidence) {
            return Err(crate::Error::Config(format!(
                "min_confidence must be in [0, 1], got {}",
                self.detector.min_confidence
            )));
        }
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &Path) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<(), crate::Error> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".airmouse").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Look up a value by dotted key, e.g. "gesture.pinch_threshold"
    pub fn get_value(&self, key: &str) -> Result<String, crate::Error> {
        let doc: toml::Value = toml::from_str(&self.to_toml()?)
            .map_err(|e| crate::Error::Config(e.to_string()))?;

        let mut node = &doc;
        for part in key.split('.') {
            node = node
                .get(part)
                .ok_or_else(|| crate::Error::Config(format!("key '{key}' not found")))?;
        }
        Ok(node.to_string())
    }

    /// Set a value by dotted key, re-validating the result.
    ///
    /// The value string is coerced to bool, integer, or float where it
    /// parses as one; anything else is taken as a string.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), crate::Error> {
        let mut doc: toml::Value = toml::from_str(&self.to_toml()?)
            .map_err(|e| crate::Error::Config(e.to_string()))?;

        let parsed = if let Ok(b) = value.parse::<bool>() {
            toml::Value::Boolean(b)
        } else if let Ok(i) = value.parse::<i64>() {
            toml::Value::Integer(i)
        } else if let Ok(f) = value.parse::<f64>() {
            toml::Value::Float(f)
        } else {
            toml::Value::String(value.to_string())
        };

        let mut node = &mut doc;
        let parts: Vec<&str> = key.split('.').collect();
        let (leaf, path) = parts
            .split_last()
            .ok_or_else(|| crate::Error::Config("empty key".to_string()))?;
        for part in path {
            node = node
                .get_mut(*part)
                .ok_or_else(|| crate::Error::Config(format!("key '{key}' not found")))?;
        }
        let table = node
            .as_table_mut()
            .ok_or_else(|| crate::Error::Config(format!("'{key}' is not a settable key")))?;
        if !table.contains_key(*leaf) {
            return Err(crate::Error::Config(format!("key '{key}' not found")));
        }
        table.insert(leaf.to_string(), parsed);

        let updated: Config = doc
            .try_into()
            .map_err(|e: toml::de::Error| crate::Error::Config(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

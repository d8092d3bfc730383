//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the morph-clock.toml file.
//! Geometry of the engine itself (tile sizes, glyph grid) is fixed at compile time;
//! the file only picks the face, the canvas size and the animation pacing.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use embedded_graphics::prelude::Size;

use crate::layout::{Face, LayoutMode};
use crate::renderer::pixel_count;

/// Default configuration file, looked up in the working directory.
pub const CONFIG_FILE: &str = "morph-clock.toml";

/// Time between animation frames, in milliseconds.
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 13;

/// Errors raised while reading or writing the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config IO: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config file format: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config serialization failed: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Application configuration loaded from morph-clock.toml
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Which digits are shown and how they are arranged
    #[serde(default)]
    pub face: FaceConfig,
    /// Canvas the face is centred in
    #[serde(default)]
    pub display: DisplayConfig,
    /// Frame pacing and simulated time
    #[serde(default)]
    pub animation: AnimationConfig,
}

/// Face selection
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct FaceConfig {
    /// "stacked" (hours over minutes) or "single-row" (HH:MM)
    #[serde(default)]
    pub layout: LayoutMode,
    /// Show a YYYY-MM-DD row below the time
    #[serde(default)]
    pub with_date: bool,
}

/// Canvas dimensions
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
}

/// Animation pacing
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AnimationConfig {
    /// Milliseconds between animation frames
    pub frame_interval_ms: u64,
    /// Simulated seconds per real second; 1 follows the wall clock
    pub time_scale: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            width: 144,  // Pebble Time
            height: 168, // Pebble Time
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            time_scale: 1,
        }
    }
}

impl Config {
    /// Load configuration from morph-clock.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load_from_path(&path) {
            Ok(config) => {
                info!(path = %path.as_ref().display(), "loaded configuration");
                config
            }
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                info!("no config file found, using default configuration");
                Self::default()
            }
            Err(e) => {
                warn!("{e}; using default configuration");
                Self::default()
            }
        }
    }

    /// Load and validate configuration, reporting every failure.
    pub fn try_load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save current configuration to `path`
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        info!(path = %path.as_ref().display(), "configuration saved");
        Ok(())
    }

    /// Reject values that would stall the animation or leave nothing to draw on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.width == 0 || self.display.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "display size {}x{} is empty",
                self.display.width, self.display.height
            )));
        }
        if pixel_count(Size::new(self.display.width, self.display.height)).is_none() {
            return Err(ConfigError::Invalid(format!(
                "display size {}x{} is too large",
                self.display.width, self.display.height
            )));
        }
        if self.animation.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "frame_interval_ms must be at least 1".to_string(),
            ));
        }
        if self.animation.time_scale == 0 {
            return Err(ConfigError::Invalid(
                "time_scale must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The face described by the `[face]` table.
    pub fn face(&self) -> Face {
        Face::new(self.face.layout, self.face.with_date)
    }
}

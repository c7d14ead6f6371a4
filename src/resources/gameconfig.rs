//! Game configuration resource.
//!
//! Manages runtime settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [loop]
//! fps = 60
//! tolerance = 1.5
//!
//! [accessories]
//! presets = ./presets.json
//! seed = 1234
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::resources::frameclock::{DEFAULT_FPS, DEFAULT_TOLERANCE_MS};

const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// Changes to it are applied to the running frame clock by
/// [`apply_gameconfig_changes`].
///
/// [`apply_gameconfig_changes`]: crate::systems::gameconfig::apply_gameconfig_changes
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Target ticks per second.
    pub fps: u32,
    /// Milliseconds a frame may arrive early and still run.
    pub tolerance: f64,
    /// Extra timing patterns merged over the built-in ones.
    pub presets_path: Option<PathBuf>,
    /// Fixed seed for accessory timing jitter.
    pub seed: Option<u64>,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            fps: DEFAULT_FPS,
            tolerance: DEFAULT_TOLERANCE_MS,
            presets_path: None,
            seed: None,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [loop] section
        if let Some(fps) = config.getuint("loop", "fps").ok().flatten() {
            match u32::try_from(fps) {
                Ok(fps) => self.fps = fps.max(1),
                Err(_) => warn!("Ignoring out of range fps {} in config", fps),
            }
        }
        if let Some(tolerance) = config.getfloat("loop", "tolerance").ok().flatten() {
            self.tolerance = tolerance;
        }

        // [accessories] section
        if let Some(presets) = config.get("accessories", "presets") {
            if !presets.trim().is_empty() {
                self.presets_path = Some(PathBuf::from(presets.trim()));
            }
        }
        if let Some(seed) = config.getuint("accessories", "seed").ok().flatten() {
            self.seed = Some(seed);
        }

        info!(
            "Loaded config: fps={}, tolerance={}ms, presets={:?}, seed={:?}",
            self.fps, self.tolerance, self.presets_path, self.seed
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("loop", "fps", Some(self.fps.to_string()));
        config.set("loop", "tolerance", Some(self.tolerance.to_string()));

        if let Some(presets) = &self.presets_path {
            config.set(
                "accessories",
                "presets",
                Some(presets.display().to_string()),
            );
        }
        if let Some(seed) = self.seed {
            config.set("accessories", "seed", Some(seed.to_string()));
        }

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

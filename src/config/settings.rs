use std::collections::HashMap;
use std::fs;
use std::path::Path;

use ratatui::style::Color;
use serde::Deserialize;
use thiserror::Error;

use crate::ui::action::Action;
use crate::ui::components::theme::{parse_hex_color, BarPalette};
use crate::util::paths::config_path;
use crate::util::random::{DEFAULT_MAX, DEFAULT_MIN};
use crate::viz::{MAX_SPEED, MIN_SPEED};

use super::default_keys::default_keybindings;
use super::keys::{parse_key_notation, KeybindingConfig};

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

/// Smallest array the visualizer generates
pub const MIN_ARRAY_SIZE: usize = 8;

/// Largest array the visualizer generates
pub const MAX_ARRAY_SIZE: usize = 150;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Array generation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayConfig {
    pub size: usize,
    pub min: i64,
    pub max: i64,
}

/// Playback settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackConfig {
    pub speed: f64,
    pub speed_step: f64,
    pub size_step: usize,
    pub autoplay: bool,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub array: ArrayConfig,
    pub playback: PlaybackConfig,
    /// Bar colors for the chart
    pub palette: BarPalette,
    /// Seed for reproducible arrays (None = OS entropy)
    pub seed: Option<u64>,
    /// Keybinding configuration
    pub keybindings: KeybindingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            array: ArrayConfig {
                size: 64,
                min: DEFAULT_MIN,
                max: DEFAULT_MAX,
            },
            playback: PlaybackConfig {
                speed: 1.0,
                speed_step: 0.25,
                size_step: 8,
                autoplay: false,
            },
            palette: BarPalette::default(),
            seed: None,
            keybindings: default_keybindings(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlArrayConfig {
    pub size: Option<usize>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlPlaybackConfig {
    pub speed: Option<f64>,
    pub speed_step: Option<f64>,
    pub size_step: Option<usize>,
    pub autoplay: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlThemeConfig {
    pub base: Option<String>,
    pub sorted: Option<String>,
    pub active: Option<String>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub array: Option<TomlArrayConfig>,
    pub playback: Option<TomlPlaybackConfig>,
    pub theme: Option<TomlThemeConfig>,
    /// action name -> key notation
    pub keys: Option<HashMap<String, String>>,
}

/// Convert `[keys]` entries, skipping unknown actions and bad notation
fn parse_keybindings(keys: &HashMap<String, String>) -> KeybindingConfig {
    let mut config = KeybindingConfig::new();
    for (action_name, key_str) in keys {
        let Some(action) = Action::from_name(action_name) else {
            tracing::warn!(action = %action_name, "Unknown action in [keys]");
            continue;
        };
        match parse_key_notation(key_str) {
            Ok(combo) => config.bind(combo, action),
            Err(e) => {
                tracing::warn!(
                    action = %action_name,
                    key = %key_str,
                    error = %e,
                    "Invalid key notation"
                );
            }
        }
    }
    config
}

fn parse_color_or(field: &str, value: Option<&str>, fallback: Color) -> Color {
    match value {
        Some(hex) => parse_hex_color(hex).unwrap_or_else(|| {
            tracing::warn!(field, value = %hex, "Invalid color, using default");
            fallback
        }),
        None => fallback,
    }
}

impl Config {
    /// Load configuration from the data directory, merging with defaults.
    ///
    /// Writes the example config on first run. A broken file is logged and
    /// ignored.
    pub fn load() -> Self {
        let config_file = config_path();

        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        match Self::load_from(&config_file) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    path = %config_file.display(),
                    error = %e,
                    "Failed to load config, using defaults"
                );
                Config::default()
            }
        }
    }

    /// Load and merge a specific config file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Merge TOML contents on top of the defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        let mut config = Config::default();

        if let Some(array) = toml_config.array {
            if let Some(size) = array.size {
                config.array.size = size;
            }
            if let Some(min) = array.min {
                config.array.min = min;
            }
            if let Some(max) = array.max {
                config.array.max = max;
            }
        }

        if let Some(playback) = toml_config.playback {
            if let Some(speed) = playback.speed {
                config.playback.speed = speed;
            }
            if let Some(step) = playback.speed_step {
                config.playback.speed_step = step;
            }
            if let Some(step) = playback.size_step {
                config.playback.size_step = step;
            }
            if let Some(autoplay) = playback.autoplay {
                config.playback.autoplay = autoplay;
            }
        }

        if let Some(theme) = toml_config.theme {
            let defaults = BarPalette::default();
            config.palette = BarPalette {
                base: parse_color_or("base", theme.base.as_deref(), defaults.base),
                sorted: parse_color_or("sorted", theme.sorted.as_deref(), defaults.sorted),
                active: parse_color_or("active", theme.active.as_deref(), defaults.active),
            };
        }

        if let Some(keys) = toml_config.keys {
            config.keybindings.merge(parse_keybindings(&keys));
        }

        Ok(config.normalized())
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &Path) {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    tracing::warn!(error = %e, "Failed to create config directory");
                    return;
                }
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(error = %e, "Failed to write default config");
        }
    }

    /// Clamp values into the ranges the visualizer supports
    pub fn normalized(mut self) -> Self {
        self.array.size = self.array.size.clamp(MIN_ARRAY_SIZE, MAX_ARRAY_SIZE);
        if self.array.min > self.array.max {
            std::mem::swap(&mut self.array.min, &mut self.array.max);
        }
        self.playback.speed = clamp_speed(self.playback.speed);
        if !(self.playback.speed_step.is_finite() && self.playback.speed_step > 0.0) {
            self.playback.speed_step = Config::default().playback.speed_step;
        }
        self.playback.size_step = self.playback.size_step.max(1);
        self
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.array.size = size.clamp(MIN_ARRAY_SIZE, MAX_ARRAY_SIZE);
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.playback.speed = clamp_speed(speed);
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.playback.autoplay = autoplay;
        self
    }
}

/// Clamp a speed multiplier to the supported range; NaN becomes 1.0
pub fn clamp_speed(speed: f64) -> f64 {
    if speed.is_nan() {
        return 1.0;
    }
    speed.clamp(MIN_SPEED, MAX_SPEED)
}

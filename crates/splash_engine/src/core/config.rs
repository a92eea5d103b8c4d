//! # Application Configuration
//!
//! All runtime settings of the splash application in one serializable tree.
//! Defaults reproduce the fixed behavior of the program when no configuration
//! file is present: a 640x480 window, a white background, `splash.png` keyed
//! on pure cyan, and a 75% / 500 ms rumble on controller button presses.

use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use crate::config::{Config, ConfigError};
use crate::render::Color;

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "splash.toml";

/// Environment variable overriding [`DEFAULT_CONFIG_PATH`]
pub const CONFIG_PATH_ENV: &str = "SPLASH_CONFIG";

/// Window settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "SDL Tutorial".to_string(),
            width: 640,
            height: 480,
        }
    }
}

/// Renderer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Request a hardware accelerated renderer
    pub accelerated: bool,
    /// Pace presentation to the display refresh rate
    pub vsync: bool,
    /// Ask for linear texture filtering (a hint; may be ignored)
    pub linear_filtering: bool,
    /// Color the frame is cleared to, also the initial draw color
    pub clear_color: Color,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            accelerated: true,
            vsync: true,
            linear_filtering: true,
            clear_color: Color::WHITE,
        }
    }
}

/// Asset settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Image shown by the splash screen
    pub splash_path: PathBuf,
    /// Pixels of this RGB value become fully transparent on load
    pub color_key: Color,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            splash_path: PathBuf::from("splash.png"),
            color_key: Color::CYAN,
        }
    }
}

/// Rumble played when a controller button is pressed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HapticConfig {
    /// Strength in (0, 1]
    pub strength: f32,
    /// Duration in milliseconds
    pub duration_ms: u32,
}

impl HapticConfig {
    /// Rumble duration as a [`Duration`]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.duration_ms))
    }
}

impl Default for HapticConfig {
    fn default() -> Self {
        Self {
            strength: 0.75,
            duration_ms: 500,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Wait for Enter on an interactive terminal after a fatal failure
    pub pause_on_failure: bool,
    /// Window settings
    pub window: WindowConfig,
    /// Renderer settings
    pub renderer: RendererConfig,
    /// Asset settings
    pub assets: AssetConfig,
    /// Controller feedback settings
    pub haptics: HapticConfig,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            pause_on_failure: true,
            window: WindowConfig::default(),
            renderer: RendererConfig::default(),
            assets: AssetConfig::default(),
            haptics: HapticConfig::default(),
        }
    }
}

impl Config for ApplicationConfig {}

impl ApplicationConfig {
    /// Load from `path` if it exists, otherwise use defaults
    ///
    /// A file that exists but fails to parse or validate is an error rather
    /// than a silent fallback.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No configuration at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let config = Self::load_from_file(path)?;
        config.validate()?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Path of the configuration file, honoring [`CONFIG_PATH_ENV`]
    pub fn resolve_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if !(self.haptics.strength > 0.0 && self.haptics.strength <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "rumble strength must be in (0, 1], got {}",
                self.haptics.strength
            )));
        }
        if self.haptics.duration_ms == 0 {
            return Err(ConfigError::Invalid("rumble duration must be non-zero".to_string()));
        }
        if self.assets.splash_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("splash path must not be empty".to_string()));
        }
        Ok(())
    }
}

//! Core module: application-wide configuration

pub mod config;

pub use config::{
    ApplicationConfig, AssetConfig, HapticConfig, RendererConfig, WindowConfig,
    CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH,
};

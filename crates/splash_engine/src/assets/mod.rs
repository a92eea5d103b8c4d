//! Asset loading

pub mod image_loader;

pub use image_loader::{ImageData, ImageDecoder};

use thiserror::Error;

/// Asset errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Unsupported asset format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

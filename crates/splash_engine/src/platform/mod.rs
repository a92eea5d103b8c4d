//! Platform bring-up

pub mod sdl;

pub use sdl::{SdlController, SdlEvents, SdlPlatform};

use thiserror::Error;

use crate::assets::AssetError;

/// Fatal platform initialization errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// A platform subsystem failed to start
    #[error("SDL could not initialize {subsystem}! SDL Error: {message}")]
    Subsystem {
        /// Subsystem name
        subsystem: &'static str,
        /// Backend error text
        message: String,
    },

    /// The window could not be created
    #[error("Window could not be created! SDL Error: {0}")]
    Window(String),

    /// The renderer could not be created
    #[error("Renderer could not be created! SDL Error: {0}")]
    Renderer(String),

    /// Image decoding could not be brought up
    #[error("Image decoding could not initialize: {0}")]
    ImageDecoding(#[from] AssetError),
}

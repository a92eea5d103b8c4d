//! Rendering: primitives, the backend trait, backends and the texture handle

pub mod api;
pub mod backends;
pub mod primitives;
pub mod texture;

pub use api::{BackendResult, RenderBackend};
pub use primitives::{Color, Rect};
pub use texture::{TextureError, TextureHandle};

use thiserror::Error;

/// Rendering errors
///
/// Backend error text is kept verbatim so log lines name what the graphics
/// library reported.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A rendering operation failed during execution
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    /// Texture creation or upload failed
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),
}

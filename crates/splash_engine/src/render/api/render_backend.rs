//! Backend abstraction traits for the rendering system
//!
//! This module defines the trait that rendering backends must implement
//! so the texture handle and the frame loop stay independent of SDL.

use crate::assets::ImageData;
use crate::render::{Color, Rect, RenderError};

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Main rendering backend trait
///
/// A backend owns the window surface and the renderer drawing to it.
/// Textures it creates are owned values: dropping one releases the GPU
/// resource, so a texture can never outlive the code path that holds it.
pub trait RenderBackend {
    /// GPU texture resource created by this backend
    type Texture;

    /// Upload decoded pixels as a new texture
    fn create_texture(&mut self, image: &ImageData) -> BackendResult<Self::Texture>;

    /// Copy `src` of `texture` (or all of it) into `dst` on the render target
    fn copy(&mut self, texture: &Self::Texture, src: Option<Rect>, dst: Rect) -> BackendResult<()>;

    /// Set the color used by [`RenderBackend::clear`]
    fn set_draw_color(&mut self, color: Color);

    /// Fill the render target with the draw color
    fn clear(&mut self);

    /// Show the frame; blocks on vertical sync when enabled
    fn present(&mut self);

    /// Render target size in pixels
    fn output_size(&self) -> BackendResult<(u32, u32)>;
}

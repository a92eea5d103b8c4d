//! Texture handle with an explicit load / free / draw lifecycle
//!
//! A [`TextureHandle`] holds zero or one GPU texture together with its pixel
//! dimensions. Loading always releases the previous texture first, and every
//! failure leaves the handle empty; there is no partially-initialized state.

use std::path::Path;

use thiserror::Error;

use crate::assets::{AssetError, ImageDecoder};
use crate::render::{Color, Rect, RenderBackend, RenderError};

/// Texture lifecycle errors
#[derive(Error, Debug)]
pub enum TextureError {
    /// The image could not be decoded
    #[error("Unable to load image {path}: {source}")]
    Decode {
        /// Image path
        path: String,
        /// Decoder error
        source: AssetError,
    },

    /// The decoded pixels could not be uploaded to the backend
    #[error("Unable to create texture from {path}: {source}")]
    Upload {
        /// Image path
        path: String,
        /// Backend error
        source: RenderError,
    },

    /// Draw requested on an empty handle
    #[error("Texture is not loaded")]
    NotLoaded,

    /// The backend rejected the copy
    #[error("Draw failed: {0}")]
    Draw(#[from] RenderError),
}

struct Loaded<T> {
    texture: T,
    width: u32,
    height: u32,
}

/// Owns zero or one backend texture plus its dimensions
///
/// Dropping the handle drops the texture, which releases the backend
/// resource.
pub struct TextureHandle<T> {
    loaded: Option<Loaded<T>>,
}

impl<T> TextureHandle<T> {
    /// Create an empty handle
    pub const fn new() -> Self {
        Self { loaded: None }
    }

    /// Decode `path`, key out `color_key` and upload the result
    ///
    /// Any previously held texture is released before decoding starts.
    pub fn load<B>(
        &mut self,
        backend: &mut B,
        decoder: &ImageDecoder,
        path: &Path,
        color_key: Color,
    ) -> Result<(), TextureError>
    where
        B: RenderBackend<Texture = T>,
    {
        self.free();

        let image = decoder.decode_keyed(path, color_key).map_err(|source| {
            log::error!("Unable to load image {}! {}", path.display(), source);
            TextureError::Decode { path: path.display().to_string(), source }
        })?;

        let texture = backend.create_texture(&image).map_err(|source| {
            log::error!("Unable to create texture from {}! {}", path.display(), source);
            TextureError::Upload { path: path.display().to_string(), source }
        })?;

        log::debug!("Uploaded {:?} as {}x{} texture", path, image.width, image.height);
        self.loaded = Some(Loaded {
            texture,
            width: image.width,
            height: image.height,
        });
        Ok(())
    }

    /// Release the texture, if any; calling this on an empty handle is a no-op
    pub fn free(&mut self) {
        if self.loaded.take().is_some() {
            log::trace!("Texture released");
        }
    }

    /// Whether a texture is held
    pub const fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// Width in pixels, 0 when empty
    pub fn width(&self) -> u32 {
        self.loaded.as_ref().map_or(0, |l| l.width)
    }

    /// Height in pixels, 0 when empty
    pub fn height(&self) -> u32 {
        self.loaded.as_ref().map_or(0, |l| l.height)
    }

    /// Borrow the backend texture
    pub fn texture(&self) -> Option<&T> {
        self.loaded.as_ref().map(|l| &l.texture)
    }

    /// Destination rectangle for a draw at (`x`, `y`)
    ///
    /// The clip's size overrides the texture's natural size.
    pub fn destination_rect(&self, x: i32, y: i32, clip: Option<Rect>) -> Rect {
        match clip {
            Some(clip) => Rect::new(x, y, clip.width, clip.height),
            None => Rect::new(x, y, self.width(), self.height()),
        }
    }

    /// Draw the whole texture with its top-left corner at (`x`, `y`)
    pub fn draw<B>(&self, backend: &mut B, x: i32, y: i32) -> Result<(), TextureError>
    where
        B: RenderBackend<Texture = T>,
    {
        self.draw_clipped(backend, x, y, None)
    }

    /// Draw the `clip` region of the texture (or all of it) at (`x`, `y`)
    ///
    /// A clip covering no pixels draws nothing.
    pub fn draw_clipped<B>(
        &self,
        backend: &mut B,
        x: i32,
        y: i32,
        clip: Option<Rect>,
    ) -> Result<(), TextureError>
    where
        B: RenderBackend<Texture = T>,
    {
        let loaded = self.loaded.as_ref().ok_or(TextureError::NotLoaded)?;
        if clip.is_some_and(|c| c.is_empty()) {
            return Ok(());
        }
        let dst = self.destination_rect(x, y, clip);
        backend.copy(&loaded.texture, clip, dst)?;
        Ok(())
    }
}

impl<T> Default for TextureHandle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for TextureHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureHandle")
            .field("loaded", &self.is_loaded())
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

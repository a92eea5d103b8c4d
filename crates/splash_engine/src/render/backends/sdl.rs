//! SDL2 rendering backend
//!
//! Wraps an SDL canvas (renderer + window). Textures borrow the canvas'
//! texture creator, so the borrow checker guarantees every texture is
//! destroyed before the renderer that created it.

use sdl2::render::{BlendMode, Canvas, Texture, TextureCreator};
use sdl2::pixels::PixelFormatEnum;
use sdl2::video::{Window, WindowContext};

use crate::assets::ImageData;
use crate::render::{BackendResult, Color, Rect, RenderBackend, RenderError};

/// Convert a backend-neutral rectangle into an SDL one
pub fn to_sdl_rect(rect: Rect) -> sdl2::rect::Rect {
    sdl2::rect::Rect::new(rect.x, rect.y, rect.width, rect.height)
}

/// Convert a backend-neutral color into an SDL one
pub const fn to_sdl_color(color: Color) -> sdl2::pixels::Color {
    sdl2::pixels::Color::RGBA(color.r, color.g, color.b, color.a)
}

/// Renderer backed by an SDL canvas
pub struct SdlRenderer<'a> {
    canvas: Canvas<Window>,
    creator: &'a TextureCreator<WindowContext>,
}

impl<'a> SdlRenderer<'a> {
    /// Wrap `canvas`; `creator` must come from the same canvas
    pub fn new(canvas: Canvas<Window>, creator: &'a TextureCreator<WindowContext>) -> Self {
        Self { canvas, creator }
    }
}

impl<'a> RenderBackend for SdlRenderer<'a> {
    type Texture = Texture<'a>;

    fn create_texture(&mut self, image: &ImageData) -> BackendResult<Self::Texture> {
        let mut texture = self
            .creator
            .create_texture_static(PixelFormatEnum::RGBA32, image.width, image.height)
            .map_err(|e| RenderError::ResourceCreationFailed(e.to_string()))?;

        texture
            .update(None::<sdl2::rect::Rect>, &image.data, image.pitch())
            .map_err(|e| RenderError::ResourceCreationFailed(e.to_string()))?;

        // Keyed pixels carry zero alpha; blending is what hides them.
        texture.set_blend_mode(BlendMode::Blend);
        Ok(texture)
    }

    fn copy(&mut self, texture: &Self::Texture, src: Option<Rect>, dst: Rect) -> BackendResult<()> {
        self.canvas
            .copy(texture, src.map(to_sdl_rect), to_sdl_rect(dst))
            .map_err(RenderError::RenderingFailed)
    }

    fn set_draw_color(&mut self, color: Color) {
        self.canvas.set_draw_color(to_sdl_color(color));
    }

    fn clear(&mut self) {
        self.canvas.clear();
    }

    fn present(&mut self) {
        self.canvas.present();
    }

    fn output_size(&self) -> BackendResult<(u32, u32)> {
        self.canvas.output_size().map_err(RenderError::RenderingFailed)
    }
}

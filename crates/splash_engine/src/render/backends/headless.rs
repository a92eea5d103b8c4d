//! Headless rendering backend
//!
//! Records every draw call instead of touching a GPU. Used by the test
//! suite and for running the frame loop on machines without a display.
//! Textures are counted while alive so callers can check that nothing
//! leaked after shutdown.

use std::cell::Cell;
use std::rc::Rc;

use crate::assets::ImageData;
use crate::render::{BackendResult, Color, Rect, RenderBackend, RenderError};

/// One recorded backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    /// `set_draw_color`
    SetDrawColor(Color),
    /// `clear`
    Clear,
    /// `copy`
    Copy {
        /// Id of the texture copied
        texture: u64,
        /// Source region, `None` for the whole texture
        src: Option<Rect>,
        /// Destination rectangle
        dst: Rect,
    },
    /// `present`
    Present,
}

/// Texture created by [`HeadlessRenderer`]
#[derive(Debug)]
pub struct HeadlessTexture {
    id: u64,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    live: Rc<Cell<usize>>,
}

impl HeadlessTexture {
    /// Backend-assigned id
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Texture size in pixels
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Uploaded RGBA pixels
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl Drop for HeadlessTexture {
    fn drop(&mut self) {
        self.live.set(self.live.get().saturating_sub(1));
    }
}

/// Backend that records commands in memory
#[derive(Debug)]
pub struct HeadlessRenderer {
    width: u32,
    height: u32,
    draw_color: Color,
    commands: Vec<DrawCommand>,
    next_texture_id: u64,
    live: Rc<Cell<usize>>,
    fail_uploads: bool,
    fail_copies: bool,
    frames_presented: u64,
}

impl HeadlessRenderer {
    /// Create a renderer with a `width` x `height` render target
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            draw_color: Color::BLACK,
            commands: Vec::new(),
            next_texture_id: 0,
            live: Rc::new(Cell::new(0)),
            fail_uploads: false,
            fail_copies: false,
            frames_presented: 0,
        }
    }

    /// Make subsequent `create_texture` calls fail
    pub fn fail_uploads(&mut self, fail: bool) {
        self.fail_uploads = fail;
    }

    /// Make subsequent `copy` calls fail
    pub fn fail_copies(&mut self, fail: bool) {
        self.fail_copies = fail;
    }

    /// Commands recorded so far
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forget recorded commands
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Textures created and not yet dropped
    pub fn live_textures(&self) -> usize {
        self.live.get()
    }

    /// Total textures ever created
    pub const fn textures_created(&self) -> u64 {
        self.next_texture_id
    }

    /// Number of `present` calls
    pub const fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Current draw color
    pub const fn draw_color(&self) -> Color {
        self.draw_color
    }

    /// Shared live-texture counter, readable after the renderer is dropped
    pub fn live_texture_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.live)
    }
}

impl RenderBackend for HeadlessRenderer {
    type Texture = HeadlessTexture;

    fn create_texture(&mut self, image: &ImageData) -> BackendResult<Self::Texture> {
        if self.fail_uploads {
            return Err(RenderError::ResourceCreationFailed("upload rejected by headless backend".to_string()));
        }
        if image.width == 0 || image.height == 0 {
            return Err(RenderError::ResourceCreationFailed(format!(
                "invalid texture size {}x{}",
                image.width, image.height
            )));
        }

        let id = self.next_texture_id;
        self.next_texture_id += 1;
        self.live.set(self.live.get() + 1);

        Ok(HeadlessTexture {
            id,
            width: image.width,
            height: image.height,
            pixels: image.data.clone(),
            live: Rc::clone(&self.live),
        })
    }

    fn copy(&mut self, texture: &Self::Texture, src: Option<Rect>, dst: Rect) -> BackendResult<()> {
        if self.fail_copies {
            return Err(RenderError::RenderingFailed("copy rejected by headless backend".to_string()));
        }
        self.commands.push(DrawCommand::Copy { texture: texture.id, src, dst });
        Ok(())
    }

    fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
        self.commands.push(DrawCommand::SetDrawColor(color));
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn present(&mut self) {
        self.frames_presented += 1;
        self.commands.push(DrawCommand::Present);
    }

    fn output_size(&self) -> BackendResult<(u32, u32)> {
        Ok((self.width, self.height))
    }
}

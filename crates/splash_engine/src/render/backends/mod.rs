//! Rendering backend implementations

pub mod headless;
pub mod sdl;

pub use headless::{DrawCommand, HeadlessRenderer, HeadlessTexture};
pub use sdl::SdlRenderer;

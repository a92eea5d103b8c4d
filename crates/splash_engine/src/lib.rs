//! # Splash Engine
//!
//! A small SDL2 application core: it brings up a window and renderer, loads
//! one PNG into a GPU texture, optionally opens a rumble-capable controller,
//! and presents the image every frame until the user quits.
//!
//! ## Features
//!
//! - **Texture lifecycle**: [`render::TextureHandle`] owns zero or one texture
//!   and releases it on `free`, on reload, and on drop
//! - **Color keying**: pure cyan pixels become transparent at load time
//! - **Backend trait**: SDL2 for real runs, a headless recorder for tests
//! - **Controller rumble**: button presses play a short rumble when a
//!   haptic-capable joystick is present
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use splash_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     splash_engine::foundation::logging::init();
//!     let config = ApplicationConfig::load_or_default(ApplicationConfig::resolve_path())?;
//!     let summary = splash_engine::platform::sdl::run(&config)?;
//!     log::info!("Presented {} frames", summary.frames);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;
pub mod foundation;
pub mod config;
pub mod assets;
pub mod render;
pub mod input;
pub mod platform;

mod application;
mod engine;

pub use application::{AppError, LifecycleState};
pub use engine::{Engine, RunSummary};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        AppError, LifecycleState,
        Engine, RunSummary,
        assets::{ImageData, ImageDecoder},
        config::Config,
        core::config::ApplicationConfig,
        input::{EventSource, InputEvent, RumbleDevice, ScriptedEvents},
        render::{Color, Rect, RenderBackend, TextureHandle},
    };
}

//! Application lifecycle states and top-level errors

use thiserror::Error;

use crate::config::ConfigError;
use crate::platform::PlatformError;
use crate::render::TextureError;

/// Application lifecycle
///
/// States advance strictly in declaration order, except that a failure
/// in any state before `ShuttingDown` skips straight to it.
/// Teardown runs from every state that acquired resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LifecycleState {
    /// Nothing acquired yet
    #[default]
    Uninitialized,
    /// Platform, window, renderer and image decoding are up
    Initialized,
    /// The splash texture is loaded
    MediaLoaded,
    /// The frame loop is running
    Running,
    /// Resources are being released
    ShuttingDown,
    /// Everything released
    Terminated,
}

impl LifecycleState {
    /// Whether moving from `self` to `next` is a legal transition
    pub fn can_advance_to(self, next: Self) -> bool {
        use LifecycleState::{Initialized, MediaLoaded, Running, ShuttingDown, Terminated, Uninitialized};
        matches!(
            (self, next),
            (Uninitialized, Initialized)
                | (Uninitialized | Initialized | MediaLoaded | Running, ShuttingDown)
                | (Initialized, MediaLoaded)
                | (MediaLoaded, Running)
                | (ShuttingDown, Terminated)
        )
    }

    /// Path taken when initialization fails before the engine exists
    pub const INIT_FAILURE_PATH: [Self; 3] = [Self::Uninitialized, Self::ShuttingDown, Self::Terminated];
}

/// Record the lifecycle path of a failed initialization and hand the error on
///
/// Meant for `map_err` on bring-up steps that run before an
/// [`Engine`](crate::Engine) takes over lifecycle tracking.
pub(crate) fn abort_initialization<E: Into<AppError>>(error: E) -> AppError {
    for pair in LifecycleState::INIT_FAILURE_PATH.windows(2) {
        log::info!("Lifecycle: {:?} -> {:?}", pair[0], pair[1]);
    }
    error.into()
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Platform bring-up failed
    #[error("Failed to initialize: {0}")]
    Platform(#[from] PlatformError),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Media could not be loaded
    #[error("Failed to load media: {0}")]
    Media(#[from] TextureError),

    /// An operation was attempted in the wrong lifecycle state
    #[error("Invalid lifecycle transition: {from:?} -> {to:?}")]
    InvalidTransition {
        /// Current state
        from: LifecycleState,
        /// Requested state
        to: LifecycleState,
    },
}

//! Backend-agnostic rendering API

pub mod render_backend;

pub use render_backend::{BackendResult, RenderBackend};

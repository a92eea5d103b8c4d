//! Foundation module - Core utilities and types
//!
//! Currently only hosts the logging setup shared by the library and the
//! `splash` binary.

pub mod logging;

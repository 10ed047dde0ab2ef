//! Flutter-Rust bridge wrapper for cherami-core.
//!
//! This crate is the library Cargokit builds for the Flutter app. It exposes
//! [`api::CheramiApp`] and sets up file logging for the process.

pub mod api;
mod logging;

pub use cherami_core::*;
pub use logging::logging_status;

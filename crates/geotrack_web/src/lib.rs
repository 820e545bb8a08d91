//! Browser-hosted WASM app for geotrack.
//!
//! This crate is a stub by default so the workspace builds on native targets
//! without requiring wasm toolchains.
//!
//! Enable the real app with: `--features web` (and a wasm32 target).

pub mod ui_model;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::start;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::worker::{activate, install, worker_start};

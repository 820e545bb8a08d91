//! # geotrack
//!
//! Shows the device's current position, as reported by the host platform, and
//! keeps following it until asked to stop.
//!
//! This crate is the platform-agnostic core: the location controller, the
//! presentation surface it writes into, and the lifecycle of the background
//! worker. Everything host-specific sits behind the traits in [`platform`],
//! [`registrar`] and [`worker`]; the browser implementation lives in the
//! `geotrack_web` crate.
//!
//! ## Quick Start
//!
//! ```ignore
//! use geotrack::prelude::*;
//!
//! let (mut controller, mut events) =
//!     LocationController::new(Some(source), SurfaceModel::new(), TrackerConfig::default());
//! controller.mirror_permissions(Some(&permissions));
//! controller.start_tracking()?;
//!
//! // Later, on the event loop:
//! controller.drain(&mut events);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): (de)serialization of [`config::TrackerConfig`]

#[path = "core/config.rs"]
pub mod config;

#[path = "core/controller.rs"]
pub mod controller;

#[path = "core/error.rs"]
pub mod error;

#[path = "core/fmt.rs"]
pub mod fmt;

#[path = "core/permission.rs"]
pub mod permission;

#[path = "core/platform.rs"]
pub mod platform;

#[path = "core/registrar.rs"]
pub mod registrar;

#[path = "core/sample.rs"]
pub mod sample;

#[path = "core/surface.rs"]
pub mod surface;

#[path = "core/worker.rs"]
pub mod worker;

#[cfg(test)]
#[path = "core/testing.rs"]
mod testing;

/// Prelude module for convenient imports.
///
/// ```
/// use geotrack::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::TrackerConfig;
    pub use crate::controller::LocationController;
    pub use crate::error::{LocationError, TrackerError};
    pub use crate::permission::{PermissionState, Unavailable};
    pub use crate::platform::{
        EventSink, FixOrigin, LocationSource, PermissionSource, SubscriptionHandle, TrackerEvent,
    };
    pub use crate::registrar::{register_worker, WorkerRegistry};
    pub use crate::sample::{LocationOptions, LocationSample};
    pub use crate::surface::{PresentationSurface, Slot, Status, SurfaceModel};
    pub use crate::worker::{WorkerLifecycle, WorkerPhase, WorkerScope};
}

//! UI metadata that should be available on both wasm and native.
//!
//! Keeping these out of the wasm-only `web` module allows us to unit-test the
//! page inventory on the host.

use geotrack::surface::Slot;

pub const PAGE_TITLE: &str = "My location";

/// Id of the optional JSON config block in `index.html`.
pub const CONFIG_ELEMENT_ID: &str = "geotrack-config";

pub const MAP_LINK_LABEL: &str = "Open in Google Maps";

/// Shown in a slot before anything has been written to it.
pub const EMPTY_VALUE: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Locate,
    StopTracking,
}

impl Command {
    pub fn label(self) -> &'static str {
        match self {
            Command::Locate => "Get / view location",
            Command::StopTracking => "Stop tracking",
        }
    }

    pub fn dom_id(self) -> &'static str {
        match self {
            Command::Locate => "btn-locate",
            Command::StopTracking => "btn-stop",
        }
    }

    /// Locate is always available; stop only while a subscription is open.
    pub fn enabled(self, stop_enabled: bool) -> bool {
        match self {
            Command::Locate => true,
            Command::StopTracking => stop_enabled,
        }
    }

    pub fn all() -> &'static [Command] {
        &[Command::Locate, Command::StopTracking]
    }
}

pub fn slot_dom_id(slot: Slot) -> &'static str {
    match slot {
        Slot::Permission => "permission",
        Slot::Latitude => "lat",
        Slot::Longitude => "lng",
        Slot::Accuracy => "acc",
        Slot::Timestamp => "timestamp",
        Slot::Status => "status",
    }
}

/// Slots shown in the readout grid, in display order. Status gets its own line.
pub fn readout_slots() -> &'static [Slot] {
    &[
        Slot::Permission,
        Slot::Latitude,
        Slot::Longitude,
        Slot::Accuracy,
        Slot::Timestamp,
    ]
}

pub fn display_value(v: &str) -> &str {
    if v.trim().is_empty() {
        EMPTY_VALUE
    } else {
        v
    }
}

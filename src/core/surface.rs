//! The passive display the controller writes into.

use chrono::{Local, TimeZone};

/// Text slots of the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Permission,
    Latitude,
    Longitude,
    Accuracy,
    Timestamp,
    Status,
}

impl Slot {
    pub fn label(self) -> &'static str {
        match self {
            Slot::Permission => "Permission",
            Slot::Latitude => "Latitude",
            Slot::Longitude => "Longitude",
            Slot::Accuracy => "Accuracy (m)",
            Slot::Timestamp => "Timestamp",
            Slot::Status => "Status",
        }
    }

    pub fn all() -> &'static [Slot] {
        &[
            Slot::Permission,
            Slot::Latitude,
            Slot::Longitude,
            Slot::Accuracy,
            Slot::Timestamp,
            Slot::Status,
        ]
    }
}

/// Write-only view of the display. Each call replaces one field in full.
pub trait PresentationSurface {
    fn write(&mut self, slot: Slot, text: &str);

    /// Render a capture time using the host's local date/time convention.
    fn write_timestamp(&mut self, captured_at_epoch_ms: i64);

    /// Point the map link at `url` and make it visible.
    fn reveal_map_link(&mut self, url: &str);

    fn set_stop_enabled(&mut self, enabled: bool);
}

/// Status lines the controller writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    CapabilityAbsent,
    Acquiring,
    TrackingStarted,
    Updated,
    Stopped,
    PermissionDenied,
    PositionUnavailable,
    TimedOut,
    Failed,
}

impl Status {
    pub fn text(self) -> &'static str {
        match self {
            Status::CapabilityAbsent => "This browser does not support location services.",
            Status::Acquiring => "Acquiring location...",
            Status::TrackingStarted => "Location tracking started.",
            Status::Updated => "Location updated.",
            Status::Stopped => "Location tracking stopped.",
            Status::PermissionDenied => "Permission denied. Check the browser's location settings.",
            Status::PositionUnavailable => "Location is unavailable.",
            Status::TimedOut => "The location request took too long.",
            Status::Failed => "An error occurred while getting the location.",
        }
    }
}

/// In-memory rendering of the display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceModel {
    pub permission: String,
    pub latitude: String,
    pub longitude: String,
    pub accuracy: String,
    pub timestamp: String,
    pub status: String,
    /// `None` until the first fix arrives.
    pub map_link: Option<String>,
    pub stop_enabled: bool,
}

impl SurfaceModel {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn format_local_timestamp(epoch_ms: i64) -> String {
    match Local.timestamp_millis_opt(epoch_ms).single() {
        Some(dt) => dt.format("%x %X").to_string(),
        None => epoch_ms.to_string(),
    }
}

impl PresentationSurface for SurfaceModel {
    fn write(&mut self, slot: Slot, text: &str) {
        let field = match slot {
            Slot::Permission => &mut self.permission,
            Slot::Latitude => &mut self.latitude,
            Slot::Longitude => &mut self.longitude,
            Slot::Accuracy => &mut self.accuracy,
            Slot::Timestamp => &mut self.timestamp,
            Slot::Status => &mut self.status,
        };
        *field = text.to_string();
    }

    fn write_timestamp(&mut self, captured_at_epoch_ms: i64) {
        self.timestamp = format_local_timestamp(captured_at_epoch_ms);
    }

    fn reveal_map_link(&mut self, url: &str) {
        self.map_link = Some(url.to_string());
    }

    fn set_stop_enabled(&mut self, enabled: bool) {
        self.stop_enabled = enabled;
    }
}

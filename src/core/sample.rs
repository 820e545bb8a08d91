//! Location fixes and the options used to request them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::fmt::fmt_shortest;

/// Base URL of the map service the derived link points at.
pub const DEFAULT_MAPS_BASE_URL: &str = "https://www.google.com/maps";

/// One successful fix as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationSample {
    pub latitude: f64,
    pub longitude: f64,
    /// Radius of the 95% confidence circle, in meters.
    pub accuracy_m: f64,
    pub captured_at_epoch_ms: i64,
}

impl LocationSample {
    pub fn new(latitude: f64, longitude: f64, accuracy_m: f64, captured_at_epoch_ms: i64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_m,
            captured_at_epoch_ms,
        }
    }

    /// Link to the fix under `base`.
    ///
    /// Coordinates use the shortest text that round-trips, so `37.422` stays
    /// `37.422` instead of growing trailing zeros.
    pub fn maps_url_with_base(&self, base: &str) -> String {
        format!(
            "{}?q={},{}",
            base,
            fmt_shortest(self.latitude),
            fmt_shortest(self.longitude)
        )
    }
}

/// Options passed with every one-shot request and subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LocationOptions {
    pub high_accuracy_preferred: bool,
    pub timeout_ms: u32,
    /// 0 forbids the platform from answering with a cached fix.
    pub max_cached_age_ms: u32,
}

impl Default for LocationOptions {
    fn default() -> Self {
        Self {
            high_accuracy_preferred: true,
            timeout_ms: 10_000,
            max_cached_age_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_url_keeps_short_coordinates() {
        let s = LocationSample::new(37.422, -122.084, 12.5, 1_700_000_000_000);
        assert_eq!(
            s.maps_url_with_base(DEFAULT_MAPS_BASE_URL),
            "https://www.google.com/maps?q=37.422,-122.084"
        );
    }

    #[test]
    fn maps_url_honors_custom_base() {
        let s = LocationSample::new(-33.8688, 151.2093, 5.0, 0);
        assert_eq!(
            s.maps_url_with_base("https://maps.example.test/"),
            "https://maps.example.test/?q=-33.8688,151.2093"
        );
    }

    #[test]
    fn default_options_force_a_fresh_precise_fix() {
        let o = LocationOptions::default();
        assert!(o.high_accuracy_preferred);
        assert_eq!(o.timeout_ms, 10_000);
        assert_eq!(o.max_cached_age_ms, 0);
    }
}

use geotrack::surface::{PresentationSurface, Slot};
use leptos::prelude::*;
use wasm_bindgen::JsValue;

/// Display slots backed by signals the view reads from.
#[derive(Clone, Copy)]
pub(super) struct SignalSurface {
    pub(super) permission: RwSignal<String>,
    pub(super) latitude: RwSignal<String>,
    pub(super) longitude: RwSignal<String>,
    pub(super) accuracy: RwSignal<String>,
    pub(super) timestamp: RwSignal<String>,
    pub(super) status: RwSignal<String>,
    pub(super) map_link: RwSignal<Option<String>>,
    pub(super) stop_enabled: RwSignal<bool>,
}

impl SignalSurface {
    pub(super) fn new() -> Self {
        Self {
            permission: RwSignal::new(String::new()),
            latitude: RwSignal::new(String::new()),
            longitude: RwSignal::new(String::new()),
            accuracy: RwSignal::new(String::new()),
            timestamp: RwSignal::new(String::new()),
            status: RwSignal::new(String::new()),
            map_link: RwSignal::new(None),
            stop_enabled: RwSignal::new(false),
        }
    }

    pub(super) fn slot(&self, slot: Slot) -> RwSignal<String> {
        match slot {
            Slot::Permission => self.permission,
            Slot::Latitude => self.latitude,
            Slot::Longitude => self.longitude,
            Slot::Accuracy => self.accuracy,
            Slot::Timestamp => self.timestamp,
            Slot::Status => self.status,
        }
    }
}

impl PresentationSurface for SignalSurface {
    fn write(&mut self, slot: Slot, text: &str) {
        self.slot(slot).set(text.to_string());
    }

    fn write_timestamp(&mut self, captured_at_epoch_ms: i64) {
        let date = js_sys::Date::new(&JsValue::from_f64(captured_at_epoch_ms as f64));
        self.timestamp
            .set(String::from(date.to_locale_string("default", &JsValue::UNDEFINED)));
    }

    fn reveal_map_link(&mut self, url: &str) {
        self.map_link.set(Some(url.to_string()));
    }

    fn set_stop_enabled(&mut self, enabled: bool) {
        self.stop_enabled.set(enabled);
    }
}

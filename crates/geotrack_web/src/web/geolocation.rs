use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use geotrack::error::LocationError;
use geotrack::platform::{EventSink, FixOrigin, LocationSource, SubscriptionHandle};
use geotrack::sample::{LocationOptions, LocationSample};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::{has_property, js_error_message};

type FixCallback = Closure<dyn FnMut(web_sys::Position)>;
type ErrorCallback = Closure<dyn FnMut(web_sys::PositionError)>;

/// `navigator.geolocation`, reporting into an [`EventSink`].
pub(super) struct WebGeolocation {
    geolocation: web_sys::Geolocation,
    // Kept alive until the watch is cleared.
    watches: RefCell<HashMap<i32, (FixCallback, ErrorCallback)>>,
}

impl WebGeolocation {
    pub(super) fn detect() -> Option<Self> {
        let navigator = web_sys::window()?.navigator();
        if !has_property(navigator.as_ref(), "geolocation") {
            return None;
        }
        let geolocation = navigator.geolocation().ok()?;
        Some(Self {
            geolocation,
            watches: RefCell::new(HashMap::new()),
        })
    }
}

fn position_options(o: &LocationOptions) -> web_sys::PositionOptions {
    let opts = web_sys::PositionOptions::new();
    opts.set_enable_high_accuracy(o.high_accuracy_preferred);
    opts.set_timeout(o.timeout_ms);
    opts.set_maximum_age(o.max_cached_age_ms);
    opts
}

fn to_sample(position: &web_sys::Position) -> LocationSample {
    let coords = position.coords();
    LocationSample::new(
        coords.latitude(),
        coords.longitude(),
        coords.accuracy(),
        position.timestamp() as i64,
    )
}

fn to_error(error: &web_sys::PositionError) -> LocationError {
    LocationError::from_code(error.code(), error.message())
}

/// Watch callbacks; they stay silent until the watch id has been recorded.
fn watch_callbacks(
    handle: Rc<Cell<Option<SubscriptionHandle>>>,
    sink: EventSink,
) -> (FixCallback, ErrorCallback) {
    let fix_sink = sink.clone();
    let fix_handle = handle.clone();
    let on_fix = Closure::wrap(Box::new(move |position: web_sys::Position| {
        if let Some(h) = fix_handle.get() {
            fix_sink.fix(FixOrigin::Subscription(h), to_sample(&position));
        }
    }) as Box<dyn FnMut(_)>);

    let on_error = Closure::wrap(Box::new(move |error: web_sys::PositionError| {
        if let Some(h) = handle.get() {
            sink.failed(FixOrigin::Subscription(h), to_error(&error));
        }
    }) as Box<dyn FnMut(_)>);

    (on_fix, on_error)
}

impl LocationSource for WebGeolocation {
    fn request_once(&self, options: &LocationOptions, sink: EventSink) -> Result<(), LocationError> {
        // Exactly one of the two fires and frees itself; the other stays behind.
        let fix_sink = sink.clone();
        let on_fix = Closure::once_into_js(move |position: web_sys::Position| {
            fix_sink.fix(FixOrigin::OneShot, to_sample(&position));
        });
        let on_error = Closure::once_into_js(move |error: web_sys::PositionError| {
            sink.failed(FixOrigin::OneShot, to_error(&error));
        });

        self.geolocation
            .get_current_position_with_error_callback_and_options(
                on_fix.unchecked_ref(),
                Some(on_error.unchecked_ref()),
                &position_options(options),
            )
            .map_err(|e| LocationError::platform(js_error_message(&e)))?;
        Ok(())
    }

    fn subscribe(
        &self,
        options: &LocationOptions,
        sink: EventSink,
    ) -> Result<SubscriptionHandle, LocationError> {
        // The id is only known after watchPosition returns; callbacks run later.
        let handle: Rc<Cell<Option<SubscriptionHandle>>> = Rc::new(Cell::new(None));
        let (on_fix, on_error) = watch_callbacks(handle.clone(), sink);

        let id = self
            .geolocation
            .watch_position_with_error_callback_and_options(
                on_fix.as_ref().unchecked_ref(),
                Some(on_error.as_ref().unchecked_ref()),
                &position_options(options),
            )
            .map_err(|e| LocationError::platform(js_error_message(&e)))?;

        let h = SubscriptionHandle::from_raw(id);
        handle.set(Some(h));
        self.watches.borrow_mut().insert(id, (on_fix, on_error));
        Ok(h)
    }

    fn cancel(&self, handle: SubscriptionHandle) {
        self.geolocation.clear_watch(handle.raw());
        self.watches.borrow_mut().remove(&handle.raw());
    }
}

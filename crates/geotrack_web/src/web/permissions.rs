use geotrack::error::PermissionError;
use geotrack::permission::{PermissionState, Unavailable};
use geotrack::platform::{EventSink, PermissionSource};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use super::{has_property, js_error_message};

/// `navigator.permissions`.
pub(super) struct WebPermissions {
    permissions: web_sys::Permissions,
}

impl WebPermissions {
    pub(super) fn detect() -> Option<Self> {
        let navigator = web_sys::window()?.navigator();
        if !has_property(navigator.as_ref(), "permissions") {
            return None;
        }
        let permissions = navigator.permissions().ok()?;
        Some(Self { permissions })
    }
}

/// Reads `status.state` as a string; unrecognized states count as a failed query.
fn read_state(status: &web_sys::PermissionStatus) -> PermissionState {
    js_sys::Reflect::get(status.as_ref(), &JsValue::from_str("state"))
        .ok()
        .and_then(|v| v.as_string())
        .and_then(|s| PermissionState::parse(&s))
        .unwrap_or(PermissionState::Unavailable(Unavailable::QueryFailed))
}

impl PermissionSource for WebPermissions {
    fn watch(&self, name: &str, sink: EventSink) -> Result<(), PermissionError> {
        let descriptor = js_sys::Object::new();
        js_sys::Reflect::set(&descriptor, &JsValue::from_str("name"), &JsValue::from_str(name))
            .map_err(|e| PermissionError::QueryFailed(js_error_message(&e)))?;
        let promise = self
            .permissions
            .query(&descriptor)
            .map_err(|e| PermissionError::QueryFailed(js_error_message(&e)))?;

        wasm_bindgen_futures::spawn_local(async move {
            let status = wasm_bindgen_futures::JsFuture::from(promise)
                .await
                .and_then(|v| v.dyn_into::<web_sys::PermissionStatus>());

            let status = match status {
                Ok(status) => status,
                Err(e) => {
                    tracing::warn!(error = %js_error_message(&e), "permission query rejected");
                    sink.permission(PermissionState::Unavailable(Unavailable::QueryFailed));
                    return;
                }
            };

            sink.permission(read_state(&status));

            // Mirrored for the lifetime of the page.
            let watched = status.clone();
            let on_change = Closure::wrap(Box::new(move |_ev: web_sys::Event| {
                sink.permission(read_state(&watched));
            }) as Box<dyn FnMut(_)>);
            status.set_onchange(Some(on_change.as_ref().unchecked_ref()));
            on_change.forget();
        });

        Ok(())
    }
}

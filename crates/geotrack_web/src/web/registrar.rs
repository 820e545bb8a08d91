use futures::future::{FutureExt, LocalBoxFuture};
use geotrack::error::RegistrationError;
use geotrack::registrar::WorkerRegistry;
use wasm_bindgen::JsCast;

use super::{has_property, js_error_message};

pub(super) struct WebWorkerRegistry {
    container: web_sys::ServiceWorkerContainer,
}

impl WebWorkerRegistry {
    pub(super) fn detect() -> Option<Self> {
        let navigator = web_sys::window()?.navigator();
        if !has_property(navigator.as_ref(), "serviceWorker") {
            return None;
        }
        Some(Self {
            container: navigator.service_worker(),
        })
    }
}

impl WorkerRegistry for WebWorkerRegistry {
    fn register(&self, script_path: &str) -> LocalBoxFuture<'static, Result<String, RegistrationError>> {
        let promise = self.container.register(script_path);
        async move {
            let v = wasm_bindgen_futures::JsFuture::from(promise)
                .await
                .map_err(|e| RegistrationError::Failed(js_error_message(&e)))?;
            let registration = v
                .dyn_into::<web_sys::ServiceWorkerRegistration>()
                .map_err(|_| RegistrationError::UnexpectedResult)?;
            Ok(registration.scope())
        }
        .boxed_local()
    }
}

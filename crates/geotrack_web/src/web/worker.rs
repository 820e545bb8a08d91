//! Service worker side: binds the install/activate hooks to the global scope.

use std::cell::RefCell;

use geotrack::error::WorkerError;
use geotrack::worker::{WorkerLifecycle, WorkerScope};
use wasm_bindgen::JsCast;
use web_sys::{ExtendableEvent, ServiceWorkerGlobalScope};

use super::js_error_message;

thread_local! {
    static LIFECYCLE: RefCell<WorkerLifecycle> = RefCell::new(WorkerLifecycle::new());
}

/// The global scope, with platform promises attached to the event being handled.
struct EventScope<'a> {
    global: ServiceWorkerGlobalScope,
    event: &'a ExtendableEvent,
}

impl WorkerScope for EventScope<'_> {
    fn skip_waiting(&self) -> Result<(), WorkerError> {
        let promise = self
            .global
            .skip_waiting()
            .map_err(|e| WorkerError::SkipWaiting(js_error_message(&e)))?;
        self.event
            .wait_until(&promise)
            .map_err(|e| WorkerError::SkipWaiting(js_error_message(&e)))
    }

    fn claim_clients(&self) -> Result<(), WorkerError> {
        let promise = self.global.clients().claim();
        self.event
            .wait_until(&promise)
            .map_err(|e| WorkerError::Claim(js_error_message(&e)))
    }
}

fn global_scope() -> Option<ServiceWorkerGlobalScope> {
    js_sys::global().dyn_into::<ServiceWorkerGlobalScope>().ok()
}

fn with_scope<F>(event: &ExtendableEvent, f: F)
where
    F: FnOnce(&mut WorkerLifecycle, &EventScope<'_>) -> Result<(), WorkerError>,
{
    let Some(global) = global_scope() else {
        tracing::error!("lifecycle hook called outside a service worker");
        return;
    };
    let scope = EventScope { global, event };
    LIFECYCLE.with(|l| {
        if let Err(e) = f(&mut *l.borrow_mut(), &scope) {
            tracing::error!(error = %e, "worker lifecycle hook failed");
        }
    });
}

pub fn worker_start() {
    super::init_logging();
    tracing::info!("worker script loaded");
}

pub fn install(event: &ExtendableEvent) {
    with_scope(event, |l, scope| l.on_install(scope));
}

pub fn activate(event: &ExtendableEvent) {
    with_scope(event, |l, scope| l.on_activate(scope));
}

use futures::StreamExt;
use geotrack::controller::LocationController;
use geotrack::registrar::register_worker;
use geotrack::surface::Slot;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::ui_model::{
    display_value, readout_slots, slot_dom_id, Command, MAP_LINK_LABEL, PAGE_TITLE,
};

mod config;
mod geolocation;
mod permissions;
mod registrar;
mod surface;
pub(crate) mod worker;

use geolocation::WebGeolocation;
use permissions::WebPermissions;
use registrar::WebWorkerRegistry;
use surface::SignalSurface;

pub fn start() {
    init_logging();
    mount_to_body(|| view! { <App /> });
}

fn init_logging() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
}

#[component]
fn App() -> impl IntoView {
    let config = config::load_config();
    let surface = SignalSurface::new();

    let (controller, mut events) =
        LocationController::new(WebGeolocation::detect(), surface, config.clone());
    let controller = StoredValue::new_local(controller);

    controller.update_value(|c| c.mirror_permissions(WebPermissions::detect().as_ref()));

    // Platform callbacks only enqueue; the controller sees events here, in order.
    wasm_bindgen_futures::spawn_local(async move {
        while let Some(event) = events.next().await {
            controller.update_value(|c| c.handle_event(event));
        }
    });

    register_worker_on_load(config.worker_script);

    let do_start = move || {
        controller.update_value(|c| {
            if let Err(e) = c.start_tracking() {
                tracing::debug!(error = %e, "start_tracking did not open a subscription");
            }
        });
    };

    let do_stop = move || controller.update_value(|c| c.stop_tracking());

    on_cleanup(move || do_stop());

    view! {
        <main style="font-family: system-ui, -apple-system, Segoe UI, Roboto, sans-serif; padding: 18px; max-width: 640px; margin: 0 auto;">
            <h1 style="margin: 0 0 8px 0;">{PAGE_TITLE}</h1>
            <p style="margin: 0 0 16px 0; color: #555;">
                "Shows where this device is, using the browser's location services."
            </p>

            <section style="display: flex; gap: 10px; flex-wrap: wrap; margin-bottom: 14px;">
                <button id=Command::Locate.dom_id() on:click=move |_| do_start()>
                    {Command::Locate.label()}
                </button>
                <button
                    id=Command::StopTracking.dom_id()
                    disabled=move || !Command::StopTracking.enabled(surface.stop_enabled.get())
                    on:click=move |_| do_stop()
                >
                    {Command::StopTracking.label()}
                </button>
            </section>

            <section style="display: grid; grid-template-columns: 1fr; gap: 8px;">
                {readout_slots()
                    .iter()
                    .copied()
                    .map(|slot| {
                        let sig = surface.slot(slot);
                        view! {
                            <Stat
                                label=slot.label()
                                id=slot_dom_id(slot)
                                value=move || display_value(&sig.get()).to_string()
                            />
                        }
                    })
                    .collect_view()}
            </section>

            <p id=slot_dom_id(Slot::Status) style="margin-top: 16px; color: #333;">
                {move || surface.status.get()}
            </p>

            <a
                href=move || surface.map_link.get().unwrap_or_default()
                target="_blank"
                rel="noopener"
                style:display=move || if surface.map_link.get().is_some() { "inline-block" } else { "none" }
            >
                {MAP_LINK_LABEL}
            </a>
        </main>
    }
}

#[component]
fn Stat(
    label: &'static str,
    id: &'static str,
    value: impl Fn() -> String + Send + 'static,
) -> impl IntoView {
    view! {
        <div style="display: flex; justify-content: space-between; border: 1px solid #eee; padding: 10px 12px; border-radius: 10px;">
            <div style="color: #333; font-weight: 600;">{label}</div>
            <div id=id style="color: #111; font-variant-numeric: tabular-nums;">{value}</div>
        </div>
    }
}

/// Register the worker once the page has finished loading.
fn register_worker_on_load(script: String) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let register = move || {
        wasm_bindgen_futures::spawn_local(async move {
            let registry = WebWorkerRegistry::detect();
            register_worker(registry.as_ref(), &script).await;
        });
    };

    // The wasm module may start after `load` already fired.
    let loaded = window
        .document()
        .map(|d| d.ready_state() == "complete")
        .unwrap_or(false);
    if loaded {
        register();
        return;
    }

    let on_load = Closure::once(register);
    if let Err(e) =
        window.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())
    {
        tracing::error!(error = %js_error_message(&e), "could not listen for load");
        return;
    }
    on_load.forget();
}

fn has_property(target: &JsValue, name: &str) -> bool {
    js_sys::Reflect::has(target, &JsValue::from_str(name)).unwrap_or(false)
}

fn js_error_message(e: &JsValue) -> String {
    if let Some(s) = e.as_string() {
        return s;
    }
    if let Some(err) = e.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{e:?}")
}

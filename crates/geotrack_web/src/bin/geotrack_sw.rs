// Service worker entrypoint, built by Trunk as a `no-modules` worker.
//
// `sw.js` registers the install/activate listeners synchronously and forwards
// each event to the exports below once this module has loaded.

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod exports {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    pub fn on_install(event: web_sys::ExtendableEvent) {
        geotrack_web::install(&event);
    }

    #[wasm_bindgen]
    pub fn on_activate(event: web_sys::ExtendableEvent) {
        geotrack_web::activate(&event);
    }
}

fn main() {
    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    geotrack_web::worker_start();
}

use geotrack::config::TrackerConfig;

use crate::ui_model::CONFIG_ELEMENT_ID;

/// Read the optional JSON override embedded in the page.
///
/// Missing block means defaults; a malformed one is logged and ignored.
pub(super) fn load_config() -> TrackerConfig {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return TrackerConfig::default();
    };

    match TrackerConfig::from_json(&raw) {
        Ok(cfg) => {
            tracing::info!(?cfg, "loaded page config");
            cfg
        }
        Err(e) => {
            tracing::warn!(error = %e, "ignoring page config");
            TrackerConfig::default()
        }
    }
}

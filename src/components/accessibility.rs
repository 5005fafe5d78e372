// src/components/accessibility.rs
use crate::components::collapsible::{toggle, HEADER_SELECTOR};
use crate::dom::{query_all, set_styles};
use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, KeyboardEvent};

const ENHANCED_MARK: &str = "data-a11y";

/// Enter and Space activate a focused header, like a button.
pub fn is_activation_key(key: &str) -> bool {
    key == "Enter" || key == " "
}

/// Dim disabled links and make section headers keyboard operable.
/// Headers handled by an earlier pass are left alone.
pub fn enhance() -> Vec<EventListener> {
    for link in query_all::<HtmlElement>(r#"a[aria-disabled="true"]"#) {
        set_styles(&link, &[("opacity", "0.6"), ("cursor", "not-allowed")]);
    }

    query_all::<HtmlElement>(HEADER_SELECTOR)
        .into_iter()
        .filter(|header| !header.has_attribute(ENHANCED_MARK))
        .map(|header| {
            let _ = header.set_attribute(ENHANCED_MARK, "");
            let _ = header.set_attribute("role", "button");
            let _ = header.set_attribute("tabindex", "0");
            let target = header.clone();
            EventListener::new_with_options(
                &header,
                "keydown",
                EventListenerOptions::enable_prevent_default(),
                move |event: &Event| {
                    let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    if is_activation_key(&key.key()) {
                        key.prevent_default();
                        toggle(&target);
                    }
                },
            )
        })
        .collect()
}

// src/components/image_preview.rs
use crate::dom::{js_err, set_display, set_styles};
use crate::lifecycle::Singleton;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::utils::{body, document};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, HtmlImageElement, KeyboardEvent};

const OVERLAY_ID: &str = "imgPreviewOverlay";
const PREVIEW_LINK: &str = "a[data-preview]";

/// Full-page image layer. Clicking anywhere on it or pressing Escape hides it.
struct Overlay {
    layer: HtmlElement,
    image: HtmlImageElement,
    _listeners: [EventListener; 2],
}

impl Overlay {
    fn create() -> Result<Self, String> {
        let doc = document();
        let layer: HtmlElement = doc
            .create_element("div")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| "overlay is not an HtmlElement".to_string())?;
        layer.set_id(OVERLAY_ID);
        set_styles(
            &layer,
            &[
                ("position", "fixed"),
                ("inset", "0"),
                ("display", "none"),
                ("z-index", "9999"),
                ("background", "rgba(0,0,0,.85)"),
                ("align-items", "center"),
                ("justify-content", "center"),
            ],
        );

        let image = HtmlImageElement::new().map_err(js_err)?;
        image.set_alt("Vista previa");
        set_styles(
            &image,
            &[
                ("max-width", "90vw"),
                ("max-height", "90vh"),
                ("border-radius", "12px"),
                ("box-shadow", "0 10px 30px rgba(0,0,0,.5)"),
            ],
        );
        layer.append_child(&image).map_err(js_err)?;
        body().append_child(&layer).map_err(js_err)?;

        let on_click = {
            let layer = layer.clone();
            EventListener::new(&layer.clone(), "click", move |_| set_display(&layer, "none"))
        };
        let on_escape = {
            let layer = layer.clone();
            EventListener::new(&doc, "keydown", move |event: &Event| {
                let escape = event
                    .dyn_ref::<KeyboardEvent>()
                    .is_some_and(|key| key.key() == "Escape");
                if escape {
                    set_display(&layer, "none");
                }
            })
        };

        Ok(Self {
            layer,
            image,
            _listeners: [on_click, on_escape],
        })
    }

    fn show(&self, src: &str) {
        self.image.set_src(src);
        set_display(&self.layer, "flex");
    }
}

/// Intercepts clicks on preview links and shows their target in the overlay,
/// creating the overlay on first use.
pub struct ImagePreview {
    overlay: Singleton<Overlay>,
}

impl ImagePreview {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            overlay: Singleton::new(),
        })
    }

    fn open(&self, href: &str) {
        match self.overlay.get_or_try_init(Overlay::create) {
            Ok(overlay) => overlay.show(href),
            Err(e) => log::warn!("Image preview unavailable: {}", e),
        }
    }

    pub fn bind(self: &Rc<Self>) -> EventListener {
        let preview = self.clone();
        EventListener::new_with_options(
            &document(),
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let link = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.closest(PREVIEW_LINK).ok().flatten());
                let Some(link) = link else {
                    return;
                };
                event.prevent_default();
                preview.open(&link.get_attribute("href").unwrap_or_default());
            },
        )
    }
}

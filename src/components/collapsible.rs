// src/components/collapsible.rs
use crate::dom::{query_all, set_display};
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{FocusOptions, HtmlElement};

pub const HEADER_SELECTOR: &str = ".card > header";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    Open,
    Collapsed,
}

impl SectionState {
    /// Anything but an explicit `display: none` counts as open.
    pub fn from_display(display: &str) -> Self {
        if display.trim() == "none" {
            SectionState::Collapsed
        } else {
            SectionState::Open
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SectionState::Open => SectionState::Collapsed,
            SectionState::Collapsed => SectionState::Open,
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            SectionState::Open => "block",
            SectionState::Collapsed => "none",
        }
    }

    /// Caret text names the action available from this state.
    pub fn caret_label(self) -> &'static str {
        match self {
            SectionState::Open => "Contraer",
            SectionState::Collapsed => "Expandir",
        }
    }
}

/// Every section starts open.
pub fn open_all() {
    for content in query_all::<HtmlElement>(".card .content") {
        set_display(&content, SectionState::Open.display());
    }
}

/// Flip the panel under `header`, relabel its caret and keep focus on the header.
pub fn toggle(header: &HtmlElement) {
    let Some(card) = header.parent_element() else {
        return;
    };
    let content = card
        .query_selector(".content")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    let Some(content) = content else {
        log::debug!("Section header without content panel");
        return;
    };

    let current = content
        .style()
        .get_property_value("display")
        .map(|display| SectionState::from_display(&display))
        .unwrap_or(SectionState::Open);
    let next = current.toggled();
    set_display(&content, next.display());

    if let Ok(Some(caret)) = header.query_selector(".caret") {
        caret.set_text_content(Some(next.caret_label()));
    }

    let _ = header.set_attribute("tabindex", "0");
    let options = FocusOptions::new();
    options.set_prevent_scroll(true);
    let _ = header.focus_with_options(&options);
}

/// Click-to-toggle on every section header currently in the page.
pub fn bind_headers() -> Vec<EventListener> {
    query_all::<HtmlElement>(HEADER_SELECTOR)
        .into_iter()
        .map(|header| {
            let target = header.clone();
            EventListener::new(&header, "click", move |_| toggle(&target))
        })
        .collect()
}

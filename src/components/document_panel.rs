// src/components/document_panel.rs
use crate::dom::{query, set_display};
use crate::scene::Scene;
use crate::utils::encode_uri;
use gloo::events::EventListener;
use gloo_net::http::{Method, RequestBuilder};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlElement};

const VIEWER_PARAMS: &str = "#toolbar=1&navpanes=0&statusbar=0&view=FitH";
const SCORES_PENDING: &str = "📂 Carpeta de partituras (pendiente)";

/// Inline viewer source for a document URL: toolbar on, fit to width.
pub fn viewer_src(url: &str) -> String {
    format!("{}{}", url, VIEWER_PARAMS)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoresLink {
    Ready(String),
    Pending,
}

impl ScoresLink {
    pub fn new(url: Option<&str>) -> Self {
        match url {
            Some(url) => ScoresLink::Ready(url.to_string()),
            None => ScoresLink::Pending,
        }
    }

    pub fn href(&self) -> &str {
        match self {
            ScoresLink::Ready(url) => url,
            ScoresLink::Pending => "#",
        }
    }
}

/// Point the view/download links at the scene script, embed it when it
/// exists, and resolve the scores folder link.
///
/// Returns the listener suppressing clicks on a pending scores link.
pub fn setup(scene: &Scene) -> Option<EventListener> {
    let script_url = encode_uri(scene.config.script_file());
    for selector in ["#pdfView", "#pdfDownload"] {
        if let Some(link) = query::<Element>(selector) {
            let _ = link.set_attribute("href", &script_url);
        }
    }

    if let Some(frame) = query::<HtmlElement>(".pdf-frame") {
        spawn_local(probe_and_embed(frame, script_url));
    }

    setup_scores_link(ScoresLink::new(scene.config.scores_url()))
}

/// HEAD the document; embed on success, hide the frame otherwise.
async fn probe_and_embed(frame: HtmlElement, url: String) {
    let available = match RequestBuilder::new(&url).method(Method::HEAD).send().await {
        Ok(resp) if resp.ok() => true,
        Ok(resp) => {
            log::warn!("Script {} unavailable: HTTP {}", url, resp.status());
            false
        }
        Err(e) => {
            log::warn!("Script probe for {} failed: {:?}", url, e);
            false
        }
    };

    if available {
        let _ = frame.set_attribute("src", &viewer_src(&url));
    } else {
        set_display(&frame, "none");
    }
}

fn setup_scores_link(scores: ScoresLink) -> Option<EventListener> {
    let link = query::<HtmlElement>("#allScoresLink")?;
    let _ = link.set_attribute("href", scores.href());
    if scores != ScoresLink::Pending {
        return None;
    }

    let _ = link.set_attribute("aria-disabled", "true");
    let _ = link.class_list().add_1("disabled");
    link.set_text_content(Some(SCORES_PENDING));
    Some(EventListener::new_with_options(
        &link,
        "click",
        gloo::events::EventListenerOptions::enable_prevent_default(),
        |event| event.prevent_default(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_src() {
        assert_eq!(
            viewer_src("Gui%C3%B3n.pdf"),
            "Gui%C3%B3n.pdf#toolbar=1&navpanes=0&statusbar=0&view=FitH"
        );
    }

    #[test]
    fn test_scores_link() {
        assert_eq!(ScoresLink::new(None), ScoresLink::Pending);
        assert_eq!(ScoresLink::Pending.href(), "#");
        let ready = ScoresLink::new(Some("https://drive.example/f"));
        assert_eq!(ready.href(), "https://drive.example/f");
    }
}

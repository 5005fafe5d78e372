// src/components/filter_panel.rs
use crate::components::resource_list::{ResourceList, ResourceListProps};
use crate::dom::{query, query_all, set_display};
use crate::events::{EventBus, PageEvent, PageEventKind};
use crate::filter::{CardAttributes, ChipKind, FilterChip};
use crate::filter_engine::FilterEngine;
use crate::lifecycle::Singleton;
use crate::resources::ResourceListing;
use crate::scene::Scene;
use crate::storage::BrowserStore;
use gloo::events::EventListener;
use gloo::utils::document;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{Element, HtmlElement, HtmlInputElement};
use yew::AppHandle;

const RESOURCE_LIST_ID: &str = "res-list";
const RESOURCE_CARD_HTML: &str = r#"<header><h2>🔗 Recursos de esta escena</h2><span class="caret">Contraer</span></header>
<div class="content"><ul id="res-list" class="asset-grid"></ul></div>"#;

struct Chip {
    element: Element,
    kind: ChipKind,
    value: String,
}

impl Chip {
    fn from_element(element: Element) -> Option<Self> {
        let kind = ChipKind::from_attr(&element.get_attribute("data-type")?)?;
        let value = element.get_attribute(kind.value_attr())?;
        Some(Self {
            element,
            kind,
            value,
        })
    }

    fn is_active(&self) -> bool {
        self.element.class_list().contains("active")
    }

    fn snapshot(&self) -> FilterChip {
        FilterChip {
            kind: self.kind,
            value: self.value.clone(),
            active: self.is_active(),
        }
    }
}

struct Card {
    element: HtmlElement,
    attributes: CardAttributes,
}

impl Card {
    fn from_element(element: HtmlElement) -> Self {
        let attributes = CardAttributes::from_attrs(
            element.get_attribute("data-tags").as_deref(),
            element.get_attribute("data-centros").as_deref(),
            element.get_attribute("data-log").as_deref(),
            element.text_content().unwrap_or_default(),
        );
        Self {
            element,
            attributes,
        }
    }
}

/// The yew app rendering into the resource list container.
struct ResourceMount {
    handle: RefCell<AppHandle<ResourceList>>,
}

/// Browser side of the filter engine: chips, query box, cards and the
/// resource list.
pub struct FilterPanel {
    engine: FilterEngine<BrowserStore>,
    chips: Vec<Chip>,
    cards: Vec<Card>,
    query: Option<HtmlInputElement>,
    resources: Singleton<ResourceMount>,
}

impl FilterPanel {
    /// Collects chips and cards as they are now; the resource card created
    /// later is not part of the filterable set.
    pub fn from_document(scene: Rc<Scene>) -> Rc<Self> {
        let chips: Vec<Chip> = query_all::<Element>(".chip")
            .into_iter()
            .filter_map(Chip::from_element)
            .collect();
        let cards: Vec<Card> = query_all::<HtmlElement>(".card")
            .into_iter()
            .map(Card::from_element)
            .collect();
        log::debug!("Filtering {} cards with {} chips", cards.len(), chips.len());

        Rc::new(Self {
            engine: FilterEngine::new(scene, BrowserStore),
            chips,
            cards,
            query: query::<HtmlInputElement>("#q"),
            resources: Singleton::new(),
        })
    }

    /// Re-activate saved chips and refill the query box.
    pub fn restore(&self) {
        let saved = self.engine.restore();
        for chip in &self.chips {
            if saved.is_selected(chip.kind, &chip.value) {
                let _ = chip.element.class_list().add_1("active");
            }
        }
        if let Some(input) = &self.query {
            if !saved.query.is_empty() {
                input.set_value(&saved.query);
            }
        }
    }

    fn query_text(&self) -> String {
        self.query
            .as_ref()
            .map(|input| input.value())
            .unwrap_or_default()
    }

    /// One full cycle: snapshot, card visibility, persistence, resource list.
    pub fn apply(&self) {
        let chips: Vec<FilterChip> = self.chips.iter().map(Chip::snapshot).collect();
        let attributes: Vec<CardAttributes> =
            self.cards.iter().map(|c| c.attributes.clone()).collect();
        let outcome = self.engine.apply(&chips, &self.query_text(), &attributes);

        for (card, visible) in self.cards.iter().zip(&outcome.visible) {
            set_display(&card.element, if *visible { "" } else { "none" });
        }
        self.render_resources(outcome.listing);
    }

    /// The list is created on the first cycle and handed a fresh listing on
    /// every later one.
    fn render_resources(&self, listing: ResourceListing) {
        if let Some(mount) = self.resources.get() {
            mount.handle.borrow_mut().update(ResourceListProps { listing });
            return;
        }
        let created = self.resources.get_or_try_init(|| {
            let root = ensure_resource_container()?;
            root.set_inner_html("");
            let handle = yew::Renderer::<ResourceList>::with_root_and_props(
                root,
                ResourceListProps { listing },
            )
            .render();
            Ok(ResourceMount {
                handle: RefCell::new(handle),
            })
        });
        if let Err(e) = created {
            log::info!("Resource list not rendered: {}", e);
        }
    }

    pub fn bind(self: &Rc<Self>, bus: &Rc<EventBus>) -> Vec<EventListener> {
        let mut listeners: Vec<EventListener> = self
            .chips
            .iter()
            .map(|chip| {
                let bus = bus.clone();
                let element = chip.element.clone();
                let kind = chip.kind;
                let value = chip.value.clone();
                EventListener::new(&chip.element, "click", move |_| {
                    let active = element.class_list().toggle("active").unwrap_or(false);
                    bus.emit(&PageEvent::ChipToggled {
                        kind,
                        value: value.clone(),
                        active,
                    });
                })
            })
            .collect();

        if let Some(input) = &self.query {
            let bus = bus.clone();
            let source = input.clone();
            listeners.push(EventListener::new(input, "input", move |_| {
                bus.emit(&PageEvent::QueryChanged(source.value()))
            }));
        }

        for kind in [PageEventKind::ChipToggled, PageEventKind::QueryChanged] {
            let panel = self.clone();
            bus.subscribe(kind, move |event| {
                match event {
                    PageEvent::ChipToggled {
                        kind,
                        value,
                        active,
                    } => log::debug!("Chip {:?}:{} active={}", kind, value, active),
                    PageEvent::QueryChanged(query) => log::debug!("Query {:?}", query),
                    _ => {}
                }
                panel.apply();
            });
        }
        listeners
    }
}

/// Existing `#res-list`, or a new resources card appended to the first
/// `main section`.
fn ensure_resource_container() -> Result<Element, String> {
    let doc = document();
    if let Some(existing) = doc.get_element_by_id(RESOURCE_LIST_ID) {
        return Ok(existing);
    }
    let section = doc
        .query_selector("main section")
        .ok()
        .flatten()
        .ok_or_else(|| "No section to host the resource list".to_string())?;
    let card = doc
        .create_element("div")
        .map_err(|_| "Failed to create resource card".to_string())?;
    card.set_class_name("card");
    let _ = card.set_attribute("data-tags", "produccion general");
    card.set_inner_html(RESOURCE_CARD_HTML);
    section
        .append_child(&card)
        .map_err(|_| "Failed to attach resource card".to_string())?;
    doc.get_element_by_id(RESOURCE_LIST_ID)
        .ok_or_else(|| "Resource list missing after creation".to_string())
}

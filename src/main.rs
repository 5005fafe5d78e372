// src/main.rs
mod components;
mod dom;
mod events;
mod filter;
mod filter_engine;
mod lifecycle;
mod playlist;
mod resources;
mod scene;
mod storage;
mod utils;

use components::audio_player::AudioPlayer;
use components::filter_panel::FilterPanel;
use components::image_preview::ImagePreview;
use components::{accessibility, collapsible, document_panel};
use events::{EventBus, PageEvent};
use gloo::events::EventListener;
use gloo::utils::document;
use scene::Scene;
use std::cell::RefCell;
use std::rc::Rc;

/// Everything that has to stay alive for the lifetime of the page.
pub struct SceneApp {
    _bus: Rc<EventBus>,
    _listeners: Vec<EventListener>,
}

thread_local! {
    static APP: RefCell<Option<SceneApp>> = RefCell::new(None);
}

impl SceneApp {
    fn boot() -> Option<Self> {
        let scene = Rc::new(Scene::from_document()?);
        log::info!("Enhancing scene {}", scene.context.scene_id);

        let bus = Rc::new(EventBus::new());
        let mut listeners = Vec::new();

        collapsible::open_all();

        let audio = AudioPlayer::from_document(&scene);
        match &audio {
            Some(player) => listeners.extend(player.bind(&bus)),
            None => log::info!("No audio player on this page"),
        }

        listeners.extend(document_panel::setup(&scene));

        let filters = FilterPanel::from_document(scene.clone());
        filters.restore();
        listeners.extend(filters.bind(&bus));
        filters.apply();

        // After the first apply so the resources card is covered too.
        listeners.extend(collapsible::bind_headers());
        listeners.extend(accessibility::enhance());

        listeners.push(ImagePreview::new().bind());
        listeners.push(bind_visibility(&bus));

        if let Some(player) = &audio {
            player.play(true);
        }

        Some(Self {
            _bus: bus,
            _listeners: listeners,
        })
    }
}

fn bind_visibility(bus: &Rc<EventBus>) -> EventListener {
    let bus = bus.clone();
    EventListener::new(&document(), "visibilitychange", move |_| {
        bus.emit(&PageEvent::VisibilityChanged {
            hidden: document().hidden(),
        })
    })
}

fn start() {
    match SceneApp::boot() {
        Some(app) => APP.with(|slot| *slot.borrow_mut() = Some(app)),
        None => log::error!("Page has no <body>, nothing to enhance"),
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());

    let doc = document();
    if doc.ready_state() == "loading" {
        EventListener::once(&doc, "DOMContentLoaded", |_| start()).forget();
    } else {
        start();
    }
}

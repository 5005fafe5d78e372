// src/components/audio_player.rs
use crate::dom::{js_err, query, set_styles, target_tag};
use crate::events::{EventBus, PageEvent, PageEventKind};
use crate::lifecycle::OneShot;
use crate::playlist::{is_play_shortcut, AudioPlaylist, Fallback, PlaybackEvent, PlaybackState};
use crate::scene::Scene;
use crate::utils::now_ms;
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Event, HtmlAudioElement, HtmlElement, KeyboardEvent, Node};

const BLOCKED_HINT: &str = "El navegador bloqueó el autoplay. Haz clic para iniciar.";
const EXHAUSTED_NOTICE: &str = "No se pudo cargar ninguna pista de audio. Verifica los archivos.";
const FIRST_INTERACTION_EVENTS: [&str; 3] = ["pointerdown", "keydown", "touchstart"];

/// Scene soundtrack bound to `#sceneAudio`, `#btnPlay` and `#audioLabel`.
pub struct AudioPlayer {
    audio: HtmlAudioElement,
    button: HtmlElement,
    label: Option<HtmlElement>,
    playlist: RefCell<AudioPlaylist>,
    state: Cell<PlaybackState>,
}

impl AudioPlayer {
    /// `None` when the page has no player markup.
    pub fn from_document(scene: &Scene) -> Option<Rc<Self>> {
        let audio = query::<HtmlAudioElement>("#sceneAudio")?;
        let button = query::<HtmlElement>("#btnPlay")?;
        let player = Rc::new(Self {
            audio,
            button,
            label: query::<HtmlElement>("#audioLabel"),
            playlist: RefCell::new(AudioPlaylist::new(scene.config.audio_sources())),
            state: Cell::new(PlaybackState::default()),
        });
        player.load_current();
        Some(player)
    }

    fn load_current(&self) {
        let playlist = self.playlist.borrow();
        self.audio.set_src(&playlist.source_url(now_ms()));
        if let Some(label) = &self.label {
            label.set_text_content(Some(&playlist.label()));
        }
        log::info!(
            "Audio source {}/{}: {}",
            playlist.current_index() + 1,
            playlist.len(),
            playlist.current()
        );
        drop(playlist);
        self.transition(PlaybackEvent::SourceChanged);
    }

    fn transition(&self, event: PlaybackEvent) {
        let next = self.state.get().apply(event);
        self.state.set(next);
        self.button.set_text_content(Some(next.button_label()));
    }

    fn mark_blocked(&self) {
        set_styles(
            &self.button,
            &[
                ("border-color", "var(--ok)"),
                ("box-shadow", "0 0 0 3px rgba(217,119,6,.25)"),
            ],
        );
        self.button.set_title(BLOCKED_HINT);
    }

    /// Start playback. A rejected `automatic` attempt marks the control as
    /// blocked; rejected manual attempts are ignored.
    pub fn play(self: &Rc<Self>, automatic: bool) {
        let promise = match self.audio.play() {
            Ok(promise) => promise,
            Err(e) => {
                self.on_rejected(automatic, e);
                return;
            }
        };
        let player = self.clone();
        spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => player.transition(PlaybackEvent::Started),
                Err(e) => player.on_rejected(automatic, e),
            }
        });
    }

    fn on_rejected(&self, automatic: bool, error: JsValue) {
        if automatic {
            log::warn!("Autoplay blocked: {}", js_err(error));
            self.mark_blocked();
        } else {
            log::debug!("Play request rejected: {}", js_err(error));
        }
        self.transition(PlaybackEvent::Rejected { automatic });
    }

    pub fn pause(&self) {
        if let Err(e) = self.audio.pause() {
            log::debug!("Pause failed: {}", js_err(e));
        }
        self.transition(PlaybackEvent::Paused);
    }

    pub fn toggle(self: &Rc<Self>) {
        if self.audio.paused() {
            self.play(false);
        } else {
            self.pause();
        }
    }

    fn on_media_failed(self: &Rc<Self>) {
        let step = self.playlist.borrow_mut().on_load_failed();
        match step {
            Fallback::Retry => {
                log::warn!("Audio source failed, trying the next one");
                self.load_current();
                self.play(true);
            }
            Fallback::Exhausted => {
                log::error!("Every audio source failed to load");
                gloo::dialogs::alert(EXHAUSTED_NOTICE);
            }
            Fallback::Spent => log::debug!("Ignoring media error after exhaustion"),
        }
    }

    fn on_visibility_changed(&self, hidden: bool) {
        if hidden && !self.audio.paused() {
            self.pause();
        }
    }

    fn is_play_control(&self, event: &Event) -> bool {
        let on_button = event
            .target()
            .and_then(|t| t.dyn_into::<Node>().ok())
            .is_some_and(|node| self.button.contains(Some(&node)));
        let is_shortcut = event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|key| is_play_shortcut(&key.code(), target_tag(event.target()).as_deref()));
        on_button || is_shortcut
    }

    /// Wire controls, media events and bus subscriptions. The returned
    /// listeners must outlive the page.
    pub fn bind(self: &Rc<Self>, bus: &Rc<EventBus>) -> Vec<EventListener> {
        let mut listeners = Vec::new();

        {
            let bus = bus.clone();
            listeners.push(EventListener::new(&self.audio, "error", move |_| {
                bus.emit(&PageEvent::MediaLoadFailed)
            }));
        }
        {
            let player = self.clone();
            listeners.push(EventListener::new(&self.audio, "playing", move |_| {
                player.transition(PlaybackEvent::Started)
            }));
        }
        {
            let player = self.clone();
            listeners.push(EventListener::new(&self.audio, "pause", move |_| {
                player.transition(PlaybackEvent::Paused)
            }));
        }
        {
            let player = self.clone();
            listeners.push(EventListener::new(&self.button, "click", move |_| {
                player.toggle()
            }));
        }
        {
            let player = self.clone();
            let options = EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: false,
            };
            listeners.push(EventListener::new_with_options(
                &gloo::utils::document(),
                "keydown",
                options,
                move |event: &Event| {
                    let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    if is_play_shortcut(&key.code(), target_tag(event.target()).as_deref()) {
                        key.prevent_default();
                        player.toggle();
                    }
                },
            ));
        }

        {
            let player = self.clone();
            bus.subscribe(PageEventKind::MediaLoadFailed, move |_| {
                player.on_media_failed()
            });
        }
        {
            let player = self.clone();
            bus.subscribe(PageEventKind::VisibilityChanged, move |event| {
                if let PageEvent::VisibilityChanged { hidden } = event {
                    player.on_visibility_changed(*hidden);
                }
            });
        }

        self.arm_first_interaction();
        listeners
    }

    /// The first pointer, key or touch anywhere on the page retries playback.
    /// Whichever fires first consumes the shared token and releases all three.
    fn arm_first_interaction(self: &Rc<Self>) {
        let token: OneShot<Vec<EventListener>> = OneShot::new();
        let window = gloo::utils::window();
        let listeners = FIRST_INTERACTION_EVENTS
            .iter()
            .map(|name| {
                let token = token.clone();
                let player = self.clone();
                let options = EventListenerOptions {
                    phase: EventListenerPhase::Capture,
                    passive: true,
                };
                EventListener::new_with_options(&window, *name, options, move |event: &Event| {
                    let Some(listeners) = token.take() else {
                        return;
                    };
                    // The play button and the space shortcut toggle on their own.
                    if !player.is_play_control(event) {
                        player.play(false);
                    }
                    spawn_local(async move { drop(listeners) });
                })
            })
            .collect();
        token.arm(listeners);
    }
}

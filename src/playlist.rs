// src/playlist.rs
use crate::scene::DEFAULT_AUDIO;
use crate::utils::{cache_busted, encode_uri, track_title};

pub const LABEL_PLAY: &str = "▶ Reproducir";
pub const LABEL_PAUSE: &str = "⏸️ Pausar";

/// Ordered audio sources with a forward-only cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPlaylist {
    sources: Vec<String>,
    cursor: usize,
    exhausted: bool,
}

/// Outcome of reporting a load failure on the current source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// The cursor moved to the next source; load and play it.
    Retry,
    /// The last source failed; tell the user once.
    Exhausted,
    /// Failures after exhaustion are ignored.
    Spent,
}

impl AudioPlaylist {
    pub fn new(sources: Vec<String>) -> Self {
        let sources = if sources.is_empty() {
            vec![DEFAULT_AUDIO.to_string()]
        } else {
            sources
        };
        Self {
            sources,
            cursor: 0,
            exhausted: false,
        }
    }

    pub fn current(&self) -> &str {
        &self.sources[self.cursor]
    }

    pub fn current_index(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn on_load_failed(&mut self) -> Fallback {
        if self.exhausted {
            return Fallback::Spent;
        }
        if self.cursor + 1 < self.sources.len() {
            self.cursor += 1;
            Fallback::Retry
        } else {
            self.exhausted = true;
            Fallback::Exhausted
        }
    }

    pub fn source_url(&self, now_ms: u64) -> String {
        cache_busted(&encode_uri(self.current()), now_ms)
    }

    pub fn label(&self) -> String {
        format!("🎶 Audio: {}", track_title(self.current()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// A play attempt resolved, or the element reported `playing`.
    Started,
    /// A play attempt was rejected. Only automatic attempts mark the player blocked.
    Rejected { automatic: bool },
    Paused,
    SourceChanged,
}

impl PlaybackState {
    pub fn apply(self, event: PlaybackEvent) -> Self {
        match (self, event) {
            (_, PlaybackEvent::Started) => PlaybackState::Playing,
            (_, PlaybackEvent::Rejected { automatic: true }) => PlaybackState::Blocked,
            (state, PlaybackEvent::Rejected { automatic: false }) => state,
            (PlaybackState::Playing, PlaybackEvent::Paused) => PlaybackState::Paused,
            (state, PlaybackEvent::Paused) => state,
            (PlaybackState::Blocked, PlaybackEvent::SourceChanged) => PlaybackState::Blocked,
            (_, PlaybackEvent::SourceChanged) => PlaybackState::Stopped,
        }
    }

    pub fn is_playing(self) -> bool {
        self == PlaybackState::Playing
    }

    pub fn button_label(self) -> &'static str {
        if self.is_playing() {
            LABEL_PAUSE
        } else {
            LABEL_PLAY
        }
    }
}

/// Space toggles playback unless the user is typing in a form control.
pub fn is_play_shortcut(code: &str, target_tag: Option<&str>) -> bool {
    code == "Space" && !target_tag.is_some_and(is_text_entry)
}

fn is_text_entry(tag: &str) -> bool {
    ["input", "textarea", "select"]
        .iter()
        .any(|t| t.eq_ignore_ascii_case(tag))
}

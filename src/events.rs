// src/events.rs
use crate::filter::ChipKind;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    ChipToggled {
        kind: ChipKind,
        value: String,
        active: bool,
    },
    QueryChanged(String),
    MediaLoadFailed,
    VisibilityChanged {
        hidden: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageEventKind {
    ChipToggled,
    QueryChanged,
    MediaLoadFailed,
    VisibilityChanged,
}

impl PageEvent {
    pub fn kind(&self) -> PageEventKind {
        match self {
            PageEvent::ChipToggled { .. } => PageEventKind::ChipToggled,
            PageEvent::QueryChanged(_) => PageEventKind::QueryChanged,
            PageEvent::MediaLoadFailed => PageEventKind::MediaLoadFailed,
            PageEvent::VisibilityChanged { .. } => PageEventKind::VisibilityChanged,
        }
    }
}

type Handler = Rc<dyn Fn(&PageEvent)>;

/// Typed subscriptions for the page-level events controllers react to.
///
/// Handlers run in subscription order. No borrow is held while they run, so a
/// handler may emit or subscribe in turn.
#[derive(Default)]
pub struct EventBus {
    handlers: RefCell<Vec<(PageEventKind, Handler)>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, kind: PageEventKind, handler: F)
    where
        F: Fn(&PageEvent) + 'static,
    {
        self.handlers.borrow_mut().push((kind, Rc::new(handler)));
    }

    pub fn emit(&self, event: &PageEvent) {
        let kind = event.kind();
        let matching: Vec<Handler> = self
            .handlers
            .borrow()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, h)| h.clone())
            .collect();
        if matching.is_empty() {
            log::debug!("No subscriber for {:?}", kind);
        }
        for handler in matching {
            handler(event);
        }
    }
}

// src/storage.rs
use crate::dom::js_err;
use crate::filter::FilterState;

/// Origin-scoped key/value persistence for filter state.
pub trait StateStore {
    /// Saved state for `key`. Missing or unreadable records yield the empty state.
    fn load(&self, key: &str) -> FilterState;

    fn save(&self, key: &str, state: &FilterState) -> Result<(), String>;
}

/// `localStorage` of the page's origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

impl BrowserStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|window| window.local_storage().ok().flatten())
    }
}

impl StateStore for BrowserStore {
    fn load(&self, key: &str) -> FilterState {
        let raw = Self::storage().and_then(|storage| storage.get_item(key).ok().flatten());
        FilterState::restore(raw.as_deref())
    }

    fn save(&self, key: &str, state: &FilterState) -> Result<(), String> {
        let storage = Self::storage().ok_or_else(|| "localStorage unavailable".to_string())?;
        let raw = serde_json::to_string(state).map_err(|e| e.to_string())?;
        storage
            .set_item(key, &raw)
            .map_err(|e| format!("Failed to persist filters: {}", js_err(e)))
    }
}

#[cfg(test)]
pub use memory::MemoryStore;

#[cfg(test)]
mod memory {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    pub struct MemoryStore {
        entries: RefCell<HashMap<String, String>>,
    }

    impl MemoryStore {
        pub fn insert_raw(&self, key: &str, raw: &str) {
            self.entries
                .borrow_mut()
                .insert(key.to_string(), raw.to_string());
        }

        pub fn load_raw(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }
    }

    impl StateStore for MemoryStore {
        fn load(&self, key: &str) -> FilterState {
            FilterState::restore(self.load_raw(key).as_deref())
        }

        fn save(&self, key: &str, state: &FilterState) -> Result<(), String> {
            let raw = serde_json::to_string(state).map_err(|e| e.to_string())?;
            self.insert_raw(key, &raw);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_round_trip() {
        let store = MemoryStore::default();
        let mut state = FilterState::default();
        state.areas.insert("musica".to_string());
        state.query = "coro".to_string();
        store.save("filters_scene1_v1", &state).unwrap();
        assert_eq!(store.load("filters_scene1_v1"), state);
        assert_eq!(store.load("filters_scene2_v1"), FilterState::default());
    }

    #[test]
    fn test_corrupt_record_is_empty_state() {
        let store = MemoryStore::default();
        store.insert_raw("k", "][");
        assert_eq!(store.load("k"), FilterState::default());
    }

    #[test]
    fn test_saved_json_shape() {
        let store = MemoryStore::default();
        let mut state = FilterState::default();
        state.logs.insert("luz".to_string());
        store.save("k", &state).unwrap();
        assert_eq!(
            store.load_raw("k").unwrap(),
            r#"{"areas":[],"centros":[],"logs":["luz"],"query":""}"#
        );
    }
}

// src/filter.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Tag assumed for cards that declare none.
pub const DEFAULT_CARD_TAG: &str = "general";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChipKind {
    Area,
    Centro,
    Log,
}

impl ChipKind {
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "area" => Some(ChipKind::Area),
            "centro" => Some(ChipKind::Centro),
            "log" => Some(ChipKind::Log),
            _ => None,
        }
    }

    /// Attribute carrying the chip's value, e.g. `data-area`.
    pub fn value_attr(self) -> &'static str {
        match self {
            ChipKind::Area => "data-area",
            ChipKind::Centro => "data-centro",
            ChipKind::Log => "data-log",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub kind: ChipKind,
    pub value: String,
    pub active: bool,
}

/// Current selections across the three tag dimensions plus the free-text query.
///
/// Serialized as `{"areas":[..],"centros":[..],"logs":[..],"query":".."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub areas: BTreeSet<String>,
    pub centros: BTreeSet<String>,
    pub logs: BTreeSet<String>,
    pub query: String,
}

/// Filterable attributes of one content card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardAttributes {
    pub tags: BTreeSet<String>,
    pub centros: BTreeSet<String>,
    pub logs: BTreeSet<String>,
    pub text: String,
}

impl FilterState {
    /// Snapshot the chips' active flags and the query control.
    pub fn from_controls<'a>(chips: impl IntoIterator<Item = &'a FilterChip>, query: &str) -> Self {
        let mut state = FilterState {
            query: query.trim().to_string(),
            ..FilterState::default()
        };
        for chip in chips.into_iter().filter(|chip| chip.active) {
            state.selection_mut(chip.kind).insert(chip.value.clone());
        }
        state
    }

    /// Parse persisted state. Missing or malformed data yields the empty state.
    pub fn restore(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return FilterState::default();
        };
        match serde_json::from_str::<FilterState>(raw) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Ignoring unreadable filter state: {}", e);
                FilterState::default()
            }
        }
    }

    pub fn selection(&self, kind: ChipKind) -> &BTreeSet<String> {
        match kind {
            ChipKind::Area => &self.areas,
            ChipKind::Centro => &self.centros,
            ChipKind::Log => &self.logs,
        }
    }

    fn selection_mut(&mut self, kind: ChipKind) -> &mut BTreeSet<String> {
        match kind {
            ChipKind::Area => &mut self.areas,
            ChipKind::Centro => &mut self.centros,
            ChipKind::Log => &mut self.logs,
        }
    }

    pub fn is_selected(&self, kind: ChipKind, value: &str) -> bool {
        self.selection(kind).contains(value)
    }

    /// All four dimensions must pass. An empty selection never constrains.
    pub fn matches(&self, card: &CardAttributes) -> bool {
        dimension_passes(&self.areas, &card.tags)
            && dimension_passes(&self.centros, &card.centros)
            && dimension_passes(&self.logs, &card.logs)
            && text_passes(&self.query, &card.text)
    }
}

pub fn dimension_passes(selected: &BTreeSet<String>, declared: &BTreeSet<String>) -> bool {
    selected.is_empty() || !selected.is_disjoint(declared)
}

fn text_passes(query: &str, text: &str) -> bool {
    query.is_empty() || text.to_lowercase().contains(&query.to_lowercase())
}

fn split_tokens(raw: Option<&str>) -> BTreeSet<String> {
    raw.unwrap_or_default()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

impl CardAttributes {
    pub fn from_attrs(
        tags: Option<&str>,
        centros: Option<&str>,
        logs: Option<&str>,
        text: impl Into<String>,
    ) -> Self {
        let mut tags = split_tokens(tags);
        if tags.is_empty() {
            tags.insert(DEFAULT_CARD_TAG.to_string());
        }
        Self {
            tags,
            centros: split_tokens(centros),
            logs: split_tokens(logs),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn chip(kind: ChipKind, value: &str, active: bool) -> FilterChip {
        FilterChip {
            kind,
            value: value.to_string(),
            active,
        }
    }

    fn card(tags: &str, centros: &str, logs: &str, text: &str) -> CardAttributes {
        CardAttributes::from_attrs(Some(tags), Some(centros), Some(logs), text)
    }

    #[test]
    fn test_empty_selection_never_constrains() {
        let state = FilterState::default();
        for c in [
            card("musica", "norte", "ensayo", "Texto"),
            card("", "", "", ""),
            card("teatro luces", "sur", "", "otra cosa"),
        ] {
            assert!(state.matches(&c));
        }
    }

    #[test]
    fn test_dimension_intersection() {
        assert!(dimension_passes(&set(&["a", "b"]), &set(&["b", "c"])));
        assert!(!dimension_passes(&set(&["a"]), &set(&["b", "c"])));
        assert!(!dimension_passes(&set(&["a"]), &set(&[])));
        assert!(dimension_passes(&set(&[]), &set(&[])));
    }

    #[test]
    fn test_all_dimensions_must_pass() {
        let state = FilterState {
            areas: set(&["musica"]),
            centros: set(&["norte"]),
            ..FilterState::default()
        };
        assert!(state.matches(&card("musica teatro", "norte", "", "")));
        assert!(!state.matches(&card("musica", "sur", "", "")));
        assert!(!state.matches(&card("teatro", "norte", "", "")));
    }

    #[test]
    fn test_missing_tags_default_to_general() {
        let c = CardAttributes::from_attrs(None, None, None, "");
        assert_eq!(c.tags, set(&[DEFAULT_CARD_TAG]));
        let state = FilterState {
            areas: set(&["general"]),
            ..FilterState::default()
        };
        assert!(state.matches(&c));
        let blank = CardAttributes::from_attrs(Some("  "), None, None, "");
        assert_eq!(blank.tags, set(&[DEFAULT_CARD_TAG]));
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let state = FilterState {
            query: "ENSAYO".to_string(),
            ..FilterState::default()
        };
        assert!(state.matches(&card("teatro", "", "", "Primer ensayo general")));
        assert!(!state.matches(&card("teatro", "", "", "Estreno")));
    }

    #[test]
    fn test_from_controls() {
        let chips = vec![
            chip(ChipKind::Area, "musica", true),
            chip(ChipKind::Area, "teatro", false),
            chip(ChipKind::Centro, "norte", true),
            chip(ChipKind::Log, "vestuario", true),
        ];
        let state = FilterState::from_controls(&chips, "  ensayo ");
        assert_eq!(state.areas, set(&["musica"]));
        assert_eq!(state.centros, set(&["norte"]));
        assert_eq!(state.logs, set(&["vestuario"]));
        assert_eq!(state.query, "ensayo");
        assert!(state.is_selected(ChipKind::Area, "musica"));
        assert!(!state.is_selected(ChipKind::Area, "teatro"));
    }

    #[test]
    fn test_restore_json_shape() {
        let state = FilterState::restore(Some(
            r#"{"areas":["musica"],"centros":[],"logs":["luz"],"query":"hola"}"#,
        ));
        assert_eq!(state.areas, set(&["musica"]));
        assert_eq!(state.logs, set(&["luz"]));
        assert_eq!(state.query, "hola");
    }

    #[test]
    fn test_restore_partial_and_malformed() {
        let partial = FilterState::restore(Some(r#"{"areas":["danza"]}"#));
        assert_eq!(partial.areas, set(&["danza"]));
        assert!(partial.query.is_empty());

        assert_eq!(FilterState::restore(Some("{not json")), FilterState::default());
        assert_eq!(FilterState::restore(Some("null")), FilterState::default());
        assert_eq!(FilterState::restore(None), FilterState::default());
    }

    #[test]
    fn test_chip_kind_attrs() {
        assert_eq!(ChipKind::from_attr("centro"), Some(ChipKind::Centro));
        assert_eq!(ChipKind::from_attr("otro"), None);
        assert_eq!(ChipKind::Log.value_attr(), "data-log");
    }
}

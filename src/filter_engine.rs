// src/filter_engine.rs
use crate::filter::{CardAttributes, FilterChip, FilterState};
use crate::resources::{derive_listing, ResourceListing};
use crate::scene::Scene;
use crate::storage::StateStore;
use std::rc::Rc;

/// Everything one apply cycle derives from a single state snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub state: FilterState,
    pub visible: Vec<bool>,
    pub listing: ResourceListing,
}

pub struct FilterEngine<S: StateStore> {
    scene: Rc<Scene>,
    store: S,
}

impl<S: StateStore> FilterEngine<S> {
    pub fn new(scene: Rc<Scene>, store: S) -> Self {
        Self { scene, store }
    }

    /// Saved selections for this scene, used to pre-activate chips at load.
    pub fn restore(&self) -> FilterState {
        self.store.load(&self.scene.context.storage_key)
    }

    /// Snapshot the controls, decide every card's visibility, persist, and
    /// derive the resource listing, all from the same state.
    pub fn apply(&self, chips: &[FilterChip], query: &str, cards: &[CardAttributes]) -> ApplyOutcome {
        let state = FilterState::from_controls(chips, query);
        let visible = cards.iter().map(|card| state.matches(card)).collect();
        if let Err(e) = self.store.save(&self.scene.context.storage_key, &state) {
            log::warn!("{}", e);
        }
        let listing = derive_listing(&self.scene.catalog, &state);
        ApplyOutcome {
            state,
            visible,
            listing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ChipKind;
    use crate::resources::ResourceListing;
    use crate::scene::SceneConfig;
    use crate::storage::MemoryStore;

    fn scene(id: &str) -> Rc<Scene> {
        Rc::new(Scene::new(SceneConfig {
            scene_id: Some(id.to_string()),
            scores_url: Some("https://drive.example/partituras".to_string()),
            ..SceneConfig::default()
        }))
    }

    fn chips(active: &[(ChipKind, &str)]) -> Vec<FilterChip> {
        let all = [
            (ChipKind::Area, "musica"),
            (ChipKind::Area, "teatro"),
            (ChipKind::Area, "plastica"),
            (ChipKind::Centro, "norte"),
            (ChipKind::Log, "vestuario"),
        ];
        all.iter()
            .map(|(kind, value)| FilterChip {
                kind: *kind,
                value: value.to_string(),
                active: active.contains(&(*kind, *value)),
            })
            .collect()
    }

    fn cards() -> Vec<CardAttributes> {
        vec![
            CardAttributes::from_attrs(Some("musica"), Some("norte"), None, "Coro y ensayo"),
            CardAttributes::from_attrs(Some("teatro"), None, Some("vestuario"), "Entrada de actores"),
            CardAttributes::from_attrs(None, None, None, "Notas generales del ENSAYO"),
            CardAttributes::from_attrs(Some("musica plastica"), Some("sur"), None, "Telón"),
        ]
    }

    fn labels(listing: &ResourceListing) -> Vec<String> {
        match listing {
            ResourceListing::Rows(rows) => rows.iter().map(|r| r.label.clone()).collect(),
            ResourceListing::Empty => Vec::new(),
        }
    }

    #[test]
    fn test_music_chip_scenario() {
        let engine = FilterEngine::new(scene("scene1"), MemoryStore::default());
        let outcome = engine.apply(&chips(&[(ChipKind::Area, "musica")]), "", &cards());
        assert_eq!(outcome.visible, vec![true, false, false, true]);

        let labels = labels(&outcome.listing);
        assert!(labels.iter().any(|l| l.contains("Carpeta de Partituras")));
        assert!(!labels.iter().any(|l| l.contains("Fondo proyectado")));
    }

    #[test]
    fn test_query_scenario_leaves_resources_alone() {
        let engine = FilterEngine::new(scene("scene1"), MemoryStore::default());
        let outcome = engine.apply(&chips(&[]), "ensayo", &cards());
        assert_eq!(outcome.visible, vec![true, false, true, false]);

        let unfiltered = engine.apply(&chips(&[]), "", &cards());
        assert_eq!(outcome.listing, unfiltered.listing);
    }

    #[test]
    fn test_apply_is_deterministic() {
        let engine = FilterEngine::new(scene("scene1"), MemoryStore::default());
        let active = chips(&[(ChipKind::Area, "teatro"), (ChipKind::Log, "vestuario")]);
        let first = engine.apply(&active, "actores", &cards());
        let second = engine.apply(&active, "actores", &cards());
        assert_eq!(first, second);
        assert_eq!(first.visible, vec![false, true, false, false]);
    }

    #[test]
    fn test_persisted_state_restores_same_chips() {
        let store = MemoryStore::default();
        let engine = FilterEngine::new(scene("scene4"), store);
        let active = chips(&[(ChipKind::Area, "plastica"), (ChipKind::Centro, "norte")]);
        let applied = engine.apply(&active, " telón ", &cards());

        let restored = engine.restore();
        assert_eq!(restored, applied.state);

        let reloaded: Vec<FilterChip> = chips(&[])
            .into_iter()
            .map(|chip| FilterChip {
                active: restored.is_selected(chip.kind, &chip.value),
                ..chip
            })
            .collect();
        assert_eq!(reloaded, active);
        assert_eq!(
            FilterState::from_controls(&reloaded, &restored.query),
            applied.state
        );
    }

    #[test]
    fn test_state_is_keyed_per_scene() {
        let store = MemoryStore::default();
        store.insert_raw("filters_scene1_v1", r#"{"areas":["musica"]}"#);
        store.insert_raw("filters_scene2_v1", "garbage");
        let first = FilterEngine::new(scene("scene1"), store);
        assert!(first.restore().is_selected(ChipKind::Area, "musica"));
    }

    #[test]
    fn test_corrupt_saved_state_restores_empty() {
        let store = MemoryStore::default();
        store.insert_raw("filters_scene2_v1", "garbage");
        let engine = FilterEngine::new(scene("scene2"), store);
        assert_eq!(engine.restore(), FilterState::default());
    }

    #[test]
    fn test_no_matching_resource_renders_placeholder() {
        let engine = FilterEngine::new(scene("scene1"), MemoryStore::default());
        let danza = vec![FilterChip {
            kind: ChipKind::Area,
            value: "danza".to_string(),
            active: true,
        }];
        let outcome = engine.apply(&danza, "", &cards());
        assert_eq!(outcome.listing, ResourceListing::Empty);
        assert_eq!(outcome.visible, vec![false; 4]);
    }
}

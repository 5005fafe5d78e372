// src/scene.rs
use crate::resources::{scene_catalog, ResourceDescriptor};
use crate::utils::non_blank;
use web_sys::HtmlElement;

pub const DEFAULT_SCENE_ID: &str = "scene";
pub const STORAGE_SCHEMA: &str = "v1";

pub const DEFAULT_AUDIO: &str = "Pista.mp3";
pub const DEFAULT_SCRIPT: &str = "Guión Escena.pdf";
pub const DEFAULT_BACKGROUND: &str = "Fondo.jpg";
pub const DEFAULT_HERO: &str = "Escena.jpg";

/// Scene configuration as declared on the page's `<body>`.
///
/// Every field is optional; blank attributes are treated as unset and the
/// accessors substitute the documented defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneConfig {
    pub scene_id: Option<String>,
    pub audio: Option<String>,
    pub script: Option<String>,
    pub scores_url: Option<String>,
    pub background: Option<String>,
    pub hero: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneContext {
    pub scene_id: String,
    pub storage_key: String,
}

/// Immutable per-page configuration handed to every controller.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub context: SceneContext,
    pub config: SceneConfig,
    pub catalog: Vec<ResourceDescriptor>,
}

impl SceneConfig {
    pub fn from_body(body: &HtmlElement) -> Self {
        let attr = |name: &str| non_blank(body.get_attribute(name).as_deref());
        Self {
            scene_id: non_blank(Some(body.id().as_str())),
            audio: attr("data-audio"),
            script: attr("data-guion"),
            scores_url: attr("data-scores-url"),
            background: attr("data-fondo"),
            hero: attr("data-hero"),
        }
    }

    /// Comma-separated playlist, empty entries dropped.
    pub fn audio_sources(&self) -> Vec<String> {
        self.audio
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn script_file(&self) -> &str {
        self.script.as_deref().unwrap_or(DEFAULT_SCRIPT)
    }

    pub fn scores_url(&self) -> Option<&str> {
        self.scores_url.as_deref()
    }

    pub fn background_file(&self) -> &str {
        self.background.as_deref().unwrap_or(DEFAULT_BACKGROUND)
    }

    pub fn hero_file(&self) -> &str {
        self.hero.as_deref().unwrap_or(DEFAULT_HERO)
    }
}

impl SceneContext {
    pub fn new(scene_id: Option<&str>) -> Self {
        let scene_id = scene_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(DEFAULT_SCENE_ID)
            .to_string();
        let storage_key = format!("filters_{}_{}", scene_id, STORAGE_SCHEMA);
        Self {
            scene_id,
            storage_key,
        }
    }
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        let context = SceneContext::new(config.scene_id.as_deref());
        let catalog = scene_catalog(&config);
        Self {
            context,
            config,
            catalog,
        }
    }

    pub fn from_document() -> Option<Self> {
        let body = gloo::utils::document().body()?;
        Some(Self::new(SceneConfig::from_body(&body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key() {
        let ctx = SceneContext::new(Some("scene3"));
        assert_eq!(ctx.scene_id, "scene3");
        assert_eq!(ctx.storage_key, "filters_scene3_v1");
    }

    #[test]
    fn test_default_scene_id() {
        assert_eq!(SceneContext::new(None).storage_key, "filters_scene_v1");
        assert_eq!(SceneContext::new(Some("  ")).scene_id, DEFAULT_SCENE_ID);
    }

    #[test]
    fn test_audio_sources() {
        let config = SceneConfig {
            audio: Some(" a.mp3, ,b.mp3 ,".to_string()),
            ..SceneConfig::default()
        };
        assert_eq!(config.audio_sources(), vec!["a.mp3", "b.mp3"]);
        assert!(SceneConfig::default().audio_sources().is_empty());
    }

    #[test]
    fn test_defaults() {
        let config = SceneConfig::default();
        assert_eq!(config.script_file(), DEFAULT_SCRIPT);
        assert_eq!(config.background_file(), DEFAULT_BACKGROUND);
        assert_eq!(config.hero_file(), DEFAULT_HERO);
        assert_eq!(config.scores_url(), None);
    }

    #[test]
    fn test_scene_builds_catalog() {
        let scene = Scene::new(SceneConfig {
            scene_id: Some("scene2".to_string()),
            ..SceneConfig::default()
        });
        assert_eq!(scene.context.storage_key, "filters_scene2_v1");
        assert_eq!(scene.catalog.len(), 4);
    }
}

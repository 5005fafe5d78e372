// src/resources.rs
use crate::filter::{dimension_passes, FilterState};
use crate::scene::SceneConfig;
use crate::utils::encode_uri;
use std::collections::BTreeSet;

/// Target used for catalog entries with nothing to point at yet.
pub const PLACEHOLDER_HREF: &str = "#";
pub const EMPTY_LISTING_TEXT: &str = "No hay recursos para este filtro.";

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Pdf,
    Audio,
    Sheet,
    Doc,
    Link,
}

impl ResourceKind {
    pub fn icon(self) -> &'static str {
        match self {
            ResourceKind::Pdf => "📄",
            ResourceKind::Audio => "🎵",
            ResourceKind::Sheet => "📊",
            ResourceKind::Doc => "📝",
            ResourceKind::Link => "🔗",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub title: String,
    pub href: String,
    pub areas: Vec<String>,
    pub kind: ResourceKind,
}

/// One rendered line of the resource list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRow {
    pub href: String,
    pub label: String,
    pub areas: String,
    pub opens_new_context: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceListing {
    Rows(Vec<ResourceRow>),
    Empty,
}

impl ResourceDescriptor {
    fn new(title: &str, href: String, areas: &[&str], kind: ResourceKind) -> Self {
        Self {
            title: title.to_string(),
            href,
            areas: areas.iter().map(|a| a.to_string()).collect(),
            kind,
        }
    }

    pub fn has_real_target(&self) -> bool {
        !self.href.is_empty() && self.href != PLACEHOLDER_HREF
    }

    fn to_row(&self) -> ResourceRow {
        ResourceRow {
            href: self.href.clone(),
            label: format!("{} {}", self.kind.icon(), self.title),
            areas: self.areas.join(", "),
            opens_new_context: self.has_real_target(),
        }
    }
}

pub fn scene_catalog(config: &SceneConfig) -> Vec<ResourceDescriptor> {
    vec![
        ResourceDescriptor::new(
            "Guion de la escena (PDF)",
            encode_uri(config.script_file()),
            &["teatro", "produccion"],
            ResourceKind::Pdf,
        ),
        ResourceDescriptor::new(
            "Carpeta de Partituras",
            config.scores_url().unwrap_or(PLACEHOLDER_HREF).to_string(),
            &["musica"],
            ResourceKind::Link,
        ),
        ResourceDescriptor::new(
            "Fondo proyectado (JPG)",
            encode_uri(config.background_file()),
            &["plastica", "luces"],
            ResourceKind::Link,
        ),
        ResourceDescriptor::new(
            "Imagen guía de escena",
            encode_uri(config.hero_file()),
            &["produccion"],
            ResourceKind::Link,
        ),
    ]
}

/// Only the area selection narrows the catalog; centers, log tags and the
/// query have no counterpart on resources.
pub fn derive_listing(catalog: &[ResourceDescriptor], state: &FilterState) -> ResourceListing {
    let rows: Vec<ResourceRow> = catalog
        .iter()
        .filter(|resource| {
            let areas: BTreeSet<String> = resource.areas.iter().cloned().collect();
            dimension_passes(&state.areas, &areas)
        })
        .map(ResourceDescriptor::to_row)
        .collect();

    if rows.is_empty() {
        ResourceListing::Empty
    } else {
        ResourceListing::Rows(rows)
    }
}

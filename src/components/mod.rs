// src/components/mod.rs
pub mod accessibility;
pub mod audio_player;
pub mod collapsible;
pub mod document_panel;
pub mod filter_panel;
pub mod image_preview;
pub mod resource_list;

use std::collections::BTreeMap;

use selection::BaseLayer;

/// Read-only projection handed to the sidebar collaborator for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarView {
    pub city_names: Vec<String>,
    pub prefecture_names: Vec<String>,
    pub selected_cities: Vec<String>,
    pub selected_prefectures: Vec<String>,
    pub colors: BTreeMap<String, String>,
    pub active_layer: BaseLayer,
}

/// The sidebar's callbacks into the core, expressed as events.
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarEvent {
    ToggleCity(String),
    TogglePrefecture(String),
    SetColor { name: String, color: String },
    /// Carries the raw identifier; an unrecognized one fails with a
    /// configuration error when applied.
    SetLayer(String),
}

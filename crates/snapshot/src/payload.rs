use std::collections::BTreeMap;

use selection::{BaseLayer, NameSet, SelectionState};
use serde::{Deserialize, Serialize};

use crate::store::SnapshotError;

/// Wire payload of one snapshot. Field names match the persistence
/// service schema (`cityColors`, `selectedLayer`) byte for byte.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotPayload {
    pub cities: Vec<String>,
    pub prefectures: Vec<String>,
    pub city_colors: BTreeMap<String, String>,
    pub selected_layer: String,
}

/// A persisted snapshot: the payload plus its opaque key and creation
/// time. Immutable once created; there is no update or delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    pub key: String,
    #[serde(flatten)]
    pub payload: SnapshotPayload,
    #[serde(default)]
    pub created_at_ms: u64,
}

impl SnapshotPayload {
    pub fn from_state(state: &SelectionState) -> Self {
        Self {
            cities: state.cities.to_vec(),
            prefectures: state.prefectures.to_vec(),
            city_colors: state.colors.clone(),
            selected_layer: state.layer.id().to_string(),
        }
    }

    /// Reconstructs selection state. A payload carrying an unparseable
    /// layer id is corrupt, not a silent default.
    pub fn into_state(self) -> Result<SelectionState, SnapshotError> {
        let layer = BaseLayer::parse(&self.selected_layer)
            .map_err(|e| SnapshotError::Corrupt(e.to_string()))?;
        Ok(SelectionState {
            cities: self.cities.into_iter().collect::<NameSet>(),
            prefectures: self.prefectures.into_iter().collect::<NameSet>(),
            colors: self.city_colors,
            layer,
        })
    }
}

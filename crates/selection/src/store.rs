use std::collections::BTreeMap;

use regions::RegionKind;

use crate::layer::{BaseLayer, LayerError};
use crate::name_set::NameSet;

/// The full selection state: chosen names per kind, assigned colors, the
/// active base layer.
///
/// `colors` is one keyspace shared by both kinds: a city and a prefecture
/// with the same literal name read and write the same entry. Color
/// assignment is independent of membership; deselecting a name does not
/// clear its color.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub cities: NameSet,
    pub prefectures: NameSet,
    pub colors: BTreeMap<String, String>,
    pub layer: BaseLayer,
}

/// Sole owner of the mutable selection state for a session.
///
/// Every mutation is synchronous and total: a toggle adds or removes
/// exactly one name. A single logical actor drives the store, so there is
/// no locking.
#[derive(Debug, Default)]
pub struct SelectionStore {
    state: SelectionState,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `name` in the set of the given kind. Returns
    /// the resulting membership.
    pub fn toggle(&mut self, name: &str, kind: RegionKind) -> bool {
        match kind {
            RegionKind::City => self.state.cities.toggle(name),
            RegionKind::Prefecture => self.state.prefectures.toggle(name),
        }
    }

    /// Upserts the color for `name`. No selection-membership precondition.
    pub fn set_color(&mut self, name: &str, color: &str) {
        self.state
            .colors
            .insert(name.to_string(), color.to_string());
    }

    pub fn set_layer(&mut self, layer: BaseLayer) {
        self.state.layer = layer;
    }

    /// Parses and applies a layer identifier; an unrecognized id is a
    /// configuration error and leaves the active layer unchanged.
    pub fn set_layer_id(&mut self, id: &str) -> Result<(), LayerError> {
        self.state.layer = BaseLayer::parse(id)?;
        Ok(())
    }

    /// Immutable copy of the current state for rendering/serialization.
    pub fn snapshot(&self) -> SelectionState {
        self.state.clone()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Wholesale replacement, used when restoring a persisted snapshot.
    pub fn replace(&mut self, state: SelectionState) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::SelectionStore;
    use crate::layer::BaseLayer;
    use pretty_assertions::assert_eq;
    use regions::RegionKind;

    #[test]
    fn double_toggle_restores_membership_for_both_kinds() {
        let mut store = SelectionStore::new();
        for kind in [RegionKind::City, RegionKind::Prefecture] {
            assert!(store.toggle("甲府市", kind));
            assert!(!store.toggle("甲府市", kind));
        }
        assert!(store.state().cities.is_empty());
        assert!(store.state().prefectures.is_empty());
    }

    #[test]
    fn kinds_toggle_independently() {
        let mut store = SelectionStore::new();
        store.toggle("山梨県", RegionKind::Prefecture);
        assert!(!store.state().cities.contains("山梨県"));
        assert!(store.state().prefectures.contains("山梨県"));
    }

    #[test]
    fn color_assignment_needs_no_membership_and_survives_deselection() {
        let mut store = SelectionStore::new();
        store.set_color("甲府市", "#FF0000");
        assert_eq!(
            store.state().colors.get("甲府市").map(String::as_str),
            Some("#FF0000")
        );

        store.toggle("甲府市", RegionKind::City);
        store.toggle("甲府市", RegionKind::City);
        // Deselection does not clear the color.
        assert_eq!(
            store.state().colors.get("甲府市").map(String::as_str),
            Some("#FF0000")
        );

        store.set_color("甲府市", "#00FF00");
        assert_eq!(
            store.state().colors.get("甲府市").map(String::as_str),
            Some("#00FF00")
        );
    }

    #[test]
    fn layer_id_parsing_rejects_unknown_ids_and_keeps_state() {
        let mut store = SelectionStore::new();
        store.set_layer_id("pale").expect("known id");
        assert_eq!(store.state().layer, BaseLayer::Pale);

        store.set_layer_id("sepia").unwrap_err();
        assert_eq!(store.state().layer, BaseLayer::Pale);
    }

    #[test]
    fn snapshot_is_a_detached_copy() {
        let mut store = SelectionStore::new();
        store.toggle("甲府市", RegionKind::City);
        let snap = store.snapshot();

        store.toggle("松本市", RegionKind::City);
        store.set_layer(BaseLayer::Photo);

        assert_eq!(snap.cities.to_vec(), vec!["甲府市".to_string()]);
        assert_eq!(snap.layer, BaseLayer::Standard);
    }

    #[test]
    fn replace_swaps_the_whole_state() {
        let mut store = SelectionStore::new();
        store.toggle("甲府市", RegionKind::City);

        let mut other = SelectionStore::new();
        other.toggle("松本市", RegionKind::City);
        other.set_layer(BaseLayer::Pale);

        store.replace(other.snapshot());
        assert!(!store.state().cities.contains("甲府市"));
        assert!(store.state().cities.contains("松本市"));
        assert_eq!(store.state().layer, BaseLayer::Pale);
    }
}

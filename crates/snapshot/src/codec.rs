use selection::SelectionState;

use crate::payload::SnapshotPayload;
use crate::store::{SnapshotError, SnapshotStore};

/// Serializes selection state behind an opaque key, against an injected
/// backing store.
///
/// The store is a constructor-injected capability owned by the composition
/// root, never an ambient singleton, so the codec behaves identically over
/// the in-memory, directory and HTTP realizations.
pub struct SnapshotCodec {
    store: Box<dyn SnapshotStore>,
}

impl SnapshotCodec {
    pub fn new(store: Box<dyn SnapshotStore>) -> Self {
        Self { store }
    }

    /// Persists a copy of `state` and returns the share key.
    pub fn save(&mut self, state: &SelectionState) -> Result<String, SnapshotError> {
        self.store.store(SnapshotPayload::from_state(state))
    }

    /// Fetches and decodes the state behind `key`. An unknown key is
    /// `Ok(None)`: the caller keeps its current (default) state.
    pub fn load(&self, key: &str) -> Result<Option<SelectionState>, SnapshotError> {
        let Some(record) = self.store.fetch(key)? else {
            return Ok(None);
        };
        record.payload.into_state().map(Some)
    }
}

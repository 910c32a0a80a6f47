use foundation::geo::GeoPoint;
use regions::geojson::BoundaryCollection;
use regions::{RegionCatalog, RegionKind, ResolveOptions, resolve_click};
use selection::{LayerError, RegionStyle, SelectionState, SelectionStore, project};
use snapshot::{SnapshotCodec, SnapshotError};
use tracing::{debug, error, info};

use crate::sidebar::{SidebarEvent, SidebarView};
use crate::viewport::ViewportConfig;

/// Builds the region catalog from the two boundary resources.
///
/// A fetch or parse failure leaves the catalog empty: the map then shows
/// only the base layer and nothing is selectable. Logged, not fatal, not
/// retried.
pub fn load_catalog(city_geojson: &str, prefecture_geojson: &str) -> RegionCatalog {
    let cities = match BoundaryCollection::from_geojson_str(city_geojson) {
        Ok(collection) => collection,
        Err(e) => {
            error!("city boundary load failed: {e}");
            return RegionCatalog::empty();
        }
    };
    let prefectures = match BoundaryCollection::from_geojson_str(prefecture_geojson) {
        Ok(collection) => collection,
        Err(e) => {
            error!("prefecture boundary load failed: {e}");
            return RegionCatalog::empty();
        }
    };
    if cities.skipped + prefectures.skipped > 0 {
        debug!(
            cities = cities.skipped,
            prefectures = prefectures.skipped,
            "boundary features without usable name/geometry were dropped"
        );
    }
    RegionCatalog::from_boundaries(cities, prefectures)
}

/// Composition root for one map session.
///
/// Owns the read-only catalog, the sole mutable `SelectionStore`, and an
/// injected snapshot codec. All mutation enters through `handle_click`,
/// `apply` and `restore`, each synchronous, so state never changes
/// mid-operation.
pub struct MapSession {
    catalog: RegionCatalog,
    selection: SelectionStore,
    codec: SnapshotCodec,
    resolve_opts: ResolveOptions,
}

impl MapSession {
    pub fn new(catalog: RegionCatalog, codec: SnapshotCodec) -> Self {
        Self {
            catalog,
            selection: SelectionStore::new(),
            codec,
            resolve_opts: ResolveOptions::default(),
        }
    }

    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &SelectionState {
        self.selection.state()
    }

    /// Resolves a map click to the nearest city region and toggles it.
    /// Returns the toggled name; a click resolving to nothing is a silent
    /// no-op.
    pub fn handle_click(&mut self, click: GeoPoint) -> Option<String> {
        let hit = resolve_click(&self.catalog, click, self.resolve_opts)?;
        let name = hit.name.to_string();
        let selected = self.selection.toggle(&name, RegionKind::City);
        debug!(%name, selected, "click resolved");
        Some(name)
    }

    /// Applies one sidebar callback. Only `SetLayer` can fail, with a
    /// configuration error for an unrecognized identifier.
    pub fn apply(&mut self, event: SidebarEvent) -> Result<(), LayerError> {
        match event {
            SidebarEvent::ToggleCity(name) => {
                self.selection.toggle(&name, RegionKind::City);
            }
            SidebarEvent::TogglePrefecture(name) => {
                self.selection.toggle(&name, RegionKind::Prefecture);
            }
            SidebarEvent::SetColor { name, color } => {
                self.selection.set_color(&name, &color);
            }
            SidebarEvent::SetLayer(id) => {
                self.selection.set_layer_id(&id)?;
            }
        }
        Ok(())
    }

    /// The read-only projection the sidebar renders.
    pub fn sidebar_view(&self) -> SidebarView {
        let state = self.selection.state();
        SidebarView {
            city_names: self
                .catalog
                .list_names(RegionKind::City)
                .into_iter()
                .map(str::to_string)
                .collect(),
            prefecture_names: self
                .catalog
                .list_names(RegionKind::Prefecture)
                .into_iter()
                .map(str::to_string)
                .collect(),
            selected_cities: state.cities.to_vec(),
            selected_prefectures: state.prefectures.to_vec(),
            colors: state.colors.clone(),
            active_layer: state.layer,
        }
    }

    /// Current render style per catalog region, cities first. An empty
    /// catalog yields nothing: absent data renders as nothing, not as an
    /// error.
    pub fn region_styles(&self) -> Vec<(&str, RegionStyle)> {
        let state = self.selection.state();
        self.catalog
            .regions(RegionKind::City)
            .iter()
            .chain(self.catalog.regions(RegionKind::Prefecture))
            .map(|region| (region.name.as_str(), project(region, state)))
            .collect()
    }

    /// Viewport configuration for the active base layer.
    pub fn viewport(&self) -> ViewportConfig {
        ViewportConfig::for_layer(self.selection.state().layer)
    }

    /// Persists the current selection and returns the share key. Failures
    /// are logged and surfaced so the caller can show a transient
    /// notification; nothing is retried.
    pub fn share(&mut self) -> Result<String, SnapshotError> {
        let state = self.selection.snapshot();
        match self.codec.save(&state) {
            Ok(key) => {
                info!(%key, "selection shared");
                Ok(key)
            }
            Err(e) => {
                error!("snapshot save failed: {e}");
                Err(e)
            }
        }
    }

    /// Restores the selection behind `key`, replacing the whole state.
    /// An unknown key is `Ok(false)` and leaves the defaults in place.
    pub fn restore(&mut self, key: &str) -> Result<bool, SnapshotError> {
        match self.codec.load(key) {
            Ok(Some(state)) => {
                self.selection.replace(state);
                info!(%key, "selection restored");
                Ok(true)
            }
            Ok(None) => {
                info!(%key, "no snapshot behind key; keeping defaults");
                Ok(false)
            }
            Err(e) => {
                error!("snapshot load failed: {e}");
                Err(e)
            }
        }
    }
}

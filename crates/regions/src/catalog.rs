use std::collections::BTreeMap;

use crate::geojson::BoundaryCollection;
use crate::region::{Region, RegionKind};

/// Read-only index over the loaded boundary collections.
///
/// Built once at startup; every consumer (resolver, projector, sidebar)
/// reads it immutably afterwards.
///
/// Ordering contract:
/// - `list_names` and `regions` yield entries in insertion order of the
///   first occurrence of each name.
/// - Duplicate names within a kind collapse to one entry; the retained
///   geometry is the last occurrence's (entries sharing a derived name are
///   assumed to describe the same locality).
#[derive(Debug, Default, Clone)]
pub struct RegionCatalog {
    cities: Vec<Region>,
    prefectures: Vec<Region>,
    city_index: BTreeMap<String, usize>,
    prefecture_index: BTreeMap<String, usize>,
}

impl RegionCatalog {
    /// Empty catalog: nothing resolvable, nothing selectable. This is the
    /// state a session keeps when boundary loading fails.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_boundaries(
        cities: BoundaryCollection,
        prefectures: BoundaryCollection,
    ) -> Self {
        let mut catalog = Self::default();
        for feature in cities.features {
            if let Some(region) = Region::from_feature(RegionKind::City, feature) {
                catalog.insert(region);
            }
        }
        for feature in prefectures.features {
            if let Some(region) = Region::from_feature(RegionKind::Prefecture, feature) {
                catalog.insert(region);
            }
        }
        catalog
    }

    fn insert(&mut self, region: Region) {
        let (regions, index) = match region.kind {
            RegionKind::City => (&mut self.cities, &mut self.city_index),
            RegionKind::Prefecture => (&mut self.prefectures, &mut self.prefecture_index),
        };
        match index.get(&region.name) {
            // Last occurrence wins the slot; the slot keeps its position.
            Some(&slot) => regions[slot] = region,
            None => {
                index.insert(region.name.clone(), regions.len());
                regions.push(region);
            }
        }
    }

    /// Unique names of one kind, first-occurrence order.
    pub fn list_names(&self, kind: RegionKind) -> Vec<&str> {
        self.regions(kind).iter().map(|r| r.name.as_str()).collect()
    }

    pub fn resolve(&self, name: &str, kind: RegionKind) -> Option<&Region> {
        let (regions, index) = match kind {
            RegionKind::City => (&self.cities, &self.city_index),
            RegionKind::Prefecture => (&self.prefectures, &self.prefecture_index),
        };
        index.get(name).map(|&slot| &regions[slot])
    }

    pub fn regions(&self, kind: RegionKind) -> &[Region] {
        match kind {
            RegionKind::City => &self.cities,
            RegionKind::Prefecture => &self.prefectures,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty() && self.prefectures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::RegionCatalog;
    use crate::geojson::{BoundaryCollection, BoundaryFeature};
    use crate::region::RegionKind;
    use foundation::geo::GeoPoint;
    use pretty_assertions::assert_eq;

    fn ring(x0: f64, y0: f64, size: f64) -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(x0, y0),
            GeoPoint::new(x0 + size, y0),
            GeoPoint::new(x0 + size, y0 + size),
            GeoPoint::new(x0, y0 + size),
            GeoPoint::new(x0, y0),
        ]
    }

    fn city(
        prefecture: &str,
        city: Option<&str>,
        ward: Option<&str>,
        x0: f64,
    ) -> BoundaryFeature {
        BoundaryFeature {
            prefecture: Some(prefecture.to_string()),
            city: city.map(str::to_string),
            ward: ward.map(str::to_string),
            rings: vec![ring(x0, 35.0, 0.2)],
        }
    }

    fn collection(features: Vec<BoundaryFeature>) -> BoundaryCollection {
        BoundaryCollection {
            features,
            skipped: 0,
        }
    }

    #[test]
    fn derived_names_are_unique_and_ordered() {
        let cities = collection(vec![
            city("山梨県", Some("甲府市"), None, 138.5),
            city("山梨県", Some("甲府市"), Some("X区"), 138.6),
        ]);
        let catalog = RegionCatalog::from_boundaries(cities, collection(vec![]));

        assert_eq!(
            catalog.list_names(RegionKind::City),
            vec!["甲府市", "甲府市X区"]
        );
        assert!(catalog.list_names(RegionKind::Prefecture).is_empty());
    }

    #[test]
    fn duplicates_collapse_keeping_first_position_and_last_geometry() {
        let cities = collection(vec![
            city("山梨県", Some("甲府市"), None, 138.5),
            city("長野県", Some("松本市"), None, 137.9),
            city("山梨県", Some("甲府市"), None, 140.0),
        ]);
        let catalog = RegionCatalog::from_boundaries(cities, collection(vec![]));

        assert_eq!(
            catalog.list_names(RegionKind::City),
            vec!["甲府市", "松本市"]
        );
        let kofu = catalog.resolve("甲府市", RegionKind::City).expect("entry");
        assert_eq!(kofu.bounds.min[0], 140.0);
    }

    #[test]
    fn nameless_features_are_excluded_not_fatal() {
        let cities = collection(vec![
            city("山梨県", None, None, 138.5),
            city("山梨県", Some("甲府市"), None, 138.6),
        ]);
        let catalog = RegionCatalog::from_boundaries(cities, collection(vec![]));

        assert_eq!(catalog.list_names(RegionKind::City), vec!["甲府市"]);
    }

    #[test]
    fn kinds_are_indexed_independently() {
        let cities = collection(vec![city("山梨県", Some("甲府市"), None, 138.5)]);
        let prefectures = collection(vec![city("山梨県", None, None, 138.0)]);
        let catalog = RegionCatalog::from_boundaries(cities, prefectures);

        assert!(catalog.resolve("甲府市", RegionKind::City).is_some());
        assert!(catalog.resolve("甲府市", RegionKind::Prefecture).is_none());
        assert!(catalog.resolve("山梨県", RegionKind::Prefecture).is_some());
        assert!(!catalog.is_empty());
    }

    #[test]
    fn empty_catalog_resolves_nothing() {
        let catalog = RegionCatalog::empty();
        assert!(catalog.is_empty());
        assert!(catalog.resolve("甲府市", RegionKind::City).is_none());
        assert!(catalog.regions(RegionKind::City).is_empty());
    }
}

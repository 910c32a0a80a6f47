use foundation::bounds::GeoBounds;
use foundation::geo::GeoPoint;

use crate::geojson::BoundaryFeature;

/// Administrative level of a region.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RegionKind {
    City,
    Prefecture,
}

/// One administrative polygon entity, immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub kind: RegionKind,
    /// Canonical display name, unique per kind within a catalog.
    pub name: String,
    /// Containing prefecture. For prefecture regions, the region itself.
    pub prefecture: Option<String>,
    /// Outer ring per polygon.
    pub rings: Vec<Vec<GeoPoint>>,
    pub bounds: GeoBounds,
    pub centroid: GeoPoint,
}

impl Region {
    /// Builds a region from a parsed boundary feature.
    ///
    /// `None` when no canonical name can be derived; such features are
    /// excluded from the catalog rather than treated as errors.
    pub fn from_feature(kind: RegionKind, feature: BoundaryFeature) -> Option<Self> {
        let name = canonical_name(kind, &feature)?;
        let prefecture = match kind {
            RegionKind::City => feature.prefecture,
            RegionKind::Prefecture => Some(name.clone()),
        };

        let bounds = GeoBounds::from_points(feature.rings.iter().flatten())?;
        let centroid = rings_centroid(&feature.rings)?;

        Some(Region {
            kind,
            name,
            prefecture,
            rings: feature.rings,
            bounds,
            centroid,
        })
    }
}

/// Canonical display name.
///
/// City level concatenates city and ward when both are present
/// (`甲府市` + `X区` → `甲府市X区`); a ward-only feature uses the ward
/// name alone. Prefecture level uses the prefecture name property.
fn canonical_name(kind: RegionKind, feature: &BoundaryFeature) -> Option<String> {
    match kind {
        RegionKind::City => match (&feature.city, &feature.ward) {
            (Some(city), Some(ward)) => Some(format!("{city}{ward}")),
            (Some(city), None) => Some(city.clone()),
            (None, Some(ward)) => Some(ward.clone()),
            (None, None) => None,
        },
        RegionKind::Prefecture => feature.prefecture.clone(),
    }
}

/// Area-weighted centroid over all outer rings.
///
/// Degenerate rings (near-zero enclosed area) fall back to the vertex
/// mean so every region still gets a usable distance reference.
fn rings_centroid(rings: &[Vec<GeoPoint>]) -> Option<GeoPoint> {
    let mut area_sum = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;

    for ring in rings {
        let (centroid, area) = ring_centroid(ring);
        let w = area.abs();
        area_sum += w;
        cx += centroid.lon_deg * w;
        cy += centroid.lat_deg * w;
    }

    if area_sum > 1e-12 {
        return Some(GeoPoint::new(cx / area_sum, cy / area_sum));
    }

    // Vertex mean fallback.
    let mut n = 0usize;
    let (mut sx, mut sy) = (0.0, 0.0);
    for p in rings.iter().flatten() {
        sx += p.lon_deg;
        sy += p.lat_deg;
        n += 1;
    }
    if n == 0 {
        return None;
    }
    Some(GeoPoint::new(sx / n as f64, sy / n as f64))
}

/// Shoelace centroid of one ring. The ring is treated as closed; an
/// explicit closing vertex contributes a zero term.
fn ring_centroid(ring: &[GeoPoint]) -> (GeoPoint, f64) {
    let mut area2 = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;

    for (i, p) in ring.iter().enumerate() {
        let q = &ring[(i + 1) % ring.len()];
        let cross = p.lon_deg * q.lat_deg - q.lon_deg * p.lat_deg;
        area2 += cross;
        cx += (p.lon_deg + q.lon_deg) * cross;
        cy += (p.lat_deg + q.lat_deg) * cross;
    }

    if area2.abs() < 1e-15 {
        return (GeoPoint::new(0.0, 0.0), 0.0);
    }
    let area = area2 * 0.5;
    (
        GeoPoint::new(cx / (3.0 * area2), cy / (3.0 * area2)),
        area,
    )
}

#[cfg(test)]
mod tests {
    use super::{Region, RegionKind};
    use crate::geojson::BoundaryFeature;
    use foundation::geo::GeoPoint;
    use pretty_assertions::assert_eq;

    fn square_ring(x0: f64, y0: f64, size: f64) -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(x0, y0),
            GeoPoint::new(x0 + size, y0),
            GeoPoint::new(x0 + size, y0 + size),
            GeoPoint::new(x0, y0 + size),
            GeoPoint::new(x0, y0),
        ]
    }

    fn feature(
        prefecture: Option<&str>,
        city: Option<&str>,
        ward: Option<&str>,
        rings: Vec<Vec<GeoPoint>>,
    ) -> BoundaryFeature {
        BoundaryFeature {
            prefecture: prefecture.map(str::to_string),
            city: city.map(str::to_string),
            ward: ward.map(str::to_string),
            rings,
        }
    }

    #[test]
    fn city_name_concatenates_city_and_ward() {
        let f = feature(
            Some("山梨県"),
            Some("甲府市"),
            Some("X区"),
            vec![square_ring(138.5, 35.5, 0.2)],
        );
        let region = Region::from_feature(RegionKind::City, f).expect("region");
        assert_eq!(region.name, "甲府市X区");
        assert_eq!(region.prefecture.as_deref(), Some("山梨県"));
    }

    #[test]
    fn city_name_without_ward_is_the_city_alone() {
        let f = feature(
            Some("山梨県"),
            Some("甲府市"),
            None,
            vec![square_ring(138.5, 35.5, 0.2)],
        );
        let region = Region::from_feature(RegionKind::City, f).expect("region");
        assert_eq!(region.name, "甲府市");
    }

    #[test]
    fn ward_only_feature_uses_the_ward_name() {
        let f = feature(
            Some("東京都"),
            None,
            Some("千代田区"),
            vec![square_ring(139.7, 35.6, 0.1)],
        );
        let region = Region::from_feature(RegionKind::City, f).expect("region");
        assert_eq!(region.name, "千代田区");
    }

    #[test]
    fn nameless_feature_is_excluded() {
        let f = feature(Some("山梨県"), None, None, vec![square_ring(0.0, 0.0, 1.0)]);
        assert!(Region::from_feature(RegionKind::City, f).is_none());
    }

    #[test]
    fn prefecture_kind_names_itself() {
        let f = feature(Some("山梨県"), None, None, vec![square_ring(0.0, 0.0, 1.0)]);
        let region = Region::from_feature(RegionKind::Prefecture, f).expect("region");
        assert_eq!(region.name, "山梨県");
        assert_eq!(region.prefecture.as_deref(), Some("山梨県"));
    }

    #[test]
    fn centroid_of_a_square_is_its_center() {
        let f = feature(
            Some("p"),
            Some("c"),
            None,
            vec![square_ring(10.0, 20.0, 2.0)],
        );
        let region = Region::from_feature(RegionKind::City, f).expect("region");
        assert!((region.centroid.lon_deg - 11.0).abs() < 1e-9);
        assert!((region.centroid.lat_deg - 21.0).abs() < 1e-9);
        assert_eq!(region.bounds.min, [10.0, 20.0]);
        assert_eq!(region.bounds.max, [12.0, 22.0]);
    }

    #[test]
    fn centroid_weights_polygons_by_area() {
        // A 2x2 square and a 1x1 square; the big one pulls 4x harder.
        let f = feature(
            Some("p"),
            Some("c"),
            None,
            vec![square_ring(0.0, 0.0, 2.0), square_ring(10.0, 0.0, 1.0)],
        );
        let region = Region::from_feature(RegionKind::City, f).expect("region");
        let expected_x = (1.0 * 4.0 + 10.5 * 1.0) / 5.0;
        assert!((region.centroid.lon_deg - expected_x).abs() < 1e-9);
    }

    #[test]
    fn degenerate_ring_falls_back_to_vertex_mean() {
        let collinear = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(2.0, 0.0),
        ];
        let f = feature(Some("p"), Some("c"), None, vec![collinear]);
        let region = Region::from_feature(RegionKind::City, f).expect("region");
        assert!((region.centroid.lon_deg - 1.0).abs() < 1e-9);
        assert_eq!(region.centroid.lat_deg, 0.0);
    }
}

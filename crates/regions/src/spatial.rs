use foundation::bounds::GeoBounds;
use foundation::geo::GeoPoint;
use foundation::geodesy::geodesic_distance_m;
use foundation::precision::stable_total_cmp_f64;

use crate::catalog::RegionCatalog;
use crate::region::RegionKind;

/// Default click tolerance in degrees (~100 m of latitude).
pub const DEFAULT_TOLERANCE_DEG: f64 = 0.001;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ResolveOptions {
    /// Half-extent of the square buffer placed around the click point.
    pub tolerance_deg: f64,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            tolerance_deg: DEFAULT_TOLERANCE_DEG,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ResolveHit<'a> {
    pub name: &'a str,
    /// Great-circle distance from the click to the winning centroid.
    pub distance_m: f64,
}

/// Deterministic click-to-region resolution.
///
/// Candidates are city regions whose bounds intersect a square buffer of
/// `tolerance_deg` around the click; among them, the one with the smallest
/// great-circle distance from the click to its centroid wins.
///
/// Ordering contract:
/// - Strictly smaller distance wins.
/// - On an exact tie, the first candidate in catalog order wins. This is
///   an iteration-order tie-break, kept as documented behavior.
///
/// Notes:
/// - Only city regions participate; prefectures are never resolved from a
///   click.
/// - No intersecting candidate resolves to `None`; the caller performs no
///   mutation in that case.
/// - Linear scan over the catalog, fine at municipality scale (~1700
///   regions). A larger catalog would want a spatial index with these
///   exact selection semantics.
pub fn resolve_click<'a>(
    catalog: &'a RegionCatalog,
    click: GeoPoint,
    opts: ResolveOptions,
) -> Option<ResolveHit<'a>> {
    let buffer = GeoBounds::around(click, opts.tolerance_deg);

    let mut best: Option<ResolveHit<'a>> = None;
    for region in catalog.regions(RegionKind::City) {
        if !region.bounds.intersects(&buffer) {
            continue;
        }
        let distance_m = geodesic_distance_m(click, region.centroid);
        let closer = match &best {
            None => true,
            Some(hit) => stable_total_cmp_f64(distance_m, hit.distance_m).is_lt(),
        };
        if closer {
            best = Some(ResolveHit {
                name: &region.name,
                distance_m,
            });
        }
    }
    best
}

use regions::{Region, RegionKind};

use crate::store::SelectionState;

/// Color applied to an active region with no explicit color assigned.
pub const DEFAULT_ACTIVE_COLOR: &str = "blue";
/// Stroke/fill color of inactive regions.
pub const TRANSPARENT: &str = "transparent";

/// Render style for one region, consumed by the map renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionStyle {
    pub stroke_color: String,
    pub stroke_weight: u32,
    pub fill_color: String,
    pub fill_opacity: f32,
}

impl RegionStyle {
    fn active(color: &str) -> Self {
        Self {
            stroke_color: color.to_string(),
            stroke_weight: 2,
            fill_color: color.to_string(),
            fill_opacity: 0.5,
        }
    }

    fn inactive() -> Self {
        Self {
            stroke_color: TRANSPARENT.to_string(),
            stroke_weight: 0,
            fill_color: TRANSPARENT.to_string(),
            fill_opacity: 0.0,
        }
    }
}

/// Pure projection of (region, state) onto a render style. Deterministic,
/// no side effects.
///
/// A region is active when:
/// - its name is selected among cities, or
/// - it is a prefecture whose name is selected among prefectures, or
/// - it is a city whose containing prefecture is selected.
///
/// Colors live in a single keyspace shared by both kinds: a city and a
/// prefecture with the same literal name read the same entry.
pub fn project(region: &Region, state: &SelectionState) -> RegionStyle {
    let active = state.cities.contains(&region.name)
        || match region.kind {
            RegionKind::Prefecture => state.prefectures.contains(&region.name),
            RegionKind::City => region
                .prefecture
                .as_deref()
                .is_some_and(|p| state.prefectures.contains(p)),
        };

    if !active {
        return RegionStyle::inactive();
    }

    let color = state
        .colors
        .get(&region.name)
        .map(String::as_str)
        .unwrap_or(DEFAULT_ACTIVE_COLOR);
    RegionStyle::active(color)
}

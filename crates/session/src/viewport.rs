use foundation::bounds::GeoBounds;
use foundation::geo::GeoPoint;
use selection::{ATTRIBUTION, BaseLayer};

/// Initial view over central Honshu.
pub const INITIAL_CENTER: GeoPoint = GeoPoint {
    lon_deg: 137.00793794535102,
    lat_deg: 34.99096863821259,
};
pub const INITIAL_ZOOM: u8 = 10;

/// Pan limits applied regardless of the active layer: south-west
/// (10.0, 100.0) to north-east (50.0, 170.0), given as (lat, lon).
pub fn pan_bounds() -> GeoBounds {
    GeoBounds::new([100.0, 10.0], [170.0, 50.0])
}

/// Everything the map renderer needs to present one base layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportConfig {
    pub center: GeoPoint,
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub pan_bounds: GeoBounds,
    pub tile_url_template: &'static str,
    pub attribution: &'static str,
}

impl ViewportConfig {
    pub fn for_layer(layer: BaseLayer) -> Self {
        Self {
            center: INITIAL_CENTER,
            // The initial zoom must stay inside the layer's range.
            zoom: INITIAL_ZOOM.min(layer.max_zoom()),
            min_zoom: layer.min_zoom(),
            max_zoom: layer.max_zoom(),
            pan_bounds: pan_bounds(),
            tile_url_template: layer.tile_url_template(),
            attribution: ATTRIBUTION,
        }
    }
}

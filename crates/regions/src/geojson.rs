//! GeoJSON ingestion for administrative boundary collections.
//!
//! The boundary data is the 国土数値情報 N03 (行政区域) dataset: one
//! FeatureCollection per administrative level, each feature carrying the
//! `N03_001` (prefecture), `N03_003` (city) and `N03_004` (ward) name
//! properties plus `Polygon`/`MultiPolygon` geometry.

use foundation::geo::GeoPoint;
use serde_json::{Map, Value};

/// Prefecture name property.
pub const PROP_PREFECTURE: &str = "N03_001";
/// City name property (absent for ward-only features).
pub const PROP_CITY: &str = "N03_003";
/// Ward name property (absent outside designated cities).
pub const PROP_WARD: &str = "N03_004";

/// One boundary feature with its name properties and outer polygon rings.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    pub prefecture: Option<String>,
    pub city: Option<String>,
    pub ward: Option<String>,
    /// Outer ring per polygon; interior rings are not kept (bounds and
    /// centroids only consider the outline).
    pub rings: Vec<Vec<GeoPoint>>,
}

/// Parse result: usable features plus the count of features dropped for
/// missing or malformed geometry.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BoundaryCollection {
    pub features: Vec<BoundaryFeature>,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryParseError {
    NotAFeatureCollection,
    Json(String),
}

impl std::fmt::Display for BoundaryParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryParseError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            BoundaryParseError::Json(msg) => write!(f, "JSON parse error: {msg}"),
        }
    }
}

impl std::error::Error for BoundaryParseError {}

impl BoundaryCollection {
    pub fn from_geojson_str(payload: &str) -> Result<Self, BoundaryParseError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| BoundaryParseError::Json(e.to_string()))?;
        Self::from_geojson_value(&value)
    }

    /// Walks a FeatureCollection. A malformed top level is an error; a
    /// malformed individual feature is skipped and counted, never fatal.
    pub fn from_geojson_value(value: &Value) -> Result<Self, BoundaryParseError> {
        let obj = value
            .as_object()
            .ok_or(BoundaryParseError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(BoundaryParseError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(BoundaryParseError::NotAFeatureCollection);
        }

        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(BoundaryParseError::NotAFeatureCollection)?;

        let mut out = BoundaryCollection {
            features: Vec::with_capacity(features_val.len()),
            skipped: 0,
        };
        for feat_val in features_val {
            match parse_feature(feat_val) {
                Some(feature) => out.features.push(feature),
                None => out.skipped += 1,
            }
        }
        Ok(out)
    }
}

fn parse_feature(value: &Value) -> Option<BoundaryFeature> {
    let obj = value.as_object()?;
    if obj.get("type").and_then(|v| v.as_str()) != Some("Feature") {
        return None;
    }

    let properties = obj.get("properties").and_then(|v| v.as_object());
    let rings = parse_outer_rings(obj.get("geometry")?)?;

    Some(BoundaryFeature {
        prefecture: prop_string(properties, PROP_PREFECTURE),
        city: prop_string(properties, PROP_CITY),
        ward: prop_string(properties, PROP_WARD),
        rings,
    })
}

/// Non-empty string property, or `None`. N03 uses JSON `null` for absent
/// names; some exports use `""` instead, treated the same.
fn prop_string(properties: Option<&Map<String, Value>>, key: &str) -> Option<String> {
    let s = properties?.get(key)?.as_str()?;
    if s.is_empty() {
        return None;
    }
    Some(s.to_string())
}

/// Outer ring of each polygon. `None` when the geometry is not a polygon
/// type or yields no usable ring.
fn parse_outer_rings(geometry: &Value) -> Option<Vec<Vec<GeoPoint>>> {
    let obj = geometry.as_object()?;
    let ty = obj.get("type").and_then(|v| v.as_str())?;
    let coords = obj.get("coordinates")?;

    let rings = match ty {
        "Polygon" => vec![parse_ring(coords.as_array()?.first()?)?],
        "MultiPolygon" => {
            let mut rings = Vec::new();
            for polygon in coords.as_array()? {
                if let Some(ring) = polygon.as_array()?.first().and_then(parse_ring) {
                    rings.push(ring);
                }
            }
            rings
        }
        _ => return None,
    };

    if rings.is_empty() { None } else { Some(rings) }
}

fn parse_ring(value: &Value) -> Option<Vec<GeoPoint>> {
    let positions = value.as_array()?;
    let mut ring = Vec::with_capacity(positions.len());
    for position in positions {
        let position = position.as_array()?;
        let lon = position.first()?.as_f64()?;
        let lat = position.get(1)?.as_f64()?;
        ring.push(GeoPoint::new(lon, lat));
    }
    // A ring needs at least a triangle to outline anything.
    if ring.len() < 3 { None } else { Some(ring) }
}

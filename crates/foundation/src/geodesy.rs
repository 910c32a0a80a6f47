use crate::geo::GeoPoint;

/// WGS84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS84 semi-minor axis (meters).
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);
/// Mean Earth radius `(2a + b) / 3` (meters), used for great-circle math.
pub const MEAN_RADIUS: f64 = (2.0 * WGS84_A + WGS84_B) / 3.0;

/// Great-circle (haversine) distance between two geographic points, meters.
///
/// Accurate to ~0.5% against the ellipsoid, which is far below the spacing
/// of neighboring municipality centroids.
pub fn geodesic_distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.lat_deg.to_radians();
    let lat_b = b.lat_deg.to_radians();
    let d_lat = (b.lat_deg - a.lat_deg).to_radians();
    let d_lon = (b.lon_deg - a.lon_deg).to_radians();

    let h = (d_lat * 0.5).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon * 0.5).sin().powi(2);
    2.0 * MEAN_RADIUS * h.sqrt().min(1.0).asin()
}

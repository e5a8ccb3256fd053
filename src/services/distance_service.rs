//! Great-circle distance between a traveler and a listing.
//!
//! Coordinates are `(latitude, longitude)` in degrees. Listings carry their own
//! coordinates, so no geocoding or routing API is involved here.

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distance in kilometres using the haversine formula.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let lat1_rad = from.0.to_radians();
    let lat2_rad = to.0.to_radians();
    let delta_lat = (to.0 - from.0).to_radians();
    let delta_lon = (to.1 - from.1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Score contribution for how far a listing is from the traveler.
pub fn proximity_score(distance_km: f64) -> f64 {
    if distance_km <= 5.0 {
        1.2
    } else if distance_km <= 15.0 {
        0.6
    } else if distance_km <= 50.0 {
        0.1
    } else {
        -0.4
    }
}

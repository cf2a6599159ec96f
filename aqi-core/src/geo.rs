use crate::model::{GeoPoint, StationReading};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres between two points given in degrees
/// (haversine). Inputs are not range-checked.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push `a` a hair past 1.0 for antipodal points.
    2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
}

pub fn distance_between(a: GeoPoint, b: GeoPoint) -> f64 {
    distance_km(a.latitude, a.longitude, b.latitude, b.longitude)
}

/// Closest reading to `point`. On equal distances the earlier reading wins.
/// Readings whose distance is not a number are never chosen.
pub fn nearest_station(readings: &[StationReading], point: GeoPoint) -> Option<&StationReading> {
    let mut best: Option<(&StationReading, f64)> = None;

    for reading in readings {
        let d = distance_between(point, reading.position());
        if d.is_nan() {
            continue;
        }
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((reading, d)),
        }
    }

    best.map(|(reading, _)| reading)
}

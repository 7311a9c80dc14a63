use geo::{HaversineDistance, Point};
use crate::models::GeoPoint;

/// Great-circle distance between two points in kilometers
///
/// Only used to annotate results; the distance radius never excludes anyone.
#[inline]
pub fn haversine_distance_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let a = Point::new(from.longitude, from.latitude);
    let b = Point::new(to.longitude, to.latitude);

    a.haversine_distance(&b) / 1000.0
}

/// Distance from `origin` to an optional location
#[inline]
pub fn distance_from(origin: Option<GeoPoint>, location: Option<GeoPoint>) -> Option<f64> {
    match (origin, location) {
        (Some(origin), Some(location)) => Some(haversine_distance_km(origin, location)),
        _ => None,
    }
}

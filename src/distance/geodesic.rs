use crate::domain::types::Coordinate;

/// Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in kilometres.
///
/// Haversine formula; symmetric, non-negative, zero for identical points.
/// Inputs are unconstrained degree values and are converted to radians
/// internally.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Total distance of the closed tour depot -> stops... -> depot.
///
/// Returns 0.0 for an empty stop list; no return leg is added in that case.
pub fn route_distance_km(depot: Coordinate, stops: &[Coordinate]) -> f64 {
    let Some(first) = stops.first() else {
        return 0.0;
    };
    let last = stops[stops.len() - 1];

    let mut total = haversine_km(depot, *first);
    for pair in stops.windows(2) {
        total += haversine_km(pair[0], pair[1]);
    }
    total + haversine_km(last, depot)
}

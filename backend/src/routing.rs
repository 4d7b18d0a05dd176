use crate::models::{Coordinate, RouteBounds, RouteCandidate};

/// Pick the alternative with the smallest distance.
///
/// Ties keep the candidate that came first in the provider's order.
/// Returns `None` for an empty slice.
pub fn select_shortest(candidates: &[RouteCandidate]) -> Option<&RouteCandidate> {
    candidates.iter().fold(None, |best, candidate| match best {
        Some(current) if current.distance_m <= candidate.distance_m => Some(current),
        _ => Some(candidate),
    })
}

/// Mean Earth radius in meters.
const MEAN_EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Great-circle distance between two points, in meters.
pub fn great_circle_m(from: Coordinate, to: Coordinate) -> f64 {
    let (phi1, phi2) = (from.lat.to_radians(), to.lat.to_radians());
    let half_dphi = (phi2 - phi1) / 2.0;
    let half_dlambda = (to.lon - from.lon).to_radians() / 2.0;

    let a = half_dphi.sin().powi(2) + phi1.cos() * phi2.cos() * half_dlambda.sin().powi(2);
    2.0 * MEAN_EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).max(0.0).sqrt())
}

/// Length of a polyline in meters; zero for fewer than two points.
pub fn path_length_m(path: &[Coordinate]) -> f64 {
    path.windows(2).map(|pair| great_circle_m(pair[0], pair[1])).sum()
}

/// Bounding box of a set of coordinates, `None` when empty.
pub fn bounds_of<'a>(coords: impl IntoIterator<Item = &'a Coordinate>) -> Option<RouteBounds> {
    coords.into_iter().fold(None, |acc, c| {
        Some(match acc {
            None => RouteBounds {
                min_lat: c.lat,
                max_lat: c.lat,
                min_lon: c.lon,
                max_lon: c.lon,
            },
            Some(b) => RouteBounds {
                min_lat: b.min_lat.min(c.lat),
                max_lat: b.max_lat.max(c.lat),
                min_lon: b.min_lon.min(c.lon),
                max_lon: b.max_lon.max(c.lon),
            },
        })
    })
}

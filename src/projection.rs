//! WGS84 lat/lon -> the navigation engine's spherical Mercator (C2).

use crate::geometry::{Point, Rect};

/// The engine's Earth radius. Deliberately not the WGS84 ellipsoid value
/// (6_378_137) — this is the radius the navigation engine's own Mercator
/// projection was built against, and correcting it would desynchronize
/// every coordinate this tool produces from the archives the engine reads.
const EARTH_RADIUS: f64 = 6_371_000.0;

fn mercator_x(lon_deg: f64) -> f64 {
    lon_deg * EARTH_RADIUS * std::f64::consts::PI / 180.0
}

fn mercator_y(lat_deg: f64) -> f64 {
    (std::f64::consts::FRAC_PI_4 + lat_deg * std::f64::consts::PI / 360.0)
        .tan()
        .ln()
        * EARTH_RADIUS
}

/// Projects a bottom-left/top-right WGS84 coordinate pair into the engine's
/// integer Mercator `Rect`. No bounds checking is performed on `lat`/`lon`;
/// out-of-range inputs still round to *some* integer, matching the original
/// tool's unconditional `round()` calls.
pub fn project(lon_bl: f64, lat_bl: f64, lon_tr: f64, lat_tr: f64) -> Rect {
    let low = Point::new(
        mercator_x(lon_bl).round() as i32,
        mercator_y(lat_bl).round() as i32,
    );
    let high = Point::new(
        mercator_x(lon_tr).round() as i32,
        mercator_y(lat_tr).round() as i32,
    );
    Rect::new(low, high)
}

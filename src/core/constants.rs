//! Engine-wide magic numbers, kept in a single place so the reference values
//! the rest of the client depends on are easy to audit and tweak.

/// Meters per degree of latitude under the equirectangular approximation.
pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// Default geofence radius around the meeting point, in meters.
pub const DEFAULT_GEOFENCE_RADIUS_M: f64 = 2_000.0;

/// Resistance applied when panning against the geofence bounds
/// (0.0 = loose, 1.0 = solid).
pub const DEFAULT_BOUNDS_VISCOSITY: f64 = 0.8;

/// Information card size in container pixels.
pub const CARD_WIDTH: f64 = 260.0;
pub const CARD_HEIGHT: f64 = 140.0;

/// Gap between a marker and the card placed next to it.
pub const CARD_OFFSET: f64 = 12.0;

/// Minimum distance the card keeps from the map edges.
pub const CARD_MARGIN: f64 = 8.0;

/// Fraction of the viewport height treated as the drawer's minimum
/// visible height when computing drag limits.
pub const DRAWER_VISIBLE_FRACTION: f64 = 0.3;

use crate::core::constants::METERS_PER_DEGREE_LAT;
use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a new GeoPoint coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Checks that both components are finite numbers
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a position in on-screen container pixels
///
/// Distinct from [`GeoPoint`]; the two are only ever converted through the
/// camera's projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &PixelPoint) -> PixelPoint {
        PixelPoint::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &PixelPoint) -> PixelPoint {
        PixelPoint::new(self.x - other.x, self.y - other.y)
    }
}

impl Default for PixelPoint {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Size of the map's containing element in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: f64,
    pub height: f64,
}

impl PixelSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Center of a container with this size, in container pixels
    pub fn center(&self) -> PixelPoint {
        PixelPoint::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl Default for PixelSize {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a bounding box of geographical coordinates
///
/// Always constructed symmetric around a center point; panning beyond it is
/// restricted by the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl GeoBounds {
    pub fn new(south_west: GeoPoint, north_east: GeoPoint) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Derives bounds from a center point and a radius in meters using the
    /// equirectangular approximation, adequate for the small radii and
    /// bounded-latitude domain this engine targets.
    ///
    /// The `1/cos(lat)` term grows without bound near the poles; callers only
    /// ever pass latitudes inside one country's range, so no clamping is
    /// applied here.
    pub fn from_center_radius(center: GeoPoint, radius_m: f64) -> Self {
        let lat_offset = radius_m / METERS_PER_DEGREE_LAT;
        let lng_offset = radius_m / (METERS_PER_DEGREE_LAT * center.lat.to_radians().cos());

        Self::new(
            GeoPoint::new(center.lat - lat_offset, center.lng - lng_offset),
            GeoPoint::new(center.lat + lat_offset, center.lng + lng_offset),
        )
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    /// Gets the span of the bounds
    pub fn span(&self) -> GeoPoint {
        GeoPoint::new(
            self.north_east.lat - self.south_west.lat,
            self.north_east.lng - self.south_west.lng,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_creation() {
        let seoul = GeoPoint::new(37.5665, 126.9780);
        assert_eq!(seoul.lat, 37.5665);
        assert_eq!(seoul.lng, 126.9780);
        assert!(seoul.is_valid());
        assert!(seoul.is_finite());
    }

    #[test]
    fn test_geo_point_validity() {
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 181.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_finite());
    }

    #[test]
    fn test_bounds_symmetric_around_center() {
        let center = GeoPoint::new(37.5665, 126.9780);
        let bounds = GeoBounds::from_center_radius(center, 2_000.0);

        let up = bounds.north_east.lat - center.lat;
        let down = center.lat - bounds.south_west.lat;
        let east = bounds.north_east.lng - center.lng;
        let west = center.lng - bounds.south_west.lng;

        assert!((up - down).abs() < 1e-12);
        assert!((east - west).abs() < 1e-12);
        assert!(bounds.contains(&center));
    }

    #[test]
    fn test_lng_offset_grows_with_latitude() {
        let radius = 2_000.0;
        let mut previous = 0.0;
        for lat in [0.0, 15.0, 33.0, 38.0, 60.0] {
            let bounds = GeoBounds::from_center_radius(GeoPoint::new(lat, 127.0), radius);
            let lng_offset = bounds.span().lng / 2.0;
            assert!(lng_offset > previous);
            previous = lng_offset;
        }
    }

    #[test]
    fn test_bounds_center_recovers_input() {
        let center = GeoPoint::new(35.1796, 129.0756);
        let bounds = GeoBounds::from_center_radius(center, 1_500.0);
        let recovered = bounds.center();

        assert!((recovered.lat - center.lat).abs() < 1e-9);
        assert!((recovered.lng - center.lng).abs() < 1e-9);
    }

    #[test]
    fn test_pixel_point_math() {
        let a = PixelPoint::new(100.0, 200.0);
        let b = PixelPoint::new(30.0, 50.0);
        assert_eq!(a.add(&b), PixelPoint::new(130.0, 250.0));
        assert_eq!(a.subtract(&b), PixelPoint::new(70.0, 150.0));
    }

    #[test]
    fn test_pixel_size_center() {
        let size = PixelSize::new(390.0, 844.0);
        assert_eq!(size.center(), PixelPoint::new(195.0, 422.0));
        assert!(!size.is_empty());
        assert!(PixelSize::new(0.0, 100.0).is_empty());
    }
}

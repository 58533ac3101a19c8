//! Camera configuration derived once per (center, device class) pair.
//!
//! The options bundle is immutable after creation; a new meeting point or a
//! device-class change rebuilds the whole bundle instead of mutating it.

use crate::core::constants::DEFAULT_BOUNDS_VISCOSITY;
use crate::core::geo::{GeoBounds, GeoPoint};
use crate::{Result, ViewportError};
use serde::{Deserialize, Serialize};

/// Coarse device classification used to pick interaction presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceClass {
    /// Phone-sized touch device
    Compact,
    /// Desktop or large tablet
    Regular,
}

impl DeviceClass {
    /// Resolves the table-driven preset for this device class
    pub fn resolve(&self) -> DeviceTuning {
        match self {
            Self::Compact => DeviceTuning {
                zoom: ZoomBounds {
                    min: 13.0,
                    default: 15.0,
                    max: 18.0,
                },
                gestures: GestureTuning {
                    wheel_debounce_ms: 100,
                    wheel_px_per_zoom: 120.0,
                    inertia_deceleration: 2_500.0,
                    inertia_max_speed: 1_500.0,
                    touch_zoom_around_center: true,
                },
            },
            Self::Regular => DeviceTuning {
                zoom: ZoomBounds {
                    min: 14.0,
                    default: 17.0,
                    max: 19.0,
                },
                gestures: GestureTuning {
                    wheel_debounce_ms: 40,
                    wheel_px_per_zoom: 60.0,
                    inertia_deceleration: 3_400.0,
                    inertia_max_speed: 3_000.0,
                    touch_zoom_around_center: false,
                },
            },
        }
    }
}

/// Zoom limits and the level the camera starts at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomBounds {
    pub min: f64,
    pub default: f64,
    pub max: f64,
}

/// Pan/zoom friction and inertia preset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureTuning {
    /// Debounce interval between wheel-zoom steps
    pub wheel_debounce_ms: u64,
    /// Scroll distance mapped to one zoom level
    pub wheel_px_per_zoom: f64,
    /// Inertia deceleration in px/s^2
    pub inertia_deceleration: f64,
    /// Inertia speed cap in px/s
    pub inertia_max_speed: f64,
    /// Whether pinch-zoom pivots around the container center instead of the
    /// touch midpoint
    pub touch_zoom_around_center: bool,
}

/// Zoom and gesture preset for one device class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceTuning {
    pub zoom: ZoomBounds,
    pub gestures: GestureTuning,
}

/// Complete camera configuration, consumed once at camera construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportOptions {
    pub center: GeoPoint,
    pub zoom: ZoomBounds,
    pub gestures: GestureTuning,
    /// Geofence the camera may not pan beyond
    pub max_bounds: GeoBounds,
    /// Resistance against panning past `max_bounds`
    pub max_bounds_viscosity: f64,
}

/// Builds the camera configuration for a meeting point.
///
/// Pure and side-effect free; fails only on non-finite input. The geofence is
/// derived with the equirectangular approximation in
/// [`GeoBounds::from_center_radius`].
pub fn build_viewport_options(
    center: GeoPoint,
    device: DeviceClass,
    radius_m: f64,
) -> Result<ViewportOptions> {
    if !center.is_finite() || !radius_m.is_finite() {
        return Err(ViewportError::InvalidCoordinates(format!(
            "non-finite viewport input: lat={}, lng={}, radius={}",
            center.lat, center.lng, radius_m
        )));
    }

    let DeviceTuning { zoom, gestures } = device.resolve();

    Ok(ViewportOptions {
        center,
        zoom,
        gestures,
        max_bounds: GeoBounds::from_center_radius(center, radius_m),
        max_bounds_viscosity: DEFAULT_BOUNDS_VISCOSITY,
    })
}

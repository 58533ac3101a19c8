//! Seam toward the external mapping library's camera.
//!
//! The engine never touches the library's tiling or rendering internals; it
//! only reads the container size and center, projects geographic coordinates
//! into container pixels, and listens for "movement settled" notifications.

use crate::core::geo::{GeoPoint, PixelPoint, PixelSize};
use crate::platform::{SubscriptionToken, TriggerHandler};

/// Camera notifications the engine recomputes on
///
/// Both fire once interaction has settled, not per animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraTrigger {
    /// Pan finished
    MoveEnd,
    /// Zoom finished
    ZoomEnd,
}

/// Live camera handle exposed by the mapping library
///
/// `is_ready` is false until the camera has been constructed and measured;
/// while unready the engine performs no work and silently retries on the
/// next trigger. Implementations typically wrap the library object and back
/// `subscribe`/`unsubscribe` with a
/// [`TriggerRegistry`](crate::platform::TriggerRegistry).
pub trait MapCamera {
    fn is_ready(&self) -> bool;

    /// Current container size in pixels
    fn container_size(&self) -> PixelSize;

    /// Current camera center in geographic coordinates
    fn center(&self) -> GeoPoint;

    /// Projects a geographic coordinate into container pixels, valid for the
    /// current camera state
    fn project(&self, point: &GeoPoint) -> PixelPoint;

    fn subscribe(&self, trigger: CameraTrigger, handler: TriggerHandler) -> SubscriptionToken;

    fn unsubscribe(&self, token: SubscriptionToken);
}

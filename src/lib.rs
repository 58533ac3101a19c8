//! # meetmap-viewport
//!
//! Presentation-geometry engine for the Meetmap client: a group of people
//! picks a fair meeting point, and the client shows it on an interactive map
//! together with nearby restaurants.
//!
//! This crate owns the four pieces of that screen with real geometry in them:
//!
//! - [`build_viewport_options`] derives a bounded, device-aware camera
//!   configuration from a center point and a radius,
//! - [`CoordinateSync`] keeps a pixel-space snapshot of the camera state in
//!   step with asynchronous pan/zoom events without update feedback loops,
//! - [`calculate_card_position`] places a floating information card next to a
//!   marker so it never covers the marker or leaves the visible area,
//! - [`DrawerController`] computes drag limits for the bottom-sheet panel
//!   from measured content height and a viewport fraction.
//!
//! The mapping library's camera and the hosting platform (frame scheduling,
//! resize observation, viewport metrics) are consumed through traits in
//! [`camera`] and [`platform`]; nothing here renders, routes, or persists.

pub mod camera;
pub mod core;
pub mod drawer;
pub mod overlay;
pub mod platform;
pub mod prelude;
pub mod sync;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    geo::{GeoBounds, GeoPoint, PixelPoint, PixelSize},
    options::{
        build_viewport_options, DeviceClass, DeviceTuning, GestureTuning, ViewportOptions,
        ZoomBounds,
    },
};

pub use crate::camera::{CameraTrigger, MapCamera};

pub use crate::platform::{
    FrameCallback, FrameScheduler, FrameToken, ManualFrameScheduler, SubscriptionToken,
    TriggerHandler, TriggerRegistry, ViewportMetrics,
};

pub use crate::sync::{CoordinateSync, MapSnapshot, SnapshotConsumer};

pub use crate::overlay::{calculate_card_position, CardLayout, CardPosition};

pub use crate::drawer::{
    ContentHandle, DragConstraints, DrawerAnimator, DrawerController, ResizeSource, ResizeTrigger,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, ViewportError>;

/// Common error types
///
/// The engine is total over its documented input domains; the only fallible
/// operation is viewport-option construction, which rejects non-finite input
/// instead of feeding NaN into the camera configuration.
#[derive(Debug, thiserror::Error)]
pub enum ViewportError {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
}

/// Error type alias for convenience
pub type Error = ViewportError;

//! Prelude module for common meetmap-viewport types and traits
//!
//! Re-exports the most commonly used types, traits, and functions for easy
//! importing with `use meetmap_viewport::prelude::*;`

pub use crate::core::{
    constants,
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
    measure_visible_height, ContentHandle, DragConstraints, DrawerAnimator, DrawerController,
    ResizeSource, ResizeTrigger,
};

pub use crate::{Error as ViewportError, Result};

pub use std::cell::{Cell, RefCell};
pub use std::rc::{Rc, Weak};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};

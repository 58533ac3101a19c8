//! Keeps a pixel-space snapshot of the camera state synchronized with
//! asynchronous pan/zoom events.
//!
//! Every delivered snapshot reflects strictly the most recent triggering
//! event; there is no queued backlog. A consumer is only invoked when at
//! least one snapshot field actually changed, which breaks the feedback loop
//! where delivering a snapshot triggers a re-render that re-triggers
//! delivery.

use crate::camera::{CameraTrigger, MapCamera};
use crate::core::geo::{GeoPoint, PixelPoint, PixelSize};
use crate::platform::{FrameScheduler, FrameToken, SubscriptionToken};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Pixel-space snapshot of the camera state
///
/// `marker_pixel` is `None` exactly when no geo coordinate was supplied to
/// track; an absent marker is never defaulted to a sentinel point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    pub map_size: PixelSize,
    pub map_center_pixel: PixelPoint,
    pub marker_pixel: Option<PixelPoint>,
}

impl MapSnapshot {
    pub fn with_marker(map_size: PixelSize, map_center_pixel: PixelPoint, marker_pixel: PixelPoint) -> Self {
        Self {
            map_size,
            map_center_pixel,
            marker_pixel: Some(marker_pixel),
        }
    }

    pub fn without_marker(map_size: PixelSize, map_center_pixel: PixelPoint) -> Self {
        Self {
            map_size,
            map_center_pixel,
            marker_pixel: None,
        }
    }
}

/// Callback receiving snapshot updates
pub type SnapshotConsumer = Box<dyn FnMut(&MapSnapshot)>;

/// Per-instance mutable record of the previously delivered values.
///
/// Fields are compared with exact equality and only changed fields are
/// updated, so a no-op recomputation never reaches the consumer.
#[derive(Default)]
struct SyncState {
    tracked: Option<GeoPoint>,
    last_size: Option<PixelSize>,
    last_center: Option<PixelPoint>,
    last_marker: Option<Option<PixelPoint>>,
    pending_frame: Option<FrameToken>,
    detached: bool,
}

/// Stateful unit bound to one map camera instance.
///
/// On attach it subscribes to the camera's move-end and zoom-end
/// notifications and schedules the initial snapshot for the next deferred
/// frame, so the camera has stable layout measurements before the first
/// delivery. [`CoordinateSync::detach`] (also run on drop) cancels the
/// pending frame and unsubscribes; no delivery ever occurs afterwards.
pub struct CoordinateSync {
    camera: Rc<dyn MapCamera>,
    scheduler: Rc<dyn FrameScheduler>,
    state: Rc<RefCell<SyncState>>,
    /// Sole strong reference; registered handlers hold weak ones, so the
    /// consumer dies with the instance
    _consumer: Rc<RefCell<SnapshotConsumer>>,
    subscriptions: Vec<SubscriptionToken>,
}

impl CoordinateSync {
    /// Attaches to a live camera and starts publishing snapshots to
    /// `consumer`. Pass `tracked` to also follow one geo coordinate in
    /// container pixels.
    pub fn attach(
        camera: Rc<dyn MapCamera>,
        tracked: Option<GeoPoint>,
        consumer: SnapshotConsumer,
        scheduler: Rc<dyn FrameScheduler>,
    ) -> Self {
        let state = Rc::new(RefCell::new(SyncState {
            tracked,
            ..SyncState::default()
        }));
        let consumer = Rc::new(RefCell::new(consumer));

        let subscriptions = [CameraTrigger::MoveEnd, CameraTrigger::ZoomEnd]
            .into_iter()
            .map(|trigger| {
                let recompute = Self::make_recompute(&camera, &state, &consumer);
                camera.subscribe(trigger, Rc::new(recompute))
            })
            .collect();

        // Initial snapshot waits for the next frame so layout has settled.
        let recompute = Self::make_recompute(&camera, &state, &consumer);
        let frame_state = Rc::downgrade(&state);
        let token = scheduler.request_frame(Box::new(move || {
            if let Some(state) = frame_state.upgrade() {
                state.borrow_mut().pending_frame = None;
            }
            recompute();
        }));
        state.borrow_mut().pending_frame = Some(token);

        log::debug!(
            "coordinate sync attached (tracked marker: {})",
            tracked.is_some()
        );

        Self {
            camera,
            scheduler,
            state,
            _consumer: consumer,
            subscriptions,
        }
    }

    /// Current drag-free view of the last delivered snapshot, if any
    pub fn last_snapshot(&self) -> Option<MapSnapshot> {
        let state = self.state.borrow();
        Some(MapSnapshot {
            map_size: state.last_size?,
            map_center_pixel: state.last_center?,
            marker_pixel: state.last_marker?,
        })
    }

    /// Tears down the instance: cancels the pending deferred frame and
    /// unsubscribes from camera notifications. Idempotent.
    pub fn detach(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.detached {
            return;
        }
        state.detached = true;
        if let Some(token) = state.pending_frame.take() {
            self.scheduler.cancel_frame(token);
        }
        drop(state);

        for token in self.subscriptions.drain(..) {
            self.camera.unsubscribe(token);
        }

        log::debug!("coordinate sync detached");
    }

    fn make_recompute(
        camera: &Rc<dyn MapCamera>,
        state: &Rc<RefCell<SyncState>>,
        consumer: &Rc<RefCell<SnapshotConsumer>>,
    ) -> impl Fn() + 'static {
        let camera = Rc::downgrade(camera);
        let state = Rc::downgrade(state);
        let consumer = Rc::downgrade(consumer);
        move || Self::recompute(&camera, &state, &consumer)
    }

    fn recompute(
        camera: &Weak<dyn MapCamera>,
        state: &Weak<RefCell<SyncState>>,
        consumer: &Weak<RefCell<SnapshotConsumer>>,
    ) {
        let (Some(camera), Some(state), Some(consumer)) =
            (camera.upgrade(), state.upgrade(), consumer.upgrade())
        else {
            return;
        };

        // Compute and compare inside the borrow, deliver outside it, so a
        // consumer that synchronously pokes the camera cannot alias state.
        let update = {
            let mut state = state.borrow_mut();
            if state.detached {
                return;
            }
            if !camera.is_ready() {
                log::trace!("camera not ready, skipping snapshot recomputation");
                return;
            }

            let map_size = camera.container_size();
            let map_center_pixel = camera.project(&camera.center());
            let marker_pixel = state.tracked.map(|point| camera.project(&point));

            let mut changed = false;
            if state.last_size != Some(map_size) {
                state.last_size = Some(map_size);
                changed = true;
            }
            if state.last_center != Some(map_center_pixel) {
                state.last_center = Some(map_center_pixel);
                changed = true;
            }
            if state.last_marker != Some(marker_pixel) {
                state.last_marker = Some(marker_pixel);
                changed = true;
            }

            changed.then_some(MapSnapshot {
                map_size,
                map_center_pixel,
                marker_pixel,
            })
        };

        if let Some(snapshot) = update {
            log::trace!("delivering map snapshot: {:?}", snapshot);
            if let Ok(mut consumer) = consumer.try_borrow_mut() {
                (consumer)(&snapshot);
            } else {
                log::debug!("snapshot consumer re-entered during delivery, dropping update");
            }
        }
    }
}

impl Drop for CoordinateSync {
    fn drop(&mut self) {
        self.detach();
    }
}

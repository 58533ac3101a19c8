//! Drag limits for the bottom-sheet panel listing nearby restaurants.
//!
//! Independent of the map state: the controller watches the panel's content
//! element and the window, and recomputes how far the sheet may be dragged
//! upward from its rest position. The rest position itself is anchored, so
//! the lower limit is always zero.

use crate::core::constants::DRAWER_VISIBLE_FRACTION;
use crate::platform::{
    FrameScheduler, FrameToken, SubscriptionToken, TriggerHandler, ViewportMetrics,
};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Vertical drag limits for the panel
///
/// `top` is the maximum upward drag distance (negative or zero); `bottom` is
/// always zero because the content is anchored at its rest position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragConstraints {
    pub top: f64,
    pub bottom: f64,
}

impl DragConstraints {
    /// Constraints for content that fits entirely inside the visible area
    pub fn resting() -> Self {
        Self {
            top: 0.0,
            bottom: 0.0,
        }
    }

    /// Constraints allowing `distance` pixels of upward drag
    pub fn with_drag_distance(distance: f64) -> Self {
        Self {
            top: -distance.max(0.0),
            bottom: 0.0,
        }
    }
}

impl Default for DragConstraints {
    fn default() -> Self {
        Self::resting()
    }
}

/// The panel's content element, as measured by the hosting platform
pub trait ContentHandle {
    /// False until the element has been laid out
    fn is_mounted(&self) -> bool;

    /// Measured box height of the content in pixels
    fn content_height(&self) -> f64;
}

/// Resize notifications the controller recomputes on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeTrigger {
    /// The observed content element's measured box changed
    Element,
    /// The window itself was resized
    Window,
}

/// Element/window resize observation, typically backed by a
/// [`TriggerRegistry`](crate::platform::TriggerRegistry)
pub trait ResizeSource {
    fn observe(&self, trigger: ResizeTrigger, handler: TriggerHandler) -> SubscriptionToken;
    fn unobserve(&self, token: SubscriptionToken);
}

/// External animation controller for the panel offset
pub trait DrawerAnimator {
    /// Animates the panel to the given vertical offset
    fn animate_offset(&self, offset: f64);
}

/// Visible height available to the drawer: the platform's visual-viewport
/// height when available, else the window's inner height, times the
/// minimum-visible fraction.
pub fn measure_visible_height(metrics: &dyn ViewportMetrics) -> f64 {
    let height = metrics
        .visual_viewport_height()
        .unwrap_or_else(|| metrics.window_inner_height());
    height * DRAWER_VISIBLE_FRACTION
}

struct DrawerState {
    constraints: DragConstraints,
    pending_frame: Option<FrameToken>,
    detached: bool,
}

/// Stateful unit bound to one content element.
///
/// Recalculation runs on element resize, window resize, and once on mount
/// via a deferred frame; all three routes converge on the same computation,
/// which is idempotent for unchanged inputs. Teardown (also on drop)
/// disconnects both observations and cancels the pending frame.
pub struct DrawerController {
    enabled: bool,
    content: Rc<dyn ContentHandle>,
    metrics: Rc<dyn ViewportMetrics>,
    resize: Rc<dyn ResizeSource>,
    animator: Rc<dyn DrawerAnimator>,
    scheduler: Rc<dyn FrameScheduler>,
    state: Rc<RefCell<DrawerState>>,
    subscriptions: Vec<SubscriptionToken>,
}

impl DrawerController {
    pub fn attach(
        enabled: bool,
        content: Rc<dyn ContentHandle>,
        metrics: Rc<dyn ViewportMetrics>,
        resize: Rc<dyn ResizeSource>,
        animator: Rc<dyn DrawerAnimator>,
        scheduler: Rc<dyn FrameScheduler>,
    ) -> Self {
        let state = Rc::new(RefCell::new(DrawerState {
            constraints: DragConstraints::resting(),
            pending_frame: None,
            detached: false,
        }));

        let subscriptions = [ResizeTrigger::Element, ResizeTrigger::Window]
            .into_iter()
            .map(|trigger| {
                let recalculate = Self::make_recalculate(enabled, &content, &metrics, &state);
                resize.observe(trigger, Rc::new(recalculate))
            })
            .collect();

        // First measurement waits a frame so the element has been laid out.
        let recalculate = Self::make_recalculate(enabled, &content, &metrics, &state);
        let frame_state = Rc::downgrade(&state);
        let token = scheduler.request_frame(Box::new(move || {
            if let Some(state) = frame_state.upgrade() {
                state.borrow_mut().pending_frame = None;
            }
            recalculate();
        }));
        state.borrow_mut().pending_frame = Some(token);

        log::debug!("drawer controller attached (enabled: {enabled})");

        Self {
            enabled,
            content,
            metrics,
            resize,
            animator,
            scheduler,
            state,
            subscriptions,
        }
    }

    /// The content element reference the owning view attaches
    pub fn content(&self) -> &Rc<dyn ContentHandle> {
        &self.content
    }

    /// Current drag limits
    pub fn drag_constraints(&self) -> DragConstraints {
        self.state.borrow().constraints
    }

    /// Forces a recomputation outside the usual triggers
    pub fn recalculate(&self) {
        Self::recalculate_impl(
            self.enabled,
            &Rc::downgrade(&self.content),
            &Rc::downgrade(&self.metrics),
            &Rc::downgrade(&self.state),
        );
    }

    /// Animates the panel back to its rest offset; no-op when disabled
    pub fn reset_position(&self) {
        if !self.enabled || self.state.borrow().detached {
            return;
        }
        self.animator.animate_offset(0.0);
    }

    /// Tears down the instance: disconnects resize observation and cancels
    /// the pending deferred frame. Idempotent.
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
            self.resize.unobserve(token);
        }

        log::debug!("drawer controller detached");
    }

    fn make_recalculate(
        enabled: bool,
        content: &Rc<dyn ContentHandle>,
        metrics: &Rc<dyn ViewportMetrics>,
        state: &Rc<RefCell<DrawerState>>,
    ) -> impl Fn() + 'static {
        let content = Rc::downgrade(content);
        let metrics = Rc::downgrade(metrics);
        let state = Rc::downgrade(state);
        move || Self::recalculate_impl(enabled, &content, &metrics, &state)
    }

    fn recalculate_impl(
        enabled: bool,
        content: &Weak<dyn ContentHandle>,
        metrics: &Weak<dyn ViewportMetrics>,
        state: &Weak<RefCell<DrawerState>>,
    ) {
        if !enabled {
            return;
        }
        let (Some(content), Some(metrics), Some(state)) =
            (content.upgrade(), metrics.upgrade(), state.upgrade())
        else {
            return;
        };

        let mut state = state.borrow_mut();
        if state.detached {
            return;
        }
        if !content.is_mounted() {
            log::trace!("drawer content not mounted, skipping recalculation");
            return;
        }

        let visible_height = measure_visible_height(&*metrics);
        let drag_distance = (content.content_height() - visible_height).max(0.0);
        state.constraints = DragConstraints::with_drag_distance(drag_distance);

        log::trace!("drawer drag constraints: {:?}", state.constraints);
    }
}

impl Drop for DrawerController {
    fn drop(&mut self) {
        self.detach();
    }
}

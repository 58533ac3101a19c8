//! Seams toward the hosting platform: deferred-frame scheduling, named
//! trigger tables, and viewport metrics.
//!
//! The engine is single-threaded and cooperative; "suspension" only ever
//! means deferring work to the next frame-paint boundary. Every schedule
//! hands back a cancellation token, and teardown must cancel unconditionally
//! so a detached instance never acts on a late frame.

use crate::prelude::HashMap;
use std::cell::RefCell;
use std::rc::Rc;

/// Callback deferred to just before the next repaint
pub type FrameCallback = Box<dyn FnOnce()>;

/// Cancellation token for a scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

/// Two-phase deferred-frame protocol: schedule returns a token, cancel is
/// called unconditionally at teardown even if the callback never fired.
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameToken;
    fn cancel_frame(&self, token: FrameToken);
}

/// Frame scheduler for headless hosts and tests: callbacks accumulate until
/// the owner pumps [`ManualFrameScheduler::run_frame`].
#[derive(Default)]
pub struct ManualFrameScheduler {
    inner: RefCell<SchedulerInner>,
}

#[derive(Default)]
struct SchedulerInner {
    next_id: u64,
    pending: Vec<(FrameToken, FrameCallback)>,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every callback scheduled so far, in order.
    ///
    /// Callbacks scheduled while the frame runs land in the next frame; the
    /// pending list is swapped out first so re-entrant scheduling is safe.
    pub fn run_frame(&self) {
        let pending = std::mem::take(&mut self.inner.borrow_mut().pending);
        for (_, callback) in pending {
            callback();
        }
    }

    pub fn pending_frames(&self) -> usize {
        self.inner.borrow().pending.len()
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameToken {
        let mut inner = self.inner.borrow_mut();
        let token = FrameToken(inner.next_id);
        inner.next_id += 1;
        inner.pending.push((token, callback));
        token
    }

    fn cancel_frame(&self, token: FrameToken) {
        self.inner.borrow_mut().pending.retain(|(t, _)| *t != token);
    }
}

/// Handler invoked when a named trigger fires
pub type TriggerHandler = Rc<dyn Fn()>;

/// Handle for one registered trigger handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

/// Explicit table of named triggers to handler functions.
///
/// Camera adapters and resize sources build their subscription mechanism on
/// this registry; a test double simply invokes the registered handlers via
/// [`TriggerRegistry::fire`]. Handlers are registered on attach and must be
/// unregistered on teardown.
pub struct TriggerRegistry<T> {
    next_id: u64,
    handlers: HashMap<u64, (T, TriggerHandler)>,
}

impl<T: Copy + PartialEq> TriggerRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, trigger: T, handler: TriggerHandler) -> SubscriptionToken {
        let id = self.next_id;
        self.next_id += 1;
        self.handlers.insert(id, (trigger, handler));
        SubscriptionToken(id)
    }

    pub fn unregister(&mut self, token: SubscriptionToken) {
        self.handlers.remove(&token.0);
    }

    /// Invokes every handler registered for `trigger`.
    ///
    /// The handler list is cloned first so a handler may re-enter the
    /// registry (e.g. to unregister itself) without aliasing trouble.
    pub fn fire(&self, trigger: T) {
        let to_run: Vec<TriggerHandler> = self
            .handlers
            .values()
            .filter(|(t, _)| *t == trigger)
            .map(|(_, handler)| Rc::clone(handler))
            .collect();

        for handler in to_run {
            handler();
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<T> Default for TriggerRegistry<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            handlers: HashMap::default(),
        }
    }
}

/// Visible-viewport measurements from the hosting platform
///
/// The visual viewport shrinks when an on-screen keyboard appears, so it is
/// preferred over the window height when available.
pub trait ViewportMetrics {
    fn visual_viewport_height(&self) -> Option<f64>;
    fn window_inner_height(&self) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_run_frame_drains_pending() {
        let scheduler = ManualFrameScheduler::new();
        let fired = Rc::new(Cell::new(0));

        let fired_clone = Rc::clone(&fired);
        scheduler.request_frame(Box::new(move || fired_clone.set(fired_clone.get() + 1)));
        assert_eq!(scheduler.pending_frames(), 1);

        scheduler.run_frame();
        assert_eq!(fired.get(), 1);
        assert_eq!(scheduler.pending_frames(), 0);

        // Nothing left to run
        scheduler.run_frame();
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_cancelled_frame_never_fires() {
        let scheduler = ManualFrameScheduler::new();
        let fired = Rc::new(Cell::new(false));

        let fired_clone = Rc::clone(&fired);
        let token = scheduler.request_frame(Box::new(move || fired_clone.set(true)));
        scheduler.cancel_frame(token);

        scheduler.run_frame();
        assert!(!fired.get());
    }

    #[test]
    fn test_frame_scheduled_during_frame_waits_for_next() {
        let scheduler = Rc::new(ManualFrameScheduler::new());
        let fired = Rc::new(Cell::new(0));

        let inner_scheduler = Rc::clone(&scheduler);
        let inner_fired = Rc::clone(&fired);
        scheduler.request_frame(Box::new(move || {
            let fired = Rc::clone(&inner_fired);
            inner_scheduler.request_frame(Box::new(move || fired.set(fired.get() + 10)));
            inner_fired.set(inner_fired.get() + 1);
        }));

        scheduler.run_frame();
        assert_eq!(fired.get(), 1);

        scheduler.run_frame();
        assert_eq!(fired.get(), 11);
    }

    #[test]
    fn test_registry_fires_matching_trigger_only() {
        #[derive(Debug, Clone, Copy, PartialEq)]
        enum Trigger {
            A,
            B,
        }

        let mut registry = TriggerRegistry::new();
        let count = Rc::new(Cell::new(0));

        let count_a = Rc::clone(&count);
        registry.register(Trigger::A, Rc::new(move || count_a.set(count_a.get() + 1)));
        let count_b = Rc::clone(&count);
        registry.register(Trigger::B, Rc::new(move || count_b.set(count_b.get() + 100)));

        registry.fire(Trigger::A);
        assert_eq!(count.get(), 1);

        registry.fire(Trigger::B);
        assert_eq!(count.get(), 101);
    }

    #[test]
    fn test_unregistered_handler_stops_firing() {
        #[derive(Debug, Clone, Copy, PartialEq)]
        struct Tick;

        let mut registry = TriggerRegistry::new();
        let count = Rc::new(Cell::new(0));

        let count_clone = Rc::clone(&count);
        let token = registry.register(Tick, Rc::new(move || count_clone.set(count_clone.get() + 1)));

        registry.fire(Tick);
        registry.unregister(token);
        registry.fire(Tick);

        assert_eq!(count.get(), 1);
        assert!(registry.is_empty());
    }
}

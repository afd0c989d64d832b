//! Viewport signal source
//!
//! The viewport is a passive external service: the host feeds it scroll and
//! resize notifications, sections read metrics from it on demand and
//! register listeners to be told about changes. Sections never own it.
//!
//! Listeners live in a slot arena. Registering returns a [`Subscription`]
//! handle; cancelling the handle (explicitly or by dropping it) removes the
//! listener, so a torn-down section can never be called back.
//!
//! Everything here runs on the host's UI thread, so shared state is
//! `Rc<RefCell<..>>` rather than `Arc<Mutex<..>>`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};

use crate::geometry::{Size, ViewportMetrics};

new_key_type! {
    /// Handle to a registered viewport listener
    pub struct ListenerId;
}

/// Change notifications delivered to listeners
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewportEvent {
    /// The document scroll offset changed
    Scrolled {
        /// New scroll offset in logical pixels
        offset: f32,
    },
    /// The viewport dimensions changed
    Resized {
        /// New width in logical pixels
        width: f32,
        /// New height in logical pixels
        height: f32,
    },
}

type Listener = Rc<RefCell<dyn FnMut(&ViewportEvent, ViewportMetrics)>>;

struct ViewportInner {
    metrics: ViewportMetrics,
    listeners: SlotMap<ListenerId, Listener>,
}

/// Shared handle to the viewport signal source (cheap to clone)
#[derive(Clone)]
pub struct Viewport {
    inner: Rc<RefCell<ViewportInner>>,
}

impl Viewport {
    /// Create a viewport with the given size, scrolled to the top
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ViewportInner {
                metrics: ViewportMetrics {
                    width,
                    height,
                    scroll_offset: 0.0,
                },
                listeners: SlotMap::with_key(),
            })),
        }
    }

    /// Create a viewport from a [`Size`]
    pub fn with_size(size: Size) -> Self {
        Self::new(size.width, size.height)
    }

    /// Current metrics
    pub fn metrics(&self) -> ViewportMetrics {
        self.inner.borrow().metrics
    }

    /// Register a listener for scroll and resize notifications
    ///
    /// The returned handle must be kept for as long as the listener should
    /// receive events. Dropping it unsubscribes.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&ViewportEvent, ViewportMetrics) + 'static,
    {
        let listener: Listener = Rc::new(RefCell::new(listener));
        let id = self.inner.borrow_mut().listeners.insert(listener);
        tracing::trace!(?id, "viewport listener registered");
        Subscription {
            id,
            source: Rc::downgrade(&self.inner),
        }
    }

    /// Number of live listeners
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Update the scroll offset and notify listeners
    ///
    /// Negative offsets clamp to 0. Non-finite offsets and unchanged offsets
    /// are ignored.
    pub fn scroll_to(&self, offset: f32) {
        if !offset.is_finite() {
            tracing::warn!(offset, "ignoring non-finite scroll offset");
            return;
        }
        let offset = offset.max(0.0);
        {
            let mut inner = self.inner.borrow_mut();
            if inner.metrics.scroll_offset == offset {
                return;
            }
            inner.metrics.scroll_offset = offset;
        }
        self.dispatch(ViewportEvent::Scrolled { offset });
    }

    /// Scroll by a delta relative to the current offset
    pub fn scroll_by(&self, delta: f32) {
        let current = self.metrics().scroll_offset;
        self.scroll_to(current + delta);
    }

    /// Update the viewport size and notify listeners
    ///
    /// Invalid sizes and unchanged sizes are ignored.
    pub fn resize(&self, width: f32, height: f32) {
        let size = match Size::try_new(width, height) {
            Ok(size) => size,
            Err(err) => {
                tracing::warn!(%err, "ignoring resize");
                return;
            }
        };
        {
            let mut inner = self.inner.borrow_mut();
            if inner.metrics.size() == size {
                return;
            }
            inner.metrics.width = size.width;
            inner.metrics.height = size.height;
        }
        self.dispatch(ViewportEvent::Resized {
            width: size.width,
            height: size.height,
        });
    }

    fn dispatch(&self, event: ViewportEvent) {
        // Snapshot listeners and release the borrow so callbacks may read
        // metrics, subscribe or cancel without re-entrancy panics.
        let (metrics, listeners): (ViewportMetrics, Vec<(ListenerId, Listener)>) = {
            let inner = self.inner.borrow();
            (
                inner.metrics,
                inner
                    .listeners
                    .iter()
                    .map(|(id, l)| (id, Rc::clone(l)))
                    .collect(),
            )
        };

        for (id, listener) in listeners {
            // A previous callback may have cancelled this one
            if !self.inner.borrow().listeners.contains_key(id) {
                continue;
            }
            match listener.try_borrow_mut() {
                Ok(mut callback) => (*callback)(&event, metrics),
                Err(_) => tracing::warn!(?id, "skipping re-entrant viewport listener"),
            };
        }
    }
}

/// Registration handle returned by [`Viewport::subscribe`]
///
/// Holds only a weak reference to the viewport, so it never keeps the
/// signal source alive on its own.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
    id: ListenerId,
    source: Weak<RefCell<ViewportInner>>,
}

impl Subscription {
    /// The listener's arena key
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Whether the listener is still registered with a live viewport
    pub fn is_active(&self) -> bool {
        self.source
            .upgrade()
            .map(|inner| inner.borrow().listeners.contains_key(self.id))
            .unwrap_or(false)
    }

    /// Explicitly unsubscribe
    pub fn cancel(self) {
        // Drop does the work
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(inner) = self.source.upgrade() else {
            return;
        };
        // The listener may own subscriptions of its own, so it is dropped
        // only after the borrow is released.
        let removed = match inner.try_borrow_mut() {
            Ok(mut inner) => inner.listeners.remove(self.id),
            Err(_) => {
                tracing::warn!(id = ?self.id, "viewport busy, listener left registered");
                return;
            }
        };
        if removed.is_some() {
            tracing::trace!(id = ?self.id, "viewport listener removed");
        }
        drop(removed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_scroll_notifies_listener() {
        let viewport = Viewport::new(1024.0, 768.0);
        let seen = Rc::new(Cell::new(0.0f32));

        let seen_in = seen.clone();
        let _sub = viewport.subscribe(move |event, _| {
            if let ViewportEvent::Scrolled { offset } = event {
                seen_in.set(*offset);
            }
        });

        viewport.scroll_to(250.0);
        assert_eq!(seen.get(), 250.0);
        assert_eq!(viewport.metrics().scroll_offset, 250.0);
    }

    #[test]
    fn test_unchanged_values_do_not_dispatch() {
        let viewport = Viewport::new(1024.0, 768.0);
        let count = Rc::new(Cell::new(0u32));

        let count_in = count.clone();
        let _sub = viewport.subscribe(move |_, _| count_in.set(count_in.get() + 1));

        viewport.scroll_to(0.0);
        viewport.resize(1024.0, 768.0);
        assert_eq!(count.get(), 0);

        viewport.resize(600.0, 768.0);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_negative_scroll_clamps_and_nan_ignored() {
        let viewport = Viewport::new(1024.0, 768.0);
        viewport.scroll_to(100.0);
        viewport.scroll_to(-50.0);
        assert_eq!(viewport.metrics().scroll_offset, 0.0);

        viewport.scroll_to(f32::NAN);
        assert_eq!(viewport.metrics().scroll_offset, 0.0);

        viewport.resize(-1.0, 10.0);
        assert_eq!(viewport.metrics().width, 1024.0);
    }

    #[test]
    fn test_drop_subscription_unsubscribes() {
        let viewport = Viewport::new(1024.0, 768.0);
        let count = Rc::new(Cell::new(0u32));

        let count_in = count.clone();
        let sub = viewport.subscribe(move |_, _| count_in.set(count_in.get() + 1));
        assert!(sub.is_active());
        assert_eq!(viewport.listener_count(), 1);

        sub.cancel();
        assert_eq!(viewport.listener_count(), 0);

        viewport.scroll_to(10.0);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_subscription_outlives_viewport() {
        let sub = {
            let viewport = Viewport::new(10.0, 10.0);
            viewport.subscribe(|_, _| {})
        };
        assert!(!sub.is_active());
        drop(sub);
    }

    #[test]
    fn test_listener_can_read_metrics_during_dispatch() {
        let viewport = Viewport::new(1024.0, 768.0);
        let reader = viewport.clone();
        let seen = Rc::new(Cell::new(0.0f32));

        let seen_in = seen.clone();
        let _sub = viewport.subscribe(move |_, _| {
            seen_in.set(reader.metrics().width);
        });

        viewport.resize(600.0, 768.0);
        assert_eq!(seen.get(), 600.0);
    }

    #[test]
    fn test_listener_cancelled_mid_dispatch_is_skipped() {
        let viewport = Viewport::new(1024.0, 768.0);
        let second_calls = Rc::new(Cell::new(0u32));
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let victim_in = victim.clone();
        let _first = viewport.subscribe(move |_, _| {
            victim_in.borrow_mut().take();
        });

        let calls_in = second_calls.clone();
        *victim.borrow_mut() =
            Some(viewport.subscribe(move |_, _| calls_in.set(calls_in.get() + 1)));

        viewport.scroll_to(5.0);
        assert_eq!(second_calls.get(), 0);
        assert_eq!(viewport.listener_count(), 1);
    }

    #[test]
    fn test_listener_owning_a_subscription_releases_it() {
        let viewport = Viewport::new(1024.0, 768.0);
        let nested = viewport.subscribe(|_, _| {});

        let outer = viewport.subscribe(move |_, _| {
            let _keep = &nested;
        });
        assert_eq!(viewport.listener_count(), 2);

        // Removing the outer listener drops the nested subscription too
        drop(outer);
        assert_eq!(viewport.listener_count(), 0);
    }
}

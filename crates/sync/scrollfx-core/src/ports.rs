//! Host-facing ports.
//!
//! The synchronizers never reach for a global document, scheduler or event
//! target. Adapters (the DOM crate, the test fakes) implement these traits and
//! hand them in at attach/bind time. Everything is single-threaded, so handles
//! take `&self` and hosts use interior mutability the way browser handles do.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::derive::Parity;
use crate::ids::ListenerId;

/// Callback invoked by a signal source. Hosts may call it any number of times
/// until it is unsubscribed.
pub type Listener = Rc<dyn Fn()>;

/// Work to run once, right before the next redraw.
pub type FrameTask = Box<dyn FnOnce()>;

/// Options for registering a scroll listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenOptions {
    /// Listener promises never to cancel the event, so scrolling is not blocked.
    pub passive: bool,
}

/// Continuous scroll signal plus the viewport metrics sampled alongside it.
pub trait ScrollSource {
    fn viewport_height(&self) -> f64;
    fn subscribe(&self, listener: Listener, options: ListenOptions) -> ListenerId;
    fn unsubscribe(&self, id: ListenerId);
}

/// An element whose transform follows the scroll position.
pub trait TrackedTarget {
    /// Bounding top relative to the viewport.
    fn top_offset(&self) -> f64;
    /// Tag the element with a parity class, replacing any previous one.
    fn set_parity(&self, parity: Parity);
    /// Write the rotation transform. Must not touch layout properties.
    fn set_rotation(&self, degrees: f64);
}

/// Supplies the qualifying element set. Queried once per attach.
pub trait ElementProvider {
    type Element: TrackedTarget;
    fn qualifying_elements(&self) -> Vec<Self::Element>;
}

/// "Run this before the next redraw."
pub trait FrameScheduler {
    /// Returns false when the host could not schedule the task; the task has
    /// then been dropped and will never run.
    fn request_frame(&self, task: FrameTask) -> bool;
}

/// Read side of a style variable (a slide).
pub trait StyleSource {
    /// Current value of `name`; empty when unset.
    fn style_var(&self, name: &str) -> String;
}

/// Write side of a style variable (the container).
pub trait StyleTarget {
    fn set_style_var(&self, name: &str, value: &str);
}

/// External carousel widget.
pub trait Carousel {
    type Slide: StyleSource;
    /// Slide currently displayed, if the carousel can report one.
    fn active_slide(&self) -> Option<Self::Slide>;
    fn subscribe_change(&self, listener: Listener) -> ListenerId;
    fn unsubscribe_change(&self, id: ListenerId);
}


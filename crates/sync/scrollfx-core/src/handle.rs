//! Teardown handle shared by both synchronizers.

use std::fmt;
use std::rc::Rc;

use crate::diagnostics::SyncStats;

/// A live subscription owned by a synchronizer.
pub(crate) trait Attachment {
    /// Remove the listener. Must be idempotent.
    fn detach(&self);
    fn is_attached(&self) -> bool;
    fn stats(&self) -> SyncStats;
}

/// Returned by [`crate::attach_parallax`] and [`crate::bind_color`].
///
/// `detach` removes the underlying listener exactly once; calling it again,
/// from any clone, does nothing. Never calling it is also fine: the
/// subscription then lives as long as the host's signal source.
#[derive(Clone, Default)]
pub struct DetachHandle {
    inner: Option<Rc<dyn Attachment>>,
}

impl DetachHandle {
    /// Handle for an attach that found nothing to do.
    pub(crate) fn noop() -> Self {
        Self { inner: None }
    }

    pub(crate) fn new(inner: Rc<dyn Attachment>) -> Self {
        Self { inner: Some(inner) }
    }

    pub fn detach(&self) {
        if let Some(inner) = &self.inner {
            inner.detach();
        }
    }

    pub fn is_attached(&self) -> bool {
        self.inner.as_ref().is_some_and(|i| i.is_attached())
    }

    /// True when attach registered nothing (for example, no qualifying elements).
    pub fn is_noop(&self) -> bool {
        self.inner.is_none()
    }

    pub fn stats(&self) -> SyncStats {
        self.inner.as_ref().map(|i| i.stats()).unwrap_or_default()
    }
}

impl fmt::Debug for DetachHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetachHandle")
            .field("noop", &self.is_noop())
            .field("attached", &self.is_attached())
            .finish()
    }
}

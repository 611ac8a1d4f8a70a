//! Parallax rotation synchronizer.
//!
//! Attach: collect the qualifying elements once, tag them odd/even by
//! position, register a passive scroll listener. Each scroll event derives a
//! rotation per visible element and stages it into the frame batch; the
//! staged values are written when the scheduled frame fires.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::batch::FrameBatch;
use crate::config::ParallaxConfig;
use crate::derive::{derive_rotation, Parity, ScrollSample};
use crate::diagnostics::SyncStats;
use crate::handle::{Attachment, DetachHandle};
use crate::ids::ListenerId;
use crate::ports::{ElementProvider, FrameScheduler, ListenOptions, ScrollSource, TrackedTarget};

#[derive(Debug)]
struct Tracked<E> {
    element: E,
    parity: Parity,
}

struct ParallaxState<E> {
    tracked: Vec<Tracked<E>>,
    max_degrees: f64,
    batch: FrameBatch<f64>,
    listener: Option<ListenerId>,
    attached: bool,
    stats: SyncStats,
}

struct ParallaxRuntime<E, S, F> {
    state: RefCell<ParallaxState<E>>,
    source: Rc<S>,
    frames: Rc<F>,
}

/// Attach the parallax effect to the provider's elements.
///
/// With no qualifying elements this registers nothing and returns a no-op
/// handle. The element set is never re-queried; elements added later are
/// not tracked.
pub fn attach_parallax<P, S, F>(
    provider: &P,
    source: Rc<S>,
    frames: Rc<F>,
    config: &ParallaxConfig,
) -> DetachHandle
where
    P: ElementProvider,
    P::Element: 'static,
    S: ScrollSource + 'static,
    F: FrameScheduler + 'static,
{
    let elements = provider.qualifying_elements();
    if elements.is_empty() {
        debug!("parallax: no qualifying elements, nothing attached");
        return DetachHandle::noop();
    }

    let tracked: Vec<_> = elements
        .into_iter()
        .enumerate()
        .map(|(i, element)| {
            let parity = Parity::from_index(i);
            element.set_parity(parity);
            Tracked { element, parity }
        })
        .collect();
    let count = tracked.len();

    let runtime = Rc::new(ParallaxRuntime {
        state: RefCell::new(ParallaxState {
            batch: FrameBatch::with_slots(count),
            tracked,
            max_degrees: config.max_rotation.degrees(),
            listener: None,
            attached: true,
            stats: SyncStats::default(),
        }),
        source: Rc::clone(&source),
        frames,
    });

    // The listener keeps the runtime alive until detach unsubscribes it.
    let rt = Rc::clone(&runtime);
    let id = source.subscribe(
        Rc::new(move || rt.on_scroll()),
        ListenOptions {
            passive: config.passive,
        },
    );
    runtime.state.borrow_mut().listener = Some(id);

    debug!(
        "parallax: attached to {count} elements (max rotation {}deg)",
        config.max_rotation.get()
    );
    DetachHandle::new(runtime)
}

impl<E, S, F> ParallaxRuntime<E, S, F>
where
    E: TrackedTarget + 'static,
    S: ScrollSource + 'static,
    F: FrameScheduler + 'static,
{
    fn on_scroll(self: &Rc<Self>) {
        let viewport_height = self.source.viewport_height();
        let needs_frame = {
            let mut guard = self.state.borrow_mut();
            let ParallaxState {
                tracked,
                max_degrees,
                batch,
                attached,
                stats,
                ..
            } = &mut *guard;
            if !*attached {
                return;
            }
            stats.signals += 1;
            for (slot, t) in tracked.iter().enumerate() {
                let sample = ScrollSample::new(t.element.top_offset(), viewport_height);
                match derive_rotation(sample, *max_degrees, t.parity) {
                    Some(rotation) => batch.stage(slot, rotation.degrees),
                    None => {
                        // Only the latest sample counts: drop anything staged
                        // while the element was still visible.
                        batch.unstage(slot);
                        stats.skipped_offscreen += 1;
                    }
                }
            }
            let claimed = batch.claim_frame();
            if claimed {
                stats.frames_requested += 1;
            }
            claimed
        };

        // Scheduled outside the borrow: a host may run the task synchronously.
        if needs_frame {
            let rt = Rc::clone(self);
            if !self.frames.request_frame(Box::new(move || rt.flush_frame())) {
                // Keep the staged values; the next scroll asks again.
                debug!("parallax: frame request refused, releasing claim");
                self.state.borrow_mut().batch.release_frame();
            }
        }
    }

    fn flush_frame(&self) {
        let mut guard = self.state.borrow_mut();
        let ParallaxState {
            tracked,
            batch,
            attached,
            stats,
            ..
        } = &mut *guard;
        let pending = batch.take_pending();
        if !*attached || pending.is_empty() {
            return;
        }
        for (slot, degrees) in pending {
            tracked[slot].element.set_rotation(degrees);
            stats.writes_applied += 1;
        }
        stats.frames_flushed += 1;
    }
}

impl<E, S, F> Attachment for ParallaxRuntime<E, S, F>
where
    E: TrackedTarget + 'static,
    S: ScrollSource + 'static,
    F: FrameScheduler + 'static,
{
    fn detach(&self) {
        let listener = {
            let mut st = self.state.borrow_mut();
            if !st.attached {
                return;
            }
            st.attached = false;
            st.batch.clear();
            st.listener.take()
        };
        if let Some(id) = listener {
            self.source.unsubscribe(id);
        }
        debug!("parallax: detached");
    }

    fn is_attached(&self) -> bool {
        self.state.borrow().attached
    }

    fn stats(&self) -> SyncStats {
        self.state.borrow().stats
    }
}

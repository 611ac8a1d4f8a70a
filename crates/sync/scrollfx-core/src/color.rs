//! Slider-to-container color synchronizer.
//!
//! Copies a style variable from the carousel's active slide onto a container:
//! once at bind, then again synchronously inside every slide-change event.
//! Reads and writes happen in the event handler, so the container always ends
//! up with the token of the slide that is active after the latest event.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};

use crate::config::ColorSyncConfig;
use crate::diagnostics::SyncStats;
use crate::error::{Result, SyncError};
use crate::handle::{Attachment, DetachHandle};
use crate::ids::ListenerId;
use crate::ports::{Carousel, StyleSource, StyleTarget};

struct ColorState {
    listener: Option<ListenerId>,
    bound: bool,
    stats: SyncStats,
}

struct ColorRuntime<C, T> {
    slider: Rc<C>,
    target: T,
    variable: String,
    state: RefCell<ColorState>,
}

/// Bind `target`'s color variable to `slider`'s active slide.
///
/// Fails when the slider cannot report an active slide at bind time. The
/// returned handle unbinds; dropping it without detaching keeps the binding
/// for the carousel's lifetime.
pub fn bind_color<C, T>(
    slider: Rc<C>,
    target: T,
    config: &ColorSyncConfig,
) -> Result<DetachHandle>
where
    C: Carousel + 'static,
    T: StyleTarget + 'static,
{
    let variable = config.variable.clone();
    let slide = slider
        .active_slide()
        .ok_or_else(|| SyncError::MissingActiveSlide {
            variable: variable.clone(),
        })?;
    let token = slide.style_var(&variable);
    target.set_style_var(&variable, &token);

    let runtime = Rc::new(ColorRuntime {
        slider: Rc::clone(&slider),
        target,
        variable,
        state: RefCell::new(ColorState {
            listener: None,
            bound: true,
            stats: SyncStats {
                writes_applied: 1,
                ..SyncStats::default()
            },
        }),
    });

    let rt = Rc::clone(&runtime);
    let id = slider.subscribe_change(Rc::new(move || rt.on_change()));
    runtime.state.borrow_mut().listener = Some(id);

    debug!("color sync: bound `{}` (initial {token:?})", runtime.variable);
    Ok(DetachHandle::new(runtime))
}

impl<C, T> ColorRuntime<C, T>
where
    C: Carousel,
    T: StyleTarget,
{
    fn on_change(&self) {
        if !self.state.borrow().bound {
            return;
        }
        let Some(slide) = self.slider.active_slide() else {
            warn!(
                "color sync: slide changed but no active slide is readable; `{}` left as is",
                self.variable
            );
            self.state.borrow_mut().stats.signals += 1;
            return;
        };
        let token = slide.style_var(&self.variable);
        self.target.set_style_var(&self.variable, &token);

        let mut st = self.state.borrow_mut();
        st.stats.signals += 1;
        st.stats.writes_applied += 1;
    }
}

impl<C, T> Attachment for ColorRuntime<C, T>
where
    C: Carousel,
    T: StyleTarget,
{
    fn detach(&self) {
        let listener = {
            let mut st = self.state.borrow_mut();
            if !st.bound {
                return;
            }
            st.bound = false;
            st.listener.take()
        };
        if let Some(id) = listener {
            self.slider.unsubscribe_change(id);
        }
        debug!("color sync: unbound `{}`", self.variable);
    }

    fn is_attached(&self) -> bool {
        self.state.borrow().bound
    }

    fn stats(&self) -> SyncStats {
        self.state.borrow().stats
    }
}

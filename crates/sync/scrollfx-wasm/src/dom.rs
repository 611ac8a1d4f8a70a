//! Browser implementations of the scroll-side ports.

use std::cell::RefCell;

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Document, HtmlElement, Window};

use scrollfx_core::{
    ElementProvider, FrameScheduler, FrameTask, IdAllocator, ListenOptions, Listener, ListenerId,
    Parity, RotationState, ScrollSource, StyleSource, StyleTarget, TrackedTarget,
};

/// A DOM element seen through the ports.
#[derive(Clone, Debug)]
pub struct DomElement(pub HtmlElement);

impl TrackedTarget for DomElement {
    fn top_offset(&self) -> f64 {
        self.0.get_bounding_client_rect().top()
    }

    fn set_parity(&self, parity: Parity) {
        let classes = self.0.class_list();
        for stale in ["odd", "even"] {
            if let Err(e) = classes.remove_1(stale) {
                warn!("parallax: could not remove class `{stale}`: {e:?}");
            }
        }
        if let Some(class) = parity.class_name() {
            if let Err(e) = classes.add_1(class) {
                warn!("parallax: could not add class `{class}`: {e:?}");
            }
        }
    }

    fn set_rotation(&self, degrees: f64) {
        let css = RotationState { degrees }.to_css();
        if let Err(e) = self.0.style().set_property("transform", &css) {
            warn!("parallax: could not set transform: {e:?}");
        }
    }
}

impl StyleSource for DomElement {
    fn style_var(&self, name: &str) -> String {
        web_sys::window()
            .and_then(|w| w.get_computed_style(&self.0).ok().flatten())
            .and_then(|style| style.get_property_value(name).ok())
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }
}

impl StyleTarget for DomElement {
    fn set_style_var(&self, name: &str, value: &str) {
        let style = self.0.style();
        let result = if value.is_empty() {
            style.remove_property(name).map(|_| ())
        } else {
            style.set_property(name, value)
        };
        if let Err(e) = result {
            warn!("color sync: could not write `{name}`: {e:?}");
        }
    }
}

/// Elements matching a CSS selector, queried once per attach.
pub struct DomQuery {
    pub document: Document,
    pub selector: String,
}

impl ElementProvider for DomQuery {
    type Element = DomElement;

    fn qualifying_elements(&self) -> Vec<DomElement> {
        let list = match self.document.query_selector_all(&self.selector) {
            Ok(list) => list,
            Err(e) => {
                warn!("parallax: bad selector `{}`: {e:?}", self.selector);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .map(DomElement)
            .collect()
    }
}

/// `window` scroll events. Closures stay registered here until unsubscribed.
pub struct WindowScroll {
    window: Window,
    ids: RefCell<IdAllocator>,
    listeners: RefCell<Vec<(ListenerId, Closure<dyn Fn()>)>>,
}

impl WindowScroll {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            ids: RefCell::new(IdAllocator::new()),
            listeners: RefCell::new(Vec::new()),
        }
    }
}

impl ScrollSource for WindowScroll {
    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn subscribe(&self, listener: Listener, options: ListenOptions) -> ListenerId {
        let id = self.ids.borrow_mut().alloc_listener();
        let closure = Closure::<dyn Fn()>::new(move || listener());
        let opts = AddEventListenerOptions::new();
        opts.set_passive(options.passive);
        if let Err(e) = self
            .window
            .add_event_listener_with_callback_and_add_event_listener_options(
                "scroll",
                closure.as_ref().unchecked_ref(),
                &opts,
            )
        {
            warn!("parallax: scroll listener not registered: {e:?}");
        }
        self.listeners.borrow_mut().push((id, closure));
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        let mut listeners = self.listeners.borrow_mut();
        if let Some(pos) = listeners.iter().position(|(lid, _)| *lid == id) {
            let (_, closure) = listeners.remove(pos);
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())
            {
                warn!("parallax: scroll listener not removed: {e:?}");
            }
        }
    }
}

/// `requestAnimationFrame`.
pub struct AnimationFrames {
    window: Window,
}

impl AnimationFrames {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for AnimationFrames {
    fn request_frame(&self, task: FrameTask) -> bool {
        let callback: JsValue = Closure::once_into_js(move || task());
        match self.window.request_animation_frame(callback.unchecked_ref()) {
            Ok(_) => true,
            Err(e) => {
                warn!("parallax: requestAnimationFrame failed: {e:?}");
                false
            }
        }
    }
}

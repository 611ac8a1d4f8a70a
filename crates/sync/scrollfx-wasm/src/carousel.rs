//! Carousel port over a Swiper-like JS object.
//!
//! Expected surface: `slides` (array-like of elements), `activeIndex`
//! (number), `on(event, fn)` and `off(event, fn)`. Missing pieces are
//! reported when the adapter is built, not on the first slide change.

use std::cell::RefCell;

use js_sys::{Function, Reflect};
use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use scrollfx_core::{Carousel, IdAllocator, Listener, ListenerId, SyncError};

use crate::dom::DomElement;

fn get(obj: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(obj, &JsValue::from_str(key))
        .ok()
        .filter(|v| !(v.is_undefined() || v.is_null()))
}

fn get_fn(obj: &JsValue, key: &str) -> Option<Function> {
    get(obj, key).and_then(|v| v.dyn_into::<Function>().ok())
}

/// `activeIndex` as an array index; anything but a finite, non-negative
/// whole number reads as "no active slide".
fn slide_index(raw: f64) -> Option<u32> {
    if raw.is_finite() && raw >= 0.0 && raw.fract() == 0.0 && raw <= f64::from(u32::MAX) {
        Some(raw as u32)
    } else {
        None
    }
}

pub struct JsCarousel {
    swiper: JsValue,
    event: JsValue,
    on: Function,
    off: Function,
    ids: RefCell<IdAllocator>,
    listeners: RefCell<Vec<(ListenerId, Closure<dyn Fn()>)>>,
}

impl JsCarousel {
    pub fn from_js(swiper: JsValue, event: &str) -> Result<Self, SyncError> {
        if !swiper.is_object() {
            return Err(SyncError::NotAnObject);
        }
        if get(&swiper, "slides").is_none() {
            return Err(SyncError::MissingCapability("slides"));
        }
        if get(&swiper, "activeIndex").is_none() {
            return Err(SyncError::MissingCapability("activeIndex"));
        }
        let on = get_fn(&swiper, "on").ok_or(SyncError::MissingCapability("on"))?;
        let off = get_fn(&swiper, "off").ok_or(SyncError::MissingCapability("off"))?;
        Ok(Self {
            swiper,
            event: JsValue::from_str(event),
            on,
            off,
            ids: RefCell::new(IdAllocator::new()),
            listeners: RefCell::new(Vec::new()),
        })
    }
}

impl Carousel for JsCarousel {
    type Slide = DomElement;

    fn active_slide(&self) -> Option<DomElement> {
        let raw = get(&self.swiper, "activeIndex")?.as_f64()?;
        let index = slide_index(raw)?;
        let slides = get(&self.swiper, "slides")?;
        get(&slides, &index.to_string())?
            .dyn_into::<HtmlElement>()
            .ok()
            .map(DomElement)
    }

    fn subscribe_change(&self, listener: Listener) -> ListenerId {
        let id = self.ids.borrow_mut().alloc_listener();
        let closure = Closure::<dyn Fn()>::new(move || listener());
        if let Err(e) = self.on.call2(&self.swiper, &self.event, closure.as_ref()) {
            warn!("color sync: carousel.on failed: {e:?}");
        }
        self.listeners.borrow_mut().push((id, closure));
        id
    }

    fn unsubscribe_change(&self, id: ListenerId) {
        let mut listeners = self.listeners.borrow_mut();
        if let Some(pos) = listeners.iter().position(|(lid, _)| *lid == id) {
            let (_, closure) = listeners.remove(pos);
            if let Err(e) = self.off.call2(&self.swiper, &self.event, closure.as_ref()) {
                warn!("color sync: carousel.off failed: {e:?}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::slide_index;

    #[test]
    fn slide_index_accepts_whole_non_negative_numbers() {
        assert_eq!(slide_index(0.0), Some(0));
        assert_eq!(slide_index(3.0), Some(3));
    }

    #[test]
    fn slide_index_rejects_unusable_numbers() {
        for raw in [f64::NAN, f64::INFINITY, -1.0, 1.5, -0.5, 1e12] {
            assert_eq!(slide_index(raw), None, "raw={raw}");
        }
    }
}

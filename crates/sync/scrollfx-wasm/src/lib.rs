use std::rc::Rc;

use serde::Deserialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use scrollfx_core::{
    attach_parallax as attach_core, bind_color, ColorSyncConfig, DetachHandle, MaxRotation,
    ParallaxConfig,
};

pub mod carousel;
pub mod dom;

use carousel::JsCarousel;
use dom::{AnimationFrames, DomElement, DomQuery, WindowScroll};

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn init_panic_hook() {
    #[cfg(feature = "console_error")]
    console_error_panic_hook::set_once();
}

/// Options accepted by [`attach_parallax`]. All fields optional.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct ParallaxOptions {
    selector: String,
    passive: bool,
}

impl Default for ParallaxOptions {
    fn default() -> Self {
        Self {
            selector: ".gallery-item".to_string(),
            passive: ParallaxConfig::default().passive,
        }
    }
}

/// Options accepted by [`bind_slider_color`]. All fields optional.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct SliderOptions {
    variable: String,
    event: String,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            variable: ColorSyncConfig::default().variable,
            event: "slideChange".to_string(),
        }
    }
}

fn parse_options<T>(v: JsValue, what: &str) -> Result<T, JsError>
where
    T: Default + for<'de> Deserialize<'de>,
{
    if jsvalue_is_undefined_or_null(&v) {
        Ok(T::default())
    } else {
        swb::from_value(v).map_err(|e| JsError::new(&format!("{what} options error: {e}")))
    }
}

/// Anything that cannot be read as JSON (NaN, objects with functions, ...)
/// coerces to the fallback cap.
fn coerce_max_rotation(raw: JsValue) -> MaxRotation {
    if raw.is_undefined() {
        return MaxRotation::DEFAULT;
    }
    if let Some(n) = raw.as_f64() {
        return MaxRotation::from_f64(n);
    }
    swb::from_value::<serde_json::Value>(raw)
        .map(MaxRotation::from)
        .unwrap_or(MaxRotation::FALLBACK)
}

/// Teardown handle returned to JS by both effects.
#[wasm_bindgen]
pub struct SyncHandle {
    inner: DetachHandle,
}

#[wasm_bindgen]
impl SyncHandle {
    /// Remove the listener. Safe to call repeatedly.
    #[wasm_bindgen]
    pub fn detach(&self) {
        self.inner.detach();
    }

    #[wasm_bindgen(js_name = is_attached)]
    pub fn is_attached(&self) -> bool {
        self.inner.is_attached()
    }

    /// Counters as `{ signals, frames_requested, frames_flushed, writes_applied,
    /// skipped_offscreen }`.
    #[wasm_bindgen]
    pub fn stats(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.inner.stats()).map_err(|e| JsError::new(&format!("stats error: {e}")))
    }
}

/// Rotate every element matching `options.selector` (default `.gallery-item`)
/// as it scrolls into view. `max_rotation` defaults to 30 when undefined and
/// falls back to 5 when it is not a positive number.
/// Example:
///   const h = attach_parallax(30, { selector: ".gallery img" }); h.detach();
#[wasm_bindgen(js_name = attach_parallax)]
pub fn attach_parallax(max_rotation: JsValue, options: JsValue) -> Result<SyncHandle, JsError> {
    init_panic_hook();
    let opts: ParallaxOptions = parse_options(options, "parallax")?;
    let window = web_sys::window().ok_or_else(|| JsError::new("attach_parallax: no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsError::new("attach_parallax: no document"))?;

    let config = ParallaxConfig {
        max_rotation: coerce_max_rotation(max_rotation),
        passive: opts.passive,
    };
    let provider = DomQuery {
        document,
        selector: opts.selector,
    };
    let inner = attach_core(
        &provider,
        Rc::new(WindowScroll::new(window.clone())),
        Rc::new(AnimationFrames::new(window)),
        &config,
    );
    Ok(SyncHandle { inner })
}

/// Keep `container`'s color variable equal to the active slide's.
/// `slider` is a Swiper-like object (`slides`, `activeIndex`, `on`, `off`).
/// Fails when the slider lacks one of those or has no active slide.
#[wasm_bindgen(js_name = bind_slider_color)]
pub fn bind_slider_color(
    slider: JsValue,
    container: HtmlElement,
    options: JsValue,
) -> Result<SyncHandle, JsError> {
    init_panic_hook();
    let opts: SliderOptions = parse_options(options, "slider")?;
    let carousel = JsCarousel::from_js(slider, &opts.event)
        .map_err(|e| JsError::new(&format!("bind_slider_color: {e}")))?;
    let config = ColorSyncConfig {
        variable: opts.variable,
    };
    let inner = bind_color(Rc::new(carousel), DomElement(container), &config)
        .map_err(|e| JsError::new(&format!("bind_slider_color: {e}")))?;
    Ok(SyncHandle { inner })
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}

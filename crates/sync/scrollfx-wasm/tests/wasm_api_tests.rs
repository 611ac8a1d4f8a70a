#![cfg(target_arch = "wasm32")]
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

use scrollfx_wasm::{abi_version, attach_parallax, bind_slider_color};

wasm_bindgen_test_configure!(run_in_browser);

const VAR: &str = "--swiper-pagination-color";

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn make_div(class: &str) -> HtmlElement {
    let el: HtmlElement = document().create_element("div").unwrap().unchecked_into();
    el.set_class_name(class);
    document().body().unwrap().append_child(&el).unwrap();
    el
}

/// Minimal Swiper stand-in: `on`/`off` keep one handler per event.
fn fake_swiper(slides: &Array) -> Object {
    let swiper = Object::new();
    Reflect::set(&swiper, &"slides".into(), slides).unwrap();
    Reflect::set(&swiper, &"activeIndex".into(), &JsValue::from_f64(0.0)).unwrap();
    let on = Function::new_with_args("ev, fn", "this.handler = fn;");
    let off = Function::new_with_args("ev, fn", "if (this.handler === fn) this.handler = null;");
    Reflect::set(&swiper, &"on".into(), &on).unwrap();
    Reflect::set(&swiper, &"off".into(), &off).unwrap();
    swiper
}

fn selector_opts(selector: &str) -> JsValue {
    serde_wasm_bindgen::to_value(&serde_json::json!({ "selector": selector })).unwrap()
}

fn fire_change(swiper: &Object, index: u32) {
    Reflect::set(swiper, &"activeIndex".into(), &JsValue::from(index)).unwrap();
    let handler = Reflect::get(swiper, &"handler".into()).unwrap();
    if let Ok(f) = handler.dyn_into::<Function>() {
        f.call1(swiper, swiper).unwrap();
    }
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn parallax_without_matches_is_a_noop() {
    let opts = selector_opts(".nothing-here");
    let handle = attach_parallax(JsValue::UNDEFINED, opts).unwrap();
    assert!(!handle.is_attached());
    handle.detach();
    handle.detach();
}

#[wasm_bindgen_test]
fn parallax_tags_parity_and_detaches() {
    let items: Vec<_> = (0..4).map(|_| make_div("wasm-gallery")).collect();
    let opts = selector_opts(".wasm-gallery");
    let handle = attach_parallax(JsValue::from_str("abc"), opts).unwrap();
    assert!(handle.is_attached());

    let classes: Vec<bool> = items.iter().map(|el| el.class_list().contains("odd")).collect();
    assert_eq!(classes, vec![false, true, false, true]);
    assert!(items[0].class_list().contains("even"));

    handle.detach();
    handle.detach();
    assert!(!handle.is_attached());
    for el in items {
        el.remove();
    }
}

#[wasm_bindgen_test]
fn slider_color_initial_sync_and_change() {
    let red = make_div("slide");
    red.style().set_property(VAR, "red").unwrap();
    let blue = make_div("slide");
    blue.style().set_property(VAR, "blue").unwrap();
    let container = make_div("bullets");

    let slides = Array::of2(&red, &blue);
    let swiper = fake_swiper(&slides);
    let handle =
        bind_slider_color(swiper.clone().into(), container.clone(), JsValue::UNDEFINED).unwrap();
    assert_eq!(container.style().get_property_value(VAR).unwrap(), "red");

    fire_change(&swiper, 1);
    assert_eq!(container.style().get_property_value(VAR).unwrap(), "blue");

    handle.detach();
    fire_change(&swiper, 0);
    assert_eq!(container.style().get_property_value(VAR).unwrap(), "blue");
}

#[wasm_bindgen_test]
fn slider_without_on_fails_fast() {
    let slides = Array::new();
    let swiper = Object::new();
    Reflect::set(&swiper, &"slides".into(), &slides).unwrap();
    Reflect::set(&swiper, &"activeIndex".into(), &JsValue::from_f64(0.0)).unwrap();
    let container = make_div("bullets");
    assert!(bind_slider_color(swiper.into(), container, JsValue::UNDEFINED).is_err());
}

#[wasm_bindgen_test]
fn slider_with_fractional_active_index_fails_fast() {
    let slide = make_div("slide");
    let swiper = fake_swiper(&Array::of1(&slide));
    Reflect::set(&swiper, &"activeIndex".into(), &JsValue::from_f64(0.5)).unwrap();
    let container = make_div("bullets");
    assert!(bind_slider_color(swiper.into(), container, JsValue::UNDEFINED).is_err());
}

#[wasm_bindgen_test]
fn slider_that_is_not_an_object_fails_fast() {
    let container = make_div("bullets");
    assert!(bind_slider_color(JsValue::from_f64(3.0), container, JsValue::UNDEFINED).is_err());
}

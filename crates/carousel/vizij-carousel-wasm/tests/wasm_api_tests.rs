#![cfg(target_arch = "wasm32")]
use serde_wasm_bindgen as swb;
use vizij_carousel_wasm::{abi_version, init_logging, slide_widths, VizijCarousel};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use serde::Serialize;
use serde_json::{json, Value};

wasm_bindgen_test_configure!(run_in_browser);

// Five 300px slides, 20px spacing from settings, 640px viewport.
fn five_slides() -> js_sys::Function {
    js_sys::Function::new_no_args("return { containerWidth: 640, slideWidths: [300, 300, 300, 300, 300] };")
}

fn settings(loop_: bool) -> JsValue {
    JsValue::from_str(
        &json!({
            "autoplay": false,
            "autoplaySpeed": 3000,
            "loop": loop_,
            "slideSpacing": { "size": 20, "unit": "px" },
            "transitionSpeed": 500
        })
        .to_string(),
    )
}

fn js(v: Value) -> JsValue {
    v.serialize(&swb::Serializer::json_compatible()).unwrap()
}

fn to_json(v: JsValue) -> Value {
    swb::from_value(v).unwrap()
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn logging_accepts_known_levels_only() {
    assert!(init_logging(Some("debug".into())).is_ok());
    assert!(init_logging(None).is_ok());
    assert!(init_logging(Some("chatty".into())).is_err());
}

#[wasm_bindgen_test]
fn rejects_zero_autoplay_speed() {
    let bad = JsValue::from_str(r#"{"autoplay":true,"autoplaySpeed":0}"#);
    assert!(VizijCarousel::new(bad, five_slides(), JsValue::UNDEFINED).is_err());
}

#[wasm_bindgen_test]
fn mount_and_navigate() {
    let mut c = VizijCarousel::new(settings(false), five_slides(), JsValue::UNDEFINED).unwrap();
    let out = to_json(c.mount().unwrap());
    let events = out["events"].as_array().unwrap();
    assert!(events.iter().any(|e| e["event"] == "mounted"));

    c.go_to(3).unwrap();
    let view = to_json(c.view().unwrap());
    assert_eq!(view["transform"], 960.0);
    assert_eq!(view["next_disabled"], true);

    let out = to_json(c.next().unwrap());
    assert_eq!(c.current_index(), 4);
    let changes = out["changes"].as_array().unwrap();
    assert_eq!(changes[0]["op"], "set_transition");
    assert_eq!(changes[1]["op"], "set_transform");
}

#[wasm_bindgen_test]
fn drag_events_from_a_bare_array() {
    let mut c = VizijCarousel::new(settings(true), five_slides(), JsValue::UNDEFINED).unwrap();
    c.mount().unwrap();
    let events = js(json!([
        { "type": "pointer_down", "x": 100.0 },
        { "type": "pointer_move", "x": 130.0 }
    ]));
    c.update(0.0, events).unwrap();
    let view = to_json(c.view().unwrap());
    assert_eq!(view["grabbing"], true);
    assert!(view["transition_ms"].is_null());
    assert!((view["transform"].as_f64().unwrap() + 9.0).abs() < 1e-9);

    let up = js(json!({ "events": [{ "type": "pointer_up" }] }));
    c.update(0.0, up).unwrap();
    assert_eq!(c.current_index(), 0);
}

#[wasm_bindgen_test]
fn destroy_is_terminal() {
    let mut c = VizijCarousel::new(settings(false), five_slides(), JsValue::UNDEFINED).unwrap();
    c.mount().unwrap();
    let out = to_json(c.destroy().unwrap());
    let events = out["events"].as_array().unwrap();
    assert!(events.iter().any(|e| e["event"] == "listeners_detached"));
    assert!(c.is_destroyed());

    let out = to_json(c.next().unwrap());
    assert!(out["changes"].as_array().unwrap().is_empty());
    assert!(out["events"].as_array().unwrap().is_empty());
}

#[wasm_bindgen_test]
fn sizing_uses_metadata_for_original_ratio() {
    let specs = js(json!([
        { "kind": "image", "aspect_ratio": "1-1" },
        { "kind": "image", "aspect_ratio": "original", "media_id": 7 },
        { "kind": "template", "template_width": 250 }
    ]));
    let meta = js(json!([{ "id": 7, "width": 1200, "height": 800 }]));
    let widths = slide_widths(specs, 400.0, meta).unwrap();
    assert_eq!(widths, vec![400.0, 600.0, 250.0]);
}

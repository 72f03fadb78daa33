use std::cell::RefCell;

use js_sys::{Array, Function};
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use vizij_carousel_core::{
    slide_width, Carousel, Config, FixedLayout, InputEvent, Inputs, MetadataTable, Settings,
    SlideLayout, SlideSpec,
};

mod logging;

#[wasm_bindgen]
pub struct VizijCarousel {
    core: Carousel,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Serialize with `null` for `None`, so a suspended transition survives the trip to JS.
fn to_js<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<JsValue, JsError> {
    value
        .serialize(&swb::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("{what} error: {e}")))
}

fn parse_settings(value: JsValue) -> Result<Settings, JsError> {
    if jsvalue_is_undefined_or_null(&value) {
        return Ok(Settings::default());
    }
    // The container attribute holds a JSON string; objects are accepted too.
    if let Some(s) = value.as_string() {
        return Settings::from_json(&s).map_err(|e| JsError::new(&format!("settings error: {e}")));
    }
    let settings: Settings =
        swb::from_value(value).map_err(|e| JsError::new(&format!("settings error: {e}")))?;
    settings
        .validate()
        .map_err(|e| JsError::new(&format!("settings error: {e}")))?;
    Ok(settings)
}

fn parse_inputs(value: JsValue) -> Result<Inputs, JsError> {
    if jsvalue_is_undefined_or_null(&value) {
        return Ok(Inputs::default());
    }
    if Array::is_array(&value) {
        let events: Vec<InputEvent> =
            swb::from_value(value).map_err(|e| JsError::new(&format!("inputs error: {e}")))?;
        return Ok(Inputs::new(events));
    }
    swb::from_value(value).map_err(|e| JsError::new(&format!("inputs error: {e}")))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Measurement {
    container_width: f64,
    slide_widths: Vec<f64>,
    #[serde(default)]
    spacing: Option<f64>,
}

/// Layout read through a JS `measure()` callback returning
/// `{ containerWidth, slideWidths, spacing? }`. Missing spacing falls back to the
/// settings' `slideSpacing`.
struct JsMeasurer {
    f: Function,
    default_spacing: f64,
    last: RefCell<FixedLayout>,
}

impl JsMeasurer {
    fn read(&self) -> Result<FixedLayout, String> {
        let val = self
            .f
            .call0(&JsValue::UNDEFINED)
            .map_err(|e| format!("measure threw: {e:?}"))?;
        if jsvalue_is_undefined_or_null(&val) {
            return Err("measure returned null/undefined".to_string());
        }
        let m: Measurement = swb::from_value(val).map_err(|e| e.to_string())?;
        Ok(FixedLayout::new(
            m.container_width,
            m.slide_widths,
            m.spacing.unwrap_or(self.default_spacing),
        ))
    }
}

impl SlideLayout for JsMeasurer {
    fn refresh(&self) {
        match self.read() {
            Ok(layout) => *self.last.borrow_mut() = layout,
            Err(e) => log::warn!("keeping previous layout: {e}"),
        }
    }

    fn container_width(&self) -> f64 {
        self.last.borrow().container_width
    }

    fn slide_count(&self) -> usize {
        self.last.borrow().slide_widths.len()
    }

    fn slide_outer_width(&self, index: usize) -> f64 {
        self.last.borrow().slide_outer_width(index)
    }
}

#[wasm_bindgen]
impl VizijCarousel {
    /// Create a carousel bound to a container.
    ///
    /// `settings` is the container's settings JSON (string or object, undefined for
    /// defaults). `measure` is called on every geometry pass and must return
    /// `{ containerWidth, slideWidths: number[], spacing?: number }`. `config`
    /// optionally overrides engine tunables such as `drag_threshold_px`.
    /// Example:
    ///   new VizijCarousel('{"loop":true}', () => ({ containerWidth: 640, slideWidths: [300, 300] }))
    #[wasm_bindgen(constructor)]
    pub fn new(
        settings: JsValue,
        measure: Function,
        config: JsValue,
    ) -> Result<VizijCarousel, JsError> {
        console_error_panic_hook::set_once();

        let settings = parse_settings(settings)?;
        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let measurer = JsMeasurer {
            f: measure,
            default_spacing: settings.spacing_px(),
            last: RefCell::new(FixedLayout::default()),
        };
        Ok(VizijCarousel {
            core: Carousel::new(settings, measurer).with_config(cfg),
        })
    }

    /// Attach listeners, render the first slide and start autoplay. Returns Outputs JSON.
    #[wasm_bindgen]
    pub fn mount(&mut self) -> Result<JsValue, JsError> {
        to_js(self.core.mount(), "outputs")
    }

    /// Apply input events (`{ events: [...] }` or a bare array) and advance timers by
    /// `dt_ms` milliseconds. Returns Outputs JSON.
    #[wasm_bindgen]
    pub fn update(&mut self, dt_ms: f64, inputs: JsValue) -> Result<JsValue, JsError> {
        let inputs = parse_inputs(inputs)?;
        to_js(self.core.update(dt_ms, inputs), "outputs")
    }

    #[wasm_bindgen(js_name = go_to)]
    pub fn go_to(&mut self, index: u32) -> Result<JsValue, JsError> {
        to_js(self.core.go_to(index as usize), "outputs")
    }

    #[wasm_bindgen]
    pub fn prev(&mut self) -> Result<JsValue, JsError> {
        to_js(self.core.prev(), "outputs")
    }

    #[wasm_bindgen]
    pub fn next(&mut self) -> Result<JsValue, JsError> {
        to_js(self.core.next(), "outputs")
    }

    #[wasm_bindgen(js_name = start_autoplay)]
    pub fn start_autoplay(&mut self) -> Result<JsValue, JsError> {
        to_js(self.core.start_autoplay(), "outputs")
    }

    #[wasm_bindgen(js_name = stop_autoplay)]
    pub fn stop_autoplay(&mut self) -> Result<JsValue, JsError> {
        to_js(self.core.stop_autoplay(), "outputs")
    }

    /// Re-measure immediately. Returns the new geometry snapshot JSON; render
    /// changes are available from `last_outputs()`.
    #[wasm_bindgen(js_name = recompute_geometry)]
    pub fn recompute_geometry(&mut self) -> Result<JsValue, JsError> {
        to_js(self.core.recompute_geometry(), "geometry")
    }

    /// Outputs produced by the most recent call.
    #[wasm_bindgen(js_name = last_outputs)]
    pub fn last_outputs(&self) -> Result<JsValue, JsError> {
        to_js(self.core.outputs(), "outputs")
    }

    #[wasm_bindgen(js_name = current_index)]
    pub fn current_index(&self) -> u32 {
        self.core.current_index() as u32
    }

    /// Projected view state (transform, transition, active dot, button flags, grabbing).
    #[wasm_bindgen]
    pub fn view(&self) -> Result<JsValue, JsError> {
        to_js(self.core.view(), "view")
    }

    #[wasm_bindgen]
    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(self.core.state(), "state")
    }

    #[wasm_bindgen(js_name = is_destroyed)]
    pub fn is_destroyed(&self) -> bool {
        self.core.is_destroyed()
    }

    /// Stop timers, detach listeners and end any drag. Returns Outputs JSON.
    #[wasm_bindgen]
    pub fn destroy(&mut self) -> Result<JsValue, JsError> {
        to_js(self.core.destroy(), "outputs")
    }
}

#[derive(Deserialize)]
struct MediaSize {
    id: u64,
    width: f64,
    height: f64,
}

/// Content widths for `specs` rendered at `height` pixels.
/// `metadata` is an optional array of `{ id, width, height }` natural media sizes.
#[wasm_bindgen(js_name = slide_widths)]
pub fn slide_widths(specs: JsValue, height: f64, metadata: JsValue) -> Result<Vec<f64>, JsError> {
    let specs: Vec<SlideSpec> =
        swb::from_value(specs).map_err(|e| JsError::new(&format!("slides error: {e}")))?;
    let mut table = MetadataTable::new();
    if !jsvalue_is_undefined_or_null(&metadata) {
        let sizes: Vec<MediaSize> = swb::from_value(metadata)
            .map_err(|e| JsError::new(&format!("metadata error: {e}")))?;
        for m in sizes {
            table.insert(m.id, m.width, m.height);
        }
    }
    Ok(specs
        .iter()
        .map(|spec| slide_width(spec, height, &table))
        .collect())
}

/// Route `log` output to the browser console. `level` defaults to `info`.
#[wasm_bindgen(js_name = init_logging)]
pub fn init_logging(level: Option<String>) -> Result<(), JsError> {
    console_error_panic_hook::set_once();
    let filter = logging::parse_level(level.as_deref()).map_err(|e| JsError::new(&e))?;
    logging::install(filter);
    Ok(())
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}

mod config;
mod debounce;
mod entity;
mod error;
mod format;
mod icons;
mod presenter;
mod render;

pub use config::{CardConfig, DetailConfig};
pub use debounce::Debounce;
pub use entity::{EntityView, domain_of};
pub use error::PresentError;
pub use format::{FormatStyle, MAX_DECIMALS, ValueHint, format_attribute, format_axis_tick, format_number, format_state};
pub use icons::{
    UNIT_ICON_RULES, UnitIconRule, domain_icon, normalize_icon, normalize_icon_value,
    resolve_icon_class, resolve_icon_class_json, unit_icon, unit_rule,
};
pub use presenter::CardPresenter;
pub use render::RenderSpec;

use wasm_bindgen::prelude::*;

/// Normalize an icon name to `mdi mdi-<name>`.
/// `null`, `undefined` and non-strings are returned unchanged.
#[wasm_bindgen(js_name = normalizeIcon)]
pub fn normalize_icon_js(icon: JsValue) -> JsValue {
    match icon.as_string() {
        Some(s) => JsValue::from_str(&icons::normalize_icon(&s)),
        None => icon,
    }
}

/// Icon class for an entity given as JSON, or `undefined` when none applies.
#[wasm_bindgen(js_name = resolveIconClass)]
pub fn resolve_icon_class_js(entity_json: Option<String>, entity_id: Option<String>) -> Option<String> {
    icons::resolve_icon_class_json(entity_json.as_deref()?, entity_id.as_deref())
}

/// Format a raw state for display.
/// `style` is one of "display", "compact", "whole"; anything else means "display".
#[wasm_bindgen(js_name = formatValue)]
pub fn format_value_js(
    state: &str,
    unit: Option<String>,
    device_class: Option<String>,
    style: Option<String>,
) -> String {
    let hint = ValueHint {
        unit: unit.as_deref(),
        device_class: device_class.as_deref(),
    };
    format::format_state(state, &hint, parse_style(style.as_deref()))
}

#[wasm_bindgen(js_name = formatAxisTick)]
pub fn format_axis_tick_js(value: f64) -> String {
    format::format_axis_tick(value)
}

fn parse_style(style: Option<&str>) -> FormatStyle {
    let Some(style) = style else {
        return FormatStyle::default();
    };
    serde_json::from_value(serde_json::Value::String(style.to_string())).unwrap_or_else(|e| {
        tracing::warn!(style, error = %e, "unknown format style, using display");
        FormatStyle::default()
    })
}

/// The WASM-exposed presenter for one card.
/// TypeScript creates one of these per card and feeds it entity updates.
#[wasm_bindgen]
pub struct WasmCardPresenter {
    inner: CardPresenter,
}

#[wasm_bindgen]
impl WasmCardPresenter {
    /// Create a presenter from the card's JSON config.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmCardPresenter, JsError> {
        let inner = CardPresenter::from_json(config_json).map_err(|e| {
            tracing::warn!(error = %e, "rejecting card config");
            JsError::new(&e.to_string())
        })?;
        Ok(Self { inner })
    }

    /// Render an entity (hub JSON) and return a JSON render spec.
    #[wasm_bindgen]
    pub fn present(&self, entity_json: &str) -> String {
        self.inner.present_json(entity_json).to_json()
    }

    /// The entity id this card renders.
    #[wasm_bindgen(getter)]
    pub fn entity(&self) -> String {
        self.inner.config().entity.clone()
    }

    /// A debounced input cell using the card's configured delay.
    #[wasm_bindgen]
    pub fn debounce(&self) -> WasmDebounce {
        WasmDebounce::new(self.inner.config().debounce_ms)
    }
}

/// A debounced string cell. The host owns the timer: call `set` on input,
/// schedule a timeout for `deadline`, call `poll` when it fires, and
/// `cancel` on teardown.
#[wasm_bindgen]
pub struct WasmDebounce {
    inner: Debounce<String>,
}

#[wasm_bindgen]
impl WasmDebounce {
    #[wasm_bindgen(constructor)]
    pub fn new(delay_ms: f64) -> Self {
        Self {
            inner: Debounce::new(delay_ms),
        }
    }

    #[wasm_bindgen]
    pub fn set(&mut self, value: String, now_ms: f64) {
        self.inner.set(value, now_ms);
    }

    /// The newly committed value, if the deadline has passed.
    #[wasm_bindgen]
    pub fn poll(&mut self, now_ms: f64) -> Option<String> {
        self.inner.poll(now_ms).cloned()
    }

    #[wasm_bindgen(getter)]
    pub fn deadline(&self) -> Option<f64> {
        self.inner.deadline()
    }

    #[wasm_bindgen(getter)]
    pub fn committed(&self) -> Option<String> {
        self.inner.committed().cloned()
    }

    #[wasm_bindgen]
    pub fn cancel(&mut self) {
        self.inner.cancel();
    }
}

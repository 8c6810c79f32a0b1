#![cfg(target_arch = "wasm32")]

use card_presenter::{WasmCardPresenter, normalize_icon_js};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::wasm_bindgen_test;

#[wasm_bindgen_test]
fn normalize_icon_passes_through_non_strings() {
    assert!(normalize_icon_js(JsValue::NULL).is_null());
    assert!(normalize_icon_js(JsValue::UNDEFINED).is_undefined());
    assert_eq!(normalize_icon_js(JsValue::from_f64(3.0)).as_f64(), Some(3.0));
    assert_eq!(normalize_icon_js(JsValue::from_str("")).as_string().as_deref(), Some(""));
}

#[wasm_bindgen_test]
fn normalize_icon_rewrites_strings() {
    let out = normalize_icon_js(JsValue::from_str("mdi:power-plug"));
    assert_eq!(out.as_string().as_deref(), Some("mdi mdi-power-plug"));
}

#[wasm_bindgen_test]
fn presenter_renders_json_spec() {
    let card = WasmCardPresenter::new(r#"{"entity":"sensor.temperature"}"#)
        .unwrap_or_else(|_| panic!("config should parse"));
    let json = card.present(
        r#"{"entity_id":"sensor.temperature","state":"22.567","attributes":{"unit_of_measurement":"°C"}}"#,
    );
    let spec: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(spec["type"], "entity");
    assert_eq!(spec["icon"], "mdi mdi-thermometer");
    assert_eq!(spec["state"], "22.6");
}

#[wasm_bindgen_test]
fn presenter_rejects_bad_config() {
    assert!(WasmCardPresenter::new(r#"{"name":"no entity"}"#).is_err());
}

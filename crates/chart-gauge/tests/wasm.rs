//! WASM browser tests - run with `wasm-pack test --headless --chrome`

#![cfg(target_arch = "wasm32")]

use chart_gauge::{DomScene, Gauge, GaugeConfig, GaugeElement};
use chart_gauge_core::{Component, Patch, PatchSet};
use wasm_bindgen_test::*;
use web_sys::{window, Document, Element};

wasm_bindgen_test_configure!(run_in_browser);

const SETTINGS: &str = r#"[{"from":0,"to":50,"color":"green"},{"from":50,"to":100,"color":"red"}]"#;

fn document() -> Document {
    window().expect("window").document().expect("document")
}

fn host() -> Element {
    let document = document();
    let host = document.create_element("chart-gauge").expect("create host");
    document.body().expect("body").append_child(&host).expect("attach");
    host
}

// ============================================================================
// DomScene
// ============================================================================

#[wasm_bindgen_test]
fn test_dom_scene_mirrors_scene() {
    let mut gauge = Gauge::new(GaugeConfig::new(10.0).units("%")).expect("gauge");
    let scene = gauge.on_mount(0.0).clone();
    let host = host();

    let dom = DomScene::build(&document(), &scene, &host).expect("build");
    let svg = host.first_element_child().expect("svg root");
    assert_eq!(svg.tag_name(), "svg");
    assert_eq!(svg.namespace_uri().as_deref(), Some("http://www.w3.org/2000/svg"));
    assert_eq!(
        host.query_selector_all("text.gauge-value").expect("query").length(),
        1
    );
    assert!(dom.element(scene.root()).is_some());
}

#[wasm_bindgen_test]
fn test_dom_scene_applies_patches() {
    let mut gauge = Gauge::new(GaugeConfig::new(10.0)).expect("gauge");
    let scene = gauge.on_mount(0.0).clone();
    let value = scene.first_by_class("gauge-value").expect("value node");
    let host = host();
    let dom = DomScene::build(&document(), &scene, &host).expect("build");

    let mut patches = PatchSet::new();
    patches.push(Patch::set_text(value, "42"));
    patches.push(Patch::set_attr(value, "fill", "#ff0000"));
    dom.apply(&patches).expect("apply");

    let element = dom.element(value).expect("element");
    assert_eq!(element.text_content().as_deref(), Some("42"));
    assert_eq!(element.get_attribute("fill").as_deref(), Some("#ff0000"));
}

#[wasm_bindgen_test]
fn test_rebuild_replaces_previous_drawing() {
    let mut gauge = Gauge::new(GaugeConfig::default()).expect("gauge");
    let scene = gauge.on_mount(0.0).clone();
    let host = host();
    DomScene::build(&document(), &scene, &host).expect("first");
    DomScene::build(&document(), &scene, &host).expect("second");
    assert_eq!(host.children().length(), 1);
}

// ============================================================================
// GaugeElement
// ============================================================================

#[wasm_bindgen_test]
fn test_element_from_attributes() {
    let host = host();
    host.set_attribute("value", "25").expect("attr");
    host.set_attribute("units", "%").expect("attr");
    host.set_attribute("settings", SETTINGS).expect("attr");
    host.set_attribute("class", "dashboard").expect("attr");

    let mut element = GaugeElement::from_attributes(host.clone()).expect("element");
    element.mount();
    assert_eq!(host.query_selector_all("path.arc").expect("query").length(), 10);
    let text = host
        .query_selector("text.gauge-value")
        .expect("query")
        .expect("value text");
    assert_eq!(text.text_content().as_deref(), Some("25%"));

    element.set_value(80.0);
    assert_eq!(text.text_content().as_deref(), Some("80%"));

    element.unmount();
    assert_eq!(host.children().length(), 0);
    assert!(element.svg().is_empty());
}

#[wasm_bindgen_test]
fn test_element_attribute_redraw() {
    let host = host();
    let mut element = GaugeElement::new(host.clone(), r#"{"value": 5}"#).expect("element");
    element.mount();
    element.attribute_changed("width", Some("500".to_string()));
    let svg = host.first_element_child().expect("svg");
    assert_eq!(svg.get_attribute("width").as_deref(), Some("500"));

    // rejected change keeps the drawing
    element.attribute_changed("distance", Some("-1".to_string()));
    assert_eq!(host.children().length(), 1);
}

#[wasm_bindgen_test]
fn test_element_invalid_config_renders_nothing() {
    let host = host();
    assert!(GaugeElement::new(host.clone(), r#"{"width": 0}"#).is_err());
    assert!(GaugeElement::new(host.clone(), "not json").is_err());
    assert_eq!(host.children().length(), 0);
}

#[wasm_bindgen_test]
fn test_observed_attributes() {
    let names = GaugeElement::observed_attributes();
    assert!(names.includes(&"value".into(), 0));
    assert!(names.includes(&"settings".into(), 0));
}

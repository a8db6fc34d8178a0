//! `GaugeElement`: the JS-facing binding behind `<chart-gauge>`.
//!
//! A thin custom-element shim forwards `connectedCallback`,
//! `attributeChangedCallback` and `disconnectedCallback` here. Invalid
//! options are reported on the console and leave the element empty.

use super::dom::DomScene;
use super::host::{
    config_from_attributes, config_from_json, GaugeHost, HostError, HostUpdate, OBSERVED_ATTRIBUTES,
};
use chart_gauge_core::PatchSet;
use std::cell::{Cell, RefCell};
use std::fmt::Display;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element};

type FrameCallback = Closure<dyn FnMut(f64)>;
type EventCallback = Closure<dyn FnMut(web_sys::Event)>;

const HOVER_EVENTS: [&str; 2] = ["mouseover", "mouseout"];

fn report(context: &str, err: impl Display) {
    web_sys::console::error_1(&JsValue::from_str(&format!("chart-gauge: {context}: {err}")));
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map_or(0.0, |p| p.now())
}

/// State shared between the binding and its JS callbacks.
struct Shared {
    host: RefCell<GaugeHost>,
    dom: RefCell<Option<DomScene>>,
    element: Element,
    document: Document,
    frame_pending: Cell<bool>,
    frame: RefCell<Option<FrameCallback>>,
}

impl Shared {
    fn apply(&self, patches: &PatchSet) {
        if patches.is_empty() {
            return;
        }
        if let Some(dom) = self.dom.borrow().as_ref() {
            if let Err(e) = dom.apply(patches) {
                report("patch failed", format!("{e:?}"));
            }
        }
    }

    fn redraw(&self) {
        if let Some(old) = self.dom.borrow_mut().take() {
            old.remove();
        }
        let host = self.host.borrow();
        let Some(scene) = host.scene() else {
            return;
        };
        match DomScene::build(&self.document, scene, &self.element) {
            Ok(dom) => *self.dom.borrow_mut() = Some(dom),
            Err(e) => report("render failed", format!("{e:?}")),
        }
    }

    fn update(&self, update: HostUpdate) {
        match update {
            HostUpdate::Patches(patches) => self.apply(&patches),
            HostUpdate::Redraw => self.redraw(),
        }
        self.schedule();
    }

    /// Request an animation frame if something is moving and none is pending.
    fn schedule(&self) {
        if self.frame_pending.get() || !self.host.borrow().needs_frame() {
            return;
        }
        let Some(window) = window() else {
            return;
        };
        let frame = self.frame.borrow();
        let Some(callback) = frame.as_ref() else {
            return;
        };
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(_) => self.frame_pending.set(true),
            Err(e) => report("requestAnimationFrame failed", format!("{e:?}")),
        }
    }

    fn on_frame(&self, now: f64) {
        self.frame_pending.set(false);
        let patches = self.host.borrow_mut().frame(now);
        self.apply(&patches);
        self.schedule();
    }

    fn on_event(&self, event_type: &str) {
        let patches = self.host.borrow_mut().dom_event(event_type, now_ms());
        self.apply(&patches);
        self.schedule();
    }
}

/// One gauge bound to a host element.
#[wasm_bindgen]
pub struct GaugeElement {
    shared: Rc<Shared>,
    listeners: Vec<(&'static str, EventCallback)>,
}

#[wasm_bindgen]
impl GaugeElement {
    /// Bind a gauge configured by a JSON object to `host`.
    #[wasm_bindgen(constructor)]
    pub fn new(host: Element, config_json: &str) -> Result<GaugeElement, JsValue> {
        console_error_panic_hook::set_once();
        let config = config_from_json(config_json).map_err(|e| {
            report("invalid properties", &e);
            JsValue::from_str(&e.to_string())
        })?;
        Self::with_host(host, GaugeHost::new(config))
    }

    /// Bind a gauge configured by `host`'s attributes.
    #[wasm_bindgen(js_name = fromAttributes)]
    pub fn from_attributes(host: Element) -> Result<GaugeElement, JsValue> {
        console_error_panic_hook::set_once();
        let pairs: Vec<(String, String)> = host
            .get_attribute_names()
            .iter()
            .filter_map(|name| name.as_string())
            .filter_map(|name| host.get_attribute(&name).map(|value| (name, value)))
            .collect();
        let config = config_from_attributes(pairs.iter().map(|(n, v)| (n.as_str(), v.as_str())))
            .map_err(|e| {
                report("invalid attributes", &e);
                JsValue::from_str(&e.to_string())
            })?;
        Self::with_host(host, GaugeHost::new(config))
    }

    /// Attribute names to list in `observedAttributes`.
    #[wasm_bindgen(js_name = observedAttributes)]
    pub fn observed_attributes() -> js_sys::Array {
        OBSERVED_ATTRIBUTES
            .iter()
            .map(|name| JsValue::from_str(name))
            .collect()
    }

    /// Draw into the host element and start listening for hover.
    pub fn mount(&mut self) {
        self.shared.host.borrow_mut().mount(now_ms());
        self.shared.redraw();
        self.listen();
        self.shared.schedule();
    }

    /// Change the displayed value.
    #[wasm_bindgen(js_name = setValue)]
    pub fn set_value(&self, value: f64) {
        let patches = self.shared.host.borrow_mut().set_value(value, now_ms());
        self.shared.update(HostUpdate::Patches(patches));
    }

    /// Forward `attributeChangedCallback`. A removed attribute arrives as
    /// `null` and is treated as empty.
    #[wasm_bindgen(js_name = attributeChanged)]
    pub fn attribute_changed(&self, name: &str, value: Option<String>) {
        let value = value.unwrap_or_default();
        let result = self
            .shared
            .host
            .borrow_mut()
            .attribute_changed(name, &value, now_ms());
        match result {
            Ok(update) => self.shared.update(update),
            Err(e) => report(&format!("attribute '{name}' rejected"), e),
        }
    }

    /// Replace every option from a JSON object.
    #[wasm_bindgen(js_name = setProperties)]
    pub fn set_properties(&self, json: &str) {
        let result = self.shared.host.borrow_mut().set_properties(json, now_ms());
        match result {
            Ok(update) => self.shared.update(update),
            Err(e) => report("invalid properties", e),
        }
    }

    /// Current SVG markup, empty when unmounted.
    pub fn svg(&self) -> String {
        self.shared.host.borrow().gauge().to_svg()
    }

    /// Remove the drawing and listeners.
    pub fn unmount(&mut self) {
        self.unlisten();
        self.shared.host.borrow_mut().unmount();
        if let Some(dom) = self.shared.dom.borrow_mut().take() {
            dom.remove();
        }
    }
}

impl GaugeElement {
    fn with_host(
        element: Element,
        host: Result<GaugeHost, HostError>,
    ) -> Result<Self, JsValue> {
        let host = host.map_err(|e| {
            report("invalid gauge", &e);
            JsValue::from_str(&e.to_string())
        })?;
        let document = element
            .owner_document()
            .ok_or_else(|| JsValue::from_str("host element has no document"))?;

        let shared = Rc::new(Shared {
            host: RefCell::new(host),
            dom: RefCell::new(None),
            element,
            document,
            frame_pending: Cell::new(false),
            frame: RefCell::new(None),
        });

        let weak: Weak<Shared> = Rc::downgrade(&shared);
        *shared.frame.borrow_mut() = Some(Closure::new(move |now: f64| {
            if let Some(shared) = weak.upgrade() {
                shared.on_frame(now);
            }
        }));

        Ok(Self {
            shared,
            listeners: Vec::new(),
        })
    }

    fn listen(&mut self) {
        if !self.listeners.is_empty() {
            return;
        }
        for event_type in HOVER_EVENTS {
            let weak = Rc::downgrade(&self.shared);
            let callback: EventCallback = Closure::new(move |event: web_sys::Event| {
                if let Some(shared) = weak.upgrade() {
                    shared.on_event(&event.type_());
                }
            });
            match self
                .shared
                .element
                .add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())
            {
                Ok(()) => self.listeners.push((event_type, callback)),
                Err(e) => report("addEventListener failed", format!("{e:?}")),
            }
        }
    }

    fn unlisten(&mut self) {
        for (event_type, callback) in self.listeners.drain(..) {
            let _ = self
                .shared
                .element
                .remove_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref());
        }
    }
}

impl Drop for GaugeElement {
    fn drop(&mut self) {
        self.unlisten();
    }
}

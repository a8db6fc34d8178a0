//! chart-gauge: an animated SVG radial gauge with threshold bands.
//!
//! The gauge maps a value onto the upper half circle, colors the bar by
//! band, and swings an elastic needle whenever the value changes.
//!
//! # Native usage
//!
//! ```
//! use chart_gauge::{Animated, Component, Gauge, GaugeConfig};
//!
//! let mut gauge = Gauge::new(GaugeConfig::new(0.0).units("%")).unwrap();
//! gauge.on_mount(0.0);
//! gauge.set_value(75.0, 0.0);
//! gauge.tick(5_000.0);
//! assert!(gauge.to_svg().contains(">75%</text>"));
//! ```
//!
//! # Browser Usage (WASM)
//!
//! ```javascript
//! import init, { GaugeElement } from './chart_gauge.js';
//!
//! class ChartGauge extends HTMLElement {
//!     static get observedAttributes() { return GaugeElement.observedAttributes(); }
//!     connectedCallback() {
//!         this.gauge = GaugeElement.fromAttributes(this);
//!         this.gauge.mount();
//!     }
//!     attributeChangedCallback(name, _old, value) {
//!         this.gauge?.attributeChanged(name, value);
//!     }
//!     disconnectedCallback() { this.gauge?.unmount(); }
//! }
//!
//! await init();
//! customElements.define('chart-gauge', ChartGauge);
//! ```

pub use chart_gauge_core::*;
pub use chart_gauge_widgets as widgets;
pub use chart_gauge_yaml as yaml;

pub mod browser;

pub use browser::{GaugeHost, HostError, HostUpdate};
#[cfg(target_arch = "wasm32")]
pub use browser::{DomScene, GaugeElement};
pub use chart_gauge_widgets::{Band, BandPolicy, Gauge, GaugeConfig};
pub use chart_gauge_yaml::{Manifest, ManifestError};

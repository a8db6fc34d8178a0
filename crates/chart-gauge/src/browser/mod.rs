//! Browser runtime for the gauge.
//!
//! [`host`] holds the DOM-free driver and builds everywhere. The DOM bridge
//! and the `GaugeElement` binding only exist on wasm32.

// WASM-only modules
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod element;

// Cross-platform modules
pub mod host;

#[cfg(target_arch = "wasm32")]
pub use dom::DomScene;
#[cfg(target_arch = "wasm32")]
pub use element::GaugeElement;
pub use host::{
    config_from_attributes, config_from_json, GaugeHost, HostError, HostUpdate,
    OBSERVED_ATTRIBUTES,
};

//! Manifest loading for chart-gauge.
//!
//! Reads one or many gauge configurations from YAML or JSON and validates
//! them before any gauge is built.

mod error;
mod manifest;

pub use error::{ManifestError, Result};
pub use manifest::{GaugeEntry, Manifest};

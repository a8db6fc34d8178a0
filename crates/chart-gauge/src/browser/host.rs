//! Host-side gauge driver.
//!
//! Translates what a page does to a `<chart-gauge>` element (attribute
//! writes, property payloads, hover, animation frames) into gauge calls.
//! Kept free of DOM types so native tests can exercise it.

use chart_gauge_core::{Animated, Component, Event, GaugeError, PatchSet, Scene};
use chart_gauge_widgets::{Gauge, GaugeConfig};
use thiserror::Error;

/// Attributes the element reacts to.
pub const OBSERVED_ATTRIBUTES: &[&str] = &[
    "value",
    "label",
    "units",
    "settings",
    "min",
    "max",
    "distance",
    "width",
    "height",
    "tooltip",
    "tick-count",
    "band-policy",
    "line-color",
    "tick-color",
    "needle-color",
    "pivot-color",
    "sweep-on-mount",
    "clamp",
];

/// Error raised while reading element options.
#[derive(Debug, Error)]
pub enum HostError {
    /// An attribute or the resulting configuration is invalid
    #[error(transparent)]
    Config(#[from] GaugeError),
    /// A property payload is not valid JSON for a gauge configuration
    #[error("invalid gauge properties: {0}")]
    Json(#[from] serde_json::Error),
}

/// What the host must do after a change.
#[derive(Debug, Clone, PartialEq)]
pub enum HostUpdate {
    /// Apply these patches to the existing DOM
    Patches(PatchSet),
    /// Rebuild the DOM from [`GaugeHost::scene`]
    Redraw,
}

/// Build a configuration from element attributes.
///
/// Attributes the gauge does not know (`class`, `style`, ...) are skipped.
pub fn config_from_attributes<'a, I>(attrs: I) -> Result<GaugeConfig, HostError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut config = GaugeConfig::default();
    for (name, value) in attrs {
        match config.apply_attribute(name, value) {
            Ok(()) => {}
            Err(GaugeError::UnknownAttribute(name)) => {
                tracing::debug!(%name, "ignoring attribute");
            }
            Err(e) => return Err(e.into()),
        }
    }
    config.validate()?;
    Ok(config)
}

/// Build a configuration from a JSON property payload.
pub fn config_from_json(json: &str) -> Result<GaugeConfig, HostError> {
    let config: GaugeConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

/// Drives one gauge on behalf of a page element.
#[derive(Debug)]
pub struct GaugeHost {
    gauge: Gauge,
}

impl GaugeHost {
    /// Validate `config` and prepare an unmounted gauge.
    pub fn new(config: GaugeConfig) -> Result<Self, HostError> {
        Ok(Self {
            gauge: Gauge::new(config)?,
        })
    }

    /// The driven gauge.
    #[must_use]
    pub const fn gauge(&self) -> &Gauge {
        &self.gauge
    }

    /// Current scene, if mounted.
    #[must_use]
    pub const fn scene(&self) -> Option<&Scene> {
        self.gauge.scene()
    }

    /// Draw the gauge.
    pub fn mount(&mut self, now_ms: f64) -> &Scene {
        self.gauge.on_mount(now_ms)
    }

    /// Drop the drawn state.
    pub fn unmount(&mut self) {
        self.gauge.on_unmount();
    }

    /// React to an attribute write.
    ///
    /// `value` only patches; every other known attribute redraws. Unknown
    /// attributes change nothing. On error the gauge keeps its previous
    /// configuration.
    pub fn attribute_changed(
        &mut self,
        name: &str,
        value: &str,
        now_ms: f64,
    ) -> Result<HostUpdate, HostError> {
        let mut config = self.gauge.config().clone();
        match config.apply_attribute(name, value) {
            Ok(()) => {}
            Err(GaugeError::UnknownAttribute(_)) => {
                return Ok(HostUpdate::Patches(PatchSet::new()));
            }
            Err(e) => return Err(e.into()),
        }

        if &config == self.gauge.config() {
            return Ok(HostUpdate::Patches(PatchSet::new()));
        }
        if Self::only_value_changed(&config, &self.gauge) {
            return Ok(HostUpdate::Patches(self.gauge.set_value(config.value, now_ms)));
        }
        let value = config.value;
        self.gauge.reconfigure(config, now_ms)?;
        // reconfigure keeps the old value; apply a changed one as an update
        let patches = self.gauge.set_value(value, now_ms);
        tracing::debug!(attribute = name, patches = patches.len(), "gauge redrawn");
        Ok(HostUpdate::Redraw)
    }

    fn only_value_changed(config: &GaugeConfig, gauge: &Gauge) -> bool {
        let mut same = config.clone();
        same.value = gauge.value();
        &same == gauge.config()
    }

    /// Replace the whole configuration from a property payload.
    pub fn set_properties(&mut self, json: &str, now_ms: f64) -> Result<HostUpdate, HostError> {
        let config = config_from_json(json)?;
        let value = config.value;
        self.gauge.reconfigure(config, now_ms)?;
        self.gauge.set_value(value, now_ms);
        Ok(HostUpdate::Redraw)
    }

    /// Change the value directly.
    pub fn set_value(&mut self, value: f64, now_ms: f64) -> PatchSet {
        self.gauge.set_value(value, now_ms)
    }

    /// React to a DOM event by type name. Unrelated events are ignored.
    pub fn dom_event(&mut self, event_type: &str, now_ms: f64) -> PatchSet {
        match Event::from_dom_type(event_type) {
            Some(event) => self.gauge.on_event(&event, now_ms),
            None => PatchSet::new(),
        }
    }

    /// Advance animations to `now_ms`.
    pub fn frame(&mut self, now_ms: f64) -> PatchSet {
        self.gauge.tick(now_ms)
    }

    /// Whether another animation frame is needed.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.gauge.is_mounted() && self.gauge.is_animating()
    }
}

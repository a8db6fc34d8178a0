//! Gauge configuration as supplied by the embedding page.
//!
//! Field names follow the element's attribute surface in camelCase
//! (`tickInterval`, `lineColor`, ...). `settings` is accepted for `bands`
//! and `distance` for `tickInterval`.

use crate::ticks::TickSpec;
use chart_gauge_core::{AngleScale, Color, GaugeError, Result, Size, Timing};
use serde::{Deserialize, Serialize};

/// Upper bound on arc sections a single gauge may draw.
pub const MAX_SECTIONS: usize = 1000;

/// Domain used when neither bands nor explicit bounds are given.
pub const DEFAULT_DOMAIN: (f64, f64) = (0.0, 100.0);

// =============================================================================
// Band
// =============================================================================

/// A colored threshold zone `[from, to]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Lower bound (inclusive)
    pub from: f64,
    /// Upper bound (inclusive)
    pub to: f64,
    /// Fill color
    pub color: Color,
}

impl Band {
    /// Create a band.
    #[must_use]
    pub fn new(name: impl Into<String>, from: f64, to: f64, color: Color) -> Self {
        Self {
            name: name.into(),
            from,
            to,
            color,
        }
    }

    /// Whether `value` lies in `[from, to]`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.from && value <= self.to
    }

    /// Numeric width of the band.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.to - self.from
    }

}

/// How bands are turned into colored arc segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BandPolicy {
    /// One solid wedge per tick-sized section, colored by the band holding
    /// the section's end value.
    #[default]
    Sectioned,
    /// Tick-sized sections filled with a hard-stop gradient proportional to
    /// band coverage, gray where no band covers.
    Proportional,
    /// One wedge per band, laid end to end across the sweep.
    FullSweep,
}

// =============================================================================
// GaugeConfig
// =============================================================================

/// Everything needed to draw one gauge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GaugeConfig {
    /// Current reading
    pub value: f64,
    /// Text shown after the value
    pub label: String,
    /// Unit suffix appended to the value
    pub units: String,
    /// Threshold bands, ascending by `from`
    #[serde(alias = "settings")]
    pub bands: Vec<Band>,
    /// Explicit lower bound (overrides the first band)
    pub min: Option<f64>,
    /// Explicit upper bound (overrides the last band)
    pub max: Option<f64>,
    /// Canvas width in pixels
    pub width: f64,
    /// Canvas height in pixels; `None` means square
    pub height: Option<f64>,
    /// Spacing between ticks and arc sections
    #[serde(alias = "distance")]
    pub tick_interval: f64,
    /// Approximate tick count; picks a round interval and overrides `tickInterval`
    pub tick_count: Option<usize>,
    /// Band fill policy
    pub band_policy: BandPolicy,
    /// Arc outline stroke
    pub line_color: Color,
    /// Tick marks and labels
    pub tick_color: Color,
    /// Needle fill
    pub needle_color: Color,
    /// Pivot circle fill
    pub pivot_color: Color,
    /// Hover tooltip text; empty disables the tooltip
    pub tooltip: Option<String>,
    /// Needle animation timing
    pub needle_timing: Timing,
    /// Sweep the needle up from the minimum on mount
    pub sweep_on_mount: bool,
    /// Clamp the value into the domain before computing the angle
    pub clamp: bool,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            value: 0.0,
            label: String::new(),
            units: String::new(),
            bands: Vec::new(),
            min: None,
            max: None,
            width: 400.0,
            height: Some(300.0),
            tick_interval: 10.0,
            tick_count: None,
            band_policy: BandPolicy::Sectioned,
            line_color: Color::from_rgb8(0x99, 0x99, 0x99),
            tick_color: Color::from_rgb8(0x66, 0x66, 0x66),
            needle_color: Color::from_rgb8(0x46, 0x4a, 0x4f),
            pivot_color: Color::from_rgb8(0x46, 0x4a, 0x4f),
            tooltip: None,
            needle_timing: Timing::NEEDLE,
            sweep_on_mount: false,
            clamp: false,
        }
    }
}

impl GaugeConfig {
    /// Create a configuration showing `value` with default options.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    /// Set the value.
    #[must_use]
    pub const fn value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Set the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the units.
    #[must_use]
    pub fn units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Append a band.
    #[must_use]
    pub fn band(mut self, band: Band) -> Self {
        self.bands.push(band);
        self
    }

    /// Replace all bands.
    #[must_use]
    pub fn bands(mut self, bands: Vec<Band>) -> Self {
        self.bands = bands;
        self
    }

    /// Set explicit domain bounds.
    #[must_use]
    pub const fn domain(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Set canvas size.
    #[must_use]
    pub const fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = Some(height);
        self
    }

    /// Use a square canvas derived from `width`.
    #[must_use]
    pub const fn square(mut self, width: f64) -> Self {
        self.width = width;
        self.height = None;
        self
    }

    /// Set the tick interval.
    #[must_use]
    pub const fn tick_interval(mut self, interval: f64) -> Self {
        self.tick_interval = interval;
        self.tick_count = None;
        self
    }

    /// Ask for roughly `count` ticks at a round interval.
    #[must_use]
    pub const fn tick_count(mut self, count: usize) -> Self {
        self.tick_count = Some(count);
        self
    }

    /// Set the band policy.
    #[must_use]
    pub const fn band_policy(mut self, policy: BandPolicy) -> Self {
        self.band_policy = policy;
        self
    }

    /// Enable the hover tooltip.
    #[must_use]
    pub fn tooltip(mut self, text: impl Into<String>) -> Self {
        self.tooltip = Some(text.into());
        self
    }

    /// Set needle animation timing.
    #[must_use]
    pub const fn needle_timing(mut self, timing: Timing) -> Self {
        self.needle_timing = timing;
        self
    }

    /// Use the short direct needle tween.
    #[must_use]
    pub const fn minimal_animation(self) -> Self {
        self.needle_timing(Timing::MINIMAL)
    }

    /// Sweep the needle from the minimum on mount.
    #[must_use]
    pub const fn sweep_on_mount(mut self, sweep: bool) -> Self {
        self.sweep_on_mount = sweep;
        self
    }

    /// Clamp values into the domain.
    #[must_use]
    pub const fn clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Set the needle color.
    #[must_use]
    pub const fn needle_color(mut self, color: Color) -> Self {
        self.needle_color = color;
        self
    }

    // -------------------------------------------------------------------------
    // Derived values
    // -------------------------------------------------------------------------

    /// Lower domain bound: explicit `min`, else the first band's `from`.
    #[must_use]
    pub fn min_value(&self) -> f64 {
        self.min
            .or_else(|| self.bands.first().map(|b| b.from))
            .unwrap_or(DEFAULT_DOMAIN.0)
    }

    /// Upper domain bound: explicit `max`, else the last band's `to`.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.max
            .or_else(|| self.bands.last().map(|b| b.to))
            .unwrap_or(DEFAULT_DOMAIN.1)
    }

    /// Width of the domain.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max_value() - self.min_value()
    }

    /// Value-to-angle scale over the derived domain.
    #[must_use]
    pub fn scale(&self) -> AngleScale {
        AngleScale::new(self.min_value(), self.max_value()).with_clamp(self.clamp)
    }

    /// Canvas size with the square fallback applied.
    #[must_use]
    pub fn canvas_size(&self) -> Size {
        match self.height {
            Some(height) => Size::new(self.width, height),
            None => Size::square(self.width),
        }
    }

    /// Interval between ticks and sections after applying `tickCount`.
    #[must_use]
    pub fn section_interval(&self) -> f64 {
        let span = self.span();
        if span > 0.0 {
            TickSpec::from_config(self).step(span)
        } else {
            self.tick_interval
        }
    }

    /// First section boundary past the minimum.
    ///
    /// With `tickCount` the boundaries sit on round multiples of the
    /// interval, matching the tick marks; otherwise they start at `min`.
    #[must_use]
    pub fn section_origin(&self) -> f64 {
        TickSpec::from_config(self).origin(self.min_value(), self.section_interval())
    }

    /// Tooltip text, if the tooltip is enabled.
    #[must_use]
    pub fn tooltip_text(&self) -> Option<&str> {
        self.tooltip.as_deref().filter(|t| !t.is_empty())
    }

    /// Check invariants the renderer relies on.
    pub fn validate(&self) -> Result<()> {
        let size = self.canvas_size();
        if !size.is_positive() {
            return Err(GaugeError::InvalidSize {
                width: size.width,
                height: size.height,
            });
        }

        let mut previous: Option<&Band> = None;
        for band in &self.bands {
            if band.from > band.to || !band.from.is_finite() || !band.to.is_finite() {
                return Err(GaugeError::InvertedBand {
                    name: band.name.clone(),
                    from: band.from,
                    to: band.to,
                });
            }
            if previous.is_some_and(|p| band.from < p.from) {
                return Err(GaugeError::UnorderedBands {
                    name: band.name.clone(),
                    from: band.from,
                });
            }
            previous = Some(band);
        }

        if !self.value.is_finite() {
            return Err(GaugeError::NonFiniteValue { value: self.value });
        }
        if self.bands.is_empty() && (self.min.is_none() || self.max.is_none()) {
            tracing::warn!(domain = ?DEFAULT_DOMAIN, "no bands configured, using default domain");
        }
        let (min, max) = (self.min_value(), self.max_value());
        if !min.is_finite() || !max.is_finite() {
            return Err(GaugeError::NonFiniteDomain { min, max });
        }
        if min > max {
            return Err(GaugeError::InvertedDomain { min, max });
        }
        if min == max {
            tracing::warn!(min, "degenerate domain; needle will stay upright");
        }

        if self.tick_count == Some(0) {
            return Err(GaugeError::InvalidTickCount);
        }
        let span = max - min;
        let interval = self.section_interval();
        if !interval.is_finite() || interval <= 0.0 || (span > 0.0 && interval > span) {
            return Err(GaugeError::InvalidTickInterval { interval, span });
        }
        let origin = self.section_origin();
        let lead = usize::from(origin > min + span * 1e-9);
        let sections = lead + ((max - origin) / interval - 1e-9).ceil().max(0.0) as usize;
        if sections > MAX_SECTIONS {
            return Err(GaugeError::TooManySections {
                interval,
                sections,
                limit: MAX_SECTIONS,
            });
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Host attributes
    // -------------------------------------------------------------------------

    /// Apply a string attribute as set on the custom element.
    ///
    /// Names are matched case-insensitively with dashes ignored, so
    /// `tick-interval`, `tickInterval` and `tickinterval` are the same.
    /// `settings`/`bands` take a JSON array. An empty `height`, `min` or
    /// `max` clears the option.
    pub fn apply_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        let key: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        let invalid = || GaugeError::InvalidAttribute {
            name: name.to_string(),
            value: value.to_string(),
        };
        let number = || {
            value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(invalid)
        };
        let optional = || -> Result<Option<f64>> {
            let trimmed = value.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
                Ok(None)
            } else {
                number().map(Some)
            }
        };
        let color = |field: &str| {
            Color::parse(value).map_err(|source| GaugeError::InvalidColor {
                field: field.to_string(),
                source,
            })
        };
        let flag = || match value.trim() {
            "" | "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(invalid()),
        };

        match key.as_str() {
            "value" => self.value = number()?,
            "label" => self.label = value.to_string(),
            "units" => self.units = value.to_string(),
            "settings" | "bands" => {
                self.bands = serde_json::from_str(value).map_err(|_| invalid())?;
            }
            "min" => self.min = optional()?,
            "max" => self.max = optional()?,
            "width" => self.width = number()?,
            "height" => self.height = optional()?,
            "distance" | "tickinterval" => {
                self.tick_interval = number()?;
                self.tick_count = None;
            }
            "tickcount" => {
                self.tick_count = Some(value.trim().parse().map_err(|_| invalid())?);
            }
            "bandpolicy" => {
                self.band_policy = serde_json::from_value(serde_json::Value::String(
                    value.trim().to_string(),
                ))
                .map_err(|_| invalid())?;
            }
            "linecolor" => self.line_color = color("lineColor")?,
            "tickcolor" => self.tick_color = color("tickColor")?,
            "needlecolor" => self.needle_color = color("needleColor")?,
            "pivotcolor" => self.pivot_color = color("pivotColor")?,
            "tooltip" => self.tooltip = Some(value.to_string()),
            "sweeponmount" => self.sweep_on_mount = flag()?,
            "clamp" => self.clamp = flag()?,
            _ => return Err(GaugeError::UnknownAttribute(name.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traffic_light() -> Vec<Band> {
        vec![
            Band::new("Low", 0.0, 30.0, Color::parse("green").unwrap()),
            Band::new("Medium", 30.0, 70.0, Color::parse("yellow").unwrap()),
            Band::new("High", 70.0, 100.0, Color::parse("red").unwrap()),
        ]
    }

    // =========================================================================
    // Band Tests
    // =========================================================================

    #[test]
    fn test_band_contains_inclusive() {
        let band = Band::new("b", 30.0, 70.0, Color::BLACK);
        assert!(band.contains(30.0));
        assert!(band.contains(70.0));
        assert!(!band.contains(70.1));
    }

    // =========================================================================
    // Domain Tests
    // =========================================================================

    #[test]
    fn test_min_max_from_bands() {
        let config = GaugeConfig::default().bands(traffic_light());
        assert_eq!(config.min_value(), 0.0);
        assert_eq!(config.max_value(), 100.0);
    }

    #[test]
    fn test_explicit_bounds_override_bands() {
        let config = GaugeConfig::default()
            .bands(traffic_light())
            .domain(-20.0, 120.0);
        assert_eq!(config.min_value(), -20.0);
        assert_eq!(config.max_value(), 120.0);
    }

    #[test]
    fn test_empty_bands_fall_back() {
        let config = GaugeConfig::default();
        assert_eq!((config.min_value(), config.max_value()), DEFAULT_DOMAIN);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_canvas_size_square_fallback() {
        assert_eq!(GaugeConfig::default().canvas_size(), Size::new(400.0, 300.0));
        assert_eq!(GaugeConfig::default().square(250.0).canvas_size(), Size::square(250.0));
    }

    #[test]
    fn test_section_interval_from_count() {
        let config = GaugeConfig::default().tick_count(4);
        assert_eq!(config.section_interval(), 20.0);
        let config = GaugeConfig::default().tick_interval(25.0);
        assert_eq!(config.section_interval(), 25.0);
    }

    #[test]
    fn test_section_interval_capped_at_span() {
        let config = GaugeConfig::default()
            .band(Band::new("all", 0.0, 80.0, Color::BLACK))
            .tick_count(1);
        assert_eq!(config.section_interval(), 50.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_section_origin() {
        let counted = GaugeConfig::default().domain(3.0, 97.0).tick_count(4);
        assert_eq!(counted.section_origin(), 20.0);
        let stepped = GaugeConfig::default().domain(3.0, 97.0).tick_interval(20.0);
        assert_eq!(stepped.section_origin(), 3.0);
    }

    #[test]
    fn test_tooltip_text_empty_disables() {
        assert_eq!(GaugeConfig::default().tooltip("").tooltip_text(), None);
        assert_eq!(GaugeConfig::default().tooltip("hi").tooltip_text(), Some("hi"));
    }

    // =========================================================================
    // Validation Tests
    // =========================================================================

    #[test]
    fn test_validate_size() {
        let err = GaugeConfig::default().size(0.0, 300.0).validate().unwrap_err();
        assert!(matches!(err, GaugeError::InvalidSize { .. }));
    }

    #[test]
    fn test_validate_tick_interval() {
        let zero = GaugeConfig::default().tick_interval(0.0).validate();
        assert!(matches!(zero, Err(GaugeError::InvalidTickInterval { .. })));
        let too_wide = GaugeConfig::default().tick_interval(150.0).validate();
        assert!(matches!(too_wide, Err(GaugeError::InvalidTickInterval { .. })));
        assert!(GaugeConfig::default().tick_interval(100.0).validate().is_ok());
    }

    #[test]
    fn test_validate_too_many_sections() {
        let result = GaugeConfig::default().tick_interval(0.01).validate();
        assert!(matches!(result, Err(GaugeError::TooManySections { .. })));
    }

    #[test]
    fn test_validate_bands() {
        let inverted = GaugeConfig::default()
            .band(Band::new("bad", 50.0, 10.0, Color::BLACK))
            .validate();
        assert!(matches!(inverted, Err(GaugeError::InvertedBand { .. })));

        let unordered = GaugeConfig::default()
            .band(Band::new("a", 50.0, 60.0, Color::BLACK))
            .band(Band::new("b", 10.0, 20.0, Color::BLACK))
            .validate();
        assert!(matches!(unordered, Err(GaugeError::UnorderedBands { .. })));
    }

    #[test]
    fn test_validate_degenerate_domain_is_allowed() {
        assert!(GaugeConfig::default().domain(50.0, 50.0).validate().is_ok());
    }

    #[test]
    fn test_validate_inverted_domain() {
        let result = GaugeConfig::default().domain(100.0, 0.0).validate();
        assert!(matches!(result, Err(GaugeError::InvertedDomain { .. })));
    }

    #[test]
    fn test_validate_non_finite_value() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = GaugeConfig::new(value).validate();
            assert!(matches!(result, Err(GaugeError::NonFiniteValue { .. })));
        }
    }

    #[test]
    fn test_validate_counts_round_sections() {
        // 3..97 at 20: [3,20] then four full sections then [80,97]
        let config = GaugeConfig::default().domain(3.0, 97.0).tick_count(4);
        assert!(config.validate().is_ok());
        let dense = GaugeConfig::default().domain(0.5, 1000.0).tick_interval(1.0);
        assert!(dense.validate().is_ok());
    }

    #[test]
    fn test_validate_tick_count_zero() {
        let result = GaugeConfig::default().tick_count(0).validate();
        assert_eq!(result, Err(GaugeError::InvalidTickCount));
    }

    // =========================================================================
    // Serde Tests
    // =========================================================================

    #[test]
    fn test_deserialize_element_options() {
        let json = r##"{
            "value": 42,
            "units": "%",
            "settings": [{"name": "ok", "from": 0, "to": 50, "color": "#00ff00"}],
            "distance": 5,
            "height": null,
            "bandPolicy": "fullSweep",
            "needleColor": "rgb(255, 0, 0)"
        }"##;
        let config: GaugeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.value, 42.0);
        assert_eq!(config.bands.len(), 1);
        assert_eq!(config.tick_interval, 5.0);
        assert_eq!(config.height, None);
        assert_eq!(config.band_policy, BandPolicy::FullSweep);
        assert_eq!(config.needle_color, Color::parse("red").unwrap());
        assert_eq!(config.width, 400.0);
    }

    #[test]
    fn test_deserialize_rejects_bad_color() {
        let json = r#"{"bands": [{"from": 0, "to": 1, "color": "not-a-color"}]}"#;
        assert!(serde_json::from_str::<GaugeConfig>(json).is_err());
    }

    // =========================================================================
    // Attribute Tests
    // =========================================================================

    #[test]
    fn test_apply_attribute_numbers_and_aliases() {
        let mut config = GaugeConfig::default();
        config.apply_attribute("value", "75").unwrap();
        config.apply_attribute("tick-interval", "20").unwrap();
        config.apply_attribute("height", "").unwrap();
        config.apply_attribute("needle-color", "#ff0000").unwrap();
        assert_eq!(config.value, 75.0);
        assert_eq!(config.tick_interval, 20.0);
        assert_eq!(config.height, None);
        assert_eq!(config.needle_color, Color::parse("red").unwrap());
    }

    #[test]
    fn test_apply_attribute_settings_json() {
        let mut config = GaugeConfig::default();
        config
            .apply_attribute(
                "settings",
                concat!(
                    r#"[{"name":"Low","from":0,"to":30,"color":"green"},"#,
                    r#"{"name":"High","from":30,"to":90,"color":"red"}]"#,
                ),
            )
            .unwrap();
        assert_eq!(config.max_value(), 90.0);
    }

    #[test]
    fn test_apply_attribute_errors() {
        let mut config = GaugeConfig::default();
        assert!(matches!(
            config.apply_attribute("width", "wide"),
            Err(GaugeError::InvalidAttribute { .. })
        ));
        assert!(matches!(
            config.apply_attribute("pivot-color", "blurple"),
            Err(GaugeError::InvalidColor { .. })
        ));
        assert!(matches!(
            config.apply_attribute("colour", "red"),
            Err(GaugeError::UnknownAttribute(_))
        ));
        assert_eq!(config, GaugeConfig::default());
    }

    #[test]
    fn test_apply_attribute_rejects_non_finite_numbers() {
        let mut config = GaugeConfig::default();
        for raw in ["NaN", "inf", "-infinity"] {
            assert!(matches!(
                config.apply_attribute("value", raw),
                Err(GaugeError::InvalidAttribute { .. })
            ));
        }
        assert!(config.apply_attribute("max", "inf").is_err());
        assert_eq!(config, GaugeConfig::default());
    }

    #[test]
    fn test_apply_attribute_band_policy() {
        let mut config = GaugeConfig::default();
        config.apply_attribute("band-policy", "proportional").unwrap();
        assert_eq!(config.band_policy, BandPolicy::Proportional);
    }
}

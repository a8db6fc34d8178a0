//! Test harness for chart-gauge widgets.
//!
//! Drives a mounted [`Gauge`] on a manual clock and queries its scene with
//! CSS-like selectors.

use chart_gauge_core::{Animated, Component, Event, GaugeError, Node, NodeId, Point, Scene};
use chart_gauge_widgets::needle::needle_path;
use chart_gauge_widgets::layout::PIVOT_RADIUS;
use chart_gauge_widgets::{Gauge, GaugeConfig};

use crate::selector::Selector;

/// Frame interval used when advancing the clock.
pub const FRAME_MS: f64 = 16.0;

/// Upper bound on simulated time for [`GaugeHarness::settle`].
const SETTLE_LIMIT_MS: f64 = 60_000.0;

/// Test harness around one mounted gauge.
#[derive(Debug)]
pub struct GaugeHarness {
    gauge: Gauge,
    now_ms: f64,
    frames: usize,
    patches: usize,
}

impl GaugeHarness {
    /// Build and mount a gauge at time zero.
    pub fn new(config: GaugeConfig) -> Result<Self, GaugeError> {
        Ok(Self::mount(Gauge::new(config)?))
    }

    /// Mount an existing gauge at time zero.
    #[must_use]
    pub fn mount(mut gauge: Gauge) -> Self {
        gauge.on_mount(0.0);
        Self {
            gauge,
            now_ms: 0.0,
            frames: 0,
            patches: 0,
        }
    }

    /// The gauge under test.
    #[must_use]
    pub const fn gauge(&self) -> &Gauge {
        &self.gauge
    }

    /// Mutable access for calls the harness does not wrap.
    pub fn gauge_mut(&mut self) -> &mut Gauge {
        &mut self.gauge
    }

    /// Current simulated time.
    #[must_use]
    pub const fn now(&self) -> f64 {
        self.now_ms
    }

    /// Frames ticked so far.
    #[must_use]
    pub const fn frames(&self) -> usize {
        self.frames
    }

    /// Patches produced so far, across value changes, events and frames.
    #[must_use]
    pub const fn patch_count(&self) -> usize {
        self.patches
    }

    /// The mounted scene.
    ///
    /// # Panics
    ///
    /// Panics if the gauge was unmounted.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        self.gauge.scene().expect("gauge is not mounted")
    }

    /// Serialized SVG of the current scene.
    #[must_use]
    pub fn svg(&self) -> String {
        self.gauge.to_svg()
    }

    // === Clock ===

    /// Advance the clock by `ms`, ticking one frame every [`FRAME_MS`].
    pub fn advance(&mut self, ms: f64) -> &mut Self {
        let target = self.now_ms + ms.max(0.0);
        while self.now_ms < target {
            self.now_ms = (self.now_ms + FRAME_MS).min(target);
            self.frame();
        }
        self
    }

    /// Advance until nothing animates.
    ///
    /// # Panics
    ///
    /// Panics if animations are still running after a minute of simulated
    /// time.
    pub fn settle(&mut self) -> &mut Self {
        let limit = self.now_ms + SETTLE_LIMIT_MS;
        while self.gauge.is_animating() {
            assert!(self.now_ms < limit, "gauge still animating after {SETTLE_LIMIT_MS}ms");
            self.advance(FRAME_MS);
        }
        self
    }

    fn frame(&mut self) {
        self.frames += 1;
        self.patches += self.gauge.tick(self.now_ms).len();
    }

    // === Input ===

    /// Change the bound value at the current time.
    pub fn set_value(&mut self, value: f64) -> &mut Self {
        let old = self.gauge.value();
        self.patches += self.gauge.set_value(value, self.now_ms).len();
        tracing::debug!(old, new = value, at = self.now_ms, "harness value change");
        self
    }

    /// Pointer enters the gauge.
    pub fn hover_enter(&mut self) -> &mut Self {
        self.dispatch(&Event::PointerEnter)
    }

    /// Pointer leaves the gauge.
    pub fn hover_leave(&mut self) -> &mut Self {
        self.dispatch(&Event::PointerLeave)
    }

    /// Pointer moves within the gauge.
    pub fn move_pointer(&mut self, position: Point) -> &mut Self {
        self.dispatch(&Event::PointerMove { position })
    }

    fn dispatch(&mut self, event: &Event) -> &mut Self {
        self.patches += self.gauge.on_event(event, self.now_ms).len();
        self
    }

    // === Queries ===

    /// First node matching `selector`.
    #[must_use]
    pub fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    /// All nodes matching `selector`, in document order.
    #[must_use]
    pub fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let (Ok(sel), Some(scene)) = (Selector::parse(selector), self.gauge.scene()) else {
            return Vec::new();
        };
        sel.select(scene)
    }

    /// First node matching `selector`, resolved.
    #[must_use]
    pub fn node(&self, selector: &str) -> Option<&Node> {
        let id = self.query(selector)?;
        self.gauge.scene()?.node(id)
    }

    /// Text content of the first match; empty when absent.
    #[must_use]
    pub fn text(&self, selector: &str) -> String {
        self.node(selector)
            .and_then(Node::text_content)
            .unwrap_or_default()
            .to_string()
    }

    /// Attribute of the first match.
    #[must_use]
    pub fn attr(&self, selector: &str, name: &str) -> Option<String> {
        self.node(selector)?.get_attr(name).map(str::to_string)
    }

    /// Check if a node matches.
    #[must_use]
    pub fn exists(&self, selector: &str) -> bool {
        self.query(selector).is_some()
    }

    /// Tooltip opacity as written to the scene.
    #[must_use]
    pub fn tooltip_opacity(&self) -> Option<f64> {
        self.attr(".gauge-tooltip", "opacity")?.parse().ok()
    }

    // === Assertions ===

    /// Assert that a node exists.
    ///
    /// # Panics
    ///
    /// Panics if no node matches.
    pub fn assert_exists(&self, selector: &str) -> &Self {
        assert!(
            self.exists(selector),
            "Expected node matching '{selector}' to exist"
        );
        self
    }

    /// Assert that no node matches.
    ///
    /// # Panics
    ///
    /// Panics if a node matches.
    pub fn assert_not_exists(&self, selector: &str) -> &Self {
        assert!(
            !self.exists(selector),
            "Expected node matching '{selector}' to not exist"
        );
        self
    }

    /// Assert that text matches exactly.
    ///
    /// # Panics
    ///
    /// Panics if the text does not match.
    pub fn assert_text(&self, selector: &str, expected: &str) -> &Self {
        let actual = self.text(selector);
        assert_eq!(
            actual, expected,
            "Expected text '{expected}' but got '{actual}' for '{selector}'"
        );
        self
    }

    /// Assert that text contains a substring.
    ///
    /// # Panics
    ///
    /// Panics if the text does not contain the substring.
    pub fn assert_text_contains(&self, selector: &str, substring: &str) -> &Self {
        let actual = self.text(selector);
        assert!(
            actual.contains(substring),
            "Expected text for '{selector}' to contain '{substring}' but got '{actual}'"
        );
        self
    }

    /// Assert the count of matching nodes.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_count(&self, selector: &str, expected: usize) -> &Self {
        let actual = self.query_all(selector).len();
        assert_eq!(
            actual, expected,
            "Expected {expected} nodes matching '{selector}' but found {actual}"
        );
        self
    }

    /// Assert an attribute value on the first match.
    ///
    /// # Panics
    ///
    /// Panics if the attribute is missing or differs.
    pub fn assert_attr(&self, selector: &str, name: &str, expected: &str) -> &Self {
        let actual = self.attr(selector, name);
        assert_eq!(
            actual.as_deref(),
            Some(expected),
            "Expected {name}='{expected}' on '{selector}' but got {actual:?}"
        );
        self
    }

    /// Assert that the drawn needle points at `value`.
    ///
    /// # Panics
    ///
    /// Panics if the needle path differs from the one for `value`.
    pub fn assert_needle_at(&self, value: f64) -> &Self {
        let angle = self.gauge.config().scale().angle(value);
        let expected = needle_path(angle, self.gauge.layout().needle_length, PIVOT_RADIUS);
        self.assert_attr("path.needle", "d", &expected)
    }

    /// Assert the tooltip opacity written to the scene.
    ///
    /// # Panics
    ///
    /// Panics if there is no tooltip or the opacity differs.
    pub fn assert_tooltip_opacity(&self, expected: f64) -> &Self {
        let actual = self.tooltip_opacity();
        assert!(
            actual.is_some_and(|o| (o - expected).abs() < 1e-3),
            "Expected tooltip opacity {expected} but got {actual:?}"
        );
        self
    }
}

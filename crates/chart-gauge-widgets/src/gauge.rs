//! Render orchestrator.
//!
//! [`Gauge`] composes the band layout, ticks, needle, value text and
//! tooltip into one scene on mount, then routes value changes to the needle
//! and value label only. Every patch it hands out has already been applied
//! to its own scene, so [`Gauge::to_svg`] always matches what the host
//! shows.

use crate::bands::BandLayout;
use crate::config::GaugeConfig;
use crate::label::ValueLabel;
use crate::layout::GaugeLayout;
use crate::needle::NeedleController;
use crate::ticks::{generate_ticks, Tick};
use crate::tooltip::TooltipController;
use chart_gauge_core::{
    fmt_coord, format_number, Animated, Component, Event, Lifecycle, Node, NodeId, PatchSet,
    Result, Scene, Tag,
};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Offset of the min/max labels below the arc ends.
const END_LABEL_DROP: f64 = 16.0;

/// One gauge instance: configuration, drawn scene and controllers.
#[derive(Debug, Clone)]
pub struct Gauge {
    id: String,
    config: GaugeConfig,
    layout: GaugeLayout,
    bands: BandLayout,
    ticks: Vec<Tick>,
    lifecycle: Lifecycle,
    scene: Option<Scene>,
    needle: NeedleController,
    value_label: ValueLabel,
    tooltip: Option<TooltipController>,
}

impl Gauge {
    /// Validate `config` and prepare an unmounted gauge.
    pub fn new(config: GaugeConfig) -> Result<Self> {
        config.validate()?;
        let id = format!("chart-gauge-{}", NEXT_ID.fetch_add(1, Ordering::Relaxed));
        Ok(Self::build(id, config, Lifecycle::new()))
    }

    fn build(id: String, config: GaugeConfig, lifecycle: Lifecycle) -> Self {
        let layout = GaugeLayout::compute(config.canvas_size());
        let bands = BandLayout::compute(&config, &layout);

        let mut taken = bands.label_values();
        taken.extend([config.min_value(), config.max_value()]);
        let ticks = generate_ticks(&config, &layout, &taken);

        let needle =
            NeedleController::new(config.scale(), config.needle_timing, layout.needle_length);
        let value_label = ValueLabel::new(config.label.clone(), config.units.clone());
        let tooltip = config.tooltip_text().map(TooltipController::new);

        Self {
            id,
            config,
            layout,
            bands,
            ticks,
            lifecycle,
            scene: None,
            needle,
            value_label,
            tooltip,
        }
    }

    /// Set the id used to prefix element ids (gradients) in the scene.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Instance id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &GaugeConfig {
        &self.config
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.config.value
    }

    /// Lower domain bound.
    #[must_use]
    pub fn min_value(&self) -> f64 {
        self.config.min_value()
    }

    /// Upper domain bound.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.config.max_value()
    }

    /// Geometry for the current canvas.
    #[must_use]
    pub const fn layout(&self) -> &GaugeLayout {
        &self.layout
    }

    /// Arc sections and boundary labels.
    #[must_use]
    pub const fn band_layout(&self) -> &BandLayout {
        &self.bands
    }

    /// Tick marks.
    #[must_use]
    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    /// Mount state.
    #[must_use]
    pub const fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Whether the scene is drawn.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.lifecycle.is_mounted()
    }

    /// Drawn scene, if mounted.
    #[must_use]
    pub const fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// SVG markup of the current scene; empty when not mounted.
    #[must_use]
    pub fn to_svg(&self) -> String {
        self.scene.as_ref().map(Scene::to_svg).unwrap_or_default()
    }

    /// Needle controller.
    #[must_use]
    pub const fn needle(&self) -> &NeedleController {
        &self.needle
    }

    /// Value text controller.
    #[must_use]
    pub const fn value_label(&self) -> &ValueLabel {
        &self.value_label
    }

    /// Tooltip controller, when a tooltip is configured.
    #[must_use]
    pub const fn tooltip(&self) -> Option<&TooltipController> {
        self.tooltip.as_ref()
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Draw everything: arc and bands, ticks, needle, labels, tooltip.
    ///
    /// Mounting again discards the previous scene and node handles.
    pub fn mount(&mut self, now_ms: f64) -> &Scene {
        let canvas = self.layout.canvas;
        let mut scene = Scene::new(canvas.width, canvas.height);
        let root = scene.root();
        let chart = scene.append(
            root,
            Node::new(Tag::Group).class("chart-gauge").attr(
                "transform",
                format!(
                    "translate({},{})",
                    fmt_coord(self.layout.center.x),
                    fmt_coord(self.layout.center.y)
                ),
            ),
        );

        self.bands
            .draw(&mut scene, chart, &self.layout, &self.config, &self.id);
        self.draw_ticks(&mut scene, chart);

        let value = self.config.value;
        self.needle.unmount();
        self.needle.draw(
            &mut scene,
            chart,
            value,
            now_ms,
            self.config.sweep_on_mount,
            self.config.needle_color,
            self.config.pivot_color,
        );

        self.value_label.unmount();
        self.value_label.draw(
            &mut scene,
            chart,
            value,
            self.layout.value_offset,
            self.config.needle_color,
        );
        self.draw_end_labels(&mut scene, chart);

        if let Some(tooltip) = &mut self.tooltip {
            tooltip.unmount();
            tooltip.draw(&mut scene, chart, self.layout.tooltip_offset);
        }

        self.lifecycle.mount(now_ms);
        tracing::debug!(
            id = %self.id,
            generation = self.lifecycle.generation(),
            nodes = scene.len(),
            "gauge mounted"
        );
        self.scene.insert(scene)
    }

    fn draw_ticks(&self, scene: &mut Scene, parent: NodeId) {
        let stroke = self.config.tick_color.to_css();
        for tick in &self.ticks {
            scene.append(
                parent,
                Node::new(Tag::Line)
                    .class("gauge-tick")
                    .attr("x1", fmt_coord(tick.inner.x))
                    .attr("y1", fmt_coord(tick.inner.y))
                    .attr("x2", fmt_coord(tick.outer.x))
                    .attr("y2", fmt_coord(tick.outer.y))
                    .attr("stroke", &stroke),
            );
            if let Some(label) = &tick.label {
                scene.append(
                    parent,
                    Node::new(Tag::Text)
                        .class("gauge-tick-label")
                        .attr("x", fmt_coord(tick.label_at.x))
                        .attr("y", fmt_coord(tick.label_at.y))
                        .attr("text-anchor", "middle")
                        .attr("alignment-baseline", "middle")
                        .attr("fill", &stroke)
                        .text(label.clone()),
                );
            }
        }
    }

    fn draw_end_labels(&self, scene: &mut Scene, parent: NodeId) {
        let x = self.layout.mid_radius();
        let fill = self.config.tick_color.to_css();
        for (class, x, value) in [
            ("gauge-label gauge-min", -x, self.min_value()),
            ("gauge-label gauge-max", x, self.max_value()),
        ] {
            scene.append(
                parent,
                Node::new(Tag::Text)
                    .class(class)
                    .attr("x", fmt_coord(x))
                    .attr("y", fmt_coord(END_LABEL_DROP))
                    .attr("text-anchor", "middle")
                    .attr("alignment-baseline", "middle")
                    .attr("fill", &fill)
                    .text(format_number(value)),
            );
        }
    }

    /// Store a new value and, if mounted, start the needle and update the
    /// text. NaN and infinite values are ignored.
    pub fn set_value(&mut self, value: f64, now_ms: f64) -> PatchSet {
        if !value.is_finite() {
            tracing::warn!(value, "ignoring non-finite value");
            return PatchSet::new();
        }
        let old = self.config.value;
        self.config.value = value;
        self.on_value_changed(old, value, now_ms)
    }

    /// Replace the configuration and redraw, keeping the current value.
    ///
    /// On a validation error nothing changes.
    pub fn reconfigure(&mut self, mut config: GaugeConfig, now_ms: f64) -> Result<()> {
        config.validate()?;
        config.value = self.config.value;
        let was_mounted = self.is_mounted();
        *self = Self::build(std::mem::take(&mut self.id), config, self.lifecycle);
        if was_mounted {
            self.mount(now_ms);
        }
        Ok(())
    }

    /// Drop the scene and all controller handles.
    pub fn unmount(&mut self) {
        if !self.lifecycle.unmount() {
            return;
        }
        self.scene = None;
        self.needle.unmount();
        self.value_label.unmount();
        if let Some(tooltip) = &mut self.tooltip {
            tooltip.unmount();
        }
        tracing::debug!(id = %self.id, "gauge unmounted");
    }

    fn apply(&mut self, patches: &PatchSet) {
        if let Some(scene) = &mut self.scene {
            scene.apply_all(patches);
        }
    }
}

impl Animated for Gauge {
    fn tick(&mut self, now_ms: f64) -> PatchSet {
        if !self.is_mounted() {
            return PatchSet::new();
        }
        let mut patches = self.needle.tick(now_ms);
        if let Some(tooltip) = &mut self.tooltip {
            patches.extend(tooltip.tick(now_ms));
        }
        self.apply(&patches);
        patches
    }

    fn is_animating(&self) -> bool {
        self.needle.is_animating() || self.tooltip.as_ref().is_some_and(Animated::is_animating)
    }
}

impl Component for Gauge {
    fn on_mount(&mut self, now_ms: f64) -> &Scene {
        self.mount(now_ms)
    }

    fn on_value_changed(&mut self, old: f64, new: f64, now_ms: f64) -> PatchSet {
        if !self.is_mounted() {
            tracing::debug!(value = new, "value change before mount ignored");
            return PatchSet::new();
        }
        let scale = self.config.scale();
        if !scale.is_degenerate() && !scale.contains(new) {
            tracing::warn!(
                value = new,
                min = scale.min(),
                max = scale.max(),
                "value outside domain"
            );
        }
        tracing::debug!(old, new, "value changed");

        self.needle.update(new, now_ms);
        let mut patches = PatchSet::new();
        if let Some(patch) = self.value_label.update(new) {
            patches.push(patch);
        }
        self.apply(&patches);
        patches
    }

    fn on_event(&mut self, event: &Event, now_ms: f64) -> PatchSet {
        if let Some(tooltip) = &mut self.tooltip {
            match event {
                Event::PointerEnter => tooltip.show(now_ms),
                Event::PointerLeave => tooltip.hide(now_ms),
                Event::PointerMove { .. } => {}
            }
        }
        self.tick(now_ms)
    }

    fn on_unmount(&mut self) {
        self.unmount();
    }
}

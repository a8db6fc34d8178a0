//! Band/arc layout: turns threshold bands into colored arc segments and
//! boundary labels.
//!
//! The arc is cut into tick-sized sections (or, for [`BandPolicy::FullSweep`],
//! one wedge per band). Each section gets a fill according to the policy:
//!
//! - [`BandPolicy::Sectioned`]: the color of the first band containing the
//!   section's end value, gray if none does.
//! - [`BandPolicy::Proportional`]: a hard-stop gradient where each band's
//!   share of the section becomes a color run, uncovered stretches gray.
//! - [`BandPolicy::FullSweep`]: wedges sized by band width, laid end to end
//!   from the left end of the arc with no padding.

use crate::config::{Band, BandPolicy, GaugeConfig, MAX_SECTIONS};
use crate::layout::{GaugeLayout, LABEL_ROTATION_DEG, PAD_RAD};
use crate::ticks::same_value;
use chart_gauge_core::{
    fmt_coord, format_number, Color, Node, NodeId, Point, Scene, Tag, START_ANGLE,
};
use std::f64::consts::PI;

/// One color stop of a section gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the section, `0..=1`
    pub offset: f64,
    /// Stop color
    pub color: Color,
}

impl GradientStop {
    const fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

/// How a section is painted.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionFill {
    /// Single color
    Solid(Color),
    /// Hard-stop gradient running from the section's start to its end
    Gradient(Vec<GradientStop>),
}

/// One drawn wedge of the arc.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// 1-based position along the arc
    pub index: usize,
    /// Domain value at the start
    pub from: f64,
    /// Domain value at the end
    pub to: f64,
    /// Drawn start angle (after padding)
    pub start_angle: f64,
    /// Drawn end angle (after padding)
    pub end_angle: f64,
    /// Paint
    pub fill: SectionFill,
}

/// A value label placed next to the arc.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryLabel {
    /// Domain value
    pub value: f64,
    /// Rendered text
    pub text: String,
    /// Anchor relative to the pivot
    pub position: Point,
}

/// Sections and boundary labels for one configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BandLayout {
    /// Arc wedges in angular order
    pub sections: Vec<Section>,
    /// Boundary labels, excluding the domain ends
    pub labels: Vec<BoundaryLabel>,
}

impl BandLayout {
    /// Lay out bands for `config` on `layout`.
    #[must_use]
    pub fn compute(config: &GaugeConfig, layout: &GaugeLayout) -> Self {
        let scale = config.scale();
        if scale.is_degenerate() || scale.span() < 0.0 {
            tracing::warn!(
                min = scale.min(),
                max = scale.max(),
                "empty domain, drawing no arc sections"
            );
            return Self::default();
        }
        if config.bands.is_empty() {
            tracing::debug!("no bands configured; sections will be neutral");
        }
        match config.band_policy {
            BandPolicy::FullSweep => Self::full_sweep(config, layout),
            policy => Self::sectioned(config, layout, policy),
        }
    }

    fn sectioned(config: &GaugeConfig, layout: &GaugeLayout, policy: BandPolicy) -> Self {
        let scale = config.scale();
        let (min, max) = (scale.min(), scale.max());
        let bounds = section_bounds(min, max, config.section_interval(), config.section_origin());
        let count = bounds.len();

        let mut out = Self::default();
        for (i, (from, to)) in bounds.into_iter().enumerate() {
            let start = scale.angle(from);
            let end = scale.angle(to);
            let (start_angle, end_angle) = padded(start, end, i == 0, i + 1 == count);
            let fill = match policy {
                BandPolicy::Proportional => {
                    SectionFill::Gradient(coverage_stops(&config.bands, from, to))
                }
                _ => SectionFill::Solid(band_color_at(&config.bands, to)),
            };
            out.sections.push(Section {
                index: i + 1,
                from,
                to,
                start_angle,
                end_angle,
                fill,
            });

            if !same_value(to, min, max - min) && !same_value(to, max, max - min) {
                let mid = (start + end) / 2.0;
                out.labels.push(BoundaryLabel {
                    value: to,
                    text: format_number(to),
                    position: Point::polar(layout.label_radius, mid)
                        .rotate_degrees(LABEL_ROTATION_DEG),
                });
            }
        }
        out
    }

    fn full_sweep(config: &GaugeConfig, layout: &GaugeLayout) -> Self {
        let scale = config.scale();
        let (min, max) = (scale.min(), scale.max());
        let mut out = Self::default();
        let mut cursor = START_ANGLE;
        for (i, band) in config.bands.iter().enumerate() {
            let end = cursor + scale.sweep_of(band.width());
            out.sections.push(Section {
                index: i + 1,
                from: band.from,
                to: band.to,
                start_angle: cursor,
                end_angle: end,
                fill: SectionFill::Solid(band.color),
            });
            if !same_value(band.to, min, max - min) && !same_value(band.to, max, max - min) {
                out.labels.push(BoundaryLabel {
                    value: band.to,
                    text: format_number(band.to),
                    position: Point::polar(layout.label_radius, end)
                        .rotate_degrees(LABEL_ROTATION_DEG),
                });
            }
            cursor = end;
        }
        out
    }

    /// Values that already carry a label.
    #[must_use]
    pub fn label_values(&self) -> Vec<f64> {
        self.labels.iter().map(|l| l.value).collect()
    }

    /// Append the outline, sections and labels under `parent`.
    ///
    /// Gradients go into a `<defs>` block on the scene root, with ids
    /// prefixed by `id_prefix` so several gauges can share a page.
    pub fn draw(
        &self,
        scene: &mut Scene,
        parent: NodeId,
        layout: &GaugeLayout,
        config: &GaugeConfig,
        id_prefix: &str,
    ) {
        let (inner, outer) = (layout.inner_radius, layout.outer_radius);
        scene.append(
            parent,
            Node::new(Tag::Path)
                .class("gauge-outline")
                .attr("d", ring_arc_path(inner, outer, START_ANGLE, START_ANGLE + PI))
                .attr("fill", "none")
                .attr("stroke", config.line_color.to_css())
                .attr("stroke-width", 1),
        );

        let mut defs: Option<NodeId> = None;
        for section in &self.sections {
            let fill = match &section.fill {
                SectionFill::Solid(color) => color.to_css(),
                SectionFill::Gradient(stops) => {
                    let defs = *defs.get_or_insert_with(|| {
                        let root = scene.root();
                        scene.append(root, Node::new(Tag::Defs))
                    });
                    let id = format!("{id_prefix}-section-{}", section.index);
                    self.draw_gradient(scene, defs, &id, section, stops, layout.mid_radius());
                    format!("url(#{id})")
                }
            };
            scene.append(
                parent,
                Node::new(Tag::Path)
                    .class(&format!("arc chart-color{}", section.index))
                    .attr(
                        "d",
                        ring_arc_path(inner, outer, section.start_angle, section.end_angle),
                    )
                    .attr("fill", fill),
            );
        }

        for label in &self.labels {
            scene.append(
                parent,
                Node::new(Tag::Text)
                    .class("gauge-label")
                    .attr("x", fmt_coord(label.position.x))
                    .attr("y", fmt_coord(label.position.y))
                    .attr("text-anchor", "middle")
                    .attr("alignment-baseline", "middle")
                    .attr("fill", config.tick_color.to_css())
                    .text(label.text.clone()),
            );
        }
    }

    fn draw_gradient(
        &self,
        scene: &mut Scene,
        defs: NodeId,
        id: &str,
        section: &Section,
        stops: &[GradientStop],
        radius: f64,
    ) {
        let a = Point::polar(radius, section.start_angle);
        let b = Point::polar(radius, section.end_angle);
        let gradient = scene.append(
            defs,
            Node::new(Tag::LinearGradient)
                .attr("id", id)
                .attr("gradientUnits", "userSpaceOnUse")
                .attr("x1", fmt_coord(a.x))
                .attr("y1", fmt_coord(a.y))
                .attr("x2", fmt_coord(b.x))
                .attr("y2", fmt_coord(b.y)),
        );
        for stop in stops {
            scene.append(
                gradient,
                Node::new(Tag::Stop)
                    .attr("offset", format_number(stop.offset))
                    .attr("stop-color", stop.color.to_css()),
            );
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Split `[min, max]` at `origin + k * interval`.
///
/// Boundaries past the ends are dropped, so the first and last sections
/// may be shorter than `interval`.
#[must_use]
pub fn section_bounds(min: f64, max: f64, interval: f64, origin: f64) -> Vec<(f64, f64)> {
    let span = max - min;
    if span <= 0.0
        || interval <= 0.0
        || !span.is_finite()
        || !interval.is_finite()
        || !origin.is_finite()
    {
        return Vec::new();
    }
    let eps = span * 1e-9;
    let mut edges = vec![min];
    let mut k = ((min - origin) / interval).floor().max(0.0);
    loop {
        let edge = k.mul_add(interval, origin);
        if edge >= max - eps || edges.len() >= MAX_SECTIONS {
            break;
        }
        if edge > min + eps {
            edges.push(edge);
        }
        k += 1.0;
    }
    edges.push(max);
    edges.windows(2).map(|pair| (pair[0], pair[1])).collect()
}

/// Inset a section's angles by half the pad, except at the arc's two ends.
#[must_use]
pub fn padded(start: f64, end: f64, first: bool, last: bool) -> (f64, f64) {
    let pad = (PAD_RAD / 2.0).min((end - start).abs() / 4.0);
    (
        if first { start } else { start + pad },
        if last { end } else { end - pad },
    )
}

/// Color of the first band containing `value`, neutral gray otherwise.
#[must_use]
pub fn band_color_at(bands: &[Band], value: f64) -> Color {
    bands
        .iter()
        .find(|b| b.contains(value))
        .map_or(Color::NEUTRAL, |b| b.color)
}

/// Hard-stop gradient for `[lo, hi]`.
///
/// Walks the bands in order; where bands overlap, the earlier one keeps the
/// shared stretch. Offsets are non-decreasing and the last stop sits at 1.
#[must_use]
pub fn coverage_stops(bands: &[Band], lo: f64, hi: f64) -> Vec<GradientStop> {
    let width = hi - lo;
    if width <= 0.0 {
        return vec![
            GradientStop::new(0.0, Color::NEUTRAL),
            GradientStop::new(1.0, Color::NEUTRAL),
        ];
    }
    let offset = |x: f64| ((x - lo) / width).clamp(0.0, 1.0);

    let mut stops = Vec::new();
    let mut cursor = lo;
    for band in bands {
        let start = band.from.max(lo).max(cursor);
        let end = band.to.min(hi);
        if end <= start {
            continue;
        }
        if start > cursor {
            stops.push(GradientStop::new(offset(cursor), Color::NEUTRAL));
            stops.push(GradientStop::new(offset(start), Color::NEUTRAL));
        }
        stops.push(GradientStop::new(offset(start), band.color));
        stops.push(GradientStop::new(offset(end), band.color));
        cursor = end;
    }
    if cursor < hi {
        stops.push(GradientStop::new(offset(cursor), Color::NEUTRAL));
        stops.push(GradientStop::new(1.0, Color::NEUTRAL));
    }
    if let Some(last) = stops.last_mut() {
        last.offset = 1.0;
    }
    stops
}

/// Closed path for the ring segment between `start` and `end`.
#[must_use]
pub fn ring_arc_path(inner: f64, outer: f64, start: f64, end: f64) -> String {
    let outer_start = Point::polar(outer, start);
    let outer_end = Point::polar(outer, end);
    let inner_end = Point::polar(inner, end);
    let inner_start = Point::polar(inner, start);
    let large_arc = u8::from((end - start).abs() > PI);

    format!(
        "M {} {} A {r_o} {r_o} 0 {large_arc} 1 {} {} L {} {} A {r_i} {r_i} 0 {large_arc} 0 {} {} Z",
        fmt_coord(outer_start.x),
        fmt_coord(outer_start.y),
        fmt_coord(outer_end.x),
        fmt_coord(outer_end.y),
        fmt_coord(inner_end.x),
        fmt_coord(inner_end.y),
        fmt_coord(inner_start.x),
        fmt_coord(inner_start.y),
        r_o = fmt_coord(outer),
        r_i = fmt_coord(inner),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chart_gauge_core::{Size, END_ANGLE};
    use proptest::prelude::*;

    fn color(name: &str) -> Color {
        Color::parse(name).unwrap()
    }

    fn traffic_light() -> Vec<Band> {
        vec![
            Band::new("Low", 0.0, 30.0, color("green")),
            Band::new("Medium", 30.0, 70.0, color("yellow")),
            Band::new("High", 70.0, 100.0, color("red")),
        ]
    }

    fn layout() -> GaugeLayout {
        GaugeLayout::compute(Size::new(400.0, 300.0))
    }

    // =========================================================================
    // Section bounds
    // =========================================================================

    #[test]
    fn test_section_bounds_even() {
        let bounds = section_bounds(0.0, 100.0, 10.0, 0.0);
        assert_eq!(bounds.len(), 10);
        assert_eq!(bounds[0], (0.0, 10.0));
        assert_eq!(bounds[9], (90.0, 100.0));
    }

    #[test]
    fn test_section_bounds_remainder() {
        let bounds = section_bounds(0.0, 100.0, 30.0, 0.0);
        assert_eq!(bounds, vec![(0.0, 30.0), (30.0, 60.0), (60.0, 90.0), (90.0, 100.0)]);
    }

    #[test]
    fn test_section_bounds_round_origin() {
        let bounds = section_bounds(3.0, 97.0, 20.0, 20.0);
        assert_eq!(
            bounds,
            vec![(3.0, 20.0), (20.0, 40.0), (40.0, 60.0), (60.0, 80.0), (80.0, 97.0)]
        );
    }

    #[test]
    fn test_section_bounds_degenerate() {
        assert!(section_bounds(5.0, 5.0, 1.0, 5.0).is_empty());
        assert!(section_bounds(0.0, 10.0, 0.0, 0.0).is_empty());
    }

    #[test]
    fn test_padding_skips_outer_ends() {
        let (s, e) = padded(0.0, 1.0, true, false);
        assert_eq!(s, 0.0);
        assert_eq!(e, 1.0 - PAD_RAD / 2.0);
        let (s, e) = padded(0.0, 1.0, false, true);
        assert_eq!(s, PAD_RAD / 2.0);
        assert_eq!(e, 1.0);
    }

    #[test]
    fn test_padding_never_inverts_narrow_sections() {
        let (s, e) = padded(0.0, 0.01, false, false);
        assert!(s < e);
    }

    // =========================================================================
    // Sectioned policy
    // =========================================================================

    #[test]
    fn test_sectioned_colors_by_section_end() {
        let config = GaugeConfig::default().bands(traffic_light());
        let bands = BandLayout::compute(&config, &layout());
        assert_eq!(bands.sections.len(), 10);
        // Section 3 ends at 30, which the first band still contains.
        assert_eq!(bands.sections[2].fill, SectionFill::Solid(color("green")));
        assert_eq!(bands.sections[3].fill, SectionFill::Solid(color("yellow")));
        assert_eq!(bands.sections[9].fill, SectionFill::Solid(color("red")));
    }

    #[test]
    fn test_sectioned_uncovered_is_neutral() {
        let config = GaugeConfig::default()
            .band(Band::new("only", 0.0, 20.0, color("blue")))
            .domain(0.0, 100.0);
        let bands = BandLayout::compute(&config, &layout());
        assert_eq!(bands.sections[5].fill, SectionFill::Solid(Color::NEUTRAL));
    }

    #[test]
    fn test_sectioned_spans_full_arc() {
        let config = GaugeConfig::default().bands(traffic_light());
        let bands = BandLayout::compute(&config, &layout());
        assert_eq!(bands.sections[0].start_angle, START_ANGLE);
        assert_eq!(bands.sections.last().unwrap().end_angle, END_ANGLE);
    }

    #[test]
    fn test_sectioned_labels_skip_domain_ends() {
        let config = GaugeConfig::default().bands(traffic_light());
        let bands = BandLayout::compute(&config, &layout());
        let values = bands.label_values();
        assert_eq!(values.len(), 9);
        assert_eq!(values[0], 10.0);
        assert!(!values.contains(&100.0));
        assert_eq!(bands.labels[4].text, "50");
    }

    #[test]
    fn test_section_label_is_rotated_off_mid_angle() {
        let layout = layout();
        let config = GaugeConfig::default().bands(traffic_light());
        let bands = BandLayout::compute(&config, &layout);
        let label = &bands.labels[0];
        let mid = (bands.sections[0].start_angle + config.scale().angle(10.0)) / 2.0;
        let unrotated = Point::polar(layout.label_radius, mid);
        assert!((label.position.distance(&Point::ORIGIN) - layout.label_radius).abs() < 1e-9);
        assert!(label.position.distance(&unrotated) > 1.0);
    }

    #[test]
    fn test_degenerate_domain_draws_nothing() {
        let config = GaugeConfig::default().domain(50.0, 50.0);
        assert_eq!(BandLayout::compute(&config, &layout()), BandLayout::default());
    }

    // =========================================================================
    // Proportional policy
    // =========================================================================

    #[test]
    fn test_coverage_split_section() {
        let bands = vec![
            Band::new("a", 0.0, 25.0, color("green")),
            Band::new("b", 25.0, 30.0, color("red")),
        ];
        let stops = coverage_stops(&bands, 20.0, 30.0);
        let offsets: Vec<f64> = stops.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.5, 0.5, 1.0]);
        assert_eq!(stops[0].color, color("green"));
        assert_eq!(stops[3].color, color("red"));
    }

    #[test]
    fn test_coverage_gap_is_gray() {
        let bands = vec![Band::new("late", 5.0, 10.0, color("blue"))];
        let stops = coverage_stops(&bands, 0.0, 10.0);
        assert_eq!(stops[0].color, Color::NEUTRAL);
        assert_eq!(stops[1].offset, 0.5);
        assert_eq!(stops[3].color, color("blue"));
        assert_eq!(stops[3].offset, 1.0);
    }

    #[test]
    fn test_coverage_uncovered_section_is_gray() {
        let stops = coverage_stops(&[], 0.0, 10.0);
        assert_eq!(stops.len(), 2);
        assert!(stops.iter().all(|s| s.color == Color::NEUTRAL));
        assert_eq!(stops[1].offset, 1.0);
    }

    #[test]
    fn test_proportional_draws_gradients() {
        let config = GaugeConfig::default()
            .bands(traffic_light())
            .band_policy(BandPolicy::Proportional);
        let layout = layout();
        let bands = BandLayout::compute(&config, &layout);
        let mut scene = Scene::new(400.0, 300.0);
        let root = scene.root();
        bands.draw(&mut scene, root, &layout, &config, "g1");
        assert_eq!(scene.find_by_class("arc").len(), 10);
        let first = scene.first_by_class("chart-color1").unwrap();
        assert_eq!(
            scene.node(first).unwrap().get_attr("fill"),
            Some("url(#g1-section-1)")
        );
        assert!(scene.to_svg().contains("<linearGradient id=\"g1-section-1\""));
    }

    proptest! {
        #[test]
        fn prop_stops_cover_unit_interval(
            lo in -100.0f64..100.0,
            width in 0.1f64..50.0,
            raw in proptest::collection::vec((-150.0f64..150.0, 0.0f64..60.0), 0..6),
        ) {
            let mut bands: Vec<Band> = raw
                .into_iter()
                .map(|(from, w)| Band::new("b", from, from + w, Color::BLACK))
                .collect();
            bands.sort_by(|a, b| a.from.total_cmp(&b.from));
            let stops = coverage_stops(&bands, lo, lo + width);

            prop_assert!(stops.len() >= 2);
            prop_assert_eq!(stops[0].offset, 0.0);
            prop_assert_eq!(stops[stops.len() - 1].offset, 1.0);
            for pair in stops.windows(2) {
                prop_assert!(pair[1].offset >= pair[0].offset);
            }
            // Stops come in (start, end) pairs whose deltas sum to one.
            let covered: f64 = stops.chunks(2).map(|p| p[1].offset - p[0].offset).sum();
            prop_assert!((covered - 1.0).abs() < 1e-9);
        }
    }

    // =========================================================================
    // Full-sweep policy
    // =========================================================================

    #[test]
    fn test_full_sweep_is_contiguous() {
        let config = GaugeConfig::default()
            .bands(traffic_light())
            .band_policy(BandPolicy::FullSweep);
        let bands = BandLayout::compute(&config, &layout());
        assert_eq!(bands.sections.len(), 3);
        assert_eq!(bands.sections[0].start_angle, START_ANGLE);
        for pair in bands.sections.windows(2) {
            assert_eq!(pair[0].end_angle, pair[1].start_angle);
        }
        let end = bands.sections[2].end_angle;
        assert!((end - END_ANGLE).abs() < 1e-12);
        let widths: Vec<f64> = bands
            .sections
            .iter()
            .map(|s| s.end_angle - s.start_angle)
            .collect();
        assert!((widths[1] - 0.4 * PI).abs() < 1e-12);
    }

    #[test]
    fn test_full_sweep_labels_at_inner_boundaries() {
        let config = GaugeConfig::default()
            .bands(traffic_light())
            .band_policy(BandPolicy::FullSweep);
        let bands = BandLayout::compute(&config, &layout());
        assert_eq!(bands.label_values(), vec![30.0, 70.0]);
    }

    #[test]
    fn test_full_sweep_labels_use_label_rotation() {
        let config = GaugeConfig::default()
            .bands(traffic_light())
            .band_policy(BandPolicy::FullSweep);
        let layout = layout();
        let bands = BandLayout::compute(&config, &layout);
        let end = bands.sections[0].end_angle;
        let expected = Point::polar(layout.label_radius, end).rotate_degrees(LABEL_ROTATION_DEG);
        let label = &bands.labels[0];
        assert!(label.position.distance(&expected) < 1e-9);
        assert!(label.position.distance(&Point::polar(layout.label_radius, end)) > 1.0);
    }

    #[test]
    fn test_counted_sections_start_on_round_values() {
        let config = GaugeConfig::default().domain(3.0, 97.0).tick_count(4);
        let bands = BandLayout::compute(&config, &layout());
        let edges: Vec<(f64, f64)> = bands.sections.iter().map(|s| (s.from, s.to)).collect();
        assert_eq!(edges[0], (3.0, 20.0));
        assert_eq!(edges[4], (80.0, 97.0));
        assert_eq!(bands.label_values(), vec![20.0, 40.0, 60.0, 80.0]);
    }

    // =========================================================================
    // Paths
    // =========================================================================

    #[test]
    fn test_ring_arc_path_half_circle() {
        let d = ring_arc_path(150.0, 170.0, START_ANGLE, END_ANGLE);
        assert!(d.starts_with("M -170 0 A 170 170 0 0 1 170 0 L 150 0 A 150 150 0 0 0 -150 0"));
        assert!(d.ends_with('Z'));
    }
}

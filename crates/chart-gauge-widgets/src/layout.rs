//! Fixed layout constants and the per-canvas geometry derived from them.

use chart_gauge_core::{Point, Size};

/// Space kept clear around the gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    /// Top margin
    pub top: f64,
    /// Right margin
    pub right: f64,
    /// Bottom margin
    pub bottom: f64,
    /// Left margin
    pub left: f64,
}

impl Margins {
    /// Gauge margins: 20 on three sides, 30 at the bottom.
    pub const GAUGE: Self = Self {
        top: 20.0,
        right: 20.0,
        bottom: 30.0,
        left: 20.0,
    };
}

/// Radial thickness of the colored arc.
pub const BAR_WIDTH: f64 = 20.0;
/// Gap between the nominal radius and the arc's outer edge.
pub const CHART_INSET: f64 = 10.0;
/// Angular padding between adjacent sections, in radians.
pub const PAD_RAD: f64 = 0.05;
/// Distance from the arc's outer edge to label anchors.
pub const LABEL_OFFSET: f64 = 20.0;
/// Rotation applied to section boundary labels, in degrees.
pub const LABEL_ROTATION_DEG: f64 = -10.0;
/// Length of a tick mark.
pub const TICK_LENGTH: f64 = 6.0;
/// Needle length from the pivot.
pub const NEEDLE_LENGTH: f64 = 75.0;
/// Pivot circle radius and needle half-width.
pub const PIVOT_RADIUS: f64 = 10.0;
/// Vertical room reserved under the pivot for the value text and tooltip.
pub const RESERVED_BELOW: f64 = 50.0;
/// Gap between the value text and the tooltip.
pub const TOOLTIP_GAP: f64 = 28.0;

/// Where everything goes on a given canvas.
///
/// All radii and offsets are relative to `center`, which the orchestrator
/// applies as a group transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeLayout {
    /// Full SVG size
    pub canvas: Size,
    /// Pivot position in canvas coordinates
    pub center: Point,
    /// Nominal radius
    pub radius: f64,
    /// Arc outer edge
    pub outer_radius: f64,
    /// Arc inner edge
    pub inner_radius: f64,
    /// Label anchor radius
    pub label_radius: f64,
    /// Needle length
    pub needle_length: f64,
    /// Value text offset below the pivot
    pub value_offset: f64,
    /// Tooltip offset below the pivot
    pub tooltip_offset: f64,
}

impl GaugeLayout {
    /// Lay out a gauge on `canvas`.
    #[must_use]
    pub fn compute(canvas: Size) -> Self {
        let m = Margins::GAUGE;
        let inner_w = (canvas.width - m.left - m.right).max(0.0);
        let inner_h = (canvas.height - m.top - m.bottom).max(0.0);
        let radius = (inner_w / 2.0).min(inner_h - RESERVED_BELOW).max(0.0);

        let outer_radius = (radius - CHART_INSET).max(0.0);
        let inner_radius = (outer_radius - BAR_WIDTH).max(0.0);
        let value_offset = (radius / 2.0).min(RESERVED_BELOW - 10.0);

        Self {
            canvas,
            center: Point::new(m.left + inner_w / 2.0, m.top + radius),
            radius,
            outer_radius,
            inner_radius,
            label_radius: outer_radius + LABEL_OFFSET,
            needle_length: NEEDLE_LENGTH.min(inner_radius).max(PIVOT_RADIUS),
            value_offset,
            tooltip_offset: value_offset + TOOLTIP_GAP,
        }
    }

    /// Radius through the middle of the colored bar.
    #[must_use]
    pub fn mid_radius(&self) -> f64 {
        (self.outer_radius + self.inner_radius) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_canvas() {
        let layout = GaugeLayout::compute(Size::new(400.0, 300.0));
        assert_eq!(layout.radius, 180.0);
        assert_eq!(layout.center, Point::new(200.0, 200.0));
        assert_eq!(layout.outer_radius, 170.0);
        assert_eq!(layout.inner_radius, 150.0);
        assert_eq!(layout.label_radius, 190.0);
        assert_eq!(layout.needle_length, NEEDLE_LENGTH);
        assert_eq!(layout.value_offset, 40.0);
        assert_eq!(layout.tooltip_offset, 68.0);
    }

    #[test]
    fn test_short_canvas_limits_radius_by_height() {
        let layout = GaugeLayout::compute(Size::new(400.0, 200.0));
        assert_eq!(layout.radius, 100.0);
        assert_eq!(layout.center.y, 120.0);
    }

    #[test]
    fn test_tiny_canvas_never_negative() {
        let layout = GaugeLayout::compute(Size::new(10.0, 10.0));
        assert_eq!(layout.radius, 0.0);
        assert_eq!(layout.inner_radius, 0.0);
        assert!(layout.needle_length >= PIVOT_RADIUS);
    }
}

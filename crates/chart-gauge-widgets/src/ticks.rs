//! Tick marks along the arc.

use crate::config::{GaugeConfig, MAX_SECTIONS};
use crate::layout::{GaugeLayout, TICK_LENGTH};
use chart_gauge_core::{format_number, AngleScale, Point};

/// How tick positions are chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickSpec {
    /// Every `step` units starting at the minimum.
    Interval(f64),
    /// Roughly this many ticks at a round step.
    Count(usize),
}

impl TickSpec {
    /// Tick placement implied by a configuration.
    #[must_use]
    pub fn from_config(config: &GaugeConfig) -> Self {
        match config.tick_count {
            Some(count) if count > 0 => Self::Count(count),
            _ => Self::Interval(config.tick_interval),
        }
    }

    /// Distance between ticks over a domain of width `span`.
    #[must_use]
    pub fn step(self, span: f64) -> f64 {
        match self {
            Self::Interval(step) => step,
            Self::Count(0) => 0.0,
            Self::Count(count) => count_step(span, count),
        }
    }

    /// Value of the first tick at or above `min`.
    ///
    /// Counted ticks sit on multiples of `step`; interval ticks start at
    /// the minimum itself.
    #[must_use]
    pub fn origin(self, min: f64, step: f64) -> f64 {
        match self {
            Self::Count(_) if step > 0.0 && step.is_finite() => (min / step).ceil() * step,
            _ => min,
        }
    }
}

/// One tick mark and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Domain value
    pub value: f64,
    /// Angle on the gauge
    pub angle: f64,
    /// Mark start (on the arc's outer edge)
    pub inner: Point,
    /// Mark end
    pub outer: Point,
    /// Label anchor
    pub label_at: Point,
    /// Label text; `None` when another label already shows this value
    pub label: Option<String>,
}

/// Round `raw` to 1, 2 or 5 times a power of ten.
#[must_use]
pub fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return raw;
    }
    let exponent = raw.log10().floor() as i32;
    let base = 10f64.powi(exponent);
    let fraction = raw / base;
    let nice = if fraction < 1.5 {
        1.0
    } else if fraction < 3.0 {
        2.0
    } else if fraction < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// Largest 1, 2 or 5 times a power of ten not above `limit`.
#[must_use]
pub fn nice_floor(limit: f64) -> f64 {
    if !limit.is_finite() || limit <= 0.0 {
        return limit;
    }
    let base = 10f64.powi(limit.log10().floor() as i32);
    let fraction = limit / base;
    let nice = if fraction >= 5.0 {
        5.0
    } else if fraction >= 2.0 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// Round step giving about `count` sections over `span`.
///
/// Never wider than the span itself, so at least one tick past the
/// minimum stays on the arc.
#[must_use]
pub fn count_step(span: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let step = nice_step(span / count as f64);
    if step > span {
        nice_floor(span)
    } else {
        step
    }
}

/// Tick values over `[min, max]`.
///
/// Empty for a degenerate or inverted domain or a non-positive step.
#[must_use]
pub fn tick_values(min: f64, max: f64, spec: TickSpec) -> Vec<f64> {
    let span = max - min;
    if span <= 0.0 || !span.is_finite() {
        return Vec::new();
    }
    let step = spec.step(span);
    if step <= 0.0 || !step.is_finite() {
        return Vec::new();
    }
    let start = spec.origin(min, step);

    let eps = span * 1e-9;
    let count = (((max - start) + eps) / step).floor();
    if count < 0.0 {
        return Vec::new();
    }
    let count = (count as usize).min(MAX_SECTIONS);
    (0..=count)
        .map(|k| (k as f64).mul_add(step, start))
        .filter(|v| *v <= max + eps)
        .collect()
}

/// Whether two domain values are the same label.
#[must_use]
pub fn same_value(a: f64, b: f64, span: f64) -> bool {
    (a - b).abs() <= 1e-9 * span.abs().max(1.0)
}

/// Build ticks for `config`, suppressing labels for values in `taken`.
#[must_use]
pub fn generate_ticks(config: &GaugeConfig, layout: &GaugeLayout, taken: &[f64]) -> Vec<Tick> {
    let scale: AngleScale = config.scale();
    let span = scale.span();
    tick_values(scale.min(), scale.max(), TickSpec::from_config(config))
        .into_iter()
        .map(|value| {
            let angle = scale.angle(value);
            let duplicate = taken.iter().any(|t| same_value(*t, value, span));
            Tick {
                value,
                angle,
                inner: Point::polar(layout.outer_radius, angle),
                outer: Point::polar(layout.outer_radius + TICK_LENGTH, angle),
                label_at: Point::polar(layout.label_radius, angle),
                label: (!duplicate).then(|| format_number(value)),
            }
        })
        .collect()
}

//! Time-based tweens with easing.
//!
//! Animations here are pure functions of time: a [`Tween`] records where it
//! started and how long it runs, and [`Tween::sample`] returns the value for
//! any host timestamp. Hosts drive them from their frame scheduler
//! (`requestAnimationFrame` in the browser, a manual clock in tests).

use serde::{Deserialize, Serialize};

// =============================================================================
// Easing Functions
// =============================================================================

/// Standard easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    /// Linear interpolation (no easing)
    #[default]
    Linear,
    /// Ease in (slow start)
    EaseIn,
    /// Ease out (slow end)
    EaseOut,
    /// Ease in and out (slow start and end)
    EaseInOut,
    /// Cubic ease out
    CubicOut,
    /// Elastic: overshoots the target and settles
    ElasticOut,
    /// Bounce at end
    BounceOut,
    /// Back ease out (overshoots then returns)
    BackOut,
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => (1.0 - t).mul_add(-(1.0 - t), 1.0),
            Self::EaseInOut => Self::ease_in_out_quad(t),
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
            Self::ElasticOut => Self::elastic_out(t),
            Self::BounceOut => Self::bounce_out(t),
            Self::BackOut => Self::back_out(t),
        }
    }

    /// Whether the curve leaves `[0, 1]` before settling.
    #[must_use]
    pub const fn overshoots(self) -> bool {
        matches!(self, Self::ElasticOut | Self::BackOut)
    }

    fn ease_in_out_quad(t: f64) -> f64 {
        if t < 0.5 {
            2.0 * t * t
        } else {
            1.0 - (-2.0f64).mul_add(t, 2.0).powi(2) / 2.0
        }
    }

    fn elastic_out(t: f64) -> f64 {
        if t == 0.0 || (t - 1.0).abs() < f64::EPSILON {
            t
        } else {
            let c4 = (2.0 * std::f64::consts::PI) / 3.0;
            (-10.0 * t)
                .exp2()
                .mul_add((t.mul_add(10.0, -0.75) * c4).sin(), 1.0)
        }
    }

    fn bounce_out(t: f64) -> f64 {
        const N1: f64 = 7.5625;
        const D1: f64 = 2.75;

        if t < 1.0 / D1 {
            N1 * t * t
        } else if t < 2.0 / D1 {
            let t = t - 1.5 / D1;
            (N1 * t).mul_add(t, 0.75)
        } else if t < 2.5 / D1 {
            let t = t - 2.25 / D1;
            (N1 * t).mul_add(t, 0.9375)
        } else {
            let t = t - 2.625 / D1;
            (N1 * t).mul_add(t, 0.984_375)
        }
    }

    fn back_out(t: f64) -> f64 {
        const C1: f64 = 1.70158;
        const C3: f64 = C1 + 1.0;
        C1.mul_add((t - 1.0).powi(2), C3.mul_add((t - 1.0).powi(3), 1.0))
    }
}

// =============================================================================
// Timing - delay, duration and curve of a transition
// =============================================================================

/// Delay, duration and easing of a transition, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Timing {
    /// Wait before the value starts moving
    pub delay_ms: f64,
    /// Time from first movement to settling
    pub duration_ms: f64,
    /// Easing curve
    pub easing: Easing,
}

impl Timing {
    /// Needle sweep: 500ms delay, 3s elastic settle.
    pub const NEEDLE: Self = Self {
        delay_ms: 500.0,
        duration_ms: 3000.0,
        easing: Easing::ElasticOut,
    };

    /// Direct 1s elastic tween with no delay.
    pub const MINIMAL: Self = Self {
        delay_ms: 0.0,
        duration_ms: 1000.0,
        easing: Easing::ElasticOut,
    };

    /// Tooltip fade-in.
    pub const FADE_IN: Self = Self {
        delay_ms: 0.0,
        duration_ms: 150.0,
        easing: Easing::Linear,
    };

    /// Tooltip fade-out; slower than fade-in so the tooltip lingers.
    pub const FADE_OUT: Self = Self {
        delay_ms: 0.0,
        duration_ms: 400.0,
        easing: Easing::Linear,
    };

    /// Create a custom timing.
    #[must_use]
    pub const fn new(delay_ms: f64, duration_ms: f64, easing: Easing) -> Self {
        Self {
            delay_ms,
            duration_ms,
            easing,
        }
    }

    /// Total time from start to settle.
    #[must_use]
    pub fn total_ms(&self) -> f64 {
        self.delay_ms.max(0.0) + self.duration_ms.max(0.0)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::NEEDLE
    }
}

// =============================================================================
// Tween - a value moving between two endpoints over time
// =============================================================================

/// A single transition from `from` to `to`, anchored at `start_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    /// Start value
    pub from: f64,
    /// End value
    pub to: f64,
    /// Host timestamp when the tween was issued
    pub start_ms: f64,
    /// Delay, duration and curve
    pub timing: Timing,
}

impl Tween {
    /// Create a tween starting at `start_ms`.
    #[must_use]
    pub const fn new(from: f64, to: f64, start_ms: f64, timing: Timing) -> Self {
        Self {
            from,
            to,
            start_ms,
            timing,
        }
    }

    /// Fraction of the movement phase elapsed at `now_ms`, in `[0, 1]`.
    ///
    /// Stays at `0` during the delay. A zero duration jumps straight to `1`
    /// once the delay has passed.
    #[must_use]
    pub fn elapsed_fraction(&self, now_ms: f64) -> f64 {
        let moving = now_ms - self.start_ms - self.timing.delay_ms.max(0.0);
        if self.timing.duration_ms <= 0.0 {
            return if moving >= 0.0 { 1.0 } else { 0.0 };
        }
        (moving / self.timing.duration_ms).clamp(0.0, 1.0)
    }

    /// Value at `now_ms`. Returns exactly `to` once complete.
    #[must_use]
    pub fn sample(&self, now_ms: f64) -> f64 {
        self.value_at(self.elapsed_fraction(now_ms))
    }

    /// Value for an already-computed elapsed fraction.
    #[must_use]
    pub fn value_at(&self, fraction: f64) -> f64 {
        if fraction >= 1.0 {
            return self.to;
        }
        let eased = self.timing.easing.apply(fraction);
        (self.to - self.from).mul_add(eased, self.from)
    }

    /// Whether the tween has settled at `now_ms`.
    #[must_use]
    pub fn is_complete(&self, now_ms: f64) -> bool {
        self.elapsed_fraction(now_ms) >= 1.0
    }

    /// Timestamp at which the tween settles.
    #[must_use]
    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.timing.total_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // -------------------------------------------------------------------------
    // Easing tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_easing_linear() {
        assert!((Easing::Linear.apply(0.0) - 0.0).abs() < 0.001);
        assert!((Easing::Linear.apply(0.5) - 0.5).abs() < 0.001);
        assert!((Easing::Linear.apply(1.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_easing_clamps_input() {
        assert!((Easing::Linear.apply(-0.5) - 0.0).abs() < 0.001);
        assert!((Easing::Linear.apply(1.5) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_easing_ease_in_out() {
        assert!(Easing::EaseIn.apply(0.5) < 0.5);
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_easing_elastic_endpoints() {
        assert_eq!(Easing::ElasticOut.apply(0.0), 0.0);
        assert_eq!(Easing::ElasticOut.apply(1.0), 1.0);
    }

    #[test]
    fn test_easing_elastic_overshoots() {
        let peak = (1..100)
            .map(|i| Easing::ElasticOut.apply(f64::from(i) / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0, "elastic should overshoot, peak was {peak}");
        assert!(Easing::ElasticOut.overshoots());
        assert!(!Easing::Linear.overshoots());
    }

    #[test]
    fn test_easing_bounce_and_back() {
        assert!((Easing::BounceOut.apply(1.0) - 1.0).abs() < 0.001);
        assert!((Easing::BackOut.apply(1.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_easing_serde_names() {
        let e: Easing = serde_json::from_str("\"elasticOut\"").unwrap();
        assert_eq!(e, Easing::ElasticOut);
    }

    // -------------------------------------------------------------------------
    // Timing tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_timing_presets() {
        assert_eq!(Timing::NEEDLE.total_ms(), 3500.0);
        assert_eq!(Timing::MINIMAL.total_ms(), 1000.0);
        assert!(Timing::FADE_IN.duration_ms < Timing::FADE_OUT.duration_ms);
        assert_eq!(Timing::default(), Timing::NEEDLE);
    }

    #[test]
    fn test_timing_partial_serde_uses_defaults() {
        let t: Timing = serde_json::from_str(r#"{"durationMs": 1000}"#).unwrap();
        assert_eq!(t.duration_ms, 1000.0);
        assert_eq!(t.delay_ms, 500.0);
        assert_eq!(t.easing, Easing::ElasticOut);
    }

    // -------------------------------------------------------------------------
    // Tween tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_tween_holds_during_delay() {
        let tween = Tween::new(0.0, 1.0, 100.0, Timing::NEEDLE);
        assert_eq!(tween.sample(100.0), 0.0);
        assert_eq!(tween.sample(599.0), 0.0);
        assert!(!tween.is_complete(599.0));
    }

    #[test]
    fn test_tween_settles_exactly() {
        let tween = Tween::new(-1.0, 0.7, 0.0, Timing::NEEDLE);
        assert_eq!(tween.sample(3500.0), 0.7);
        assert_eq!(tween.sample(10_000.0), 0.7);
        assert!(tween.is_complete(3500.0));
        assert_eq!(tween.end_ms(), 3500.0);
    }

    #[test]
    fn test_tween_linear_midpoint() {
        let tween = Tween::new(0.0, 10.0, 0.0, Timing::new(0.0, 100.0, Easing::Linear));
        assert!((tween.sample(50.0) - 5.0).abs() < 1e-9);
        assert!((tween.elapsed_fraction(25.0) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_tween_zero_duration() {
        let tween = Tween::new(0.0, 1.0, 0.0, Timing::new(10.0, 0.0, Easing::Linear));
        assert_eq!(tween.sample(5.0), 0.0);
        assert_eq!(tween.sample(10.0), 1.0);
    }

    proptest! {
        #[test]
        fn prop_tween_always_settles_on_target(
            from in -10.0f64..10.0,
            to in -10.0f64..10.0,
            start in 0.0f64..10_000.0,
        ) {
            let tween = Tween::new(from, to, start, Timing::NEEDLE);
            prop_assert_eq!(tween.sample(tween.end_ms() + 1.0), to);
        }

        #[test]
        fn prop_linear_tween_stays_between_endpoints(t in 0.0f64..200.0) {
            let tween = Tween::new(2.0, 8.0, 0.0, Timing::new(0.0, 100.0, Easing::Linear));
            let v = tween.sample(t);
            prop_assert!((2.0..=8.0).contains(&v));
        }
    }
}

//! Mapping between domain values and gauge angles.
//!
//! The gauge sweeps half a turn: the domain minimum sits at `−π/2` (left),
//! the maximum at `π/2` (right).

use crate::error::GaugeError;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Angle of the domain minimum.
pub const START_ANGLE: f64 = -FRAC_PI_2;

/// Angle of the domain maximum.
pub const END_ANGLE: f64 = FRAC_PI_2;

/// Total sweep of the gauge arc.
pub const SWEEP: f64 = PI;

/// Convert a fraction of a full turn to degrees.
#[must_use]
pub fn percent_to_degrees(percent: f64) -> f64 {
    percent * 360.0
}

/// Convert degrees to radians.
#[must_use]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Convert a fraction of a full turn to radians.
#[must_use]
pub fn percent_to_radians(percent: f64) -> f64 {
    degrees_to_radians(percent_to_degrees(percent))
}

/// Map `value` to an angle in `[−π/2, π/2]` over `[min, max]`.
///
/// A degenerate domain (`min == max`) yields `0.0`. Values outside the
/// domain extrapolate past the ends of the arc.
#[must_use]
pub fn scale_value(value: f64, min: f64, max: f64) -> f64 {
    AngleScale::new(min, max).angle(value)
}

/// Linear scale from a numeric domain onto the gauge sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleScale {
    min: f64,
    max: f64,
    clamp: bool,
}

impl AngleScale {
    /// Create a scale without validating the domain.
    ///
    /// A degenerate or non-finite domain maps every value to angle `0`.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        if min == max {
            tracing::warn!(min, max, "degenerate gauge domain, needle pinned at 0");
        }
        Self {
            min,
            max,
            clamp: false,
        }
    }

    /// Create a scale, rejecting degenerate or non-finite domains.
    pub fn try_new(min: f64, max: f64) -> Result<Self, GaugeError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(GaugeError::NonFiniteDomain { min, max });
        }
        if min == max {
            return Err(GaugeError::DegenerateDomain { value: min });
        }
        Ok(Self {
            min,
            max,
            clamp: false,
        })
    }

    /// Clamp values into the domain before scaling.
    #[must_use]
    pub const fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Domain minimum.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Domain maximum.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Whether values are clamped into the domain.
    #[must_use]
    pub const fn clamps(&self) -> bool {
        self.clamp
    }

    /// Width of the domain (`max − min`).
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Whether the domain has no usable width.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let span = self.span();
        span == 0.0 || !span.is_finite()
    }

    /// Position of `value` within the domain as a fraction (0 at min, 1 at max).
    #[must_use]
    pub fn fraction(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return 0.5;
        }
        let value = if self.clamp {
            value.clamp(self.min.min(self.max), self.min.max(self.max))
        } else {
            value
        };
        (value - self.min) / self.span()
    }

    /// Angle for `value`.
    #[must_use]
    pub fn angle(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        self.fraction(value).mul_add(SWEEP, START_ANGLE)
    }

    /// Angular width of a numeric interval.
    #[must_use]
    pub fn sweep_of(&self, width: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        width / self.span() * SWEEP
    }

    /// Whether `value` lies inside the domain.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min.min(self.max) && value <= self.min.max(self.max)
    }
}

impl Default for AngleScale {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            clamp: false,
        }
    }
}

//! Error types for chart-gauge.

use crate::color::ColorParseError;
use thiserror::Error;

/// Errors raised while validating a gauge configuration.
///
/// Rendering itself never fails: degenerate inputs produce a degenerate
/// drawing. These errors are returned only where a caller asks for
/// validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GaugeError {
    /// Canvas width or height is not a positive, finite number.
    #[error("invalid canvas size {width}x{height}: dimensions must be positive")]
    InvalidSize {
        /// Requested width
        width: f64,
        /// Requested height
        height: f64,
    },

    /// Tick interval is not positive or exceeds the domain.
    #[error("invalid tick interval {interval}: must be > 0 and <= {span}")]
    InvalidTickInterval {
        /// Requested interval
        interval: f64,
        /// Width of the domain
        span: f64,
    },

    /// Tick count of zero.
    #[error("tick count must be at least 1")]
    InvalidTickCount,

    /// Interval would produce more sections than the renderer allows.
    #[error("tick interval {interval} produces {sections} sections (limit {limit})")]
    TooManySections {
        /// Requested interval
        interval: f64,
        /// Resulting section count
        sections: usize,
        /// Maximum allowed
        limit: usize,
    },

    /// A band's `from` is greater than its `to`.
    #[error("band '{name}' is inverted: from {from} > to {to}")]
    InvertedBand {
        /// Band name
        name: String,
        /// Lower bound
        from: f64,
        /// Upper bound
        to: f64,
    },

    /// Bands are not ordered by ascending `from`.
    #[error("band '{name}' starts at {from}, before the previous band")]
    UnorderedBands {
        /// Band name
        name: String,
        /// Lower bound
        from: f64,
    },

    /// Domain has no width.
    #[error("degenerate domain: min and max are both {value}")]
    DegenerateDomain {
        /// The shared bound
        value: f64,
    },

    /// Domain bound is NaN or infinite.
    #[error("non-finite domain [{min}, {max}]")]
    NonFiniteDomain {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// Displayed value is NaN or infinite.
    #[error("non-finite value {value}")]
    NonFiniteValue {
        /// Rejected value
        value: f64,
    },

    /// Explicit `min` is greater than explicit `max`.
    #[error("inverted domain: min {min} > max {max}")]
    InvertedDomain {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// A host attribute value could not be parsed.
    #[error("invalid value {value:?} for attribute '{name}'")]
    InvalidAttribute {
        /// Attribute name as given by the host
        name: String,
        /// Raw attribute value
        value: String,
    },

    /// The host set an attribute the gauge does not recognise.
    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),

    /// A color field could not be parsed.
    #[error("invalid color for '{field}': {source}")]
    InvalidColor {
        /// Configuration field
        field: String,
        /// Underlying parse error
        #[source]
        source: ColorParseError,
    },
}

/// Result alias for gauge operations.
pub type Result<T> = std::result::Result<T, GaugeError>;

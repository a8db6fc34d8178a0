//! Gauge widget parts for chart-gauge.
//!
//! [`Gauge`] is the entry point. The other modules are its parts, public so
//! hosts and tests can inspect layout decisions directly.

pub mod bands;
pub mod config;
mod gauge;
pub mod label;
pub mod layout;
pub mod needle;
pub mod ticks;
pub mod tooltip;

pub use bands::{BandLayout, BoundaryLabel, GradientStop, Section, SectionFill};
pub use config::{Band, BandPolicy, GaugeConfig, DEFAULT_DOMAIN, MAX_SECTIONS};
pub use gauge::Gauge;
pub use label::ValueLabel;
pub use layout::{GaugeLayout, Margins};
pub use needle::{NeedleController, NeedlePhase};
pub use ticks::{Tick, TickSpec};
pub use tooltip::{TooltipController, TooltipPhase};

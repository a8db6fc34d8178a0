//! Core types for the chart-gauge widget.
//!
//! This crate provides the host-independent building blocks:
//! - Geometric primitives: [`Point`], [`Size`]
//! - Value-to-angle mapping over the upper half circle: [`AngleScale`]
//! - Color representation and CSS parsing: [`Color`]
//! - Easing and time-driven interpolation: [`Easing`], [`Timing`], [`Tween`]
//! - A retained SVG scene and its patch protocol: [`Scene`], [`Patch`], [`PatchSet`]
//! - Hover input: [`Event`]

pub mod animation;
mod color;
mod error;
mod event;
mod format;
mod geometry;
pub mod lifecycle;
mod patch;
pub mod scale;
mod scene;
pub mod svg;

pub use animation::{Easing, Timing, Tween};
pub use color::{Color, ColorParseError};
pub use error::{GaugeError, Result};
pub use event::Event;
pub use format::{fmt_coord, format_number};
pub use geometry::{Point, Size};
pub use lifecycle::{Animated, Component, Lifecycle, LifecyclePhase};
pub use patch::{Patch, PatchSet};
pub use scale::{AngleScale, END_ANGLE, START_ANGLE, SWEEP};
pub use scene::{Node, NodeId, Scene, Tag};

//! Needle controller.
//!
//! The needle is a pivot circle plus a three-point path. Its rotation is
//! owned here as a small state machine:
//!
//! ```text
//! Uninitialized --draw--> Idle(angle) --update--> Animating(tween) --settle--> Idle(target)
//!                                        ^                |
//!                                        +----update------+  (restart from rendered angle)
//! ```
//!
//! Frames are computed by [`frame_angle`], a pure function of the phase and
//! the tween's elapsed fraction, so the host's frame callback holds no
//! state of its own.

use crate::layout::PIVOT_RADIUS;
use chart_gauge_core::{
    fmt_coord, Animated, AngleScale, Color, Node, NodeId, Patch, PatchSet, Point, Scene, Tag,
    Timing, Tween, START_ANGLE,
};
use std::f64::consts::FRAC_PI_2;

/// Rotation state of the needle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NeedlePhase {
    /// Not drawn yet; updates are ignored.
    Uninitialized,
    /// At rest.
    Idle {
        /// Current angle
        angle: f64,
    },
    /// Moving between two angles.
    Animating {
        /// Active transition
        tween: Tween,
    },
}

/// Angle to render for `phase` at `elapsed_fraction` of its tween.
#[must_use]
pub fn frame_angle(phase: &NeedlePhase, elapsed_fraction: f64) -> f64 {
    match phase {
        NeedlePhase::Uninitialized => START_ANGLE,
        NeedlePhase::Idle { angle } => *angle,
        NeedlePhase::Animating { tween } => tween.value_at(elapsed_fraction),
    }
}

/// Path for a needle pointing at `angle`: base corner, tip, base corner.
#[must_use]
pub fn needle_path(angle: f64, length: f64, half_width: f64) -> String {
    let tip = Point::polar(length, angle);
    let left = Point::polar(half_width, angle - FRAC_PI_2);
    let right = Point::polar(half_width, angle + FRAC_PI_2);
    format!(
        "M {} {} L {} {} L {} {} Z",
        fmt_coord(left.x),
        fmt_coord(left.y),
        fmt_coord(tip.x),
        fmt_coord(tip.y),
        fmt_coord(right.x),
        fmt_coord(right.y),
    )
}

/// Owns the needle nodes and their rotation.
#[derive(Debug, Clone)]
pub struct NeedleController {
    scale: AngleScale,
    timing: Timing,
    length: f64,
    phase: NeedlePhase,
    rendered: f64,
    path: Option<NodeId>,
}

impl NeedleController {
    /// Create an undrawn needle.
    #[must_use]
    pub const fn new(scale: AngleScale, timing: Timing, length: f64) -> Self {
        Self {
            scale,
            timing,
            length,
            phase: NeedlePhase::Uninitialized,
            rendered: START_ANGLE,
            path: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> NeedlePhase {
        self.phase
    }

    /// Angle last written to the scene.
    #[must_use]
    pub const fn rendered_angle(&self) -> f64 {
        self.rendered
    }

    /// Angle the needle is heading to (or resting at).
    #[must_use]
    pub fn target_angle(&self) -> Option<f64> {
        match self.phase {
            NeedlePhase::Uninitialized => None,
            NeedlePhase::Idle { angle } => Some(angle),
            NeedlePhase::Animating { tween } => Some(tween.to),
        }
    }

    /// The needle `<path>` node, once drawn.
    #[must_use]
    pub const fn path_node(&self) -> Option<NodeId> {
        self.path
    }

    /// Create the pivot and needle under `parent`.
    ///
    /// With `sweep` the needle starts at the minimum and animates to
    /// `value`; otherwise it is drawn at rest.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &mut self,
        scene: &mut Scene,
        parent: NodeId,
        value: f64,
        now_ms: f64,
        sweep: bool,
        needle_color: Color,
        pivot_color: Color,
    ) {
        let target = self.scale.angle(value);
        let (initial, phase) = if sweep && target != START_ANGLE {
            (
                START_ANGLE,
                NeedlePhase::Animating {
                    tween: Tween::new(START_ANGLE, target, now_ms, self.timing),
                },
            )
        } else {
            (target, NeedlePhase::Idle { angle: target })
        };

        scene.append(
            parent,
            Node::new(Tag::Circle)
                .class("needle-center")
                .attr("cx", 0)
                .attr("cy", 0)
                .attr("r", fmt_coord(PIVOT_RADIUS))
                .attr("fill", pivot_color.to_css()),
        );
        let path = scene.append(
            parent,
            Node::new(Tag::Path)
                .class("needle")
                .attr("d", needle_path(initial, self.length, PIVOT_RADIUS))
                .attr("fill", needle_color.to_css()),
        );

        self.path = Some(path);
        self.rendered = initial;
        self.phase = phase;
        tracing::debug!(value, angle = target, sweep, "needle drawn");
    }

    /// Start moving towards `value`.
    ///
    /// Supersedes any running animation, restarting from the angle the
    /// needle shows at `now_ms`. Ignored before [`NeedleController::draw`].
    /// Returns `false` when ignored.
    pub fn update(&mut self, value: f64, now_ms: f64) -> bool {
        let target = self.scale.angle(value);
        let from = match self.phase {
            NeedlePhase::Uninitialized => {
                tracing::debug!(value, "needle update before draw ignored");
                return false;
            }
            NeedlePhase::Idle { angle } => {
                if angle == target {
                    return true;
                }
                angle
            }
            NeedlePhase::Animating { tween } => {
                let current = tween.sample(now_ms);
                tracing::debug!(
                    from = current,
                    superseded = tween.to,
                    to = target,
                    "needle retargeted"
                );
                current
            }
        };
        self.phase = NeedlePhase::Animating {
            tween: Tween::new(from, target, now_ms, self.timing),
        };
        true
    }

    /// Forget the drawn nodes and return to [`NeedlePhase::Uninitialized`].
    pub fn unmount(&mut self) {
        self.path = None;
        self.phase = NeedlePhase::Uninitialized;
        self.rendered = START_ANGLE;
    }
}

impl Animated for NeedleController {
    fn tick(&mut self, now_ms: f64) -> PatchSet {
        let NeedlePhase::Animating { tween } = self.phase else {
            return PatchSet::new();
        };
        let fraction = tween.elapsed_fraction(now_ms);
        let angle = frame_angle(&self.phase, fraction);
        if fraction >= 1.0 {
            self.phase = NeedlePhase::Idle { angle: tween.to };
        }

        let mut patches = PatchSet::new();
        if angle != self.rendered {
            self.rendered = angle;
            if let Some(path) = self.path {
                patches.push(Patch::set_attr(
                    path,
                    "d",
                    needle_path(angle, self.length, PIVOT_RADIUS),
                ));
            }
        }
        patches
    }

    fn is_animating(&self) -> bool {
        matches!(self.phase, NeedlePhase::Animating { .. })
    }
}

//! Mount / redraw / unmount bookkeeping shared by the gauge controllers.
//!
//! A gauge draws its scene once on mount and thereafter only patches it.
//! [`Lifecycle`] tracks which of those phases the widget is in, and the
//! generation counter tells a host when a full redraw replaced the scene so
//! that node handles it cached are stale.

use crate::event::Event;
use crate::patch::PatchSet;
use crate::scene::Scene;

/// Lifecycle phase of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LifecyclePhase {
    /// Constructed, nothing drawn yet.
    #[default]
    Created,
    /// Scene drawn and accepting updates.
    Mounted,
    /// Removed; all drawn state dropped.
    Unmounted,
}

/// Phase tracker with a redraw generation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lifecycle {
    phase: LifecyclePhase,
    generation: u64,
    mounted_at_ms: Option<f64>,
}

impl Lifecycle {
    /// Create a tracker in the [`LifecyclePhase::Created`] phase.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// Whether updates should produce patches.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.phase == LifecyclePhase::Mounted
    }

    /// Number of full draws so far. Zero until the first mount.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Host time of the most recent full draw.
    #[must_use]
    pub const fn mounted_at_ms(&self) -> Option<f64> {
        self.mounted_at_ms
    }

    /// Record a full draw. Mounting an already mounted widget counts as a
    /// redraw; mounting after unmount brings it back.
    pub fn mount(&mut self, now_ms: f64) {
        if self.is_mounted() {
            tracing::debug!(generation = self.generation + 1, "redraw");
        }
        self.phase = LifecyclePhase::Mounted;
        self.generation += 1;
        self.mounted_at_ms = Some(now_ms);
    }

    /// Record removal. Returns `false` if the widget was not mounted.
    pub fn unmount(&mut self) -> bool {
        let was_mounted = self.is_mounted();
        self.phase = LifecyclePhase::Unmounted;
        self.mounted_at_ms = None;
        was_mounted
    }
}

/// A controller that animates on the host's frame clock.
///
/// The host calls [`Animated::tick`] once per frame while
/// [`Animated::is_animating`] holds and applies the returned patches.
pub trait Animated {
    /// Advance to `now_ms` and describe the visible change.
    fn tick(&mut self, now_ms: f64) -> PatchSet;

    /// Whether further frames would change anything.
    fn is_animating(&self) -> bool;
}

/// The calls a host makes into a mounted widget.
///
/// Hosts notify synchronously: once on mount, on every value change, on
/// hover input and on removal. Everything after mount is expressed as
/// patches against the scene returned by [`Component::on_mount`].
pub trait Component: Animated {
    /// Full draw. Calling it again redraws from scratch.
    fn on_mount(&mut self, now_ms: f64) -> &Scene;

    /// The bound value changed from `old` to `new`.
    ///
    /// Must be a no-op (empty patch set) before the first mount.
    fn on_value_changed(&mut self, old: f64, new: f64, now_ms: f64) -> PatchSet;

    /// Pointer input over the widget's hit area.
    fn on_event(&mut self, event: &Event, now_ms: f64) -> PatchSet;

    /// Drop the scene and every node handle.
    fn on_unmount(&mut self);
}

//! Hover tooltip with asymmetric fade transitions.

use chart_gauge_core::{
    fmt_coord, format_number, Animated, Color, Node, NodeId, Patch, PatchSet, Scene, Tag, Timing,
    Tween,
};

/// Approximate glyph advance used to size the background.
const CHAR_WIDTH: f64 = 7.0;
const PADDING: f64 = 8.0;
const HEIGHT: f64 = 22.0;
const CORNER_RADIUS: f64 = 4.0;

/// Visibility state of the tooltip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TooltipPhase {
    /// Fully transparent
    Hidden,
    /// Opacity rising towards 1
    FadingIn(Tween),
    /// Fully opaque
    Visible,
    /// Opacity falling towards 0
    FadingOut(Tween),
}

/// Owns the tooltip group and its opacity.
#[derive(Debug, Clone)]
pub struct TooltipController {
    text: String,
    background: Color,
    text_color: Color,
    fade_in: Timing,
    fade_out: Timing,
    phase: TooltipPhase,
    opacity: f64,
    group: Option<NodeId>,
}

impl TooltipController {
    /// Create a hidden, undrawn tooltip.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            background: Color::new(0.15, 0.15, 0.15, 0.95),
            text_color: Color::WHITE,
            fade_in: Timing::FADE_IN,
            fade_out: Timing::FADE_OUT,
            phase: TooltipPhase::Hidden,
            opacity: 0.0,
            group: None,
        }
    }

    /// Tooltip text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> TooltipPhase {
        self.phase
    }

    /// Opacity last written to the scene.
    #[must_use]
    pub const fn opacity(&self) -> f64 {
        self.opacity
    }

    /// The tooltip `<g>`, once drawn.
    #[must_use]
    pub const fn group(&self) -> Option<NodeId> {
        self.group
    }

    /// Append the hidden tooltip centered `offset` pixels below the pivot.
    pub fn draw(&mut self, scene: &mut Scene, parent: NodeId, offset: f64) {
        let width = (self.text.chars().count() as f64).mul_add(CHAR_WIDTH, 2.0 * PADDING);
        let group = scene.append(
            parent,
            Node::new(Tag::Group)
                .class("gauge-tooltip")
                .attr("transform", format!("translate(0,{})", fmt_coord(offset)))
                .attr("opacity", 0)
                .attr("pointer-events", "none"),
        );
        scene.append(
            group,
            Node::new(Tag::Rect)
                .attr("x", fmt_coord(-width / 2.0))
                .attr("y", fmt_coord(-HEIGHT / 2.0))
                .attr("width", fmt_coord(width))
                .attr("height", fmt_coord(HEIGHT))
                .attr("rx", fmt_coord(CORNER_RADIUS))
                .attr("ry", fmt_coord(CORNER_RADIUS))
                .attr("fill", self.background.to_css()),
        );
        scene.append(
            group,
            Node::new(Tag::Text)
                .attr("x", 0)
                .attr("y", 0)
                .attr("text-anchor", "middle")
                .attr("alignment-baseline", "middle")
                .attr("fill", self.text_color.to_css())
                .text(self.text.clone()),
        );
        self.group = Some(group);
        self.phase = TooltipPhase::Hidden;
        self.opacity = 0.0;
    }

    /// Begin fading in from the current opacity. No-op before draw.
    pub fn show(&mut self, now_ms: f64) {
        if self.group.is_none() {
            return;
        }
        match self.phase {
            TooltipPhase::Visible | TooltipPhase::FadingIn(_) => {}
            TooltipPhase::Hidden | TooltipPhase::FadingOut(_) => {
                let tween = Tween::new(self.opacity, 1.0, now_ms, self.fade_in);
                self.phase = TooltipPhase::FadingIn(tween);
            }
        }
    }

    /// Begin fading out from the current opacity. No-op before draw.
    pub fn hide(&mut self, now_ms: f64) {
        if self.group.is_none() {
            return;
        }
        match self.phase {
            TooltipPhase::Hidden | TooltipPhase::FadingOut(_) => {}
            TooltipPhase::Visible | TooltipPhase::FadingIn(_) => {
                let tween = Tween::new(self.opacity, 0.0, now_ms, self.fade_out);
                self.phase = TooltipPhase::FadingOut(tween);
            }
        }
    }

    /// Forget the drawn nodes.
    pub fn unmount(&mut self) {
        self.group = None;
        self.phase = TooltipPhase::Hidden;
        self.opacity = 0.0;
    }
}

impl Animated for TooltipController {
    fn tick(&mut self, now_ms: f64) -> PatchSet {
        let (tween, settled) = match self.phase {
            TooltipPhase::FadingIn(tween) => (tween, TooltipPhase::Visible),
            TooltipPhase::FadingOut(tween) => (tween, TooltipPhase::Hidden),
            TooltipPhase::Hidden | TooltipPhase::Visible => return PatchSet::new(),
        };
        let opacity = tween.sample(now_ms);
        if tween.is_complete(now_ms) {
            self.phase = settled;
        }

        let mut patches = PatchSet::new();
        if opacity != self.opacity {
            self.opacity = opacity;
            if let Some(group) = self.group {
                patches.push(Patch::set_attr(group, "opacity", format_number(opacity)));
            }
        }
        patches
    }

    fn is_animating(&self) -> bool {
        matches!(
            self.phase,
            TooltipPhase::FadingIn(_) | TooltipPhase::FadingOut(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drawn() -> (TooltipController, Scene) {
        let mut scene = Scene::new(400.0, 300.0);
        let mut tooltip = TooltipController::new("Gauge tooltip");
        let root = scene.root();
        tooltip.draw(&mut scene, root, 68.0);
        (tooltip, scene)
    }

    #[test]
    fn test_draw_hidden() {
        let (tooltip, scene) = drawn();
        let group = scene.node(tooltip.group().unwrap()).unwrap();
        assert_eq!(group.get_attr("opacity"), Some("0"));
        assert_eq!(group.children().len(), 2);
        assert_eq!(tooltip.phase(), TooltipPhase::Hidden);
    }

    #[test]
    fn test_show_before_draw_is_noop() {
        let mut tooltip = TooltipController::new("tip");
        tooltip.show(0.0);
        assert_eq!(tooltip.phase(), TooltipPhase::Hidden);
        assert!(tooltip.tick(1_000.0).is_empty());
    }

    #[test]
    fn test_fade_in_then_out() {
        let (mut tooltip, _) = drawn();
        tooltip.show(0.0);
        assert!(tooltip.is_animating());
        let patches = tooltip.tick(150.0);
        assert_eq!(patches.last_attr(tooltip.group().unwrap(), "opacity"), Some("1"));
        assert_eq!(tooltip.phase(), TooltipPhase::Visible);

        tooltip.hide(200.0);
        tooltip.tick(400.0);
        assert!((tooltip.opacity() - 0.5).abs() < 1e-9);
        let patches = tooltip.tick(600.0);
        assert_eq!(patches.last_attr(tooltip.group().unwrap(), "opacity"), Some("0"));
        assert_eq!(tooltip.phase(), TooltipPhase::Hidden);
    }

    #[test]
    fn test_fade_out_is_slower_than_fade_in() {
        assert!(Timing::FADE_OUT.duration_ms > Timing::FADE_IN.duration_ms);
    }

    #[test]
    fn test_reversal_starts_from_current_opacity() {
        let (mut tooltip, _) = drawn();
        tooltip.show(0.0);
        tooltip.tick(75.0);
        let partial = tooltip.opacity();
        assert!(partial > 0.0 && partial < 1.0);
        tooltip.hide(75.0);
        match tooltip.phase() {
            TooltipPhase::FadingOut(tween) => assert_eq!(tween.from, partial),
            other => panic!("expected fade out, got {other:?}"),
        }
    }

    #[test]
    fn test_repeated_show_does_not_restart() {
        let (mut tooltip, _) = drawn();
        tooltip.show(0.0);
        tooltip.show(100.0);
        match tooltip.phase() {
            TooltipPhase::FadingIn(tween) => assert_eq!(tween.start_ms, 0.0),
            other => panic!("expected fade in, got {other:?}"),
        }
    }
}

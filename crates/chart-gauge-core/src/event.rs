//! Input events consumed by the gauge.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Input event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Pointer entered the gauge's hit area
    PointerEnter,
    /// Pointer left the gauge's hit area
    PointerLeave,
    /// Pointer moved within the hit area
    PointerMove {
        /// Position relative to the gauge's top-left corner
        position: Point,
    },
}

impl Event {
    /// Map a DOM event type name onto a gauge event.
    ///
    /// Mouse and pointer variants are treated alike; positional events
    /// need coordinates and are not produced here.
    #[must_use]
    pub fn from_dom_type(event_type: &str) -> Option<Self> {
        match event_type {
            "mouseover" | "mouseenter" | "pointerenter" | "pointerover" => {
                Some(Self::PointerEnter)
            }
            "mouseout" | "mouseleave" | "pointerleave" | "pointerout" => Some(Self::PointerLeave),
            _ => None,
        }
    }
}

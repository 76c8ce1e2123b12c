use crate::foundation::core::{Point, Vec2};

/// Part of a popup that accepts a drag press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DragSurface {
    Header,
    Image,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        pointer_start: Point,
        offset_start: Vec2,
    },
}

/// Per-popup pointer drag state machine tracking a translation offset.
///
/// Offsets are never clamped: a popup may be dragged partly or fully off-screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DragController {
    state: DragState,
    offset: Vec2,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Start a gesture from the current offset. A second press while dragging re-anchors.
    pub fn press(&mut self, pointer: Point) {
        self.state = DragState::Dragging {
            pointer_start: pointer,
            offset_start: self.offset,
        };
    }

    /// Returns `false` when no gesture is active.
    pub fn move_to(&mut self, pointer: Point) -> bool {
        let DragState::Dragging {
            pointer_start,
            offset_start,
        } = self.state
        else {
            return false;
        };
        self.offset = offset_start + (pointer - pointer_start);
        true
    }

    /// Returns `false` when no gesture was active.
    pub fn release(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = DragState::Idle;
        was_dragging
    }
}

#[cfg(test)]
#[path = "../../tests/unit/popup/drag.rs"]
mod tests;

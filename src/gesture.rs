//! Pointer drag tracking shared by the browser input wiring.

use crate::constants::CLICK_SLOP_PX;
use glam::Vec2;

#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub start: Vec2,
    pub last: Vec2,
    /// Travelled further than the click slop since `start`.
    pub moved: bool,
}

impl DragState {
    pub fn begin(&mut self, pointer_id: i32, pos: Vec2) {
        *self = Self {
            active: true,
            pointer_id,
            start: pos,
            last: pos,
            moved: false,
        };
    }

    /// True while `pointer_id` is the pointer driving the drag.
    pub fn tracks(&self, pointer_id: i32) -> bool {
        self.active && self.pointer_id == pointer_id
    }

    /// Advance to `pos`, returning the delta since the previous position.
    pub fn advance(&mut self, pos: Vec2) -> Vec2 {
        let delta = pos - self.last;
        self.last = pos;
        if pos.distance(self.start) > CLICK_SLOP_PX {
            self.moved = true;
        }
        delta
    }

    /// Release by `pointer_id`. Returns whether the drag moved, or `None`
    /// when another pointer (or no drag) is involved.
    pub fn end(&mut self, pointer_id: i32) -> Option<bool> {
        if !self.tracks(pointer_id) {
            return None;
        }
        self.active = false;
        Some(self.moved)
    }
}

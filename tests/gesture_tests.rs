// Host-side tests for pointer drag tracking.

use glam::Vec2;
use tour_viewer::constants::CLICK_SLOP_PX;
use tour_viewer::gesture::DragState;

#[test]
fn small_travel_is_still_a_click() {
    let mut drag = DragState::default();
    drag.begin(1, Vec2::new(10.0, 10.0));
    let delta = drag.advance(Vec2::new(10.0 + CLICK_SLOP_PX * 0.5, 10.0));
    assert_eq!(delta, Vec2::new(CLICK_SLOP_PX * 0.5, 0.0));
    assert_eq!(drag.end(1), Some(false));
    assert!(!drag.active);
}

#[test]
fn travel_beyond_slop_is_a_drag() {
    let mut drag = DragState::default();
    drag.begin(1, Vec2::ZERO);
    drag.advance(Vec2::new(CLICK_SLOP_PX + 1.0, 0.0));
    // coming back near the start does not turn it into a click
    drag.advance(Vec2::ZERO);
    assert_eq!(drag.end(1), Some(true));
}

#[test]
fn other_pointers_cannot_end_the_drag() {
    let mut drag = DragState::default();
    drag.begin(7, Vec2::ZERO);
    assert!(!drag.tracks(8));
    assert_eq!(drag.end(8), None);
    assert!(drag.active);
    assert!(drag.tracks(7));
    assert_eq!(drag.end(7), Some(false));
}

#[test]
fn release_without_drag_is_ignored() {
    let mut drag = DragState::default();
    assert_eq!(drag.end(0), None);
    drag.begin(0, Vec2::ZERO);
    drag.end(0);
    assert_eq!(drag.end(0), None);
}

#[test]
fn deltas_are_relative_to_the_last_position() {
    let mut drag = DragState::default();
    drag.begin(1, Vec2::ZERO);
    drag.advance(Vec2::new(3.0, 4.0));
    assert_eq!(drag.advance(Vec2::new(5.0, 1.0)), Vec2::new(2.0, -3.0));
}

// Host-side sanity checks on the tuning constants and how they relate.

use tour_viewer::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn fov_range_is_ordered() {
    assert!(MIN_FOV_DEG > 0.0);
    assert!(MIN_FOV_DEG <= DEFAULT_FOV_DEG);
    assert!(DEFAULT_FOV_DEG <= MAX_FOV_DEG);
    assert!(MAX_FOV_DEG < 180.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_planes_and_pitch_limit() {
    // the sphere sits at unit distance, between the planes
    assert!(CAMERA_ZNEAR > 0.0 && CAMERA_ZNEAR < 1.0);
    assert!(CAMERA_ZFAR > 1.0);
    assert!(MAX_VIEW_PITCH_DEG > 0.0 && MAX_VIEW_PITCH_DEG < 90.0);
}

#[test]
fn marker_styles_differ_by_kind() {
    assert_ne!(NAVIGATION_COLOR, INFO_COLOR);
    assert_ne!(NAVIGATION_GLYPH, INFO_GLYPH);
    for color in [NAVIGATION_COLOR, INFO_COLOR] {
        assert!(color.starts_with('#') && color.len() == 7, "bad color {color}");
    }
}

#[test]
fn preview_id_cannot_collide_with_hotspot_ids() {
    // hotspot marker ids are stringified integers
    assert!(PREVIEW_MARKER_ID.parse::<i64>().is_err());
    assert!(!PREVIEW_MARKER_ID.is_empty());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn interaction_tuning_is_positive() {
    assert!(DRAG_SENSITIVITY > 0.0);
    assert!(CLICK_SLOP_PX > 0.0);
    assert!(WHEEL_ZOOM_DEG_PER_PX > 0.0);
    assert!(AUTOROTATE_SPEED_DEG_PER_SEC > 0.0);
    assert!(AUTOROTATE_IDLE_DELAY_MS > 0);
    assert!(MAX_TEXTURE_EDGE_PX >= 2048);
    assert!(MARKER_SIZE_PX > 2 * MARKER_RING_WIDTH_PX);
}

use tour_viewer::constants::{DEFAULT_FOV_DEG, DRAG_SENSITIVITY, MAX_FOV_DEG, MIN_FOV_DEG};
use tour_viewer::ViewerOptions;

#[test]
fn empty_input_gives_defaults() {
    assert_eq!(ViewerOptions::from_json("").unwrap(), ViewerOptions::default());
    assert_eq!(ViewerOptions::from_json("  {} ").unwrap(), ViewerOptions::default());
    let d = ViewerOptions::default();
    assert!(d.plugins.marker_clicks);
    assert!(d.plugins.autorotate.is_none());
    assert!(d.initial_yaw.is_none());
}

#[test]
fn partial_options_keep_other_defaults() {
    let o = ViewerOptions::from_json(
        r#"{"default_fov_deg": 60, "initial_yaw": 90, "plugins": {"autorotate": {"speed_deg_per_sec": 2}}}"#,
    )
    .unwrap();
    assert_eq!(o.default_fov_deg, 60.0);
    assert_eq!(o.initial_yaw, Some(90.0));
    assert_eq!(o.min_fov_deg, MIN_FOV_DEG);
    let auto = o.plugins.autorotate.expect("autorotate enabled");
    assert_eq!(auto.speed_deg_per_sec, 2.0);
    assert!(auto.idle_delay_ms > 0);
    assert!(o.plugins.marker_clicks);
}

#[test]
fn invalid_fov_range_falls_back() {
    let o = ViewerOptions::from_json(r#"{"min_fov_deg": 90, "max_fov_deg": 40}"#).unwrap();
    assert_eq!(
        (o.min_fov_deg, o.default_fov_deg, o.max_fov_deg),
        (MIN_FOV_DEG, DEFAULT_FOV_DEG, MAX_FOV_DEG)
    );
    let o = ViewerOptions::from_json(r#"{"drag_sensitivity": -2}"#).unwrap();
    assert_eq!(o.drag_sensitivity, DRAG_SENSITIVITY);
}

#[test]
fn malformed_json_is_an_error() {
    assert!(ViewerOptions::from_json("{plugins").is_err());
}

/// Viewer tuning constants.
///
/// These constants express intended behavior (camera limits, interaction
/// thresholds, marker styling) and keep magic numbers out of the code.

// Marker styling
pub const NAVIGATION_COLOR: &str = "#2563eb"; // blue
pub const INFO_COLOR: &str = "#f59e0b"; // amber
pub const NAVIGATION_GLYPH: &str = "&#10148;"; // heavy arrow
pub const INFO_GLYPH: &str = "i";
pub const MARKER_SIZE_PX: u32 = 36;
pub const MARKER_RING_WIDTH_PX: u32 = 3;
pub const TOOLTIP_GAP_PX: u32 = 8;

// Synthetic id of the authoring preview marker. Never parses as an integer,
// so it cannot collide with a stringified hotspot id.
pub const PREVIEW_MARKER_ID: &str = "__draft__";

// Camera (degrees)
pub const DEFAULT_FOV_DEG: f64 = 75.0;
pub const MIN_FOV_DEG: f64 = 30.0;
pub const MAX_FOV_DEG: f64 = 100.0;
pub const CAMERA_ZNEAR: f32 = 0.01;
pub const CAMERA_ZFAR: f32 = 10.0;
pub const MAX_VIEW_PITCH_DEG: f64 = 89.9;

// Interaction
pub const DRAG_SENSITIVITY: f64 = 1.0; // 1.0 = content follows the pointer
pub const CLICK_SLOP_PX: f32 = 4.0; // pointer travel still treated as a click
pub const WHEEL_ZOOM_DEG_PER_PX: f64 = 0.05;

// Auto-rotate plugin
pub const AUTOROTATE_SPEED_DEG_PER_SEC: f64 = 6.0;
pub const AUTOROTATE_IDLE_DELAY_MS: u64 = 4_000;

// Panorama textures
pub const MAX_TEXTURE_EDGE_PX: u32 = 8_192;
pub const CLEAR_COLOR: [f64; 3] = [0.0, 0.0, 0.0];

use crate::constants::{
    AUTOROTATE_IDLE_DELAY_MS, AUTOROTATE_SPEED_DEG_PER_SEC, DEFAULT_FOV_DEG, DRAG_SENSITIVITY,
    MAX_FOV_DEG, MIN_FOV_DEG,
};
use crate::error::ViewerError;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AutorotateOptions {
    pub speed_deg_per_sec: f64,
    pub idle_delay_ms: u64,
}

impl Default for AutorotateOptions {
    fn default() -> Self {
        Self {
            speed_deg_per_sec: AUTOROTATE_SPEED_DEG_PER_SEC,
            idle_delay_ms: AUTOROTATE_IDLE_DELAY_MS,
        }
    }
}

/// Optional engine capabilities. The marker overlay is always installed.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PluginSet {
    pub autorotate: Option<AutorotateOptions>,
    pub marker_clicks: bool,
}

impl Default for PluginSet {
    fn default() -> Self {
        Self {
            autorotate: None,
            marker_clicks: true,
        }
    }
}

/// Host-supplied viewer options. Every field has a default, so `{}` and
/// `""` both yield a working configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    pub plugins: PluginSet,
    pub default_fov_deg: f64,
    pub min_fov_deg: f64,
    pub max_fov_deg: f64,
    pub drag_sensitivity: f64,
    /// Overrides the first sphere's `initial_yaw` (degrees).
    pub initial_yaw: Option<f64>,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            plugins: PluginSet::default(),
            default_fov_deg: DEFAULT_FOV_DEG,
            min_fov_deg: MIN_FOV_DEG,
            max_fov_deg: MAX_FOV_DEG,
            drag_sensitivity: DRAG_SENSITIVITY,
            initial_yaw: None,
        }
    }
}

impl ViewerOptions {
    pub fn from_json(json: &str) -> Result<Self, ViewerError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let options: Self = serde_json::from_str(json)?;
        Ok(options.validated())
    }

    /// Replace an unusable field-of-view range with the defaults.
    pub fn validated(mut self) -> Self {
        let ordered = self.min_fov_deg > 0.0
            && self.min_fov_deg <= self.default_fov_deg
            && self.default_fov_deg <= self.max_fov_deg
            && self.max_fov_deg < 180.0;
        if !ordered {
            log::warn!(
                "[config] invalid fov range {}..{} (default {}), using defaults",
                self.min_fov_deg,
                self.max_fov_deg,
                self.default_fov_deg
            );
            self.min_fov_deg = MIN_FOV_DEG;
            self.max_fov_deg = MAX_FOV_DEG;
            self.default_fov_deg = DEFAULT_FOV_DEG;
        }
        if !(self.drag_sensitivity.is_finite() && self.drag_sensitivity > 0.0) {
            self.drag_sensitivity = DRAG_SENSITIVITY;
        }
        self
    }
}

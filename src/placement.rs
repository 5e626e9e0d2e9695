//! Authoring: clicks on the sphere surface set the draft hotspot's position.

use crate::constants::PREVIEW_MARKER_ID;
use crate::coords::SphericalPosition;
use crate::error::ViewerError;
use crate::marker::{Anchor, MarkerConfig};
use crate::model::{lenient_f64, Hotspot, HotspotKind, SphereRef};
use serde::Deserialize;

/// The hotspot being authored in the host form.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HotspotDraft {
    /// Set when editing an existing hotspot.
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: HotspotKind,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub yaw: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pitch: f64,
    #[serde(default)]
    pub tooltip: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub target_sphere: Option<SphereRef>,
}

fn default_kind() -> HotspotKind {
    HotspotKind::Navigation
}

impl Default for HotspotDraft {
    fn default() -> Self {
        Self {
            id: None,
            kind: default_kind(),
            yaw: 0.0,
            pitch: 0.0,
            tooltip: None,
            content: None,
            target_sphere: None,
        }
    }
}

impl HotspotDraft {
    pub fn from_json(json: &str) -> Result<Self, ViewerError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn as_hotspot(&self) -> Hotspot {
        Hotspot {
            id: self.id.unwrap_or(0),
            sphere_id: None,
            kind: self.kind,
            yaw: self.yaw,
            pitch: self.pitch,
            tooltip: self.tooltip.clone().filter(|t| !t.trim().is_empty()),
            content: self.content.clone(),
            target_sphere: self.target_sphere.clone(),
        }
    }

    /// The preview ring is centered on the clicked point.
    pub fn preview_marker(&self) -> MarkerConfig {
        MarkerConfig {
            anchor: Anchor::Center,
            ..MarkerConfig::with_id(PREVIEW_MARKER_ID.to_string(), &self.as_hotspot())
        }
    }

    fn preview_key(&self) -> (HotspotKind, f64, f64, Option<&str>, Option<&str>) {
        (
            self.kind,
            self.yaw,
            self.pitch,
            self.tooltip.as_deref(),
            self.content.as_deref(),
        )
    }
}

pub struct PlacementCapture {
    draft: HotspotDraft,
}

impl PlacementCapture {
    pub fn new(draft: HotspotDraft) -> Self {
        Self { draft }
    }

    pub fn draft(&self) -> &HotspotDraft {
        &self.draft
    }

    /// Write a clicked position into the draft as rounded degrees.
    /// Returns the stored `(yaw, pitch)`.
    pub fn capture(&mut self, position: SphericalPosition) -> (f64, f64) {
        let (yaw, pitch) = position.to_degrees();
        self.draft.yaw = yaw;
        self.draft.pitch = pitch;
        log::debug!("[placement] yaw={:.2} pitch={:.2}", yaw, pitch);
        (yaw, pitch)
    }

    /// Replace the draft with the host form's state. Returns true when a
    /// field shown by the preview marker changed.
    pub fn update(&mut self, draft: HotspotDraft) -> bool {
        let changed = draft.preview_key() != self.draft.preview_key();
        self.draft = draft;
        changed
    }
}

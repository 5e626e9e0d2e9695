//! Reconcile the engine's marker set with the hotspot list.
//!
//! Always a full rebuild: every marker is cleared and recreated, so no
//! marker from a previous sphere can survive a change.

use crate::constants::PREVIEW_MARKER_ID;
use crate::engine::ViewerEngine;
use crate::marker::MarkerConfig;
use crate::model::Hotspot;
use crate::placement::HotspotDraft;

/// Markers for `hotspots`, in list order.
pub fn desired_markers(hotspots: &[Hotspot]) -> Vec<MarkerConfig> {
    hotspots.iter().map(MarkerConfig::for_hotspot).collect()
}

/// Replace every marker on `engine` with one per hotspot. Returns the number
/// of markers registered.
pub fn sync_markers<E: ViewerEngine>(engine: &mut E, hotspots: &[Hotspot]) -> usize {
    engine.clear_markers();
    let markers = desired_markers(hotspots);
    let count = markers.len();
    for marker in markers {
        engine.add_marker(marker);
    }
    log::debug!("[sync] rebuilt {} markers", count);
    count
}

/// Rebuild only the authoring preview marker.
pub fn sync_preview<E: ViewerEngine>(engine: &mut E, draft: &HotspotDraft) {
    engine.remove_marker(PREVIEW_MARKER_ID);
    engine.add_marker(draft.preview_marker());
}

//! Marker selection → sphere change or content disclosure.
//!
//! Broken references (unknown marker id, navigation hotspot without target,
//! target missing from the tour) are silent no-ops.
//!
//! The requested sphere (`current`) runs ahead of the one on screen
//! (`displayed`) while its panorama loads. Marker ids are resolved against
//! the sphere on screen.

use crate::model::{HotspotKind, Sphere, VirtualTour};
use fnv::FnvHashMap;

/// Content revealed by an info hotspot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Disclosure {
    pub hotspot_id: i64,
    pub title: Option<String>,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationAction {
    None,
    Navigate { index: usize, sphere_id: i64 },
    Disclose(Disclosure),
}

pub struct NavigationController {
    tour: VirtualTour,
    index_by_id: FnvHashMap<i64, usize>,
    current: usize,
    displayed: Option<usize>,
}

impl NavigationController {
    pub fn new(tour: VirtualTour, initial_index: usize) -> Self {
        let index_by_id = tour
            .spheres
            .iter()
            .enumerate()
            // first occurrence wins for duplicated ids
            .rev()
            .map(|(i, s)| (s.id, i))
            .collect();
        let current = if initial_index < tour.spheres.len() {
            initial_index
        } else {
            0
        };
        Self {
            tour,
            index_by_id,
            current,
            displayed: None,
        }
    }

    pub fn tour(&self) -> &VirtualTour {
        &self.tour
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_sphere(&self) -> Option<&Sphere> {
        self.tour.spheres.get(self.current)
    }

    /// Index of the sphere whose panorama is on screen, if any landed yet.
    pub fn displayed_index(&self) -> Option<usize> {
        self.displayed
    }

    fn displayed_sphere(&self) -> Option<&Sphere> {
        self.tour.spheres.get(self.displayed.unwrap_or(self.current))
    }

    /// The requested sphere's panorama is now on screen.
    pub fn mark_displayed(&mut self) {
        self.displayed = Some(self.current);
    }

    /// Step back to the sphere on screen after its successor failed to
    /// load. Returns the restored index when it differs from the request.
    pub fn revert_to_displayed(&mut self) -> Option<usize> {
        let shown = self.displayed.filter(|&i| i != self.current)?;
        log::info!("[nav] sphere index {} -> {} (load failed)", self.current, shown);
        self.current = shown;
        Some(shown)
    }

    pub fn index_of(&self, sphere_id: i64) -> Option<usize> {
        self.index_by_id.get(&sphere_id).copied()
    }

    /// Interpret a marker-select event against the sphere on screen. Ids match
    /// the stringified hotspot id exactly.
    pub fn select(&mut self, marker_id: &str) -> NavigationAction {
        let hotspot = self
            .displayed_sphere()
            .and_then(|s| s.hotspots.iter().find(|h| h.id.to_string() == marker_id));
        let Some(hotspot) = hotspot else {
            log::debug!("[nav] marker {} has no hotspot", marker_id);
            return NavigationAction::None;
        };
        match hotspot.kind {
            HotspotKind::Navigation => match hotspot.target_sphere.as_ref().map(|t| t.id) {
                Some(target) => self.navigate_to_sphere(target),
                None => NavigationAction::None,
            },
            HotspotKind::Info => NavigationAction::Disclose(Disclosure {
                hotspot_id: hotspot.id,
                title: hotspot.tooltip.clone(),
                content: hotspot.content.clone().unwrap_or_default(),
            }),
        }
    }

    /// Move to the sphere with `sphere_id`. Any integer is accepted; ids not
    /// in the tour, and the sphere already in view, are no-ops.
    pub fn navigate_to_sphere(&mut self, sphere_id: i64) -> NavigationAction {
        match self.index_of(sphere_id) {
            Some(index) if self.show_index(index) => {
                NavigationAction::Navigate { index, sphere_id }
            }
            Some(_) => NavigationAction::None,
            None => {
                log::debug!(
                    "[nav] sphere {} is not part of tour {}",
                    sphere_id,
                    self.tour.id
                );
                NavigationAction::None
            }
        }
    }

    /// Returns true when `index` must be (re)loaded: it differs from the
    /// request in flight, or it was requested but never reached the screen.
    pub fn show_index(&mut self, index: usize) -> bool {
        if index >= self.tour.spheres.len() {
            return false;
        }
        if index == self.current && self.displayed == Some(index) {
            return false;
        }
        log::info!("[nav] sphere index {} -> {}", self.current, index);
        self.current = index;
        true
    }
}

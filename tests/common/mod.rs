// Host-side stand-in for the browser engine. Records every call so tests can
// assert on the marker set, camera and panorama swaps.

#![allow(dead_code)]

use std::cell::RefCell;
use std::future::{ready, Ready};
use std::rc::Rc;
use tour_viewer::config::ViewerOptions;
use tour_viewer::engine::{EventHandler, ViewerEngine};
use tour_viewer::marker::MarkerConfig;
use tour_viewer::model::{Hotspot, HotspotKind, Media, Sphere, SphereRef, VirtualTour};
use tour_viewer::navigation::Disclosure;
use tour_viewer::viewer::{PlacementHost, TourHost};
use tour_viewer::{SphericalPosition, ViewerError};

/// Sources starting with this prefix fail to load.
pub const FAILING_PREFIX: &str = "fail://";

#[derive(Default)]
pub struct EngineLog {
    pub created: usize,
    pub disposed: usize,
    pub loads: Vec<String>,
    pub panoramas: Vec<String>,
    pub rotations: Vec<SphericalPosition>,
    pub markers: Vec<MarkerConfig>,
    pub has_handler: bool,
}

impl EngineLog {
    pub fn marker_ids(&self) -> Vec<String> {
        self.markers.iter().map(|m| m.id.clone()).collect()
    }
}

#[derive(Clone, Default)]
pub struct MockContainer {
    pub log: Rc<RefCell<EngineLog>>,
    pub refuse: bool,
}

pub struct MockEngine {
    log: Rc<RefCell<EngineLog>>,
    handler: Option<EventHandler>,
}

impl ViewerEngine for MockEngine {
    type Container = MockContainer;
    type Panorama = String;
    type LoadFuture = Ready<Result<String, ViewerError>>;

    fn create(container: &MockContainer, _options: &ViewerOptions) -> Result<Self, ViewerError> {
        if container.refuse {
            return Err(ViewerError::Engine("no context".into()));
        }
        container.log.borrow_mut().created += 1;
        Ok(Self {
            log: container.log.clone(),
            handler: None,
        })
    }

    fn load_panorama(&self, source: &str) -> Self::LoadFuture {
        self.log.borrow_mut().loads.push(source.to_string());
        if source.starts_with(FAILING_PREFIX) {
            ready(Err(ViewerError::load(source, "404")))
        } else {
            ready(Ok(source.to_string()))
        }
    }

    fn set_panorama(&mut self, panorama: String) {
        self.log.borrow_mut().panoramas.push(panorama);
    }

    fn rotate(&mut self, position: SphericalPosition) {
        self.log.borrow_mut().rotations.push(position);
    }

    fn clear_markers(&mut self) {
        self.log.borrow_mut().markers.clear();
    }

    fn add_marker(&mut self, marker: MarkerConfig) {
        self.log.borrow_mut().markers.push(marker);
    }

    fn remove_marker(&mut self, id: &str) {
        self.log.borrow_mut().markers.retain(|m| m.id != id);
    }

    fn set_event_handler(&mut self, handler: EventHandler) {
        self.handler = Some(handler);
        self.log.borrow_mut().has_handler = true;
    }

    fn dispose(&mut self) {
        self.handler = None;
        self.log.borrow_mut().disposed += 1;
    }
}

#[derive(Clone, Default)]
pub struct RecordingHost {
    pub navigations: Rc<RefCell<Vec<(i64, usize)>>>,
    pub disclosures: Rc<RefCell<Vec<Disclosure>>>,
    pub placements: Rc<RefCell<Vec<(f64, f64)>>>,
}

impl TourHost for RecordingHost {
    fn navigated(&mut self, sphere_id: i64, index: usize) {
        self.navigations.borrow_mut().push((sphere_id, index));
    }

    fn disclose(&mut self, disclosure: &Disclosure) {
        self.disclosures.borrow_mut().push(disclosure.clone());
    }
}

impl PlacementHost for RecordingHost {
    fn placed(&mut self, yaw: f64, pitch: f64) {
        self.placements.borrow_mut().push((yaw, pitch));
    }
}

pub fn hotspot(id: i64, kind: HotspotKind, yaw: f64, pitch: f64) -> Hotspot {
    Hotspot {
        id,
        sphere_id: None,
        kind,
        yaw,
        pitch,
        tooltip: None,
        content: None,
        target_sphere: None,
    }
}

pub fn nav_hotspot(id: i64, target: Option<i64>) -> Hotspot {
    Hotspot {
        target_sphere: target.map(|id| SphereRef {
            id,
            name: format!("sphere {id}"),
        }),
        ..hotspot(id, HotspotKind::Navigation, 45.0, -10.0)
    }
}

pub fn info_hotspot(id: i64, content: &str) -> Hotspot {
    Hotspot {
        tooltip: Some("Details".into()),
        content: Some(content.into()),
        ..hotspot(id, HotspotKind::Info, 120.0, 5.0)
    }
}

pub fn sphere(id: i64, url: Option<&str>, hotspots: Vec<Hotspot>) -> Sphere {
    Sphere {
        id,
        name: format!("sphere {id}"),
        media: url
            .map(|u| vec![Media { url: u.to_string() }])
            .unwrap_or_default(),
        initial_yaw: 0.0,
        hotspots,
    }
}

pub fn tour(spheres: Vec<Sphere>) -> VirtualTour {
    VirtualTour {
        id: 7,
        name: "Campus".into(),
        description: None,
        category: None,
        tags: Vec::new(),
        spheres,
    }
}

/// Tour `[A(1), B(2)]` where A links to B through hotspot 10.
pub fn two_sphere_tour() -> VirtualTour {
    tour(vec![
        sphere(
            1,
            Some("https://cdn.example/a.jpg"),
            vec![nav_hotspot(10, Some(2)), info_hotspot(11, "<p>Lobby</p>")],
        ),
        sphere(
            2,
            Some("https://cdn.example/b.jpg"),
            vec![nav_hotspot(20, Some(1))],
        ),
    ])
}

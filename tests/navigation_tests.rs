mod common;

use common::*;
use pollster::block_on;
use std::cell::RefCell;
use std::rc::Rc;
use tour_viewer::navigation::{NavigationAction, NavigationController};
use tour_viewer::{drive_swap, SwapOutcome, TourViewer, ViewerEvent, ViewerOptions};

fn mounted(
    tour: tour_viewer::VirtualTour,
) -> (MockContainer, RecordingHost, Rc<RefCell<TourViewer<MockEngine>>>) {
    let container = MockContainer::default();
    let host = RecordingHost::default();
    let viewer = TourViewer::<MockEngine>::mount(
        &container,
        tour,
        0,
        &ViewerOptions::default(),
        Box::new(host.clone()),
    );
    let viewer = Rc::new(RefCell::new(viewer));
    let pending = viewer.borrow_mut().load_current().expect("initial load");
    assert_eq!(block_on(drive_swap(Rc::downgrade(&viewer), pending)), SwapOutcome::Applied);
    (container, host, viewer)
}

#[test]
fn navigation_hotspot_swaps_to_target_sphere() {
    let (container, host, viewer) = mounted(two_sphere_tour());
    assert_eq!(container.log.borrow().marker_ids(), vec!["10", "11"]);

    let pending = viewer
        .borrow_mut()
        .handle_event(ViewerEvent::MarkerSelected("10".into()))
        .expect("swap to B");
    assert_eq!(pending.source, "https://cdn.example/b.jpg");
    assert_eq!(*host.navigations.borrow(), vec![(2, 1)]);
    assert_eq!(viewer.borrow().current_index(), 1);

    assert_eq!(block_on(drive_swap(Rc::downgrade(&viewer), pending)), SwapOutcome::Applied);
    let log = container.log.borrow();
    assert_eq!(log.marker_ids(), vec!["20"]);
    assert_eq!(
        log.panoramas,
        vec!["https://cdn.example/a.jpg", "https://cdn.example/b.jpg"]
    );
}

#[test]
fn failed_target_load_keeps_previous_markers() {
    let tour = tour(vec![
        sphere(1, Some("a.jpg"), vec![nav_hotspot(10, Some(2))]),
        sphere(2, Some("fail://b.jpg"), vec![nav_hotspot(20, Some(1))]),
    ]);
    let (container, host, viewer) = mounted(tour);
    let pending = viewer
        .borrow_mut()
        .handle_event(ViewerEvent::MarkerSelected("10".into()))
        .expect("swap to B");
    assert_eq!(block_on(drive_swap(Rc::downgrade(&viewer), pending)), SwapOutcome::Failed);

    {
        let log = container.log.borrow();
        assert_eq!(log.marker_ids(), vec!["10"]);
        assert_eq!(log.panoramas, vec!["a.jpg"]);
        assert_eq!(log.rotations.len(), 1);
    }
    // back on A, and the host hears about it
    assert_eq!(viewer.borrow().current_index(), 0);
    assert_eq!(*host.navigations.borrow(), vec![(2, 1), (1, 0)]);

    // the visible marker still works and retries the load
    let retry = viewer
        .borrow_mut()
        .handle_event(ViewerEvent::MarkerSelected("10".into()))
        .expect("retry B");
    assert_eq!(retry.source, "fail://b.jpg");
    drop(retry);
    assert!(viewer.borrow_mut().navigate_to_sphere(1).is_some());
}

#[test]
fn failed_first_load_can_be_retried() {
    let tour = tour(vec![sphere(1, Some("fail://a.jpg"), vec![])]);
    let container = MockContainer::default();
    let viewer = Rc::new(RefCell::new(TourViewer::<MockEngine>::mount(
        &container,
        tour,
        0,
        &ViewerOptions::default(),
        Box::new(RecordingHost::default()),
    )));
    let first = viewer.borrow_mut().load_current().unwrap();
    assert_eq!(block_on(drive_swap(Rc::downgrade(&viewer), first)), SwapOutcome::Failed);
    assert!(viewer.borrow_mut().show_sphere(0).is_some());
}

#[test]
fn markers_resolve_against_the_sphere_on_screen() {
    let (_container, host, viewer) = mounted(two_sphere_tour());
    // B is requested but A is still on screen
    let _to_b = viewer.borrow_mut().navigate_to_sphere(2).unwrap();
    let pending = viewer
        .borrow_mut()
        .handle_event(ViewerEvent::MarkerSelected("11".into()));
    assert!(pending.is_none());
    assert_eq!(host.disclosures.borrow().len(), 1);
    assert_eq!(host.disclosures.borrow()[0].hotspot_id, 11);
}

#[test]
fn marker_ids_match_exactly() {
    let (_container, host, viewer) = mounted(two_sphere_tour());
    for id in ["010", " 10", "10 ", "+10", "10.0"] {
        let pending = viewer
            .borrow_mut()
            .handle_event(ViewerEvent::MarkerSelected(id.into()));
        assert!(pending.is_none(), "marker {id:?} should not match hotspot 10");
    }
    assert!(host.navigations.borrow().is_empty());
}

#[test]
fn busy_owner_drops_the_completion() {
    let (container, _host, viewer) = mounted(two_sphere_tour());
    let pending = viewer.borrow_mut().navigate_to_sphere(2).unwrap();
    let outcome = {
        let _held = viewer.borrow();
        block_on(drive_swap(Rc::downgrade(&viewer), pending))
    };
    assert_eq!(outcome, SwapOutcome::Busy);
    assert_eq!(container.log.borrow().panoramas.len(), 1);
}

#[test]
fn stale_swap_does_not_resync_markers() {
    let (container, _host, viewer) = mounted(two_sphere_tour());
    let to_b = viewer.borrow_mut().navigate_to_sphere(2).unwrap();
    let back_to_a = viewer.borrow_mut().navigate_to_sphere(1).unwrap();

    assert_eq!(block_on(drive_swap(Rc::downgrade(&viewer), to_b)), SwapOutcome::Stale);
    assert_eq!(container.log.borrow().marker_ids(), vec!["10", "11"]);
    assert_eq!(block_on(drive_swap(Rc::downgrade(&viewer), back_to_a)), SwapOutcome::Applied);
    assert_eq!(container.log.borrow().marker_ids(), vec!["10", "11"]);
    assert_eq!(container.log.borrow().panoramas.len(), 2);
}

#[test]
fn completion_after_owner_dropped_is_unmounted() {
    let (container, _host, viewer) = mounted(two_sphere_tour());
    let pending = viewer.borrow_mut().navigate_to_sphere(2).unwrap();
    let weak = Rc::downgrade(&viewer);
    drop(viewer);
    assert_eq!(block_on(drive_swap(weak, pending)), SwapOutcome::Unmounted);
    assert_eq!(container.log.borrow().disposed, 1);
}

#[test]
fn initial_yaw_option_applies_to_first_load_only() {
    let container = MockContainer::default();
    let options = ViewerOptions {
        initial_yaw: Some(90.0),
        ..ViewerOptions::default()
    };
    let viewer = Rc::new(RefCell::new(TourViewer::<MockEngine>::mount(
        &container,
        two_sphere_tour(),
        0,
        &options,
        Box::new(RecordingHost::default()),
    )));
    let first = viewer.borrow_mut().load_current().unwrap();
    block_on(drive_swap(Rc::downgrade(&viewer), first));
    let next = viewer.borrow_mut().navigate_to_sphere(2).unwrap();
    block_on(drive_swap(Rc::downgrade(&viewer), next));

    let rotations = container.log.borrow().rotations.clone();
    assert_eq!(
        rotations,
        vec![
            tour_viewer::SphericalPosition::from_degrees(90.0, 0.0),
            tour_viewer::SphericalPosition::from_degrees(0.0, 0.0),
        ]
    );
}

#[test]
fn info_hotspot_discloses_once_and_stays() {
    let (container, host, viewer) = mounted(two_sphere_tour());
    let pending = viewer
        .borrow_mut()
        .handle_event(ViewerEvent::MarkerSelected("11".into()));
    assert!(pending.is_none());

    let disclosures = host.disclosures.borrow();
    assert_eq!(disclosures.len(), 1);
    assert_eq!(disclosures[0].hotspot_id, 11);
    assert_eq!(disclosures[0].title.as_deref(), Some("Details"));
    assert_eq!(disclosures[0].content, "<p>Lobby</p>");
    assert!(host.navigations.borrow().is_empty());
    assert_eq!(viewer.borrow().current_index(), 0);
    assert_eq!(container.log.borrow().loads.len(), 1);
}

#[test]
fn broken_references_are_ignored() {
    let tour = tour(vec![
        sphere(
            1,
            Some("a.jpg"),
            vec![nav_hotspot(12, Some(99)), nav_hotspot(13, None)],
        ),
        sphere(2, Some("b.jpg"), vec![]),
    ]);
    let (container, host, viewer) = mounted(tour);
    for id in ["12", "13", "404", "abc", ""] {
        let pending = viewer
            .borrow_mut()
            .handle_event(ViewerEvent::MarkerSelected(id.into()));
        assert!(pending.is_none(), "marker {id:?} should be a no-op");
    }
    assert!(host.navigations.borrow().is_empty());
    assert!(host.disclosures.borrow().is_empty());
    assert_eq!(container.log.borrow().loads.len(), 1);
}

#[test]
fn host_navigation_by_sphere_id() {
    let (_container, host, viewer) = mounted(two_sphere_tour());
    assert!(viewer.borrow_mut().navigate_to_sphere(1).is_none());
    assert!(viewer.borrow_mut().navigate_to_sphere(-5).is_none());
    assert!(host.navigations.borrow().is_empty());

    let pending = viewer.borrow_mut().navigate_to_sphere(2).expect("swap to B");
    assert_eq!(pending.source, "https://cdn.example/b.jpg");
    assert_eq!(*host.navigations.borrow(), vec![(2, 1)]);
}

#[test]
fn show_sphere_by_index() {
    let (_container, host, viewer) = mounted(two_sphere_tour());
    assert!(viewer.borrow_mut().show_sphere(5).is_none());
    assert!(viewer.borrow_mut().show_sphere(0).is_none());
    assert!(viewer.borrow_mut().show_sphere(1).is_some());
    assert_eq!(*host.navigations.borrow(), vec![(2, 1)]);
}

#[test]
fn clicks_do_nothing_in_the_viewer() {
    let (_container, host, viewer) = mounted(two_sphere_tour());
    let pending = viewer
        .borrow_mut()
        .handle_event(ViewerEvent::Click(tour_viewer::SphericalPosition::new(1.0, 0.0)));
    assert!(pending.is_none());
    assert!(host.placements.borrow().is_empty());
}

#[test]
fn controller_clamps_initial_index_and_keeps_first_duplicate() {
    let tour = tour(vec![
        sphere(1, None, vec![]),
        sphere(2, None, vec![]),
        sphere(1, None, vec![]),
    ]);
    let mut nav = NavigationController::new(tour, 10);
    assert_eq!(nav.current_index(), 0);
    assert_eq!(nav.index_of(1), Some(0));
    assert_eq!(
        nav.navigate_to_sphere(2),
        NavigationAction::Navigate {
            index: 1,
            sphere_id: 2
        }
    );
    assert_eq!(nav.current_sphere().map(|s| s.id), Some(2));
}

#[test]
fn empty_tour_has_nothing_to_load() {
    let container = MockContainer::default();
    let mut viewer = TourViewer::<MockEngine>::mount(
        &container,
        tour(vec![]),
        0,
        &ViewerOptions::default(),
        Box::new(RecordingHost::default()),
    );
    assert!(viewer.load_current().is_none());
    assert!(viewer.current_sphere().is_none());
}

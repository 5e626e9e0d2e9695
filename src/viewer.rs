//! Host-facing components: the tour viewer and the hotspot editor.
//!
//! Both own one `PanoramaSession` and translate engine events into session
//! work. Swaps are returned as `PendingSwap`s and completed by
//! [`drive_swap`], which awaits the load without holding any borrow.

use crate::config::ViewerOptions;
use crate::engine::{ViewerEngine, ViewerEvent};
use crate::error::ViewerError;
use crate::model::{Hotspot, Sphere, VirtualTour};
use crate::navigation::{Disclosure, NavigationAction, NavigationController};
use crate::placement::{HotspotDraft, PlacementCapture};
use crate::session::{PanoramaSession, PendingSwap, SwapOutcome, SwapToken};
use crate::sync;
use std::cell::RefCell;
use std::rc::Weak;

/// Callbacks into the page hosting a tour viewer.
pub trait TourHost {
    /// The active sphere changed (the page's `onNavigateSphere`).
    fn navigated(&mut self, sphere_id: i64, index: usize);
    /// Show info hotspot content without blocking.
    fn disclose(&mut self, disclosure: &Disclosure);
}

/// Callback into the hotspot form hosting an editor.
pub trait PlacementHost {
    fn placed(&mut self, yaw: f64, pitch: f64);
}

/// An owner that can finish the swaps it requested.
pub trait SwapTarget {
    type Engine: ViewerEngine;

    fn finish_swap(
        &mut self,
        token: SwapToken,
        result: Result<<Self::Engine as ViewerEngine>::Panorama, ViewerError>,
    ) -> SwapOutcome;
}

/// Await `pending` and hand the result to `target` if it is still alive.
pub async fn drive_swap<T: SwapTarget>(
    target: Weak<RefCell<T>>,
    pending: PendingSwap<T::Engine>,
) -> SwapOutcome {
    let PendingSwap { token, source, load } = pending;
    let result = load.await;
    let Some(target) = target.upgrade() else {
        log::debug!("[viewer] owner gone before {:?} finished loading", source);
        return SwapOutcome::Unmounted;
    };
    let outcome = match target.try_borrow_mut() {
        Ok(mut owner) => owner.finish_swap(token, result),
        Err(_) => {
            log::warn!("[viewer] owner busy when {:?} finished loading", source);
            SwapOutcome::Busy
        }
    };
    outcome
}

pub struct TourViewer<E: ViewerEngine> {
    session: PanoramaSession<E>,
    navigation: NavigationController,
    host: Box<dyn TourHost>,
    initial_yaw: Option<f64>,
}

impl<E: ViewerEngine> TourViewer<E> {
    pub fn mount(
        container: &E::Container,
        tour: VirtualTour,
        initial_index: usize,
        options: &ViewerOptions,
        host: Box<dyn TourHost>,
    ) -> Self {
        log::info!(
            "[viewer] mounting tour {} ({} spheres)",
            tour.id,
            tour.spheres.len()
        );
        Self {
            session: PanoramaSession::mount(container, options),
            navigation: NavigationController::new(tour, initial_index),
            host,
            initial_yaw: options.initial_yaw,
        }
    }

    pub fn session(&self) -> &PanoramaSession<E> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PanoramaSession<E> {
        &mut self.session
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn current_index(&self) -> usize {
        self.navigation.current_index()
    }

    pub fn current_sphere(&self) -> Option<&Sphere> {
        self.navigation.current_sphere()
    }

    /// Request the panorama of the sphere currently in view.
    pub fn load_current(&mut self) -> Option<PendingSwap<E>> {
        let sphere = self.navigation.current_sphere()?;
        match self.initial_yaw.take() {
            Some(yaw) => self.session.request_swap_with_yaw(sphere, yaw),
            None => self.session.request_swap(sphere),
        }
    }

    pub fn handle_event(&mut self, event: ViewerEvent) -> Option<PendingSwap<E>> {
        match event {
            ViewerEvent::MarkerSelected(id) => {
                let action = self.navigation.select(&id);
                self.apply(action)
            }
            ViewerEvent::Click(_) => None,
        }
    }

    /// Host-driven navigation; unknown ids are ignored.
    pub fn navigate_to_sphere(&mut self, sphere_id: i64) -> Option<PendingSwap<E>> {
        let action = self.navigation.navigate_to_sphere(sphere_id);
        self.apply(action)
    }

    pub fn show_sphere(&mut self, index: usize) -> Option<PendingSwap<E>> {
        if !self.navigation.show_index(index) {
            return None;
        }
        let sphere_id = self.navigation.current_sphere()?.id;
        self.apply(NavigationAction::Navigate { index, sphere_id })
    }

    fn apply(&mut self, action: NavigationAction) -> Option<PendingSwap<E>> {
        match action {
            NavigationAction::None => None,
            NavigationAction::Navigate { index, sphere_id } => {
                self.host.navigated(sphere_id, index);
                let sphere = self.navigation.current_sphere()?;
                self.session.request_swap(sphere)
            }
            NavigationAction::Disclose(disclosure) => {
                self.host.disclose(&disclosure);
                None
            }
        }
    }

    pub fn teardown(&mut self) {
        self.session.teardown();
    }
}

impl<E: ViewerEngine> SwapTarget for TourViewer<E> {
    type Engine = E;

    fn finish_swap(
        &mut self,
        token: SwapToken,
        result: Result<E::Panorama, ViewerError>,
    ) -> SwapOutcome {
        let outcome = self.session.complete_swap(token, result);
        match outcome {
            SwapOutcome::Applied => {
                self.navigation.mark_displayed();
                let hotspots = self
                    .navigation
                    .current_sphere()
                    .map(|s| s.hotspots.as_slice())
                    .unwrap_or(&[]);
                if let Some(engine) = self.session.engine_mut() {
                    sync::sync_markers(engine, hotspots);
                }
            }
            SwapOutcome::Failed => {
                // the host was told about the move; tell it about the way back
                if let Some(index) = self.navigation.revert_to_displayed() {
                    if let Some(sphere) = self.navigation.current_sphere() {
                        self.host.navigated(sphere.id, index);
                    }
                }
            }
            _ => {}
        }
        outcome
    }
}

pub struct HotspotEditor<E: ViewerEngine> {
    session: PanoramaSession<E>,
    /// The sphere on screen.
    sphere: Sphere,
    /// A sphere whose panorama is still loading.
    incoming: Option<Sphere>,
    placement: PlacementCapture,
    host: Box<dyn PlacementHost>,
}

impl<E: ViewerEngine> HotspotEditor<E> {
    pub fn mount(
        container: &E::Container,
        sphere: Sphere,
        draft: HotspotDraft,
        options: &ViewerOptions,
        host: Box<dyn PlacementHost>,
    ) -> Self {
        log::info!("[editor] mounting on sphere {}", sphere.id);
        Self {
            session: PanoramaSession::mount(container, options),
            sphere,
            incoming: None,
            placement: PlacementCapture::new(draft),
            host,
        }
    }

    pub fn session(&self) -> &PanoramaSession<E> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PanoramaSession<E> {
        &mut self.session
    }

    pub fn draft(&self) -> &HotspotDraft {
        self.placement.draft()
    }

    pub fn sphere(&self) -> &Sphere {
        &self.sphere
    }

    pub fn load(&mut self) -> Option<PendingSwap<E>> {
        self.incoming = None;
        self.session.request_swap(&self.sphere)
    }

    /// The form switched to another sphere. It replaces the one on screen
    /// only once its panorama is applied.
    pub fn set_sphere(&mut self, sphere: Sphere) -> Option<PendingSwap<E>> {
        let pending = self.session.request_swap(&sphere)?;
        self.incoming = Some(sphere);
        Some(pending)
    }

    pub fn handle_event(&mut self, event: ViewerEvent) {
        match event {
            ViewerEvent::Click(position) => {
                let (yaw, pitch) = self.placement.capture(position);
                self.rebuild_preview();
                self.host.placed(yaw, pitch);
            }
            ViewerEvent::MarkerSelected(_) => {}
        }
    }

    /// Mirror the host form's fields; the preview follows when a shown field
    /// changed.
    pub fn update_draft(&mut self, draft: HotspotDraft) {
        if self.placement.update(draft) {
            self.rebuild_preview();
        }
    }

    fn rebuild_preview(&mut self) {
        // before the first panorama lands, finish_swap places the preview
        if !self.session.is_ready() {
            return;
        }
        let draft = self.placement.draft();
        if let Some(engine) = self.session.engine_mut() {
            sync::sync_preview(engine, draft);
        }
    }

    /// Existing hotspots shown next to the preview; the one being edited is
    /// replaced by the preview.
    fn existing_hotspots(&self) -> Vec<Hotspot> {
        let editing = self.placement.draft().id;
        self.sphere
            .hotspots
            .iter()
            .filter(|h| Some(h.id) != editing)
            .cloned()
            .collect()
    }

    pub fn teardown(&mut self) {
        self.session.teardown();
    }
}

impl<E: ViewerEngine> SwapTarget for HotspotEditor<E> {
    type Engine = E;

    fn finish_swap(
        &mut self,
        token: SwapToken,
        result: Result<E::Panorama, ViewerError>,
    ) -> SwapOutcome {
        let outcome = self.session.complete_swap(token, result);
        match outcome {
            SwapOutcome::Applied => {
                if let Some(sphere) = self.incoming.take() {
                    self.sphere = sphere;
                }
                let existing = self.existing_hotspots();
                let draft = self.placement.draft().clone();
                if let Some(engine) = self.session.engine_mut() {
                    sync::sync_markers(engine, &existing);
                    sync::sync_preview(engine, &draft);
                }
            }
            // the sphere on screen stays the one being edited
            SwapOutcome::Failed => self.incoming = None,
            _ => {}
        }
        outcome
    }
}

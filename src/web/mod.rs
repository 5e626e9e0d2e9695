//! JS-facing handles mounting the viewer and the editor into page containers.

mod dom;
mod engine;
mod events;
mod frame;
mod input;
mod loader;
mod overlay;
mod render;

pub use engine::WebEngine;

use crate::config::ViewerOptions;
use crate::error::ViewerError;
use crate::model::{Sphere, VirtualTour};
use crate::navigation::Disclosure;
use crate::placement::HotspotDraft;
use crate::session::PendingSwap;
use crate::viewer::{drive_swap, HotspotEditor, PlacementHost, SwapTarget, TourHost, TourViewer};
use overlay::DisclosurePanel;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn spawn_swap<T: SwapTarget + 'static>(
    owner: &Rc<RefCell<T>>,
    pending: Option<PendingSwap<T::Engine>>,
) {
    if let Some(pending) = pending {
        let weak = Rc::downgrade(owner);
        spawn_local(async move {
            let outcome = drive_swap(weak, pending).await;
            log::debug!("[web] swap finished: {:?}", outcome);
        });
    }
}

/// Host calls can arrive from inside one of our own callbacks (for example
/// `onNavigateSphere` calling back into the handle); those find the owner
/// borrowed and are skipped.
fn with_owner<T, R>(owner: &Rc<RefCell<T>>, f: impl FnOnce(&mut T) -> R) -> Option<R> {
    match owner.try_borrow_mut() {
        Ok(mut o) => Some(f(&mut o)),
        Err(_) => {
            log::warn!("[web] re-entrant call ignored");
            None
        }
    }
}

/// Tear down now, or right after the callback currently running returns.
fn teardown_owner<T: 'static>(owner: Rc<RefCell<T>>, teardown: fn(&mut T)) {
    if let Ok(mut o) = owner.try_borrow_mut() {
        teardown(&mut o);
        return;
    }
    spawn_local(async move {
        match owner.try_borrow_mut() {
            Ok(mut o) => teardown(&mut o),
            Err(_) => log::warn!("[web] teardown skipped, owner still busy"),
        }
    });
}

fn container_or_warn(container_id: &str) -> Option<web_sys::HtmlElement> {
    let container = dom::element_by_id(container_id);
    if container.is_none() {
        let err = ViewerError::MissingContainer(container_id.to_string());
        log::warn!("[web] {}; viewer not initialized", err);
    }
    container
}

struct WebTourHost {
    on_navigate_sphere: Option<js_sys::Function>,
    panel: DisclosurePanel,
}

impl TourHost for WebTourHost {
    fn navigated(&mut self, sphere_id: i64, index: usize) {
        // content from the previous sphere no longer applies
        self.panel.hide();
        if let Some(f) = &self.on_navigate_sphere {
            if let Err(e) = f.call2(
                &JsValue::NULL,
                &JsValue::from_f64(sphere_id as f64),
                &JsValue::from_f64(index as f64),
            ) {
                log::warn!("[web] onNavigateSphere threw: {:?}", e);
            }
        }
    }

    fn disclose(&mut self, disclosure: &Disclosure) {
        self.panel.show(disclosure);
    }
}

struct WebPlacementHost {
    on_place: Option<js_sys::Function>,
}

impl PlacementHost for WebPlacementHost {
    fn placed(&mut self, yaw: f64, pitch: f64) {
        if let Some(f) = &self.on_place {
            let (yaw, pitch) = (JsValue::from_f64(yaw), JsValue::from_f64(pitch));
            if let Err(e) = f.call2(&JsValue::NULL, &yaw, &pitch) {
                log::warn!("[web] onPlace threw: {:?}", e);
            }
        }
    }
}

/// Read-only tour viewer with sphere navigation.
#[wasm_bindgen]
pub struct TourViewerHandle {
    viewer: Option<Rc<RefCell<TourViewer<WebEngine>>>>,
}

#[wasm_bindgen]
impl TourViewerHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(
        container_id: &str,
        tour_json: &str,
        initial_index: usize,
        options_json: &str,
        on_navigate_sphere: Option<js_sys::Function>,
    ) -> Result<TourViewerHandle, JsValue> {
        let tour = VirtualTour::from_json(tour_json).map_err(to_js)?;
        let options = ViewerOptions::from_json(options_json).map_err(to_js)?;
        let Some(container) = container_or_warn(container_id) else {
            return Ok(Self { viewer: None });
        };
        let panel = DisclosurePanel::new(&container).map_err(|e| to_js(format!("{:#}", e)))?;
        let host = WebTourHost {
            on_navigate_sphere,
            panel,
        };
        let viewer = Rc::new(RefCell::new(TourViewer::<WebEngine>::mount(
            &container,
            tour,
            initial_index,
            &options,
            Box::new(host),
        )));

        let weak = Rc::downgrade(&viewer);
        viewer
            .borrow_mut()
            .session_mut()
            .set_event_handler(Box::new(move |event| {
                let Some(viewer) = weak.upgrade() else {
                    return;
                };
                let pending = match viewer.try_borrow_mut() {
                    Ok(mut v) => v.handle_event(event),
                    Err(_) => {
                        log::warn!("[web] viewer busy, dropped {:?}", event);
                        return;
                    }
                };
                spawn_swap(&viewer, pending);
            }));

        let pending = viewer.borrow_mut().load_current();
        spawn_swap(&viewer, pending);
        Ok(Self {
            viewer: Some(viewer),
        })
    }

    /// Accepts any integer id; ids outside the tour are ignored.
    pub fn navigate_to_sphere(&self, sphere_id: f64) {
        let Some(viewer) = &self.viewer else {
            return;
        };
        if !sphere_id.is_finite() || sphere_id.fract() != 0.0 {
            return;
        }
        let pending = with_owner(viewer, |v| v.navigate_to_sphere(sphere_id as i64)).flatten();
        spawn_swap(viewer, pending);
    }

    pub fn show_sphere(&self, index: usize) {
        let Some(viewer) = &self.viewer else {
            return;
        };
        let pending = with_owner(viewer, |v| v.show_sphere(index)).flatten();
        spawn_swap(viewer, pending);
    }

    pub fn current_index(&self) -> Option<u32> {
        self.viewer
            .as_ref()
            .and_then(|v| v.try_borrow().ok().map(|v| v.current_index() as u32))
    }

    pub fn destroy(&mut self) {
        if let Some(viewer) = self.viewer.take() {
            teardown_owner(viewer, TourViewer::teardown);
        }
    }
}

/// Authoring viewer: clicks place the hotspot being edited.
#[wasm_bindgen]
pub struct HotspotEditorHandle {
    editor: Option<Rc<RefCell<HotspotEditor<WebEngine>>>>,
}

#[wasm_bindgen]
impl HotspotEditorHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(
        container_id: &str,
        sphere_json: &str,
        draft_json: &str,
        options_json: &str,
        on_place: Option<js_sys::Function>,
    ) -> Result<HotspotEditorHandle, JsValue> {
        let sphere = Sphere::from_json(sphere_json).map_err(to_js)?;
        let draft = HotspotDraft::from_json(draft_json).map_err(to_js)?;
        let options = ViewerOptions::from_json(options_json).map_err(to_js)?;
        let Some(container) = container_or_warn(container_id) else {
            return Ok(Self { editor: None });
        };
        let editor = Rc::new(RefCell::new(HotspotEditor::<WebEngine>::mount(
            &container,
            sphere,
            draft,
            &options,
            Box::new(WebPlacementHost { on_place }),
        )));

        let weak = Rc::downgrade(&editor);
        editor
            .borrow_mut()
            .session_mut()
            .set_event_handler(Box::new(move |event| {
                let Some(editor) = weak.upgrade() else {
                    return;
                };
                match editor.try_borrow_mut() {
                    Ok(mut e) => e.handle_event(event),
                    Err(_) => log::warn!("[web] editor busy, dropped {:?}", event),
                };
            }));

        let pending = editor.borrow_mut().load();
        spawn_swap(&editor, pending);
        Ok(Self {
            editor: Some(editor),
        })
    }

    /// Mirror the host form's current field values.
    pub fn update_draft(&self, draft_json: &str) -> Result<(), JsValue> {
        let Some(editor) = &self.editor else {
            return Ok(());
        };
        let draft = HotspotDraft::from_json(draft_json).map_err(to_js)?;
        with_owner(editor, |e| e.update_draft(draft));
        Ok(())
    }

    pub fn set_sphere(&self, sphere_json: &str) -> Result<(), JsValue> {
        let Some(editor) = &self.editor else {
            return Ok(());
        };
        let sphere = Sphere::from_json(sphere_json).map_err(to_js)?;
        let pending = with_owner(editor, |e| e.set_sphere(sphere)).flatten();
        spawn_swap(editor, pending);
        Ok(())
    }

    pub fn destroy(&mut self) {
        if let Some(editor) = self.editor.take() {
            teardown_owner(editor, HotspotEditor::teardown);
        }
    }
}

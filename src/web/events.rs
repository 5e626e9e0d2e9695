//! DOM listeners owned by one engine.
//!
//! Every listener is registered on an element the engine created (or the
//! window, for resizes) and removed again on dispose.

use super::dom;
use super::engine::EngineState;
use super::input;
use super::overlay::MARKER_ID_ATTR;
use crate::constants::WHEEL_ZOOM_DEG_PER_PX;
use crate::coords::to_radians;
use crate::engine::{EventHandler, ViewerEvent};
use instant::Instant;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedHandler = Rc<RefCell<Option<EventHandler>>>;

struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

#[derive(Default)]
pub struct Listeners {
    entries: SmallVec<[Listener; 8]>,
}

impl Listeners {
    fn add(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        if let Err(e) =
            target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        {
            log::warn!("[events] add {} listener: {:?}", kind, e);
            return;
        }
        self.entries.push(Listener {
            target: target.clone(),
            kind,
            closure,
        });
    }

    pub fn remove_all(&mut self) {
        for l in self.entries.drain(..) {
            _ = l
                .target
                .remove_event_listener_with_callback(l.kind, l.closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        self.remove_all();
    }
}

/// Deliver an event to the owner, outside of any engine-state borrow.
pub fn emit(handler: &SharedHandler, event: ViewerEvent) {
    let Ok(mut slot) = handler.try_borrow_mut() else {
        log::warn!("[events] dropped re-entrant {:?}", event);
        return;
    };
    if let Some(h) = slot.as_mut() {
        h(event);
    }
}

pub struct InputWiring {
    pub state: Rc<RefCell<EngineState>>,
    pub handler: SharedHandler,
    pub canvas: web::HtmlCanvasElement,
    pub layer: web::HtmlElement,
    pub marker_clicks: bool,
}

pub fn wire_input_handlers(w: InputWiring) -> Listeners {
    let mut listeners = Listeners::default();
    wire_pointerdown(&w, &mut listeners);
    wire_pointermove(&w, &mut listeners);
    wire_pointerup(&w, &mut listeners);
    wire_wheel(&w, &mut listeners);
    if w.marker_clicks {
        wire_marker_clicks(&w, &mut listeners);
    }
    wire_resize(&w, &mut listeners);
    listeners
}

fn wire_pointerdown(w: &InputWiring, listeners: &mut Listeners) {
    let state = w.state.clone();
    let canvas = w.canvas.clone();
    listeners.add(&w.canvas, "pointerdown", move |ev: web::Event| {
        let Ok(ev) = ev.dyn_into::<web::PointerEvent>() else {
            return;
        };
        let pos = input::pointer_css_px(&ev, &canvas);
        let mut s = state.borrow_mut();
        s.drag.begin(ev.pointer_id(), pos);
        s.last_interaction = Instant::now();
        _ = canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    });
}

fn wire_pointermove(w: &InputWiring, listeners: &mut Listeners) {
    let state = w.state.clone();
    let canvas = w.canvas.clone();
    listeners.add(&w.canvas, "pointermove", move |ev: web::Event| {
        let Ok(ev) = ev.dyn_into::<web::PointerEvent>() else {
            return;
        };
        let mut s = state.borrow_mut();
        if !s.drag.tracks(ev.pointer_id()) {
            return;
        }
        let pos = input::pointer_css_px(&ev, &canvas);
        let delta = s.drag.advance(pos);
        let (_, height) = dom::css_size(&canvas);
        s.camera.drag_by(delta.x, delta.y, height);
        s.last_interaction = Instant::now();
    });
}

fn wire_pointerup(w: &InputWiring, listeners: &mut Listeners) {
    for kind in ["pointerup", "pointercancel"] {
        let state = w.state.clone();
        let handler = w.handler.clone();
        let canvas = w.canvas.clone();
        listeners.add(&w.canvas, kind, move |ev: web::Event| {
            let Ok(ev) = ev.dyn_into::<web::PointerEvent>() else {
                return;
            };
            let click = {
                let mut s = state.borrow_mut();
                // a second finger lifting must not end this drag
                let Some(moved) = s.drag.end(ev.pointer_id()) else {
                    return;
                };
                if kind == "pointercancel" || moved {
                    None
                } else {
                    let pos = input::pointer_css_px(&ev, &canvas);
                    let (width, height) = dom::css_size(&canvas);
                    Some(s.camera.screen_to_position(pos.x, pos.y, width, height))
                }
            };
            _ = canvas.release_pointer_capture(ev.pointer_id());
            if let Some(position) = click {
                emit(&handler, ViewerEvent::Click(position));
            }
        });
    }
}

fn wire_wheel(w: &InputWiring, listeners: &mut Listeners) {
    let state = w.state.clone();
    listeners.add(&w.canvas, "wheel", move |ev: web::Event| {
        let Ok(ev) = ev.dyn_into::<web::WheelEvent>() else {
            return;
        };
        ev.prevent_default();
        let mut s = state.borrow_mut();
        s.camera.zoom_by(to_radians(ev.delta_y() * WHEEL_ZOOM_DEG_PER_PX));
        s.last_interaction = Instant::now();
    });
}

/// One delegated listener on the marker layer resolves the clicked marker
/// from its `data-marker-id`.
fn wire_marker_clicks(w: &InputWiring, listeners: &mut Listeners) {
    let handler = w.handler.clone();
    listeners.add(&w.layer, "click", move |ev: web::Event| {
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) else {
            return;
        };
        let selector = format!("[{}]", MARKER_ID_ATTR);
        let Ok(Some(marker)) = target.closest(&selector) else {
            return;
        };
        let Some(id) = marker.get_attribute(MARKER_ID_ATTR) else {
            return;
        };
        ev.stop_propagation();
        emit(&handler, ViewerEvent::MarkerSelected(id));
    });
}

fn wire_resize(w: &InputWiring, listeners: &mut Listeners) {
    let Some(window) = web::window() else {
        return;
    };
    let canvas = w.canvas.clone();
    listeners.add(&window, "resize", move |_ev: web::Event| {
        dom::sync_canvas_backing_size(&canvas);
    });
}

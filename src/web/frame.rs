use super::engine::EngineState;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Drive `EngineState::frame` from `requestAnimationFrame` until the engine
/// is disposed or dropped.
pub fn start_loop(state: Weak<RefCell<EngineState>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let Some(state) = state.upgrade() else {
            return;
        };
        {
            let Ok(mut s) = state.try_borrow_mut() else {
                // busy this frame; try again on the next one
                request_frame(&tick_clone);
                return;
            };
            if !s.alive {
                log::debug!("[frame] loop stopped");
                return;
            }
            s.frame();
        }
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(closure) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(closure.as_ref().unchecked_ref());
    }
}

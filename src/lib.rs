//! Panorama hotspot viewer and editor for virtual tours.
//!
//! Everything outside `web` is platform independent; the browser engine
//! (wgpu renderer, DOM marker overlay, pointer input) is wasm32-only.

pub mod camera;
pub mod config;
pub mod constants;
pub mod coords;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod marker;
pub mod model;
pub mod navigation;
pub mod placement;
pub mod session;
pub mod sync;
pub mod viewer;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{PluginSet, ViewerOptions};
pub use coords::{to_degrees, to_radians, SphericalPosition};
pub use engine::{ViewerEngine, ViewerEvent};
pub use error::ViewerError;
pub use model::{Hotspot, HotspotKind, Sphere, VirtualTour};
pub use session::{PanoramaSession, PendingSwap, SwapOutcome, SwapToken};
pub use viewer::{drive_swap, HotspotEditor, PlacementHost, TourHost, TourViewer};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tour-viewer starting");
    Ok(())
}

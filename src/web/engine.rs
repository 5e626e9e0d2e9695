//! Browser implementation of the viewer engine: a wgpu canvas, a DOM marker
//! layer stacked above it, and pointer input driving the camera.

use super::dom;
use super::events::{self, InputWiring, Listeners, SharedHandler};
use super::frame;
use super::loader::{self, LoadFuture, PanoramaImage};
use super::overlay::MarkerLayer;
use super::render::GpuState;
use crate::camera::PanoramaCamera;
use crate::config::{AutorotateOptions, ViewerOptions};
use crate::coords::{to_radians, SphericalPosition};
use crate::engine::{EventHandler, ViewerEngine};
use crate::error::ViewerError;
use crate::gesture::DragState;
use crate::marker::MarkerConfig;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// State shared between the engine, its listeners and the frame loop.
pub struct EngineState {
    pub camera: PanoramaCamera,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<GpuState>,
    pub pending_panorama: Option<PanoramaImage>,
    pub markers: MarkerLayer,
    pub drag: DragState,
    pub autorotate: Option<AutorotateOptions>,
    pub last_interaction: Instant,
    pub last_frame: Instant,
    pub alive: bool,
}

impl EngineState {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_frame).as_secs_f64();
        self.last_frame = now;

        if let Some(auto) = &self.autorotate {
            let idle = now - self.last_interaction >= Duration::from_millis(auto.idle_delay_ms);
            if idle && !self.drag.active {
                self.camera.spin(to_radians(auto.speed_deg_per_sec) * dt_sec);
            }
        }

        if let Some(gpu) = self.gpu.as_mut() {
            if let Some(image) = self.pending_panorama.take() {
                gpu.upload_panorama(&image);
            }
            gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
            match gpu.render(&self.camera) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::debug!("[frame] surface lost, reconfiguring");
                    gpu.reconfigure();
                }
                Err(e) => log::warn!("[frame] render error: {:?}", e),
            }
        }

        let (width, height) = dom::css_size(&self.canvas);
        self.markers.layout(&self.camera, width, height);
    }
}

pub struct WebEngine {
    state: Rc<RefCell<EngineState>>,
    handler: SharedHandler,
    listeners: Option<Listeners>,
}

impl WebEngine {
    fn build(container: &web::HtmlElement, options: &ViewerOptions) -> anyhow::Result<Self> {
        let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
        if container.style().get_property_value("position").unwrap_or_default().is_empty() {
            dom::set_style(container, "position", "relative");
        }

        let canvas: web::HtmlCanvasElement = dom::create_element(&document, "canvas", "tv-canvas")?
            .dyn_into()
            .map_err(|_| anyhow::anyhow!("canvas element"))?;
        _ = canvas.set_attribute(
            "style",
            "display:block;width:100%;height:100%;touch-action:none;cursor:grab;",
        );
        container
            .append_child(&canvas)
            .map_err(|e| anyhow::anyhow!("append canvas: {:?}", e))?;
        dom::sync_canvas_backing_size(&canvas);

        let markers = MarkerLayer::new(&document, container)?;
        let layer = markers.root().clone();
        let now = Instant::now();
        let state = Rc::new(RefCell::new(EngineState {
            camera: PanoramaCamera::new(options),
            canvas: canvas.clone(),
            gpu: None,
            pending_panorama: None,
            markers,
            drag: DragState::default(),
            autorotate: options.plugins.autorotate.clone(),
            last_interaction: now,
            last_frame: now,
            alive: true,
        }));
        let handler: SharedHandler = Rc::new(RefCell::new(None));

        let listeners = events::wire_input_handlers(InputWiring {
            state: state.clone(),
            handler: handler.clone(),
            canvas: canvas.clone(),
            layer,
            marker_clicks: options.plugins.marker_clicks,
        });

        let weak = Rc::downgrade(&state);
        spawn_local(async move {
            match GpuState::new(&canvas).await {
                Ok(gpu) => {
                    if let Some(state) = weak.upgrade() {
                        let mut s = state.borrow_mut();
                        if s.alive {
                            s.gpu = Some(gpu);
                            log::info!("[engine] WebGPU ready");
                        }
                    }
                }
                Err(e) => log::error!("WebGPU init error: {:?}", e),
            }
        });
        frame::start_loop(Rc::downgrade(&state));

        Ok(Self {
            state,
            handler,
            listeners: Some(listeners),
        })
    }
}

impl ViewerEngine for WebEngine {
    type Container = web::HtmlElement;
    type Panorama = PanoramaImage;
    type LoadFuture = LoadFuture;

    fn create(container: &web::HtmlElement, options: &ViewerOptions) -> Result<Self, ViewerError> {
        Self::build(container, options).map_err(|e| ViewerError::Engine(format!("{:#}", e)))
    }

    fn load_panorama(&self, source: &str) -> LoadFuture {
        loader::load(source)
    }

    fn set_panorama(&mut self, panorama: PanoramaImage) {
        // uploaded by the next frame once the GPU is ready
        self.state.borrow_mut().pending_panorama = Some(panorama);
    }

    fn rotate(&mut self, position: SphericalPosition) {
        self.state.borrow_mut().camera.rotate_to(position);
    }

    fn clear_markers(&mut self) {
        self.state.borrow_mut().markers.clear();
    }

    fn add_marker(&mut self, marker: MarkerConfig) {
        self.state.borrow_mut().markers.add(marker);
    }

    fn remove_marker(&mut self, id: &str) {
        self.state.borrow_mut().markers.remove(id);
    }

    fn set_event_handler(&mut self, handler: EventHandler) {
        *self.handler.borrow_mut() = Some(handler);
    }

    fn dispose(&mut self) {
        if let Some(mut listeners) = self.listeners.take() {
            listeners.remove_all();
        }
        {
            let mut s = self.state.borrow_mut();
            s.alive = false;
            s.gpu = None;
            s.pending_panorama = None;
            s.markers.dispose();
            dom::detach(&s.canvas);
        }
        if let Ok(mut slot) = self.handler.try_borrow_mut() {
            *slot = None;
        }
    }
}

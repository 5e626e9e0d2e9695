//! Lifetime of one engine bound to one container.
//!
//! Panorama swaps are asynchronous. Every request gets a fresh `SwapToken`
//! and only the completion carrying the latest token is applied, so a slow
//! load can never re-apply an outdated camera or marker set after a newer
//! navigation.

use crate::config::ViewerOptions;
use crate::coords::SphericalPosition;
use crate::engine::{EventHandler, ViewerEngine};
use crate::error::ViewerError;
use crate::model::Sphere;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SwapToken(u64);

impl SwapToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A requested panorama swap whose image is still loading.
pub struct PendingSwap<E: ViewerEngine> {
    pub token: SwapToken,
    pub source: String,
    pub load: E::LoadFuture,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SwapOutcome {
    /// Panorama shown and camera reset; markers may now be rebuilt.
    Applied,
    /// A newer swap was requested meanwhile; this result was dropped.
    Stale,
    /// Loading failed; the previous panorama stays visible.
    Failed,
    /// The session was torn down before the load resolved.
    Unmounted,
    /// The owner was borrowed when the load resolved; the result was dropped.
    Busy,
}

#[derive(Clone, Debug)]
struct SwapTicket {
    token: SwapToken,
    source: String,
    initial_yaw: f64,
}

pub struct PanoramaSession<E: ViewerEngine> {
    engine: Option<E>,
    options: ViewerOptions,
    next_token: u64,
    latest: Option<SwapTicket>,
    ready: bool,
    current_source: Option<String>,
}

impl<E: ViewerEngine> PanoramaSession<E> {
    /// Bind a new engine to `container`. A failed creation leaves the
    /// session unmounted; it is not retried.
    pub fn mount(container: &E::Container, options: &ViewerOptions) -> Self {
        let engine = match E::create(container, options) {
            Ok(engine) => {
                log::info!("[session] engine created");
                Some(engine)
            }
            Err(e) => {
                log::warn!("[session] engine creation failed: {}", e);
                None
            }
        };
        Self {
            engine,
            options: options.clone(),
            next_token: 0,
            latest: None,
            ready: false,
            current_source: None,
        }
    }

    /// Tear down the current engine and bind a fresh one to `container`.
    pub fn remount(&mut self, container: &E::Container) {
        self.teardown();
        let options = self.options.clone();
        *self = Self::mount(container, &options);
    }

    pub fn is_mounted(&self) -> bool {
        self.engine.is_some()
    }

    /// True once the latest requested panorama has been applied.
    pub fn is_ready(&self) -> bool {
        self.engine.is_some() && self.ready
    }

    pub fn current_source(&self) -> Option<&str> {
        self.current_source.as_deref()
    }

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    pub fn set_event_handler(&mut self, handler: EventHandler) {
        if let Some(engine) = self.engine.as_mut() {
            engine.set_event_handler(handler);
        }
    }

    pub fn request_swap(&mut self, sphere: &Sphere) -> Option<PendingSwap<E>> {
        self.request_swap_with_yaw(sphere, sphere.initial_yaw)
    }

    /// Start loading `sphere`'s panorama; the camera will face
    /// `initial_yaw` (degrees) once it is applied.
    pub fn request_swap_with_yaw(
        &mut self,
        sphere: &Sphere,
        initial_yaw: f64,
    ) -> Option<PendingSwap<E>> {
        let engine = self.engine.as_ref()?;
        self.next_token += 1;
        let token = SwapToken(self.next_token);
        let source = sphere.panorama_url().to_string();
        log::debug!(
            "[session] swap #{} requested for sphere {} ({:?})",
            token.value(),
            sphere.id,
            source
        );
        let load = engine.load_panorama(&source);
        self.latest = Some(SwapTicket {
            token,
            source: source.clone(),
            initial_yaw,
        });
        self.ready = false;
        Some(PendingSwap {
            token,
            source,
            load,
        })
    }

    pub fn complete_swap(
        &mut self,
        token: SwapToken,
        result: Result<E::Panorama, ViewerError>,
    ) -> SwapOutcome {
        let Some(engine) = self.engine.as_mut() else {
            return SwapOutcome::Unmounted;
        };
        let ticket = match &self.latest {
            Some(ticket) if ticket.token == token => ticket.clone(),
            _ => {
                log::debug!("[session] dropping stale swap #{}", token.value());
                return SwapOutcome::Stale;
            }
        };
        self.latest = None;
        match result {
            Ok(panorama) => {
                engine.set_panorama(panorama);
                engine.rotate(SphericalPosition::from_degrees(ticket.initial_yaw, 0.0));
                self.current_source = Some(ticket.source);
                self.ready = true;
                log::info!("[session] swap #{} applied", token.value());
                SwapOutcome::Applied
            }
            Err(e) => {
                log::warn!("[session] swap #{} failed: {}", token.value(), e);
                // the previous panorama, if any, is still on stage
                self.ready = self.current_source.is_some();
                SwapOutcome::Failed
            }
        }
    }

    /// Dispose the engine. Safe to call repeatedly or when creation never
    /// completed.
    pub fn teardown(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.dispose();
            log::info!("[session] engine disposed");
        }
        self.latest = None;
        self.ready = false;
        self.current_source = None;
    }
}

impl<E: ViewerEngine> Drop for PanoramaSession<E> {
    fn drop(&mut self) {
        self.teardown();
    }
}

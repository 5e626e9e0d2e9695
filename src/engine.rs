//! Contract of the panorama engine owned by a session.
//!
//! An engine is bound to one container for its whole life. It is created,
//! fed panoramas and markers, and disposed by exactly one `PanoramaSession`;
//! nothing else holds a handle to it.

use crate::config::ViewerOptions;
use crate::coords::SphericalPosition;
use crate::error::ViewerError;
use crate::marker::MarkerConfig;
use std::future::Future;

/// Events the engine reports back to its owner.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewerEvent {
    /// A marker overlay was clicked; carries the marker id.
    MarkerSelected(String),
    /// Empty sphere surface was clicked at this direction.
    Click(SphericalPosition),
}

pub type EventHandler = Box<dyn FnMut(ViewerEvent)>;

pub trait ViewerEngine: Sized {
    type Container;
    /// A fetched panorama ready to be shown.
    type Panorama;
    type LoadFuture: Future<Output = Result<Self::Panorama, ViewerError>> + 'static;

    fn create(container: &Self::Container, options: &ViewerOptions) -> Result<Self, ViewerError>;

    /// Start fetching a panorama. `""` must resolve to a blank stage.
    fn load_panorama(&self, source: &str) -> Self::LoadFuture;

    fn set_panorama(&mut self, panorama: Self::Panorama);

    fn rotate(&mut self, position: SphericalPosition);

    fn clear_markers(&mut self);

    fn add_marker(&mut self, marker: MarkerConfig);

    fn remove_marker(&mut self, id: &str);

    fn set_event_handler(&mut self, handler: EventHandler);

    fn dispose(&mut self);
}

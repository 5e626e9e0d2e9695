use thiserror::Error;

/// Failures surfaced by the viewer core.
///
/// None of these are shown to the operator: callers log them and keep the
/// last good visual state.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("container `{0}` not found")]
    MissingContainer(String),

    #[error("viewer engine error: {0}")]
    Engine(String),

    #[error("failed to load panorama `{source_url}`: {reason}")]
    PanoramaLoad { source_url: String, reason: String },

    #[error("invalid page data: {0}")]
    InvalidData(#[from] serde_json::Error),
}

impl ViewerError {
    pub fn load(source_url: &str, reason: impl Into<String>) -> Self {
        Self::PanoramaLoad {
            source_url: source_url.to_string(),
            reason: reason.into(),
        }
    }
}

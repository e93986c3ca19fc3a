use thiserror::Error;

/// Failures surfaced by a drawing surface or its binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// No element matched the surface identifier.
    #[error("no surface element with id `{0}`")]
    NotFound(String),

    /// The element exists but cannot host a 2D context.
    #[error("element `{0}` is not a canvas")]
    NotACanvas(String),

    #[error("2d rendering context unavailable")]
    NoContext,

    /// Running outside a browser window (no DOM, no scheduler).
    #[error("no global window")]
    NoWindow,

    /// An input listener could not be attached.
    #[error("failed to register `{0}` listener")]
    Listener(String),

    /// The platform refused to schedule the next frame.
    #[error("frame request failed: {0}")]
    Schedule(String),

    #[error("image encoding failed: {0}")]
    Encode(String),

    #[error("invalid context options: {0}")]
    InvalidOptions(String),
}

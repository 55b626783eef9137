//! Error types for the surface overlay.
//!
//! None of these are fatal: an unsupported device or a failed session
//! leaves the surface set empty and the app running.

use thiserror::Error;

/// Result type alias for overlay operations
pub type Result<T> = std::result::Result<T, OverlayError>;

#[derive(Error, Debug)]
pub enum OverlayError {
    /// Plane tracking is unavailable on this device
    #[error("plane tracking is not supported on this device")]
    Unsupported,

    /// The session ran but plane tracking was not granted
    #[error("plane tracking was not authorised for this session")]
    NotAuthorized,

    /// The tracking session could not be started
    #[error("tracking session failed to start: {0}")]
    SessionStart(String),

    /// Overlay configuration could not be parsed
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

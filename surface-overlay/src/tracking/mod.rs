//! Boundary to the spatial tracking subsystem.
//!
//! A provider delivers plane anchors as an ordered stream of
//! `Added` / `Updated` / `Removed` updates. The session resource owns the
//! consuming end; the surfaces module applies what it pulls.
//!
//! ```text
//! platform callbacks ──> AnchorUpdateSender ──mpsc──> AnchorUpdateStream
//!                                                        │
//!                              SurfaceDetection (Resource) ┘
//! ```
//!
//! An unsupported device or a failed start leaves the session without a
//! stream. Nothing is retried and nothing panics; the surface set simply
//! stays empty.

/// Anchor identifiers, snapshots and lifecycle updates.
pub mod anchor;

/// Requested plane alignment and classification filter.
pub mod config;

/// Provider trait and the anchor update channel.
pub mod provider;

/// Session lifecycle: start, stop, and start/stop requests.
pub mod session;

/// Timeline-replaying provider for running without device tracking.
pub mod simulated;

//! Runtime systems for user interaction and diagnostics.

/// Space bar toggles plane detection on and off.
pub mod detection_toggle;

/// Native UI overlay showing detection status and surface count.
pub mod status_overlay;

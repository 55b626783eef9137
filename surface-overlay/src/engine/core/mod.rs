//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, state transitions
//! and plugin initialisation.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the overlay plugin, config asset loading and
/// runtime controls.
pub mod app_setup;

/// Application state machine from config loading to runtime.
pub mod app_state;

/// Primary window configuration.
pub mod window_config;

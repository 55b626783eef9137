//! Startup loading of the overlay configuration.

/// Overlay config loading, resource installation and detection start.
///
/// Falls back to built-in defaults when the config file is missing or invalid.
pub mod config_loader;

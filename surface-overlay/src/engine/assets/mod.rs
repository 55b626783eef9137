//! Loadable configuration assets.

/// JSON overlay configuration: detection filter, style and simulation.
pub mod overlay_config;

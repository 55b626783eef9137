//! Shared tunables for the surface overlay.

pub mod class;
pub mod surface;

//! Desktop host for the surface overlay: window, config loading, scene and
//! runtime controls around [`SurfaceOverlayPlugin`](crate::surfaces::SurfaceOverlayPlugin).

pub mod assets;
pub mod core;
pub mod loading;
pub mod scene;
pub mod systems;

//! Static scene: lighting, camera and a floor for spatial reference.

pub mod setup;

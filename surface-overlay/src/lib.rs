pub mod engine;
pub mod error;
pub mod surfaces;
pub mod tracking;

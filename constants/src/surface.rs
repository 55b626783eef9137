/// A surface mesh is rebuilt once either extent (metres) has changed by
/// more than this. Smaller or equal differences only refresh the transform.
pub const SURFACE_SIZE_TOLERANCE: f32 = 0.02;

/// Overlay colour (sRGB) for detected surfaces
pub const SURFACE_COLOUR: [f32; 3] = [0.0, 0.0, 1.0];

/// Overlay opacity for detected surfaces
pub const SURFACE_ALPHA: f32 = 0.3;

/// Extent used for simulated anchors before any size refinement
pub const DEFAULT_SURFACE_EXTENT: f32 = 0.3;

/// Smallest plane side (metres) that gets a surface
pub const DEFAULT_MINIMUM_BOUNDS: f32 = 0.2;

/// Upper bound on anchor updates applied in a single frame.
/// Remaining updates stay queued, in order, for the next frame.
pub const MAX_UPDATES_PER_FRAME: usize = 256;

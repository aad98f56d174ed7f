//! Run parameters and the fixed scene built from them.

/// Quads, lights, camera and the per-pass draw lists.
pub mod geometry;
/// JSON-facing run parameters.
pub mod model;
/// Seeded parameter sampling for batch runs.
pub mod sampler;

//! Pixel effects applied to finished renders.

/// Grayscale-masked blend of the shader-lit and textured passes.
pub mod composite;

//! Rendering backends.

/// Rendering-context trait and scoped handle.
pub mod backend;
/// CPU software rasterizer.
pub mod cpu;
pub(crate) mod shading;

//! Output image encoding.

/// PNG writer for rendered and composited frames.
pub mod png;

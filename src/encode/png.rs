use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::FrameRgb8;
use crate::foundation::error::{TabletopError, TabletopResult};

/// Create the parent directory of `path` if it does not exist.
pub fn ensure_parent_dir(path: &Path) -> TabletopResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Write a frame as an 8-bit RGB PNG, normalizing its channel order first.
#[tracing::instrument(skip(frame), fields(width = frame.width, height = frame.height))]
pub fn write_png(path: &Path, frame: &FrameRgb8) -> TabletopResult<()> {
    ensure_parent_dir(path)?;
    let rgb = frame.rgb_bytes();
    image::save_buffer_with_format(
        path,
        &rgb,
        frame.width,
        frame.height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .map_err(|e| TabletopError::codec(format!("write png '{}': {e}", path.display())))?;
    tracing::info!(path = %path.display(), "wrote image");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;

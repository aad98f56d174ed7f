use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::{ChannelOrder, FrameRgb8};
use crate::foundation::error::{TabletopError, TabletopResult};

/// A decoded input image, kept as straight-alpha RGBA8 for texture sampling.
///
/// Row 0 is the first row stored in the file (the visual top), which the rasterizer maps to
/// texture coordinate `t = 0`.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels (columns).
    pub width: u32,
    /// Height in pixels (rows).
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub rgba8: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// `rows / cols`, the factor the scene uses to keep the photo's aspect.
    pub fn rows_per_col(&self) -> f64 {
        f64::from(self.height) / f64::from(self.width)
    }

    /// RGBA texel at `(x, y)`.
    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.rgba8[i],
            self.rgba8[i + 1],
            self.rgba8[i + 2],
            self.rgba8[i + 3],
        ]
    }
}

/// Decode encoded image bytes into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> TabletopResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(TabletopError::config("image has zero width or height"));
    }

    Ok(PreparedImage {
        width,
        height,
        rgba8: Arc::new(rgba.into_raw()),
    })
}

/// Read and decode an input image from disk.
///
/// A missing or unreadable file is a configuration error; undecodable bytes are a codec error.
pub fn load_image(path: &Path) -> TabletopResult<PreparedImage> {
    let bytes = std::fs::read(path).map_err(|e| {
        TabletopError::config(format!("failed to read image '{}': {e}", path.display()))
    })?;
    decode_image(&bytes).map_err(|e| match e {
        TabletopError::Other(inner) => TabletopError::codec(format!(
            "failed to decode image '{}': {inner:#}",
            path.display()
        )),
        other => other,
    })
}

/// Read an image from disk as an RGB frame, discarding alpha.
pub fn load_frame_rgb8(path: &Path) -> TabletopResult<FrameRgb8> {
    let prepared = load_image(path)?;
    let mut data = Vec::with_capacity(prepared.width as usize * prepared.height as usize * 3);
    for px in prepared.rgba8.chunks_exact(4) {
        data.extend_from_slice(&px[..3]);
    }
    FrameRgb8::new(prepared.width, prepared.height, data, ChannelOrder::Rgb)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;

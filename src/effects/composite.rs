//! Grayscale-masked blend of the two render passes.
//!
//! With `gray` the luma of the shader-lit pixel `a` and `b` the textured pixel:
//!
//! ```text
//! out[c] = quantize(b[c] * gray / 255 * masked + a[c] * base)
//! ```
//!
//! All arithmetic is `f64` and evaluated in exactly that order so results are reproducible
//! bit for bit.

use crate::foundation::core::{ChannelOrder, FrameRgb8};
use crate::foundation::error::{TabletopError, TabletopResult};

/// Per-channel luma coefficients, addressed by channel name rather than byte position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LumaWeights {
    /// Red coefficient.
    pub r: f64,
    /// Green coefficient.
    pub g: f64,
    /// Blue coefficient.
    pub b: f64,
}

impl LumaWeights {
    /// ITU-R BT.601 luma.
    pub const BT601: Self = Self {
        r: 0.299,
        g: 0.587,
        b: 0.114,
    };

    /// Weighted sum of one `[r, g, b]` pixel. Unclamped.
    pub fn luma(self, rgb: [u8; 3]) -> f64 {
        self.r * f64::from(rgb[0]) + self.g * f64::from(rgb[1]) + self.b * f64::from(rgb[2])
    }
}

impl Default for LumaWeights {
    fn default() -> Self {
        Self::BT601
    }
}

/// Weights of the two blend terms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlendWeights {
    /// Weight of the gray-masked textured pixel.
    pub masked: f64,
    /// Weight of the shader-lit pixel.
    pub base: f64,
}

impl BlendWeights {
    /// 90% masked texture, 10% shader-lit render.
    pub const DEFAULT: Self = Self {
        masked: 0.9,
        base: 0.1,
    };
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Float-to-8-bit conversion applied to blended values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Quantize {
    /// Truncate toward zero (`45.9 -> 45`).
    #[default]
    Truncate,
    /// Round half away from zero (`45.5 -> 46`).
    RoundNearest,
}

impl Quantize {
    /// Quantize then clamp into `0..=255`.
    pub fn apply(self, v: f64) -> u8 {
        let q = match self {
            Self::Truncate => v.trunc(),
            Self::RoundNearest => v.round(),
        };
        q.clamp(0.0, 255.0) as u8
    }
}

/// Compositor settings.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CompositeOpts {
    /// Luma coefficients for the mask.
    pub luma: LumaWeights,
    /// Blend term weights.
    pub blend: BlendWeights,
    /// Final quantization.
    pub quantize: Quantize,
}

/// Per-pixel grayscale field, row-major, unclamped.
#[derive(Clone, Debug, PartialEq)]
pub struct GrayMap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height` luma values.
    pub values: Vec<f64>,
}

impl GrayMap {
    /// Value at `(x, y)`.
    pub fn at(&self, x: u32, y: u32) -> f64 {
        self.values[y as usize * self.width as usize + x as usize]
    }
}

/// Luma of every pixel, honoring the frame's channel order.
pub fn grayscale(image: &FrameRgb8, luma: LumaWeights) -> GrayMap {
    let [ri, gi, bi] = image.order.rgb_offsets();
    let values = image
        .data
        .chunks_exact(3)
        .map(|px| luma.luma([px[ri], px[gi], px[bi]]))
        .collect();
    GrayMap {
        width: image.width,
        height: image.height,
        values,
    }
}

/// Blend one pixel pair given the luma of the shader-lit pixel.
pub fn blend_px(base: [u8; 3], textured: [u8; 3], gray: f64, opts: &CompositeOpts) -> [u8; 3] {
    let mut out = [0u8; 3];
    for c in 0..3 {
        let masked = f64::from(textured[c]) * gray / 255.0;
        let blended = masked * opts.blend.masked + f64::from(base[c]) * opts.blend.base;
        out[c] = opts.quantize.apply(blended);
    }
    out
}

/// Composite with the default weights and truncation.
pub fn composite(image1: &FrameRgb8, image2: &FrameRgb8) -> TabletopResult<FrameRgb8> {
    composite_with(image1, image2, &CompositeOpts::default())
}

/// Composite the shader-lit `image1` with the textured `image2`.
///
/// Both inputs are normalized to RGB first; the output is RGB.
#[tracing::instrument(skip_all, fields(width = image1.width, height = image1.height))]
pub fn composite_with(
    image1: &FrameRgb8,
    image2: &FrameRgb8,
    opts: &CompositeOpts,
) -> TabletopResult<FrameRgb8> {
    if image1.dimensions() != image2.dimensions() {
        return Err(TabletopError::dimension(
            image1.dimensions(),
            image2.dimensions(),
        ));
    }

    let base = image1.rgb_bytes();
    let textured = image2.rgb_bytes();
    let mut out = vec![0u8; base.len()];
    composite_rgb8_into(&mut out, &base, &textured, opts)?;
    FrameRgb8::new(image1.width, image1.height, out, ChannelOrder::Rgb)
}

/// Buffer-level compositor over packed RGB8 slices of equal length.
///
/// Buffers are treated as single-row strips: a length mismatch is reported as a
/// [`TabletopError::Dimension`] of `(pixels, 1)` against `dst`.
pub fn composite_rgb8_into(
    dst: &mut [u8],
    base_rgb: &[u8],
    textured_rgb: &[u8],
    opts: &CompositeOpts,
) -> TabletopResult<()> {
    for len in [dst.len(), base_rgb.len(), textured_rgb.len()] {
        if !len.is_multiple_of(3) {
            return Err(TabletopError::config(format!(
                "rgb8 buffer length {len} is not a multiple of 3"
            )));
        }
    }
    for other in [base_rgb.len(), textured_rgb.len()] {
        if other != dst.len() {
            return Err(TabletopError::dimension(
                (strip_width(dst.len()), 1),
                (strip_width(other), 1),
            ));
        }
    }
    for ((d, a), b) in dst
        .chunks_exact_mut(3)
        .zip(base_rgb.chunks_exact(3))
        .zip(textured_rgb.chunks_exact(3))
    {
        let a = [a[0], a[1], a[2]];
        let gray = opts.luma.luma(a);
        d.copy_from_slice(&blend_px(a, [b[0], b[1], b[2]], gray, opts));
    }
    Ok(())
}

fn strip_width(len: usize) -> u32 {
    u32::try_from(len / 3).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;

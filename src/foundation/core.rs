use std::borrow::Cow;

use crate::foundation::error::{TabletopError, TabletopResult};

/// Framebuffer dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Square canvas with `edge` pixels per side.
    pub fn square(edge: u32) -> Self {
        Self {
            width: edge,
            height: edge,
        }
    }

    /// Number of pixels covered by the canvas.
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Byte length of a tightly packed 3-channel 8-bit buffer, checked for overflow.
    pub fn rgb8_len(self) -> TabletopResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(3))
            .ok_or_else(|| TabletopError::config("canvas byte size overflow"))
    }
}

/// Order of the three channels inside one packed pixel.
///
/// Renders and the file codec disagree about this, so every [`FrameRgb8`] carries its order
/// and consumers normalize at the boundary instead of guessing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelOrder {
    /// Red, green, blue.
    #[default]
    Rgb,
    /// Blue, green, red.
    Bgr,
}

impl ChannelOrder {
    /// Byte offsets of `(red, green, blue)` within a pixel.
    pub fn rgb_offsets(self) -> [usize; 3] {
        match self {
            Self::Rgb => [0, 1, 2],
            Self::Bgr => [2, 1, 0],
        }
    }
}

/// A 3-channel 8-bit image, row-major and tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgb8 {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// `width * height * 3` bytes.
    pub data: Vec<u8>,
    /// Channel order of `data`.
    pub order: ChannelOrder,
}

impl FrameRgb8 {
    /// Wrap a pixel buffer, checking that its length matches the dimensions.
    pub fn new(
        width: u32,
        height: u32,
        data: Vec<u8>,
        order: ChannelOrder,
    ) -> TabletopResult<Self> {
        let expected = Canvas { width, height }.rgb8_len()?;
        if data.len() != expected {
            return Err(TabletopError::config(format!(
                "frame buffer for {width}x{height} must be {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
            order,
        })
    }

    /// A frame where every pixel is the given `[r, g, b]` color.
    pub fn filled(canvas: Canvas, rgb: [u8; 3], order: ChannelOrder) -> Self {
        let [ri, gi, bi] = order.rgb_offsets();
        let mut px = [0u8; 3];
        px[ri] = rgb[0];
        px[gi] = rgb[1];
        px[bi] = rgb[2];
        Self {
            width: canvas.width,
            height: canvas.height,
            data: px.repeat(canvas.pixel_count()),
            order,
        }
    }

    /// `(width, height)` pair.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Canvas with this frame's dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Pixel at `(x, y)` as `[r, g, b]` regardless of storage order.
    pub fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * 3;
        let [ri, gi, bi] = self.order.rgb_offsets();
        [self.data[i + ri], self.data[i + gi], self.data[i + bi]]
    }

    /// Pixel bytes in RGB order; borrows when already RGB.
    pub fn rgb_bytes(&self) -> Cow<'_, [u8]> {
        match self.order {
            ChannelOrder::Rgb => Cow::Borrowed(&self.data),
            ChannelOrder::Bgr => {
                let mut out = self.data.clone();
                for px in out.chunks_exact_mut(3) {
                    px.swap(0, 2);
                }
                Cow::Owned(out)
            }
        }
    }

    /// Convert into RGB storage order.
    pub fn into_rgb(self) -> Self {
        match self.order {
            ChannelOrder::Rgb => self,
            ChannelOrder::Bgr => {
                let mut data = self.data;
                for px in data.chunks_exact_mut(3) {
                    px.swap(0, 2);
                }
                Self {
                    data,
                    order: ChannelOrder::Rgb,
                    ..self
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

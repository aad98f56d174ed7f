use crate::foundation::core::{Canvas, FrameRgb8};
use crate::foundation::error::{TabletopError, TabletopResult};
use crate::scene::geometry::ScenePass;
use crate::scene::model::RenderThreading;

/// A rasterizer that turns a [`ScenePass`] into a full-frame pixel buffer.
///
/// Backends are driven through a [`RenderContext`], which guarantees `open` and `close` are
/// paired. Implementations should report `render` calls outside an open context as
/// [`TabletopError::Backend`].
pub trait RenderBackend {
    /// Acquire resources for a framebuffer of the given size.
    fn open(&mut self, canvas: Canvas) -> TabletopResult<()>;

    /// Clear the framebuffer, draw `pass`, and read the pixels back.
    fn render(&mut self, pass: &ScenePass) -> TabletopResult<FrameRgb8>;

    /// Release resources acquired by `open`.
    fn close(&mut self);
}

/// An explicitly owned, open rendering context.
///
/// Acquiring opens the backend; releasing (or dropping) closes it exactly once.
pub struct RenderContext<'a> {
    backend: &'a mut dyn RenderBackend,
    canvas: Canvas,
    open: bool,
}

impl<'a> RenderContext<'a> {
    /// Open `backend` for `canvas`.
    pub fn acquire(backend: &'a mut dyn RenderBackend, canvas: Canvas) -> TabletopResult<Self> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(TabletopError::config("render canvas must be non-empty"));
        }
        backend.open(canvas)?;
        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            "render context acquired"
        );
        Ok(Self {
            backend,
            canvas,
            open: true,
        })
    }

    /// Framebuffer size of this context.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Render one pass; the result always matches the context's canvas.
    pub fn render_pass(&mut self, pass: &ScenePass) -> TabletopResult<FrameRgb8> {
        let frame = self.backend.render(pass)?;
        let expected = (self.canvas.width, self.canvas.height);
        if frame.dimensions() != expected {
            return Err(TabletopError::dimension(expected, frame.dimensions()));
        }
        Ok(frame)
    }

    /// Close the context.
    pub fn release(mut self) {
        self.close_once();
    }

    fn close_once(&mut self) {
        if self.open {
            self.open = false;
            self.backend.close();
            tracing::debug!("render context released");
        }
    }
}

impl Drop for RenderContext<'_> {
    fn drop(&mut self) {
        self.close_once();
    }
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// Software rasterizer.
    #[default]
    Cpu,
}

/// Create a rendering backend implementation.
pub fn create_backend(
    kind: BackendKind,
    threading: &RenderThreading,
) -> TabletopResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(
            threading.clone(),
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;

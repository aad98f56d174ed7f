//! Tabletop renders a photographed subject lying on a textured table.
//!
//! One run produces three images of the same size:
//!
//! 1. **Shader pass** (`image1`): the table and subject lit by a movable lamp with per-pixel
//!    Phong shading, untextured.
//! 2. **Textured pass** (`image2`): the same geometry textured with the table and subject
//!    photos under a warm fixed-function room light.
//! 3. **Composite** (`image3`): the textured pass masked by the luma of the shader pass and
//!    blended back over it, see [`composite`].
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical inputs and parameters produce identical pixels; batch runs are
//!   reproducible from their seed.
//! - **Backend seam**: rendering goes through [`RenderBackend`]; the built-in [`CpuBackend`] is a
//!   software rasterizer.
//!
//! # Getting started
//!
//! ```no_run
//! use tabletop::{BackendKind, SceneParams, create_backend, process};
//!
//! let params = SceneParams::from_path("scene.json")?;
//! let mut backend = create_backend(BackendKind::Cpu, &params.threading)?;
//! let report = process(&params, backend.as_mut())?;
//! println!("wrote {}", report.composite.display());
//! # Ok::<(), tabletop::TabletopError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod effects;
mod encode;
mod foundation;
mod pipeline;
mod render;
mod scene;

pub use assets::decode::{PreparedImage, decode_image, load_frame_rgb8, load_image};
pub use effects::composite::{
    BlendWeights, CompositeOpts, GrayMap, LumaWeights, Quantize, blend_px, composite,
    composite_rgb8_into, composite_with, grayscale,
};
pub use encode::png::{ensure_parent_dir, write_png};
pub use foundation::core::{Canvas, ChannelOrder, FrameRgb8};
pub use foundation::error::{TabletopError, TabletopResult};
pub use foundation::math::{Mat4, Vec3, Vec4};
pub use pipeline::{BatchPlan, ProcessReport, batch_output_names, process, run_batch};
pub use render::backend::{BackendKind, RenderBackend, RenderContext, create_backend};
pub use render::cpu::CpuBackend;
pub use scene::geometry::{
    Camera, LightSource, Material, PassKind, Quad, Scene, ScenePass, Surface,
};
pub use scene::model::{RenderThreading, SceneParams};
pub use scene::sampler::{LAMP_OFFSET_RANGE, ParamSampler, ROTATION_RANGE_DEG};

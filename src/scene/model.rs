use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::foundation::core::Canvas;
use crate::foundation::error::{TabletopError, TabletopResult};

/// Row-parallelism controls for the CPU rasterizer.
///
/// Output is identical with and without parallelism; only wall time changes.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderThreading {
    /// Rasterize framebuffer rows on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

/// Parameters for one compositing run.
///
/// This is the JSON-facing configuration; every field has a default so partial files are
/// accepted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneParams {
    /// Iteration index. Only batch runs use it, for output naming.
    pub iteration: u32,
    /// Foreground photo placed on the table.
    pub subject: PathBuf,
    /// Background image used as the table surface.
    pub background: PathBuf,
    /// Rotation about the X axis in degrees.
    pub rotate_x_deg: f64,
    /// Rotation about the Y axis in degrees.
    pub rotate_y_deg: f64,
    /// Rotation about the Z axis in degrees.
    pub rotate_z_deg: f64,
    /// Lamp X offset from the base lamp position.
    pub lamp_x: f64,
    /// Lamp Y offset from the base lamp position.
    pub lamp_y: f64,
    /// Edge length of the square framebuffer in pixels.
    pub resolution: u32,
    /// Directory receiving all output files.
    pub out_dir: PathBuf,
    /// File name of the shader-lit, untextured render.
    pub shader_pass_name: String,
    /// File name of the fixed-function-lit, textured render.
    pub textured_pass_name: String,
    /// File name of the final composite.
    pub composite_name: String,
    /// Rasterizer threading.
    pub threading: RenderThreading,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            iteration: 0,
            subject: PathBuf::from("1.png"),
            background: PathBuf::from("table.png"),
            rotate_x_deg: 5.0,
            rotate_y_deg: 5.0,
            rotate_z_deg: 5.0,
            lamp_x: 0.5,
            lamp_y: 0.5,
            resolution: 4000,
            out_dir: PathBuf::from("."),
            shader_pass_name: "image1.png".to_string(),
            textured_pass_name: "image2.png".to_string(),
            composite_name: "image3.png".to_string(),
            threading: RenderThreading::default(),
        }
    }
}

impl SceneParams {
    /// Parse parameters from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> TabletopResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| TabletopError::config(format!("parse scene params JSON: {e}")))
    }

    /// Parse parameters from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> TabletopResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            TabletopError::config(format!("open scene params JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check the invariants the renderer relies on.
    pub fn validate(&self) -> TabletopResult<()> {
        if self.resolution == 0 {
            return Err(TabletopError::config("resolution must be > 0"));
        }
        for (name, v) in [
            ("rotate_x_deg", self.rotate_x_deg),
            ("rotate_y_deg", self.rotate_y_deg),
            ("rotate_z_deg", self.rotate_z_deg),
            ("lamp_x", self.lamp_x),
            ("lamp_y", self.lamp_y),
        ] {
            if !v.is_finite() {
                return Err(TabletopError::config(format!("{name} must be finite")));
            }
        }
        for (name, v) in [
            ("shader_pass_name", &self.shader_pass_name),
            ("textured_pass_name", &self.textured_pass_name),
            ("composite_name", &self.composite_name),
        ] {
            if v.trim().is_empty() {
                return Err(TabletopError::config(format!("{name} must not be empty")));
            }
        }
        if self.subject.as_os_str().is_empty() || self.background.as_os_str().is_empty() {
            return Err(TabletopError::config("input image paths must not be empty"));
        }
        if let Some(n) = self.threading.threads
            && n == 0
        {
            return Err(TabletopError::config(
                "threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }

    /// Framebuffer size for both render passes.
    pub fn canvas(&self) -> Canvas {
        Canvas::square(self.resolution)
    }

    /// Output path of the shader-lit render.
    pub fn shader_pass_path(&self) -> PathBuf {
        self.out_dir.join(&self.shader_pass_name)
    }

    /// Output path of the textured render.
    pub fn textured_pass_path(&self) -> PathBuf {
        self.out_dir.join(&self.textured_pass_name)
    }

    /// Output path of the composite.
    pub fn composite_path(&self) -> PathBuf {
        self.out_dir.join(&self.composite_name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;

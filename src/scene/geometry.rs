//! Fixed scene configuration: two textured rectangles, a camera, and the two light setups.

use std::sync::Arc;

use crate::assets::decode::PreparedImage;
use crate::foundation::math::{Mat4, Vec3, Vec4};
use crate::scene::model::SceneParams;

/// Texture coordinates of the four quad corners, in vertex order.
pub const QUAD_TEX_COORDS: [[f64; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];

/// Half-width of the table quad in world units.
pub const TABLE_HALF_WIDTH: f64 = 4.0;
/// Depth of the table plane, just behind the subject.
pub const TABLE_Z: f64 = -0.01;
/// Half-width of the subject quad in world units.
pub const SUBJECT_HALF_WIDTH: f64 = 1.0;

/// Specular exponent scale applied by the lamp shader (`0.3 * shininess`).
pub const SHADER_SHININESS_SCALE: f64 = 0.3;

/// Global ambient term of the fixed-function light model.
pub const GLOBAL_AMBIENT: [f64; 3] = [0.2, 0.2, 0.2];

/// A flat rectangle with one normal and per-corner texture coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Quad {
    /// Corners in object space: `(-a,-b)`, `(-a,b)`, `(a,b)`, `(a,-b)`.
    pub vertices: [Vec3; 4],
    /// Object-space face normal.
    pub normal: Vec3,
    /// Texture coordinates per corner.
    pub tex_coords: [[f64; 2]; 4],
}

impl Quad {
    /// Axis-aligned rectangle centered on the Z axis at depth `z`.
    pub fn centered(half_width: f64, half_height: f64, z: f64) -> Self {
        Self {
            vertices: [
                Vec3::new(-half_width, -half_height, z),
                Vec3::new(-half_width, half_height, z),
                Vec3::new(half_width, half_height, z),
                Vec3::new(half_width, -half_height, z),
            ],
            normal: Vec3::new(0.0, 0.0, 1.0),
            tex_coords: QUAD_TEX_COORDS,
        }
    }

    /// Table rectangle sized to the background image's aspect.
    pub fn table(image: &PreparedImage) -> Self {
        Self::centered(
            TABLE_HALF_WIDTH,
            TABLE_HALF_WIDTH * image.rows_per_col(),
            TABLE_Z,
        )
    }

    /// Subject rectangle sized to the photo's aspect.
    pub fn subject(image: &PreparedImage) -> Self {
        Self::centered(SUBJECT_HALF_WIDTH, SUBJECT_HALF_WIDTH * image.rows_per_col(), 0.0)
    }

    /// Corner indices of the two triangles covering the quad.
    pub fn triangles() -> [[usize; 3]; 2] {
        [[0, 1, 2], [0, 2, 3]]
    }
}

/// Surface reflectance parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Specular exponent as given to the material (before shader scaling).
    pub shininess: f64,
}

impl Material {
    /// Matte table surface.
    pub const TABLE: Self = Self { shininess: 5.0 };
    /// Glossy photo surface.
    pub const SUBJECT: Self = Self { shininess: 128.0 };
}

/// A positional light. `position` is in object space and moves with the model-view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSource {
    /// Homogeneous object-space position.
    pub position: Vec4,
    /// Ambient intensity per RGB channel.
    pub ambient: [f64; 3],
    /// Diffuse intensity per RGB channel.
    pub diffuse: [f64; 3],
    /// Specular intensity per RGB channel.
    pub specular: [f64; 3],
}

impl LightSource {
    /// White lamp hovering over the table, offset by `(lamp_x, lamp_y)`.
    pub fn lamp(lamp_x: f64, lamp_y: f64) -> Self {
        Self {
            position: Vec4::new(lamp_x, lamp_y, 1.0, 1.0),
            ambient: [0.0; 3],
            diffuse: [1.0; 3],
            specular: [1.0; 3],
        }
    }

    /// Warm room light in front of the scene.
    pub fn room() -> Self {
        Self {
            position: Vec4::new(0.0, 0.0, 3.0, 1.0),
            ambient: [0.0; 3],
            diffuse: [1.0, 225.0 / 255.0, 195.0 / 255.0],
            specular: [1.0; 3],
        }
    }
}

/// Pinhole camera at the origin looking down `-Z`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fovy_deg: f64,
    /// Near clip distance.
    pub near: f64,
    /// Far clip distance.
    pub far: f64,
    /// Distance from the camera to the scene origin.
    pub distance: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fovy_deg: 45.0,
            near: 0.1,
            far: 50.0,
            distance: 5.0,
        }
    }
}

impl Camera {
    /// Projection for a framebuffer with the given aspect ratio.
    pub fn projection(&self, aspect: f64) -> Mat4 {
        Mat4::perspective(self.fovy_deg, aspect, self.near, self.far)
    }

    /// Model-view: view, push the scene back, then rotate about Z, X and Y (in that call order).
    pub fn model_view(&self, rotate_x_deg: f64, rotate_y_deg: f64, rotate_z_deg: f64) -> Mat4 {
        let view = Mat4::look_at(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        view * Mat4::translation(0.0, 0.0, -self.distance)
            * Mat4::rotation_deg(rotate_z_deg, Vec3::new(0.0, 0.0, 1.0))
            * Mat4::rotation_deg(rotate_x_deg, Vec3::new(1.0, 0.0, 0.0))
            * Mat4::rotation_deg(rotate_y_deg, Vec3::new(0.0, 1.0, 0.0))
    }
}

/// Which lighting path a pass uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassKind {
    /// Per-fragment ambient + diffuse + specular on white, untextured.
    Shaded,
    /// Per-vertex fixed-function lighting modulating the surface textures.
    Textured,
}

/// One drawable rectangle.
#[derive(Clone, Debug)]
pub struct Surface {
    /// Geometry.
    pub quad: Quad,
    /// Reflectance.
    pub material: Material,
    /// Texture; ignored by [`PassKind::Shaded`].
    pub texture: Option<Arc<PreparedImage>>,
}

/// Everything a backend needs to draw one full frame.
#[derive(Clone, Debug)]
pub struct ScenePass {
    /// Lighting path.
    pub kind: PassKind,
    /// Object-to-eye transform.
    pub model_view: Mat4,
    /// Eye-to-clip transform.
    pub projection: Mat4,
    /// The single light.
    pub light: LightSource,
    /// Surfaces in draw order; later surfaces paint over earlier ones.
    pub surfaces: Vec<Surface>,
}

/// The two passes of one run.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Shader-lit, untextured pass.
    pub shaded: ScenePass,
    /// Fixed-function-lit, textured pass.
    pub textured: ScenePass,
}

impl Scene {
    /// Build both passes from run parameters and the decoded inputs.
    pub fn build(params: &SceneParams, background: PreparedImage, subject: PreparedImage) -> Self {
        let camera = Camera::default();
        let canvas = params.canvas();
        let projection = camera.projection(f64::from(canvas.width) / f64::from(canvas.height));
        let model_view =
            camera.model_view(params.rotate_x_deg, params.rotate_y_deg, params.rotate_z_deg);

        let background = Arc::new(background);
        let subject = Arc::new(subject);
        let table = Surface {
            quad: Quad::table(&background),
            material: Material::TABLE,
            texture: Some(background),
        };
        let photo = Surface {
            quad: Quad::subject(&subject),
            material: Material::SUBJECT,
            texture: Some(subject),
        };
        let surfaces = vec![table, photo];

        Self {
            shaded: ScenePass {
                kind: PassKind::Shaded,
                model_view,
                projection,
                light: LightSource::lamp(params.lamp_x, params.lamp_y),
                surfaces: surfaces.clone(),
            },
            textured: ScenePass {
                kind: PassKind::Textured,
                model_view,
                projection,
                light: LightSource::room(),
                surfaces,
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/geometry.rs"]
mod tests;

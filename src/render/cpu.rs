use rayon::prelude::*;

use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Canvas, ChannelOrder, FrameRgb8};
use crate::foundation::error::{TabletopError, TabletopResult};
use crate::foundation::math::{Vec3, Vec4};
use crate::render::backend::RenderBackend;
use crate::render::shading::{
    EyeLight, Rgb, light_vertex, sample_bilinear, shade_fragment, to_unorm8,
};
use crate::scene::geometry::{PassKind, Quad, ScenePass, Surface};
use crate::scene::model::RenderThreading;

/// Software rasterizer reproducing the fixed-function and lamp-shader lighting paths.
///
/// Framebuffer rows are stored in window order: row 0 is the bottom of the viewport, as a
/// bottom-up pixel readback delivers them. There is no depth test; surfaces are painted in
/// order.
pub struct CpuBackend {
    threading: RenderThreading,
    canvas: Option<Canvas>,
    pool: Option<rayon::ThreadPool>,
    color: Vec<u8>,
}

impl CpuBackend {
    /// Create a closed backend.
    pub fn new(threading: RenderThreading) -> Self {
        Self {
            threading,
            canvas: None,
            pool: None,
            color: Vec::new(),
        }
    }
}

impl RenderBackend for CpuBackend {
    fn open(&mut self, canvas: Canvas) -> TabletopResult<()> {
        if self.canvas.is_some() {
            return Err(TabletopError::backend("cpu backend is already open"));
        }
        let len = canvas.rgb8_len()?;
        self.pool = if self.threading.parallel {
            Some(build_thread_pool(self.threading.threads)?)
        } else {
            None
        };
        self.color = vec![0; len];
        self.canvas = Some(canvas);
        Ok(())
    }

    #[tracing::instrument(
        skip(self, pass),
        fields(kind = ?pass.kind, surfaces = pass.surfaces.len())
    )]
    fn render(&mut self, pass: &ScenePass) -> TabletopResult<FrameRgb8> {
        let canvas = self
            .canvas
            .ok_or_else(|| TabletopError::backend("render called without an open context"))?;
        self.color.fill(0);

        let light = eye_light(pass)?;
        for surface in &pass.surfaces {
            draw_surface(
                self.pool.as_ref(),
                canvas,
                &mut self.color,
                pass,
                surface,
                &light,
            )?;
        }

        FrameRgb8::new(
            canvas.width,
            canvas.height,
            self.color.clone(),
            ChannelOrder::Rgb,
        )
    }

    fn close(&mut self) {
        self.canvas = None;
        self.pool = None;
        self.color = Vec::new();
    }
}

fn build_thread_pool(threads: Option<usize>) -> TabletopResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(TabletopError::config(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| TabletopError::backend(format!("failed to build rayon thread pool: {e}")))
}

fn eye_light(pass: &ScenePass) -> TabletopResult<EyeLight> {
    let p = pass.model_view.transform(pass.light.position);
    if p.w.abs() <= f64::EPSILON {
        return Err(TabletopError::backend(
            "directional lights are not supported by the cpu backend",
        ));
    }
    Ok(EyeLight {
        position: p.xyz() * (1.0 / p.w),
        ambient: pass.light.ambient,
        diffuse: pass.light.diffuse,
        specular: pass.light.specular,
    })
}

/// Per-vertex values carried to fragments.
#[derive(Clone, Copy, Debug)]
struct Varying {
    eye: Vec3,
    normal: Vec3,
    uv: [f64; 2],
    color: Rgb,
}

impl Varying {
    fn lerp(&self, o: &Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self {
            eye: self.eye.lerp(o.eye, t),
            normal: self.normal.lerp(o.normal, t),
            uv: [mix(self.uv[0], o.uv[0]), mix(self.uv[1], o.uv[1])],
            color: [
                mix(self.color[0], o.color[0]),
                mix(self.color[1], o.color[1]),
                mix(self.color[2], o.color[2]),
            ],
        }
    }

    fn scaled_sum(parts: [(&Self, f64); 3]) -> Self {
        let mut out = Self {
            eye: Vec3::ZERO,
            normal: Vec3::ZERO,
            uv: [0.0; 2],
            color: [0.0; 3],
        };
        for (v, k) in parts {
            out.eye = out.eye + v.eye * k;
            out.normal = out.normal + v.normal * k;
            for c in 0..2 {
                out.uv[c] += v.uv[c] * k;
            }
            for c in 0..3 {
                out.color[c] += v.color[c] * k;
            }
        }
        out
    }
}

#[derive(Clone, Copy, Debug)]
struct ClipVertex {
    clip: Vec4,
    var: Varying,
}

#[derive(Clone, Copy, Debug)]
struct ScreenVertex {
    x: f64,
    y: f64,
    inv_w: f64,
    var: Varying,
}

enum Fragment<'a> {
    Lamp { light: EyeLight, shininess: f64 },
    Textured { texture: Option<&'a PreparedImage> },
}

impl Fragment<'_> {
    fn shade(&self, v: &Varying) -> [u8; 3] {
        let rgb = match self {
            Self::Lamp { light, shininess } => shade_fragment(v.normal, v.eye, light, *shininess),
            Self::Textured { texture } => {
                let texel = match texture {
                    Some(tex) => sample_bilinear(tex, v.uv[0], v.uv[1]),
                    None => [1.0; 3],
                };
                [
                    v.color[0] * texel[0],
                    v.color[1] * texel[1],
                    v.color[2] * texel[2],
                ]
            }
        };
        [to_unorm8(rgb[0]), to_unorm8(rgb[1]), to_unorm8(rgb[2])]
    }
}

fn draw_surface(
    pool: Option<&rayon::ThreadPool>,
    canvas: Canvas,
    color: &mut [u8],
    pass: &ScenePass,
    surface: &Surface,
    light: &EyeLight,
) -> TabletopResult<()> {
    let quad: &Quad = &surface.quad;
    let normal = pass
        .model_view
        .transform_normal(quad.normal)
        .ok_or_else(|| TabletopError::backend("model-view matrix is singular"))?;

    let corners: [ClipVertex; 4] = std::array::from_fn(|i| {
        let eye = pass.model_view.transform_point(quad.vertices[i]);
        let vertex_color = match pass.kind {
            PassKind::Shaded => [1.0; 3],
            PassKind::Textured => light_vertex(normal, eye, light),
        };
        ClipVertex {
            clip: pass.projection.transform(eye.extend(1.0)),
            var: Varying {
                eye,
                normal,
                uv: quad.tex_coords[i],
                color: vertex_color,
            },
        }
    });

    let fragment = match pass.kind {
        PassKind::Shaded => Fragment::Lamp {
            light: *light,
            shininess: surface.material.shininess,
        },
        PassKind::Textured => Fragment::Textured {
            texture: surface.texture.as_deref(),
        },
    };

    for [a, b, c] in Quad::triangles() {
        let poly = clip_polygon(vec![corners[a], corners[b], corners[c]]);
        if poly.len() < 3 {
            continue;
        }
        let screen: Vec<ScreenVertex> = poly.iter().map(|v| to_screen(v, canvas)).collect();
        for k in 1..screen.len() - 1 {
            raster_triangle(
                pool,
                canvas,
                color,
                [screen[0], screen[k], screen[k + 1]],
                &fragment,
            );
        }
    }
    Ok(())
}

/// Clip against the near (`z >= -w`) and far (`z <= w`) planes.
fn clip_polygon(poly: Vec<ClipVertex>) -> Vec<ClipVertex> {
    let near = clip_against(poly, |v| v.clip.z + v.clip.w);
    clip_against(near, |v| v.clip.w - v.clip.z)
}

fn clip_against(poly: Vec<ClipVertex>, dist: impl Fn(&ClipVertex) -> f64) -> Vec<ClipVertex> {
    let mut out = Vec::with_capacity(poly.len() + 2);
    for (i, cur) in poly.iter().enumerate() {
        let next = &poly[(i + 1) % poly.len()];
        let (dc, dn) = (dist(cur), dist(next));
        if dc >= 0.0 {
            out.push(*cur);
        }
        if (dc >= 0.0) != (dn >= 0.0) {
            let t = dc / (dc - dn);
            out.push(ClipVertex {
                clip: cur.clip.lerp(next.clip, t),
                var: cur.var.lerp(&next.var, t),
            });
        }
    }
    out
}

fn to_screen(v: &ClipVertex, canvas: Canvas) -> ScreenVertex {
    let inv_w = 1.0 / v.clip.w;
    ScreenVertex {
        x: (v.clip.x * inv_w + 1.0) * 0.5 * f64::from(canvas.width),
        y: (v.clip.y * inv_w + 1.0) * 0.5 * f64::from(canvas.height),
        inv_w,
        var: v.var,
    }
}

fn edge(a: &ScreenVertex, b: &ScreenVertex, px: f64, py: f64) -> f64 {
    (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
}

fn raster_triangle(
    pool: Option<&rayon::ThreadPool>,
    canvas: Canvas,
    color: &mut [u8],
    tri: [ScreenVertex; 3],
    fragment: &Fragment<'_>,
) {
    let [v0, v1, v2] = tri;
    let area = edge(&v0, &v1, v2.x, v2.y);
    if area.abs() <= f64::EPSILON {
        return;
    }

    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let min_x = v0.x.min(v1.x).min(v2.x).floor().clamp(0.0, w) as usize;
    let max_x = v0.x.max(v1.x).max(v2.x).ceil().clamp(0.0, w) as usize;
    let min_y = v0.y.min(v1.y).min(v2.y).floor().clamp(0.0, h) as usize;
    let max_y = v0.y.max(v1.y).max(v2.y).ceil().clamp(0.0, h) as usize;
    if min_x >= max_x || min_y >= max_y {
        return;
    }

    let stride = canvas.width as usize * 3;
    let rows = &mut color[min_y * stride..max_y * stride];
    let shade_row = |row_i: usize, row: &mut [u8]| {
        let py = (min_y + row_i) as f64 + 0.5;
        for x in min_x..max_x {
            let px = x as f64 + 0.5;
            let w0 = edge(&v1, &v2, px, py) / area;
            let w1 = edge(&v2, &v0, px, py) / area;
            let w2 = edge(&v0, &v1, px, py) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }
            let (k0, k1, k2) = (w0 * v0.inv_w, w1 * v1.inv_w, w2 * v2.inv_w);
            let norm = 1.0 / (k0 + k1 + k2);
            let var = Varying::scaled_sum([
                (&v0.var, k0 * norm),
                (&v1.var, k1 * norm),
                (&v2.var, k2 * norm),
            ]);
            row[x * 3..x * 3 + 3].copy_from_slice(&fragment.shade(&var));
        }
    };

    match pool {
        Some(pool) => pool.install(|| {
            rows.par_chunks_mut(stride)
                .enumerate()
                .for_each(|(i, row)| shade_row(i, row))
        }),
        None => rows
            .chunks_mut(stride)
            .enumerate()
            .for_each(|(i, row)| shade_row(i, row)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;

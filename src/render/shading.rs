//! Lighting and texture sampling for the CPU backend.
//!
//! All vectors here are in eye space (camera at the origin).

use crate::assets::decode::PreparedImage;
use crate::foundation::math::Vec3;
use crate::scene::geometry::{GLOBAL_AMBIENT, SHADER_SHININESS_SCALE};

pub(crate) type Rgb = [f64; 3];

/// A light after transformation into eye space.
#[derive(Clone, Copy, Debug)]
pub(crate) struct EyeLight {
    pub(crate) position: Vec3,
    pub(crate) ambient: Rgb,
    pub(crate) diffuse: Rgb,
    pub(crate) specular: Rgb,
}

/// Lamp shader: white surface times `ambient + clamp(diffuse) + clamp(specular)`.
pub(crate) fn shade_fragment(normal: Vec3, pos: Vec3, light: &EyeLight, shininess: f64) -> Rgb {
    let n = normal.normalize();
    let l = (light.position - pos).normalize();
    let e = (-pos).normalize();
    let r = (-l.reflect(n)).normalize();

    let n_dot_l = n.dot(l).max(0.0);
    let spec = r
        .dot(e)
        .max(0.0)
        .powf(SHADER_SHININESS_SCALE * shininess);

    let mut out = [0.0; 3];
    for (c, o) in out.iter_mut().enumerate() {
        let diff = (light.diffuse[c] * n_dot_l).clamp(0.0, 1.0);
        let s = (light.specular[c] * spec).clamp(0.0, 1.0);
        *o = light.ambient[c] + diff + s;
    }
    out
}

/// Fixed-function per-vertex lighting with white ambient/diffuse material and no specular.
pub(crate) fn light_vertex(normal: Vec3, pos: Vec3, light: &EyeLight) -> Rgb {
    let n = normal.normalize();
    let l = (light.position - pos).normalize();
    let n_dot_l = n.dot(l).max(0.0);

    let mut out = [0.0; 3];
    for (c, o) in out.iter_mut().enumerate() {
        let v = GLOBAL_AMBIENT[c] + light.ambient[c] + light.diffuse[c] * n_dot_l;
        *o = v.clamp(0.0, 1.0);
    }
    out
}

/// Bilinear texture lookup with repeat wrapping, returning RGB in `[0, 1]`.
///
/// `t = 0` addresses the first stored image row.
pub(crate) fn sample_bilinear(tex: &PreparedImage, s: f64, t: f64) -> Rgb {
    let (w, h) = (tex.width as i64, tex.height as i64);
    let x = s * w as f64 - 0.5;
    let y = t * h as f64 - 0.5;
    let (x0, y0) = (x.floor(), y.floor());
    let (fx, fy) = (x - x0, y - y0);
    let (x0, y0) = (x0 as i64, y0 as i64);

    let wrap = |v: i64, n: i64| v.rem_euclid(n) as u32;
    let (xa, xb) = (wrap(x0, w), wrap(x0 + 1, w));
    let (ya, yb) = (wrap(y0, h), wrap(y0 + 1, h));

    let p00 = tex.texel(xa, ya);
    let p10 = tex.texel(xb, ya);
    let p01 = tex.texel(xa, yb);
    let p11 = tex.texel(xb, yb);

    let mut out = [0.0; 3];
    for (c, o) in out.iter_mut().enumerate() {
        let top = f64::from(p00[c]) * (1.0 - fx) + f64::from(p10[c]) * fx;
        let bottom = f64::from(p01[c]) * (1.0 - fx) + f64::from(p11[c]) * fx;
        *o = (top * (1.0 - fy) + bottom * fy) / 255.0;
    }
    out
}

/// Normalized float to 8-bit, clamped and rounded to nearest.
pub(crate) fn to_unorm8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5).floor() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/shading.rs"]
mod tests;

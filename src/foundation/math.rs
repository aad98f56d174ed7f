//! Small 3D math kit for the rasterizer: vectors, 4x4 matrices, GL-style transforms.

use std::ops::{Add, Mul, Neg, Sub};

/// 3-component vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Build a vector from components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Dot product.
    pub fn dot(self, o: Self) -> f64 {
        self.x * o.x + self.y * o.y + self.z * o.z
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction; the zero vector stays zero.
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len <= f64::EPSILON {
            return Self::ZERO;
        }
        self * (1.0 / len)
    }

    /// GLSL `reflect(i, n)`: `i - 2 * dot(n, i) * n`.
    pub fn reflect(self, n: Self) -> Self {
        self - n * (2.0 * n.dot(self))
    }

    /// Promote to homogeneous coordinates with the given `w`.
    pub fn extend(self, w: f64) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }

    /// Linear interpolation.
    pub fn lerp(self, o: Self, t: f64) -> Self {
        self + (o - self) * t
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, o: Self) -> Self {
        Self::new(self.x + o.x, self.y + o.y, self.z + o.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, o: Self) -> Self {
        Self::new(self.x - o.x, self.y - o.y, self.z - o.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Homogeneous 4-component vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec4 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
    /// W component.
    pub w: f64,
}

impl Vec4 {
    /// Build a vector from components.
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Drop `w` without dividing.
    pub fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Linear interpolation of all four components.
    pub fn lerp(self, o: Self, t: f64) -> Self {
        Self::new(
            self.x + (o.x - self.x) * t,
            self.y + (o.y - self.y) * t,
            self.z + (o.z - self.z) * t,
            self.w + (o.w - self.w) * t,
        )
    }
}

/// Row-major 4x4 matrix acting on column vectors (`m * v`), matching GL semantics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4 {
    /// `m[row][col]`.
    pub m: [[f64; 4]; 4],
}

impl Mat4 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// `glTranslate`.
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        let mut out = Self::IDENTITY;
        out.m[0][3] = x;
        out.m[1][3] = y;
        out.m[2][3] = z;
        out
    }

    /// `glRotate`: counter-clockwise rotation by `angle_deg` around `axis`.
    pub fn rotation_deg(angle_deg: f64, axis: Vec3) -> Self {
        let a = axis.normalize();
        if a == Vec3::ZERO {
            return Self::IDENTITY;
        }
        let (s, c) = angle_deg.to_radians().sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (a.x, a.y, a.z);
        Self {
            m: [
                [x * x * t + c, x * y * t - z * s, x * z * t + y * s, 0.0],
                [y * x * t + z * s, y * y * t + c, y * z * t - x * s, 0.0],
                [x * z * t - y * s, y * z * t + x * s, z * z * t + c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// `gluPerspective` with vertical field of view in degrees.
    pub fn perspective(fovy_deg: f64, aspect: f64, near: f64, far: f64) -> Self {
        let f = 1.0 / (fovy_deg.to_radians() * 0.5).tan();
        let depth = near - far;
        Self {
            m: [
                [f / aspect, 0.0, 0.0, 0.0],
                [0.0, f, 0.0, 0.0],
                [0.0, 0.0, (far + near) / depth, (2.0 * far * near) / depth],
                [0.0, 0.0, -1.0, 0.0],
            ],
        }
    }

    /// `gluLookAt`.
    pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Self {
        let f = (center - eye).normalize();
        let s = cross(f, up.normalize()).normalize();
        let u = cross(s, f);
        let rot = Self {
            m: [
                [s.x, s.y, s.z, 0.0],
                [u.x, u.y, u.z, 0.0],
                [-f.x, -f.y, -f.z, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        };
        rot * Self::translation(-eye.x, -eye.y, -eye.z)
    }

    /// Multiply a homogeneous vector.
    pub fn transform(&self, v: Vec4) -> Vec4 {
        let r = |i: usize| {
            self.m[i][0] * v.x + self.m[i][1] * v.y + self.m[i][2] * v.z + self.m[i][3] * v.w
        };
        Vec4::new(r(0), r(1), r(2), r(3))
    }

    /// Transform a point (`w = 1`) and drop `w`.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.transform(p.extend(1.0)).xyz()
    }

    /// GL normal matrix: inverse-transpose of the upper-left 3x3, applied to `n`.
    ///
    /// Returns `None` when the 3x3 block is singular.
    pub fn transform_normal(&self, n: Vec3) -> Option<Vec3> {
        let a = &self.m;
        // cofactor matrix of the 3x3 block equals det * inverse-transpose
        let c = [
            [
                a[1][1] * a[2][2] - a[1][2] * a[2][1],
                a[1][2] * a[2][0] - a[1][0] * a[2][2],
                a[1][0] * a[2][1] - a[1][1] * a[2][0],
            ],
            [
                a[0][2] * a[2][1] - a[0][1] * a[2][2],
                a[0][0] * a[2][2] - a[0][2] * a[2][0],
                a[0][1] * a[2][0] - a[0][0] * a[2][1],
            ],
            [
                a[0][1] * a[1][2] - a[0][2] * a[1][1],
                a[0][2] * a[1][0] - a[0][0] * a[1][2],
                a[0][0] * a[1][1] - a[0][1] * a[1][0],
            ],
        ];
        let det = a[0][0] * c[0][0] + a[0][1] * c[0][1] + a[0][2] * c[0][2];
        if det.abs() <= f64::EPSILON {
            return None;
        }
        let inv = 1.0 / det;
        Some(Vec3::new(
            (c[0][0] * n.x + c[0][1] * n.y + c[0][2] * n.z) * inv,
            (c[1][0] * n.x + c[1][1] * n.y + c[1][2] * n.z) * inv,
            (c[2][0] * n.x + c[2][1] * n.y + c[2][2] * n.z) * inv,
        ))
    }
}

impl Mul for Mat4 {
    type Output = Self;
    fn mul(self, o: Self) -> Self {
        let mut out = [[0.0; 4]; 4];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.m[i][k] * o.m[k][j]).sum();
            }
        }
        Self { m: out }
    }
}

fn cross(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;

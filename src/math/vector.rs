use super::matrix::Matrix4;
use crate::error::{KinematicsError, Result};
use bytemuck::{Pod, Zeroable};
use std::fmt;

/// Inhomogeneous point or direction.
///
/// Mutators work in place and return `&mut Self` so calls chain the way a
/// per-frame update reads: `color.set(1.0, 1.0, 1.0).scale(0.5)`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn set(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    pub fn set_zero(&mut self) -> &mut Self {
        self.set(0.0, 0.0, 0.0)
    }

    /// Copies the first three components of `src`.
    ///
    /// Fails unless `src.w` is 0 or 1; weighted homogeneous points must be
    /// brought back with [`Vector4::to_inhom`] first. `self` is untouched on
    /// failure.
    pub fn set_from4(&mut self, src: &Vector4) -> Result<&mut Self> {
        if src.w != 0.0 && src.w != 1.0 {
            return Err(KinematicsError::InvalidHomogeneousCoordinate(src.w));
        }
        Ok(self.set(src.x, src.y, src.z))
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn norm(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Rescales to unit length. The zero vector stays zero.
    pub fn normalize(&mut self) -> &mut Self {
        let n = self.dot(self);
        if n != 0.0 {
            let inv = 1.0 / n.sqrt();
            self.x *= inv;
            self.y *= inv;
            self.z *= inv;
        }
        self
    }

    pub fn scale(&mut self, d: f32) -> &mut Self {
        self.x *= d;
        self.y *= d;
        self.z *= d;
        self
    }

    pub fn set_sum(&mut self, a: &Self, b: &Self) -> &mut Self {
        self.set(a.x + b.x, a.y + b.y, a.z + b.z)
    }

    pub fn set_sub(&mut self, a: &Self, b: &Self) -> &mut Self {
        self.set(a.x - b.x, a.y - b.y, a.z - b.z)
    }

    /// Remaps a z-up value to the y-up rendering convention: `(x, y, z) -> (x, z, -y)`.
    ///
    /// This is a one-way switch, not a toggle: applying it twice yields
    /// `(x, -y, -z)`. Apply it exactly once per value.
    pub fn to_gl_coord(&mut self) -> &mut Self {
        let y = self.y;
        self.y = self.z;
        self.z = -y;
        self
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl TryFrom<Vector4> for Vector3 {
    type Error = KinematicsError;

    fn try_from(v: Vector4) -> Result<Self> {
        let mut out = Vector3::ZERO;
        out.set_from4(&v)?;
        Ok(out)
    }
}

impl From<Vector3> for glam::Vec3 {
    fn from(v: Vector3) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

impl From<glam::Vec3> for Vector3 {
    fn from(v: glam::Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "[ {:.p$}, {:.p$}, {:.p$} ]", self.x, self.y, self.z, p = p),
            None => write!(f, "[ {}, {}, {} ]", self.x, self.y, self.z),
        }
    }
}

/// Homogeneous vector: `w = 1` is a point, `w = 0` a direction.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Vector4 {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Vector4 {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub const fn point(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 1.0)
    }

    pub const fn direction(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 0.0)
    }

    /// Lifts `v` with an explicit `w`; there is no default, the caller
    /// states whether `v` is a point or a direction.
    pub const fn from_vec3(v: Vector3, w: f32) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Resets to the origin point `[0, 0, 0, 1]`.
    pub fn reset(&mut self) -> &mut Self {
        self.set(0.0, 0.0, 0.0, 1.0)
    }

    pub fn set(&mut self, x: f32, y: f32, z: f32, w: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self.w = w;
        self
    }

    pub fn set4(&mut self, src: &Vector4) -> &mut Self {
        *self = *src;
        self
    }

    pub fn set3(&mut self, src: &Vector3, w: f32) -> &mut Self {
        self.set(src.x, src.y, src.z, w)
    }

    /// Divides through by `w` unless the point is at infinity.
    pub fn to_inhom(&mut self) -> &mut Self {
        if self.w != 0.0 {
            self.x /= self.w;
            self.y /= self.w;
            self.z /= self.w;
            self.w = 1.0;
        }
        self
    }

    /// `self = m * self`.
    pub fn mult_l(&mut self, m: &Matrix4) -> &mut Self {
        *self = m.transform(*self);
        self
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn norm(&self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(&mut self) -> &mut Self {
        let n = self.dot(self);
        if n != 0.0 {
            self.scale(1.0 / n.sqrt());
        }
        self
    }

    /// Scales all four components, `w` included.
    pub fn scale(&mut self, d: f32) -> &mut Self {
        self.x *= d;
        self.y *= d;
        self.z *= d;
        self.w *= d;
        self
    }

    /// `self = a + b`. Mixing a point with a direction yields a point.
    pub fn set_sum(&mut self, a: &Self, b: &Self) -> &mut Self {
        let w = if a.w == b.w { a.w } else { 1.0 };
        self.set(a.x + b.x, a.y + b.y, a.z + b.z, w)
    }

    /// `self = a - b`, componentwise: point minus point is a direction.
    pub fn set_sub(&mut self, a: &Self, b: &Self) -> &mut Self {
        self.set(a.x - b.x, a.y - b.y, a.z - b.z, a.w - b.w)
    }

    /// Euclidean distance between two points of equal weight.
    pub fn distance(&self, other: &Self) -> Result<f32> {
        let dw = self.w - other.w;
        if dw != 0.0 {
            return Err(KinematicsError::InvalidHomogeneousCoordinate(dw));
        }
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        Ok((dx * dx + dy * dy + dz * dz).sqrt())
    }

    /// Same remapping as [`Vector3::to_gl_coord`]; `w` is unchanged.
    pub fn to_gl_coord(&mut self) -> &mut Self {
        let y = self.y;
        self.y = self.z;
        self.z = -y;
        self
    }

    pub fn xyz(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl From<[f32; 4]> for Vector4 {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Vector4> for glam::Vec4 {
    fn from(v: Vector4) -> Self {
        glam::Vec4::new(v.x, v.y, v.z, v.w)
    }
}

impl From<glam::Vec4> for Vector4 {
    fn from(v: glam::Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl fmt::Display for Vector4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(
                f,
                "[ {:.p$}, {:.p$}, {:.p$}, {:.p$} ]",
                self.x,
                self.y,
                self.z,
                self.w,
                p = p
            ),
            None => write!(f, "[ {}, {}, {}, {} ]", self.x, self.y, self.z, self.w),
        }
    }
}

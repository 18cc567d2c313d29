use super::vector::{Vector3, Vector4};
use crate::error::{KinematicsError, Result};
use bytemuck::{Pod, Zeroable};
use std::fmt;
use std::ops::Mul;

/// Column-major 4x4 point-transformation matrix.
///
/// `entries[0..4]` is column 0 and `entries[12..15]` holds the translation,
/// matching the layout shaders expect for `mat4` uniforms.
///
/// The API is an in-place builder:
/// - `set_*` methods discard the current contents and build a canonical matrix.
/// - Composing methods (`translate`, `scale`, `rotate`, `look_at`,
///   `perspective`, `orth_proj`) left-multiply: `self = New * self`, i.e. the
///   new transform is applied after everything already composed.
/// - `*_ref` methods right-multiply: `self = self * New`, which composes a
///   motion expressed in the current frame rather than in world space.
///
/// Temporaries are stack snapshots of the operands taken before `self` is
/// overwritten, so an operand may be a copy of `self` and nothing is shared
/// between instances.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Matrix4 {
    pub entries: [f32; 16],
}

const IDENTITY_ENTRIES: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    pub const IDENTITY: Self = Self {
        entries: IDENTITY_ENTRIES,
    };

    pub const fn from_entries(entries: [f32; 16]) -> Self {
        Self { entries }
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn translation_of(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.set_translation(x, y, z);
        m
    }

    pub fn rotation_of(angle_deg: f32, x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.set_rotation(angle_deg, x, y, z);
        m
    }

    pub fn as_array(&self) -> &[f32; 16] {
        &self.entries
    }

    /// Column `i` as a homogeneous vector, or `None` past the fourth column.
    pub fn column(&self, i: usize) -> Option<Vector4> {
        if i >= 4 {
            return None;
        }
        let c = &self.entries[i * 4..i * 4 + 4];
        Some(Vector4::new(c[0], c[1], c[2], c[3]))
    }

    pub fn translation(&self) -> Vector3 {
        Vector3::new(self.entries[12], self.entries[13], self.entries[14])
    }

    /// Third column: the z axis of the frame this matrix places.
    pub fn z_axis(&self) -> Vector3 {
        Vector3::new(self.entries[8], self.entries[9], self.entries[10])
    }

    /// `m * v` without touching either operand.
    pub fn transform(&self, v: Vector4) -> Vector4 {
        let m = &self.entries;
        Vector4::new(
            m[0] * v.x + m[4] * v.y + m[8] * v.z + m[12] * v.w,
            m[1] * v.x + m[5] * v.y + m[9] * v.z + m[13] * v.w,
            m[2] * v.x + m[6] * v.y + m[10] * v.z + m[14] * v.w,
            m[3] * v.x + m[7] * v.y + m[11] * v.z + m[15] * v.w,
        )
    }

    pub fn determinant(&self) -> f32 {
        adjugate(&self.entries).1
    }

    pub fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.entries
            .iter()
            .zip(other.entries.iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }

    // -- products ----------------------------------------------------------

    /// `self = self * other`.
    pub fn mult_r(&mut self, other: &Matrix4) -> &mut Self {
        let a = self.entries;
        self.entries = mult_arrays(&a, &other.entries);
        self
    }

    /// `self = other * self`.
    pub fn mult_l(&mut self, other: &Matrix4) -> &mut Self {
        let a = self.entries;
        self.entries = mult_arrays(&other.entries, &a);
        self
    }

    pub fn transpose(&mut self) -> &mut Self {
        let m = &mut self.entries;
        m.swap(1, 4);
        m.swap(2, 8);
        m.swap(3, 12);
        m.swap(6, 9);
        m.swap(7, 13);
        m.swap(11, 14);
        self
    }

    pub fn transposed(&self) -> Self {
        let mut t = *self;
        t.transpose();
        t
    }

    /// Inverts in place. On a singular matrix the entries are left as they were.
    pub fn invert(&mut self) -> Result<&mut Self> {
        self.entries = inverse_entries(&self.entries)?;
        Ok(self)
    }

    /// Sets `self` to the inverse of `other`, leaving `self` untouched when
    /// `other` is singular.
    ///
    /// `&mut self` and `&other` can never be the same matrix; slot-addressed
    /// storage that can express that aliasing goes through
    /// [`MatrixBank::set_inverse_of`](super::MatrixBank::set_inverse_of),
    /// which rejects it with [`KinematicsError::AliasedOperand`].
    pub fn set_inverse_of(&mut self, other: &Matrix4) -> Result<&mut Self> {
        self.entries = inverse_entries(&other.entries)?;
        Ok(self)
    }

    pub fn inverse(&self) -> Result<Matrix4> {
        inverse_entries(&self.entries).map(Self::from_entries)
    }

    // -- set methods -------------------------------------------------------

    pub fn set(&mut self, other: &Matrix4) -> &mut Self {
        self.entries = other.entries;
        self
    }

    pub fn set_identity(&mut self) -> &mut Self {
        self.entries = IDENTITY_ENTRIES;
        self
    }

    pub fn set_translation(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.entries = IDENTITY_ENTRIES;
        self.entries[12] = x;
        self.entries[13] = y;
        self.entries[14] = z;
        self
    }

    /// Diagonal `[x, y, z, 1]`.
    pub fn set_scale(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.entries = IDENTITY_ENTRIES;
        self.entries[0] = x;
        self.entries[5] = y;
        self.entries[10] = z;
        self
    }

    /// Rotation of `angle_deg` degrees about the axis `(x, y, z)`.
    pub fn set_rotation(&mut self, angle_deg: f32, x: f32, y: f32, z: f32) -> &mut Self {
        self.set_rotation_radians(angle_deg.to_radians(), x, y, z)
    }

    /// Rotation of `angle` radians about `(x, y, z)`, which need not be unit length.
    ///
    /// Axis-aligned axes take a fast path where a negative component flips
    /// the rotation sense. Any other axis is normalised and fed through
    /// Rodrigues' formula. A zero axis yields the identity.
    pub fn set_rotation_radians(&mut self, angle: f32, x: f32, y: f32, z: f32) -> &mut Self {
        let mut s = angle.sin();
        let c = angle.cos();
        let e = &mut self.entries;

        if x != 0.0 && y == 0.0 && z == 0.0 {
            if x < 0.0 {
                s = -s;
            }
            *e = [
                1.0, 0.0, 0.0, 0.0, //
                0.0, c, s, 0.0, //
                0.0, -s, c, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ];
        } else if x == 0.0 && y != 0.0 && z == 0.0 {
            if y < 0.0 {
                s = -s;
            }
            *e = [
                c, 0.0, -s, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                s, 0.0, c, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ];
        } else if x == 0.0 && y == 0.0 && z != 0.0 {
            if z < 0.0 {
                s = -s;
            }
            *e = [
                c, s, 0.0, 0.0, //
                -s, c, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ];
        } else {
            let len = (x * x + y * y + z * z).sqrt();
            if len == 0.0 {
                *e = IDENTITY_ENTRIES;
                return self;
            }
            let (x, y, z) = (x / len, y / len, z / len);
            let nc = 1.0 - c;
            let (xy, yz, zx) = (x * y, y * z, z * x);
            let (xs, ys, zs) = (x * s, y * s, z * s);

            *e = [
                x * x * nc + c,
                xy * nc + zs,
                zx * nc - ys,
                0.0,
                xy * nc - zs,
                y * y * nc + c,
                yz * nc + xs,
                0.0,
                zx * nc + ys,
                yz * nc - xs,
                z * z * nc + c,
                0.0,
                0.0,
                0.0,
                0.0,
                1.0,
            ];
        }
        self
    }

    /// View matrix moving `eye` to the origin and looking down -z toward `center`.
    ///
    /// This is a point transform, the inverse of the camera frame. With
    /// `to_gl_coord` set, all three inputs are remapped from z-up to y-up
    /// before the basis is built, so scenes authored z-up render in a y-up
    /// pipeline.
    pub fn set_look_at(
        &mut self,
        eye: Vector3,
        center: Vector3,
        up: Vector3,
        to_gl_coord: bool,
    ) -> Result<&mut Self> {
        let (mut eye, mut center, mut up) = (eye, center, up);
        if to_gl_coord {
            eye.to_gl_coord();
            center.to_gl_coord();
            up.to_gl_coord();
        }

        // z points away from the viewing direction
        let mut z = Vector3::ZERO;
        z.set_sub(&eye, &center);
        let mut x = up.cross(&z);
        if z.dot(&z) == 0.0 || x.dot(&x) == 0.0 {
            return Err(KinematicsError::DegenerateView);
        }
        z.normalize();
        x = up.cross(&z);
        x.normalize();
        let mut y = z.cross(&x);
        y.normalize();

        let e = &mut self.entries;
        *e = [
            x.x, y.x, z.x, 0.0, //
            x.y, y.y, z.y, 0.0, //
            x.z, y.z, z.z, 0.0, //
            -x.dot(&eye),
            -y.dot(&eye),
            -z.dot(&eye),
            1.0,
        ];
        Ok(self)
    }

    /// Maps the box `[left, right] x [bottom, top] x [-near, -far]` onto the
    /// `[-1, 1]` cube. `near` and `far` are distances along the viewing direction.
    pub fn set_orth_proj(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Result<&mut Self> {
        if left == right || bottom == top || near == far {
            return Err(KinematicsError::DegenerateFrustum("empty viewing volume"));
        }
        self.entries = [
            2.0 / (right - left),
            0.0,
            0.0,
            0.0,
            0.0,
            2.0 / (top - bottom),
            0.0,
            0.0,
            0.0,
            0.0,
            -2.0 / (far - near),
            0.0,
            (left + right) / (left - right),
            (bottom + top) / (bottom - top),
            -(far + near) / (far - near),
            1.0,
        ];
        Ok(self)
    }

    /// Perspective projection with vertical field of view `fovy_deg` degrees.
    pub fn set_perspective(
        &mut self,
        fovy_deg: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Result<&mut Self> {
        if near == far || aspect == 0.0 {
            return Err(KinematicsError::DegenerateFrustum("null frustum"));
        }
        if near <= 0.0 {
            return Err(KinematicsError::DegenerateFrustum("near <= 0"));
        }
        if far <= 0.0 {
            return Err(KinematicsError::DegenerateFrustum("far <= 0"));
        }
        let half = fovy_deg.to_radians() / 2.0;
        let s = half.sin();
        if s == 0.0 {
            return Err(KinematicsError::DegenerateFrustum("null field of view"));
        }

        let rd = 1.0 / (far - near);
        let cot = half.cos() / s;
        self.entries = [
            cot / aspect,
            0.0,
            0.0,
            0.0,
            0.0,
            cot,
            0.0,
            0.0,
            0.0,
            0.0,
            -(far + near) * rd,
            -1.0,
            0.0,
            0.0,
            -2.0 * near * far * rd,
            0.0,
        ];
        Ok(self)
    }

    // -- left-multiplying composition ---------------------------------------

    pub fn translate(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        let m = &mut self.entries;
        for col in 0..4 {
            let w = m[col * 4 + 3];
            m[col * 4] += w * x;
            m[col * 4 + 1] += w * y;
            m[col * 4 + 2] += w * z;
        }
        self
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        let m = &mut self.entries;
        for col in 0..4 {
            m[col * 4] *= x;
            m[col * 4 + 1] *= y;
            m[col * 4 + 2] *= z;
        }
        self
    }

    pub fn rotate(&mut self, angle_deg: f32, x: f32, y: f32, z: f32) -> &mut Self {
        let r = Self::rotation_of(angle_deg, x, y, z);
        self.mult_l(&r)
    }

    pub fn rotate_radians(&mut self, angle: f32, x: f32, y: f32, z: f32) -> &mut Self {
        let mut r = Self::IDENTITY;
        r.set_rotation_radians(angle, x, y, z);
        self.mult_l(&r)
    }

    pub fn look_at(
        &mut self,
        eye: Vector3,
        center: Vector3,
        up: Vector3,
        to_gl_coord: bool,
    ) -> Result<&mut Self> {
        let mut v = Self::IDENTITY;
        v.set_look_at(eye, center, up, to_gl_coord)?;
        Ok(self.mult_l(&v))
    }

    pub fn orth_proj(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Result<&mut Self> {
        let mut p = Self::IDENTITY;
        p.set_orth_proj(left, right, bottom, top, near, far)?;
        Ok(self.mult_l(&p))
    }

    pub fn perspective(
        &mut self,
        fovy_deg: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Result<&mut Self> {
        let mut p = Self::IDENTITY;
        p.set_perspective(fovy_deg, aspect, near, far)?;
        Ok(self.mult_l(&p))
    }

    // -- right-multiplying (frame-relative) composition ---------------------

    pub fn translate_ref(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        let m = &mut self.entries;
        for row in 0..4 {
            m[12 + row] += m[row] * x + m[4 + row] * y + m[8 + row] * z;
        }
        self
    }

    pub fn scale_ref(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        let m = &mut self.entries;
        for (col, factor) in [x, y, z].into_iter().enumerate() {
            for row in 0..4 {
                m[col * 4 + row] *= factor;
            }
        }
        self
    }

    pub fn rotate_ref(&mut self, angle_deg: f32, x: f32, y: f32, z: f32) -> &mut Self {
        let r = Self::rotation_of(angle_deg, x, y, z);
        self.mult_r(&r)
    }

    pub fn rotate_ref_radians(&mut self, angle: f32, x: f32, y: f32, z: f32) -> &mut Self {
        let mut r = Self::IDENTITY;
        r.set_rotation_radians(angle, x, y, z);
        self.mult_r(&r)
    }
}

/// `m * n` for column-major arrays.
fn mult_arrays(m: &[f32; 16], n: &[f32; 16]) -> [f32; 16] {
    let mut r = [0.0; 16];
    for col in 0..4 {
        for row in 0..4 {
            r[col * 4 + row] = m[row] * n[col * 4]
                + m[4 + row] * n[col * 4 + 1]
                + m[8 + row] * n[col * 4 + 2]
                + m[12 + row] * n[col * 4 + 3];
        }
    }
    r
}

/// Cofactor-expansion adjugate and the determinant it yields.
fn adjugate(n: &[f32; 16]) -> ([f32; 16], f32) {
    let mut m = [0.0; 16];
    m[0] = n[5] * n[10] * n[15] - n[5] * n[11] * n[14] - n[6] * n[9] * n[15]
        + n[6] * n[11] * n[13]
        + n[7] * n[9] * n[14]
        - n[7] * n[10] * n[13];
    m[1] = -(n[1] * n[10] * n[15] - n[1] * n[11] * n[14] - n[2] * n[9] * n[15]
        + n[2] * n[11] * n[13]
        + n[3] * n[9] * n[14]
        - n[3] * n[10] * n[13]);
    m[2] = n[1] * n[6] * n[15] - n[1] * n[7] * n[14] - n[2] * n[5] * n[15]
        + n[2] * n[7] * n[13]
        + n[3] * n[5] * n[14]
        - n[3] * n[6] * n[13];
    m[3] = -(n[1] * n[6] * n[11] - n[1] * n[7] * n[10] - n[2] * n[5] * n[11]
        + n[2] * n[7] * n[9]
        + n[3] * n[5] * n[10]
        - n[3] * n[6] * n[9]);
    m[4] = -(n[4] * n[10] * n[15] - n[4] * n[11] * n[14] - n[6] * n[8] * n[15]
        + n[6] * n[11] * n[12]
        + n[7] * n[8] * n[14]
        - n[7] * n[10] * n[12]);
    m[5] = n[0] * n[10] * n[15] - n[0] * n[11] * n[14] - n[2] * n[8] * n[15]
        + n[2] * n[11] * n[12]
        + n[3] * n[8] * n[14]
        - n[3] * n[10] * n[12];
    m[6] = -(n[0] * n[6] * n[15] - n[0] * n[7] * n[14] - n[2] * n[4] * n[15]
        + n[2] * n[7] * n[12]
        + n[3] * n[4] * n[14]
        - n[3] * n[6] * n[12]);
    m[7] = n[0] * n[6] * n[11] - n[0] * n[7] * n[10] - n[2] * n[4] * n[11]
        + n[2] * n[7] * n[8]
        + n[3] * n[4] * n[10]
        - n[3] * n[6] * n[8];
    m[8] = n[4] * n[9] * n[15] - n[4] * n[11] * n[13] - n[5] * n[8] * n[15]
        + n[5] * n[11] * n[12]
        + n[7] * n[8] * n[13]
        - n[7] * n[9] * n[12];
    m[9] = -(n[0] * n[9] * n[15] - n[0] * n[11] * n[13] - n[1] * n[8] * n[15]
        + n[1] * n[11] * n[12]
        + n[3] * n[8] * n[13]
        - n[3] * n[9] * n[12]);
    m[10] = n[0] * n[5] * n[15] - n[0] * n[7] * n[13] - n[1] * n[4] * n[15]
        + n[1] * n[7] * n[12]
        + n[3] * n[4] * n[13]
        - n[3] * n[5] * n[12];
    m[11] = -(n[0] * n[5] * n[11] - n[0] * n[7] * n[9] - n[1] * n[4] * n[11]
        + n[1] * n[7] * n[8]
        + n[3] * n[4] * n[9]
        - n[3] * n[5] * n[8]);
    m[12] = -(n[4] * n[9] * n[14] - n[4] * n[10] * n[13] - n[5] * n[8] * n[14]
        + n[5] * n[10] * n[12]
        + n[6] * n[8] * n[13]
        - n[6] * n[9] * n[12]);
    m[13] = n[0] * n[9] * n[14] - n[0] * n[10] * n[13] - n[1] * n[8] * n[14]
        + n[1] * n[10] * n[12]
        + n[2] * n[8] * n[13]
        - n[2] * n[9] * n[12];
    m[14] = -(n[0] * n[5] * n[14] - n[0] * n[6] * n[13] - n[1] * n[4] * n[14]
        + n[1] * n[6] * n[12]
        + n[2] * n[4] * n[13]
        - n[2] * n[5] * n[12]);
    m[15] = n[0] * n[5] * n[10] - n[0] * n[6] * n[9] - n[1] * n[4] * n[10]
        + n[1] * n[6] * n[8]
        + n[2] * n[4] * n[9]
        - n[2] * n[5] * n[8];

    let det = n[0] * m[0] + n[1] * m[4] + n[2] * m[8] + n[3] * m[12];
    (m, det)
}

fn inverse_entries(n: &[f32; 16]) -> Result<[f32; 16]> {
    let (mut m, det) = adjugate(n);
    if det == 0.0 {
        return Err(KinematicsError::SingularMatrix);
    }
    let inv_det = 1.0 / det;
    for v in m.iter_mut() {
        *v *= inv_det;
    }
    Ok(m)
}

impl Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: Matrix4) -> Matrix4 {
        Matrix4::from_entries(mult_arrays(&self.entries, &rhs.entries))
    }
}

impl Mul<Vector4> for Matrix4 {
    type Output = Vector4;

    fn mul(self, rhs: Vector4) -> Vector4 {
        self.transform(rhs)
    }
}

impl From<Matrix4> for glam::Mat4 {
    fn from(m: Matrix4) -> Self {
        glam::Mat4::from_cols_array(&m.entries)
    }
}

impl From<glam::Mat4> for Matrix4 {
    fn from(m: glam::Mat4) -> Self {
        Matrix4::from_entries(m.to_cols_array())
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = &self.entries;
        for row in 0..4 {
            let vals = [e[row], e[4 + row], e[8 + row], e[12 + row]];
            match f.precision() {
                Some(p) => writeln!(
                    f,
                    "{:.p$}, {:.p$}, {:.p$}, {:.p$};",
                    vals[0],
                    vals[1],
                    vals[2],
                    vals[3],
                    p = p
                )?,
                None => writeln!(f, "{}, {}, {}, {};", vals[0], vals[1], vals[2], vals[3])?,
            }
        }
        Ok(())
    }
}

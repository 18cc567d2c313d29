use crate::error::{KinematicsError, Result};
use crate::math::Matrix4;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

pub const JOINT_COUNT: usize = 6;

/// Static Denavit-Hartenberg parameters of one joint; `theta` is the joint
/// variable and is supplied per call.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DhRow {
    /// Link length along the new x axis.
    pub a: f32,
    /// Link twist about the new x axis, radians.
    pub alpha: f32,
    /// Link offset along the previous z axis.
    pub d: f32,
}

impl DhRow {
    pub const fn new(a: f32, alpha: f32, d: f32) -> Self {
        Self { a, alpha, d }
    }

    /// `Rz(theta) * Tz(d) * Tx(a) * Rx(alpha)` written into `out`.
    pub fn transform_into(&self, theta: f32, out: &mut Matrix4) {
        let (st, ct) = theta.sin_cos();
        let (sa, ca) = self.alpha.sin_cos();
        out.entries = [
            ct,
            st,
            0.0,
            0.0,
            -st * ca,
            ct * ca,
            sa,
            0.0,
            st * sa,
            -ct * sa,
            ca,
            0.0,
            self.a * ct,
            self.a * st,
            self.d,
            1.0,
        ];
    }
}

/// Six-row DH table, joints indexed `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DhTable {
    rows: [DhRow; JOINT_COUNT],
}

impl DhTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: [DhRow; JOINT_COUNT]) -> Self {
        Self { rows }
    }

    /// Anthropomorphic arm with a spherical wrist, scaled by `link_length`.
    pub fn anthropomorphic(link_length: f32) -> Self {
        let l = link_length;
        Self::from_rows([
            DhRow::new(0.0, FRAC_PI_2, 0.0),
            DhRow::new(l, 0.0, 0.0),
            DhRow::new(0.0, FRAC_PI_2, 0.0),
            DhRow::new(0.0, -FRAC_PI_2, 2.0 * l),
            DhRow::new(0.0, FRAC_PI_2, 0.0),
            DhRow::new(0.0, 0.0, 2.0 * l),
        ])
    }

    fn index(joint: usize) -> Result<usize> {
        if (1..=JOINT_COUNT).contains(&joint) {
            Ok(joint - 1)
        } else {
            Err(KinematicsError::InvalidJointIndex(joint))
        }
    }

    pub fn set(&mut self, joint: usize, a: f32, alpha: f32, d: f32) -> Result<()> {
        let i = Self::index(joint)?;
        self.rows[i] = DhRow::new(a, alpha, d);
        Ok(())
    }

    pub fn row(&self, joint: usize) -> Result<&DhRow> {
        Ok(&self.rows[Self::index(joint)?])
    }

    pub fn rows(&self) -> &[DhRow; JOINT_COUNT] {
        &self.rows
    }

    pub fn joint_transform(&self, joint: usize, theta: f32) -> Result<Matrix4> {
        let mut out = Matrix4::IDENTITY;
        self.joint_transform_into(joint, theta, &mut out)?;
        Ok(out)
    }

    /// Per-frame variant of [`joint_transform`](Self::joint_transform); `out`
    /// is untouched on error.
    pub fn joint_transform_into(&self, joint: usize, theta: f32, out: &mut Matrix4) -> Result<()> {
        self.row(joint)?.transform_into(theta, out);
        Ok(())
    }
}

use super::dh::{DhTable, JOINT_COUNT};
use super::inverse::{WristSolution, WristSolver};
use crate::error::{KinematicsError, Result};
use crate::math::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Base frame plus one frame per joint.
pub const FRAME_COUNT: usize = JOINT_COUNT + 1;

/// Instantaneous configuration `q`, radians, joint 1 first.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointAngles(pub [f32; JOINT_COUNT]);

impl JointAngles {
    pub const ZERO: Self = Self([0.0; JOINT_COUNT]);

    pub const fn new(q: [f32; JOINT_COUNT]) -> Self {
        Self(q)
    }

    /// Angle of `joint` in `1..=6`.
    pub fn joint(&self, joint: usize) -> Result<f32> {
        if (1..=JOINT_COUNT).contains(&joint) {
            Ok(self.0[joint - 1])
        } else {
            Err(KinematicsError::InvalidJointIndex(joint))
        }
    }

    pub fn as_array(&self) -> &[f32; JOINT_COUNT] {
        &self.0
    }

    /// Linear blend, `t = 0` gives `from`.
    pub fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        let mut out = *from;
        for (o, (a, b)) in out.0.iter_mut().zip(from.0.iter().zip(to.0.iter())) {
            *o = t * b + (1.0 - t) * a;
        }
        out
    }
}

impl Index<usize> for JointAngles {
    type Output = f32;

    fn index(&self, i: usize) -> &f32 {
        &self.0[i]
    }
}

impl IndexMut<usize> for JointAngles {
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        &mut self.0[i]
    }
}

/// Segment lengths the closed-form solver needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArmGeometry {
    /// Upper arm, `a2`.
    pub shoulder: f32,
    /// Forearm up to the wrist centre, `d4`.
    pub forearm: f32,
    /// Wrist centre to tool tip, `d6`.
    pub tool: f32,
    /// Height of the shoulder above the world origin.
    pub base_height: f32,
}

impl ArmGeometry {
    pub fn from_link_length(link_length: f32) -> Self {
        Self {
            shoulder: link_length,
            forearm: 2.0 * link_length,
            tool: 2.0 * link_length,
            base_height: 2.0 * link_length,
        }
    }

    /// Closed interval of wrist distances from the shoulder the arm can reach.
    pub fn reach(&self) -> (f32, f32) {
        (
            (self.forearm - self.shoulder).abs(),
            self.forearm + self.shoulder,
        )
    }

    /// Wrist centre of `pose` relative to the shoulder: `p - d6 * z - base`.
    pub fn wrist_center(&self, pose: &Matrix4) -> Vector3 {
        let mut tool = pose.z_axis();
        tool.scale(self.tool);
        let mut w = Vector3::ZERO;
        w.set_sub(&pose.translation(), &tool);
        w.z -= self.base_height;
        w
    }
}

/// Anthropomorphic 6-joint arm: DH table, segment lengths and the fixed
/// world-to-shoulder transform.
#[derive(Debug, Clone, PartialEq)]
pub struct ArmModel {
    dh: DhTable,
    geometry: ArmGeometry,
    base: Matrix4,
}

impl ArmModel {
    pub fn new(link_length: f32) -> Self {
        let geometry = ArmGeometry::from_link_length(link_length);
        Self {
            dh: DhTable::anthropomorphic(link_length),
            base: Matrix4::translation_of(0.0, 0.0, geometry.base_height),
            geometry,
        }
    }

    pub fn dh(&self) -> &DhTable {
        &self.dh
    }

    pub fn geometry(&self) -> &ArmGeometry {
        &self.geometry
    }

    pub fn base(&self) -> &Matrix4 {
        &self.base
    }

    pub fn link_length(&self) -> f32 {
        self.geometry.shoulder
    }

    /// Chains the joint transforms into world matrices: `frames[0]` is the
    /// base and `frames[i] = frames[i - 1] * A_i(q_i)`.
    pub fn forward_into(&self, q: &JointAngles, frames: &mut [Matrix4; FRAME_COUNT]) {
        let mut joint = Matrix4::IDENTITY;
        frames[0] = self.base;
        for (i, row) in self.dh.rows().iter().enumerate() {
            row.transform_into(q[i], &mut joint);
            frames[i + 1] = frames[i];
            frames[i + 1].mult_r(&joint);
        }
    }

    pub fn forward(&self, q: &JointAngles) -> [Matrix4; FRAME_COUNT] {
        let mut frames = [Matrix4::IDENTITY; FRAME_COUNT];
        self.forward_into(q, &mut frames);
        frames
    }

    pub fn end_effector(&self, q: &JointAngles) -> Matrix4 {
        self.forward(q)[JOINT_COUNT]
    }

    /// World position of the spherical wrist (origin of frame 4).
    pub fn wrist_center(&self, q: &JointAngles) -> Vector3 {
        self.forward(q)[4].translation()
    }

    /// Writes `q[0..3]` for an end-effector `pose`; on failure `q` is untouched.
    pub fn solve_position(&self, pose: &Matrix4, q: &mut JointAngles) -> Result<WristSolution> {
        WristSolver::solve_into(&self.geometry, pose, q)
    }

    /// End-effector pose used while dragging: tool pointing along -x, tip at `target`.
    pub fn drag_pose(target: Vector3) -> Matrix4 {
        let mut pose = Matrix4::IDENTITY;
        pose.set_rotation(-90.0, 1.0, 0.0, 0.0)
            .rotate(90.0, 0.0, 0.0, 1.0)
            .translate(target.x, target.y, target.z);
        pose
    }
}

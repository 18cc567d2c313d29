//! Kinematics module
//!
//! Denavit-Hartenberg joint transforms, forward kinematics for the
//! six-joint arm and the closed-form position solver for its first three
//! joints.

pub mod arm;
pub mod dh;
pub mod inverse;

pub use arm::{ArmGeometry, ArmModel, JointAngles, FRAME_COUNT};
pub use dh::{DhRow, DhTable, JOINT_COUNT};
pub use inverse::{solve, WristSolution, WristSolver};

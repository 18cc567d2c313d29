//! # arm-kinematics
//!
//! Homogeneous-coordinate math and kinematics for a six-joint anthropomorphic
//! arm with a spherical wrist.
//!
//! ## Features
//! - Column-major `Matrix4` with chainable transform composition
//! - Denavit-Hartenberg forward kinematics
//! - Closed-form position IK for the first three joints
//! - Trajectory playback with joint-space transitions between paths
//! - Orbit camera, pointer picking and shadow-light matrices ready for upload
//!
//! ## Example
//! ```rust
//! use arm_kinematics::{ArmModel, JointAngles, Vector3};
//!
//! let arm = ArmModel::new(1.3);
//!
//! // Point the tool at the wall and solve the arm joints
//! let pose = ArmModel::drag_pose(Vector3::new(-4.0, 0.5, 4.0));
//! let mut q = JointAngles::ZERO;
//! arm.solve_position(&pose, &mut q).unwrap();
//!
//! let wrist = arm.wrist_center(&q);
//! assert!((wrist.x - (-4.0 + 2.6)).abs() < 1e-3);
//! ```

pub mod animation;
pub mod config;
pub mod error;
pub mod kinematics;
pub mod math;
pub mod render;

pub use animation::{FollowState, PathFollower, PathSelection, Playback, TrajectoryLibrary, Transition};
pub use config::{CameraConfig, LightConfig, ViewerConfig};
pub use error::{KinematicsError, Result};
pub use kinematics::{ArmGeometry, ArmModel, DhRow, DhTable, JointAngles, WristSolution, WristSolver};
pub use math::{Matrix4, MatrixBank, Vector3, Vector4};
pub use render::{FrameUniforms, ModelUniforms, OrbitView, OrbitingLight};

//! Homogeneous-coordinate math module
//!
//! Column-major `Matrix4`, `Vector3`/`Vector4` value types with chainable
//! in-place mutators, and a slot-addressed `MatrixBank` for uniform upload.

mod bank;
mod matrix;
mod vector;

pub use bank::MatrixBank;
pub use matrix::Matrix4;
pub use vector::{Vector3, Vector4};

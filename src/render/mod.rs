//! View math module
//!
//! Camera, shadow light and uniform blocks for drawing the arm. Nothing here
//! touches a GPU; the output is matrices and bytes ready for upload.

pub mod camera;
pub mod light;
pub mod uniforms;

pub use camera::OrbitView;
pub use light::OrbitingLight;
pub use uniforms::{align_to, pack_aligned, FrameUniforms, ModelUniforms};
